/// ### English
/// `codec_host_bridge` cdylib crate root.
/// Exposes the C ABI via `ffi`; core implementation lives under `bridge`.
///
/// ### 中文
/// `codec_host_bridge` 的 cdylib crate 根。
/// 通过 `ffi` 导出 C ABI；核心实现位于 `bridge` 模块。
mod bridge;
mod ffi;

pub use bridge::host::{HostBridge, LogSinkFn, ResolutionFn};
