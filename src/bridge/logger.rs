//! ### English
//! Forwards Rust `log` facade records through the host log sink.
//!
//! Native-side code written against `log::debug!` and friends reaches the managed host's
//! console once the host has registered a sink and called the install entry point. The
//! forwarder follows the same compile-time diagnostic gate as the bridge itself: in
//! non-diagnostic builds the max level is `Off` and nothing is formatted.
//!
//! ### 中文
//! 将 Rust `log` facade 的记录经宿主日志接收器转发。
//!
//! 宿主注册接收器并调用安装入口后，native 侧通过 `log::debug!` 等宏写出的日志会到达托管
//! 宿主的控制台。转发器遵循与桥本体相同的编译期诊断开关：非诊断构建中最大级别为 `Off`，
//! 不做任何格式化。

use std::ffi::CString;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};

use super::host::HostBridge;

#[cfg(any(debug_assertions, feature = "diagnostics"))]
const MAX_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(any(debug_assertions, feature = "diagnostics")))]
const MAX_LEVEL: LevelFilter = LevelFilter::Off;

/// ### English
/// Bridge the installed logger forwards to. Null until [`install`] runs.
///
/// ### 中文
/// 已安装 logger 的转发目标；[`install`] 运行前为空指针。
static FORWARD_TO: AtomicPtr<HostBridge> = AtomicPtr::new(ptr::null_mut());

static LOGGER: HostLogger = HostLogger;

/// ### English
/// `log::Log` implementation that renders records as `LEVEL target: message` and hands them
/// to the bridge's guarded log path.
///
/// ### 中文
/// `log::Log` 实现：把记录渲染为 `LEVEL target: message` 并交给桥的受保护日志路径。
struct HostLogger;

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let raw = FORWARD_TO.load(Ordering::Acquire);
        if raw.is_null() {
            return;
        }
        let bridge = unsafe { &*raw };

        let line = format!("{} {}: {}", record.level(), record.target(), record.args());
        // Interior NUL cannot cross the C boundary; drop the record instead of erroring.
        let Ok(line) = CString::new(line) else {
            return;
        };
        bridge.log(&line);
    }

    fn flush(&self) {}
}

/// ### English
/// Installs the forwarder as the process logger.
///
/// Idempotent and fail-silent: returns `true` if this call installed it, `false` if some
/// logger (this one included) was already set. `bridge` must live for the rest of the
/// process, which the `ffi` layer's static instance does.
///
/// ### 中文
/// 将转发器安装为进程 logger。
///
/// 幂等且静默失败：本次调用完成安装时返回 `true`；若已存在 logger（包括本转发器）则返回
/// `false`。`bridge` 必须存活到进程结束，`ffi` 层的静态实例满足这一点。
pub(crate) fn install(bridge: &'static HostBridge) -> bool {
    FORWARD_TO.store(
        bridge as *const HostBridge as *mut HostBridge,
        Ordering::Release,
    );
    match log::set_logger(&LOGGER) {
        Ok(()) => {
            log::set_max_level(MAX_LEVEL);
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, c_char};
    use std::sync::Mutex;

    static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());
    unsafe extern "C" fn capture(message: *const c_char) {
        let text = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
        LINES.lock().unwrap().push(text);
    }

    // The log facade is process-global, so everything lives in one test.
    #[cfg(any(debug_assertions, feature = "diagnostics"))]
    #[test]
    fn records_are_forwarded_through_the_sink() {
        static BRIDGE: HostBridge = HostBridge::new();
        BRIDGE.register_log_sink(capture);

        assert!(install(&BRIDGE));
        assert!(!install(&BRIDGE));

        log::debug!(target: "decoder", "surface reset");
        log::trace!(target: "decoder", "filtered out");

        let lines = LINES.lock().unwrap();
        assert_eq!(lines.as_slice(), ["DEBUG decoder: surface reset"]);
    }
}
