//! ### English
//! C ABI surface for `codec_host_bridge`.
//! All exported symbols are `extern "C"` functions. Strings passed from the managed host must
//! be NUL-terminated; callback pointers registered here must stay valid for the rest of the
//! process. Every entry point is fail-silent: an unset slot or a NULL argument is absorbed
//! locally, never surfaced.
//!
//! ### 中文
//! `codec_host_bridge` 的 C ABI 接口层。
//! 所有导出符号均为 `extern "C"` 函数。托管宿主传入的字符串必须以 NUL 结尾；在此注册的
//! 回调指针必须在进程余下的生命周期内有效。每个入口都静默失败：槽位未注册或参数为 NULL
//! 时就地吸收，绝不上抛。

use std::ffi::{CStr, c_char, c_int};

use crate::bridge::host::{HostBridge, LogSinkFn, ResolutionFn};
use crate::bridge::logger;

/// ### English
/// C ABI version for `codec_host_bridge`.
///
/// ### 中文
/// `codec_host_bridge` 的 C ABI 版本号。
const CODEC_HOST_BRIDGE_ABI_VERSION: u32 = 1;

/// ### English
/// The process-wide bridge instance behind the C ABI.
///
/// Registration uses an atomic pointer swap, so a host registering on one thread while
/// native code invokes on another observes either the old or the new callback.
///
/// ### 中文
/// C ABI 背后的进程级桥实例。
///
/// 注册通过原子指针交换完成：宿主在一个线程注册、native 代码在另一个线程调用时，看到的
/// 要么是旧回调、要么是新回调。
static BRIDGE: HostBridge = HostBridge::new();

#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn codec_host_bridge_abi_version() -> u32 {
    CODEC_HOST_BRIDGE_ABI_VERSION
}

#[unsafe(no_mangle)]
/// ### English
/// Registers the host log sink, replacing any previous registration.
/// Passing NULL leaves the slot untouched.
///
/// ### 中文
/// 注册宿主日志接收器，完全替换之前的注册。
/// 传入 NULL 则槽位保持不变。
pub extern "C" fn codec_host_bridge_register_log_sink(sink: Option<LogSinkFn>) {
    let Some(sink) = sink else {
        return;
    };
    BRIDGE.register_log_sink(sink);
}

#[unsafe(no_mangle)]
/// ### English
/// Registers the host resolution accessor, replacing any previous registration.
/// Passing NULL leaves the slot untouched.
///
/// ### 中文
/// 注册宿主分辨率访问器，完全替换之前的注册。
/// 传入 NULL 则槽位保持不变。
pub extern "C" fn codec_host_bridge_register_resolution_accessor(accessor: Option<ResolutionFn>) {
    let Some(accessor) = accessor else {
        return;
    };
    BRIDGE.register_resolution_accessor(accessor);
}

#[unsafe(no_mangle)]
/// ### English
/// Sends a NUL-terminated message to the registered log sink, if any.
///
/// Compiled out in non-diagnostic builds (no sink invocation regardless of registration).
///
/// ### 中文
/// 将 NUL 结尾的消息发送给已注册的日志接收器（如有）。
///
/// 在非诊断构建中被编译掉（无论是否注册，接收器都不会被调用）。
pub unsafe extern "C" fn codec_host_bridge_log(message: *const c_char) {
    if message.is_null() {
        return;
    }
    BRIDGE.log(unsafe { CStr::from_ptr(message) });
}

#[unsafe(no_mangle)]
/// ### English
/// Soft assertion: if `condition` is zero, routes `message` through the log path.
/// Never aborts or alters control flow.
///
/// ### 中文
/// 软断言：若 `condition` 为零，将 `message` 经日志路径上报。
/// 从不中止进程，也不改变控制流。
pub unsafe extern "C" fn codec_host_bridge_check(condition: u8, message: *const c_char) {
    if message.is_null() {
        return;
    }
    BRIDGE.check(condition != 0, unsafe { CStr::from_ptr(message) });
}

#[unsafe(no_mangle)]
/// ### English
/// Hands the width and height locations to the registered resolution accessor, if any.
/// With no accessor registered (or a NULL location) both values are left unchanged.
///
/// ### 中文
/// 将宽、高两个位置交给已注册的分辨率访问器（如有）。
/// 未注册访问器（或位置为 NULL）时两个值保持不变。
pub unsafe extern "C" fn codec_host_bridge_apply_resolution(width: *mut c_int, height: *mut c_int) {
    if width.is_null() || height.is_null() {
        return;
    }
    BRIDGE.apply_resolution(unsafe { &mut *width }, unsafe { &mut *height });
}

#[unsafe(no_mangle)]
/// ### English
/// Installs the Rust-side `log` facade forwarder onto the process-wide bridge.
/// Returns `true` if this call installed it, `false` if a logger was already set.
///
/// ### 中文
/// 为进程级桥安装 Rust 侧 `log` facade 转发器。
/// 本次调用完成安装时返回 `true`；若已存在 logger 则返回 `false`。
pub extern "C" fn codec_host_bridge_install_rust_logger() -> bool {
    logger::install(&BRIDGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static SINK_CALLS: AtomicUsize = AtomicUsize::new(0);
    static SINK_LAST: Mutex<String> = Mutex::new(String::new());
    unsafe extern "C" fn sink(message: *const c_char) {
        let text = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
        *SINK_LAST.lock().unwrap() = text;
        SINK_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    unsafe extern "C" fn accessor(width: *mut c_int, height: *mut c_int) {
        unsafe {
            *width = 1920;
            *height = 1080;
        }
    }

    // The C ABI operates on the process-wide bridge, so everything lives in one test.
    #[test]
    fn exported_surface_is_fail_silent_end_to_end() {
        assert_eq!(codec_host_bridge_abi_version(), 1);

        // NULL registrations and NULL arguments are absorbed.
        codec_host_bridge_register_log_sink(None);
        codec_host_bridge_register_resolution_accessor(None);
        unsafe {
            codec_host_bridge_log(ptr::null());
            codec_host_bridge_check(0, ptr::null());
            codec_host_bridge_apply_resolution(ptr::null_mut(), ptr::null_mut());
        }

        // Unregistered slots: log is a no-op, resolution stays unchanged.
        let mut width: c_int = 640;
        let mut height: c_int = 480;
        unsafe {
            codec_host_bridge_log(c"dropped".as_ptr());
            codec_host_bridge_apply_resolution(&mut width, &mut height);
        }
        assert_eq!((width, height), (640, 480));

        codec_host_bridge_register_log_sink(Some(sink));
        codec_host_bridge_register_resolution_accessor(Some(accessor));

        unsafe {
            codec_host_bridge_check(1, c"fine".as_ptr());
            codec_host_bridge_check(0, c"resolution mismatch".as_ptr());
            codec_host_bridge_apply_resolution(&mut width, &mut height);
        }

        #[cfg(any(debug_assertions, feature = "diagnostics"))]
        {
            assert_eq!(SINK_CALLS.load(Ordering::SeqCst), 1);
            assert_eq!(SINK_LAST.lock().unwrap().as_str(), "resolution mismatch");
        }
        #[cfg(not(any(debug_assertions, feature = "diagnostics")))]
        assert_eq!(SINK_CALLS.load(Ordering::SeqCst), 0);

        assert_eq!((width, height), (1920, 1080));
    }
}
