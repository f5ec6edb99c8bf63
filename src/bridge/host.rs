//! ### English
//! The host callback bridge: two independent registration points and the guarded invocation
//! helpers built on them.
//!
//! Diagnostic logging is a compile-time gate, not a runtime flag: outside
//! `debug_assertions` builds (and absent the `diagnostics` cargo feature) the log path is
//! compiled out entirely, so release builds pay zero cost for it.
//!
//! ### 中文
//! 宿主回调桥：两个独立的注册点，以及基于它们的受保护调用辅助函数。
//!
//! 诊断日志是编译期开关而非运行时标志：在非 `debug_assertions` 构建中（且未启用
//! `diagnostics` cargo feature 时），日志路径会被整体编译掉，release 构建零开销。

use std::ffi::{CStr, c_char, c_int};

use dpi::PhysicalSize;

use super::slot::{CallbackSlot, RawCallback};

/// ### English
/// Host log sink: accepts one NUL-terminated message, returns nothing.
///
/// ### 中文
/// 宿主日志接收器：接受一条 NUL 结尾的消息，无返回值。
pub type LogSinkFn = unsafe extern "C" fn(*const c_char);

/// ### English
/// Host resolution accessor: may read and/or overwrite the width and height locations.
///
/// ### 中文
/// 宿主分辨率访问器：可以读取和/或改写宽、高两个位置。
pub type ResolutionFn = unsafe extern "C" fn(*mut c_int, *mut c_int);

impl RawCallback for LogSinkFn {
    #[inline]
    fn into_raw(self) -> *mut () {
        self as *mut ()
    }

    #[inline]
    unsafe fn from_raw(raw: *mut ()) -> Self {
        unsafe { std::mem::transmute::<*mut (), Self>(raw) }
    }
}

impl RawCallback for ResolutionFn {
    #[inline]
    fn into_raw(self) -> *mut () {
        self as *mut ()
    }

    #[inline]
    unsafe fn from_raw(raw: *mut ()) -> Self {
        unsafe { std::mem::transmute::<*mut (), Self>(raw) }
    }
}

/// ### English
/// Process-agnostic bridge between native code and the managed host.
///
/// The bridge holds non-owning references to host-supplied callbacks; the host keeps them
/// alive for the whole session. An unregistered slot is a normal state, not an error: every
/// entry point absorbs it silently.
///
/// The `ffi` layer owns one process-wide instance for the C ABI; everything else takes the
/// bridge by reference.
///
/// ### 中文
/// 原生代码与托管宿主之间的桥。
///
/// 桥只持有宿主回调的非拥有引用；宿主保证这些回调在整个会话期间有效。槽位未注册是正常状态
/// 而非错误：每个入口都会静默吸收这一情况。
///
/// `ffi` 层为 C ABI 持有唯一的进程级实例；其余代码一律按引用使用。
pub struct HostBridge {
    /// ### English
    /// Slot for the host log sink.
    ///
    /// ### 中文
    /// 宿主日志接收器槽位。
    log_sink: CallbackSlot<LogSinkFn>,
    /// ### English
    /// Slot for the host resolution accessor.
    ///
    /// ### 中文
    /// 宿主分辨率访问器槽位。
    resolution: CallbackSlot<ResolutionFn>,
}

impl HostBridge {
    #[inline]
    pub const fn new() -> Self {
        Self {
            log_sink: CallbackSlot::new(),
            resolution: CallbackSlot::new(),
        }
    }

    /// ### English
    /// Registers the log sink, replacing any previous registration.
    ///
    /// ### 中文
    /// 注册日志接收器，完全替换之前的注册。
    #[inline]
    pub fn register_log_sink(&self, sink: LogSinkFn) {
        self.log_sink.store(sink);
    }

    /// ### English
    /// Registers the resolution accessor, replacing any previous registration.
    ///
    /// ### 中文
    /// 注册分辨率访问器，完全替换之前的注册。
    #[inline]
    pub fn register_resolution_accessor(&self, accessor: ResolutionFn) {
        self.resolution.store(accessor);
    }

    /// ### English
    /// Sends `message` to the host log sink, if one is registered.
    ///
    /// Compiled out entirely in non-diagnostic builds; the sink is then never invoked
    /// regardless of registration state.
    ///
    /// ### 中文
    /// 若已注册日志接收器，则将 `message` 发送给宿主。
    ///
    /// 在非诊断构建中整体编译掉；此时无论是否注册，接收器都不会被调用。
    #[inline]
    pub fn log(&self, message: &CStr) {
        #[cfg(any(debug_assertions, feature = "diagnostics"))]
        if let Some(sink) = self.log_sink.get() {
            // The host keeps the sink valid for the session; the message outlives the call.
            unsafe { sink(message.as_ptr()) };
        }
        #[cfg(not(any(debug_assertions, feature = "diagnostics")))]
        let _ = message;
    }

    /// ### English
    /// Soft assertion: if `condition` is false, routes `message` through [`Self::log`].
    ///
    /// Never aborts, panics, or signals failure to the caller; a true condition has no
    /// observable effect.
    ///
    /// ### 中文
    /// 软断言：若 `condition` 为假，将 `message` 经 [`Self::log`] 上报。
    ///
    /// 从不中止进程、panic 或向调用方传递失败；条件为真时无任何可观察效果。
    #[inline]
    pub fn check(&self, condition: bool, message: &CStr) {
        if !condition {
            self.log(message);
        }
    }

    /// ### English
    /// Hands the two locations to the host resolution accessor, if one is registered.
    ///
    /// The accessor may read and/or overwrite either value; with no accessor registered both
    /// locations are left bit-for-bit unchanged.
    ///
    /// ### 中文
    /// 若已注册分辨率访问器，则把两个位置交给宿主。
    ///
    /// 访问器可以读取和/或改写任一值；未注册时两个位置保持逐位不变。
    #[inline]
    pub fn apply_resolution(&self, width: &mut c_int, height: &mut c_int) {
        if let Some(accessor) = self.resolution.get() {
            // The host keeps the accessor valid for the session; both locations are live
            // exclusive borrows for the duration of the call.
            unsafe { accessor(width, height) };
        }
    }

    /// ### English
    /// Runs `fallback` through the resolution accessor and returns the result as a typed
    /// size, clamped to at least 1x1.
    ///
    /// With no accessor registered this returns `fallback` (clamped).
    ///
    /// ### 中文
    /// 将 `fallback` 交给分辨率访问器处理，并以类型化尺寸返回结果（最小钳制为 1x1）。
    ///
    /// 未注册访问器时返回（钳制后的）`fallback`。
    pub fn negotiate(&self, fallback: PhysicalSize<u32>) -> PhysicalSize<u32> {
        let mut width = fallback.width.max(1) as c_int;
        let mut height = fallback.height.max(1) as c_int;
        self.apply_resolution(&mut width, &mut height);
        PhysicalSize::new(width.max(1) as u32, height.max(1) as u32)
    }
}

impl Default for HostBridge {
    fn default() -> Self {
        Self::new()
    }
}
