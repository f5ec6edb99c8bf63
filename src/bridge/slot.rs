use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

/// ### English
/// Conversion between a C callback and its type-erased raw form stored in a slot.
///
/// Implementors are non-null `extern "C"` function pointers, so the null raw value is free to
/// mean "unregistered".
///
/// ### 中文
/// C 回调与其存入槽位的类型擦除原始形式之间的转换。
///
/// 实现者均为非空的 `extern "C"` 函数指针，因此空指针可以表示“未注册”。
pub(crate) trait RawCallback: Copy {
    /// ### English
    /// Erases the callback to a raw pointer. Never returns null.
    ///
    /// ### 中文
    /// 将回调擦除为原始指针；不会返回空指针。
    fn into_raw(self) -> *mut ();

    /// ### English
    /// Recovers the callback from a raw pointer.
    ///
    /// # Safety
    /// `raw` must be non-null and must have been produced by `into_raw` on the same type.
    ///
    /// ### 中文
    /// 从原始指针恢复回调。
    ///
    /// # Safety
    /// `raw` 必须非空，且必须由同一类型的 `into_raw` 产生。
    unsafe fn from_raw(raw: *mut ()) -> Self;
}

/// ### English
/// Process-wide nullable cell for one host callback (latest-wins).
///
/// - Writers use a Release store; readers use an Acquire load, so a registration racing an
///   invocation observes either the old or the new callback, never a torn value.
/// - One-way: there is no clear operation, matching the host contract (register once at
///   startup, callback stays valid for the session).
///
/// ### 中文
/// 进程级、可为空的宿主回调槽位（只保留最新值）。
///
/// - 写端使用 Release store，读端使用 Acquire load；注册与调用并发时，读到的要么是旧回调、
///   要么是新回调，不会出现撕裂值。
/// - 单向：没有清除操作，对应宿主契约（启动时注册一次，回调在整个会话期间有效）。
pub(crate) struct CallbackSlot<F> {
    /// ### English
    /// Null while unregistered; otherwise the erased callback.
    ///
    /// ### 中文
    /// 未注册时为空指针；否则为已擦除的回调。
    ptr: AtomicPtr<()>,
    _callback: PhantomData<F>,
}

impl<F: RawCallback> CallbackSlot<F> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            _callback: PhantomData,
        }
    }

    /// ### English
    /// Registers `callback`, replacing any previous registration.
    ///
    /// ### 中文
    /// 注册 `callback`，完全替换之前的注册。
    #[inline]
    pub(crate) fn store(&self, callback: F) {
        self.ptr.store(callback.into_raw(), Ordering::Release);
    }

    /// ### English
    /// Returns the registered callback, or `None` while unregistered.
    ///
    /// ### 中文
    /// 返回已注册的回调；未注册时返回 `None`。
    #[inline]
    pub(crate) fn get(&self) -> Option<F> {
        let raw = self.ptr.load(Ordering::Acquire);
        if raw.is_null() {
            None
        } else {
            Some(unsafe { F::from_raw(raw) })
        }
    }
}

impl<F: RawCallback> Default for CallbackSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}
