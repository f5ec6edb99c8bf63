/// ### English
/// Bridge internal modules (atomic callback slots, guarded invocation, log forwarding).
///
/// ### 中文
/// 桥接内部模块（原子回调槽位、受保护调用、日志转发）。
pub(crate) mod host;
pub(crate) mod logger;
pub(crate) mod slot;
