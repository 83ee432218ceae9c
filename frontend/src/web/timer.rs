//! 定时器
//!
//! 一次性延时任务，用于提示消息的自动消失。

use gloo_timers::callback::Timeout;

/// 在 `millis` 毫秒后执行一次 `callback`
///
/// 定时器随即脱离所有权，页面切换也不会取消它；
/// 回调里只能做幂等的状态清理。
pub fn after<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    Timeout::new(millis, callback).forget();
}
