//! 请求生命周期管理
//!
//! 每个控制器持有一个 `TaskScope`，经由它发出的异步操作在作用域取消时被中止。
//! 前端在组件的 `on_cleanup` 中调用 `cancel()`，被中止的操作返回
//! `AppError::Cancelled` 且不会再写入请求结果。

use crate::error::{AppError, AppResult};
use futures::future::{AbortHandle, Abortable};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct ScopeInner {
    next_id: u64,
    in_flight: Vec<(u64, AbortHandle)>,
    cancelled: bool,
}

#[derive(Clone, Default)]
pub struct TaskScope {
    inner: Arc<Mutex<ScopeInner>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 在作用域内执行 future；作用域已取消或执行中被取消时返回 `Cancelled`
    pub async fn run<F: Future>(&self, fut: F) -> AppResult<F::Output> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = {
            let mut inner = self.lock();
            if inner.cancelled {
                return Err(AppError::Cancelled);
            }
            inner.next_id += 1;
            let id = inner.next_id;
            inner.in_flight.push((id, handle));
            id
        };

        let result = Abortable::new(fut, registration).await;
        self.lock().in_flight.retain(|(other, _)| *other != id);
        result.map_err(|_| AppError::Cancelled)
    }

    /// 中止所有进行中的操作，并拒绝之后的新操作
    pub fn cancel(&self) {
        let mut inner = self.lock();
        inner.cancelled = true;
        for (_, handle) in inner.in_flight.drain(..) {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().cancelled
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    #[tokio::test]
    async fn test_completed_work_passes_through() {
        let scope = TaskScope::new();
        let value = scope.run(async { 7 }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancel_aborts_in_flight_work() {
        let scope = TaskScope::new();
        let (_tx, rx) = oneshot::channel::<u8>();

        let pending = scope.run(rx);
        let cancel = async {
            tokio::task::yield_now().await;
            scope.cancel();
        };
        let (result, _) = futures::join!(pending, cancel);

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(scope.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_scope_rejects_new_work() {
        let scope = TaskScope::new();
        scope.cancel();
        assert_eq!(scope.run(async { 1 }).await, Err(AppError::Cancelled));
    }
}
