//! 核心 trait 的 Leptos 实现
//!
//! - `SignalCell`：以 `RwSignal` 承载控制器状态，组件可以直接订阅
//! - `Toaster`：提示消息队列，3 秒后自动移除

use crate::web::timer;
use chicham::{Notice, Notifier, StateCell};
use leptos::prelude::*;

/// 提示消息的显示时长
const TOAST_MILLIS: u32 = 3_000;

/// 基于 `RwSignal` 的状态容器
pub struct SignalCell<T: 'static>(RwSignal<T>);

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(RwSignal::new(value))
    }

    /// 建立响应式依赖的读取，供视图使用
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with(f)
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn write(&self, f: impl FnOnce(&mut T)) {
        self.0.update(f)
    }
}

/// 提示消息队列
#[derive(Clone, Copy)]
pub struct Toaster {
    notices: RwSignal<Vec<Notice>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
        }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.get()
    }

    pub fn dismiss(&self, notice: &Notice) {
        let id = notice.id;
        self.notices.update(|list| list.retain(|n| n.id != id));
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toaster {
    fn notify(&self, notice: Notice) {
        let id = notice.id;
        self.notices.update(|list| list.push(notice));

        let notices = self.notices;
        timer::after(TOAST_MILLIS, move || {
            // 信号可能已随应用卸载而释放
            let _ = notices.try_update(|list| list.retain(|n| n.id != id));
        });
    }
}
