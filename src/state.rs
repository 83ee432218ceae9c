//! 状态容器抽象
//!
//! 控制器只通过 `StateCell` 读写自己的状态，从而与具体的响应式框架解耦：
//! 前端注入基于 Leptos `RwSignal` 的实现，测试使用 `Rc<RefCell<T>>`。

use std::cell::RefCell;
use std::rc::Rc;

pub trait StateCell<T>: Clone {
    /// 读取状态（不建立响应式依赖）
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R;

    /// 修改状态并通知订阅者
    fn write(&self, f: impl FnOnce(&mut T));
}

impl<T> StateCell<T> for Rc<RefCell<T>> {
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }

    fn write(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.borrow_mut())
    }
}

/// 便捷构造：`Rc<RefCell<T>>`
pub fn local_cell<T>(value: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(value))
}
