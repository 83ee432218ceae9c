//! 会话上下文
//!
//! 核心的 `SessionStore` 在此绑定 LocalStorage 与 signal，
//! 路由服务只依赖由它派生出的角色信号。

use crate::state::SignalCell;
use crate::web::LocalStore;
use chicham::policy::Role;
use chicham::{SessionState, SessionStore};
use leptos::prelude::*;

pub type Session = SessionStore<LocalStore, SignalCell<SessionState>>;

#[derive(Clone)]
pub struct SessionContext {
    pub store: Session,
    state: SignalCell<SessionState>,
}

impl SessionContext {
    /// 创建会话并立即从存储恢复
    pub fn new() -> Self {
        let state = SignalCell::new(SessionState::default());
        let store = SessionStore::new(LocalStore, state);
        store.hydrate();
        Self { store, state }
    }

    /// 响应式读取当前会话
    pub fn state(&self) -> SessionState {
        self.state.with(Clone::clone)
    }

    /// 当前角色信号（用于路由服务注入）；未登录为 `None`
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|s| if s.is_logged_in() { s.role() } else { None })
        })
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
