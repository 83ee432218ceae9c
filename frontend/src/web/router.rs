//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："请求 -> 守卫(角色) -> 写入 History -> 更新信号"。

use chicham::policy::Role;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, use_push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if use_push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, path, "history update failed");
    }
}

/// 路由器服务
///
/// 通过注入的角色信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 当前登录角色；`None` 表示未登录
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(role: Signal<Option<Role>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial = requested.guard(role.get_untracked());
        if initial != requested {
            write_history(initial.to_path(), false);
        }
        let (current_route, set_route) = signal(initial);

        Self {
            current_route,
            set_route,
            role,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到路径（经过守卫）
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolved = target.guard(self.role.get_untracked());
        if resolved != target {
            tracing::info!(requested = %target, redirect = %resolved, "route guarded");
        }
        write_history(resolved.to_path(), use_push);
        self.set_route.set(resolved);
    }

    /// 浏览器后退/前进时同样执行守卫
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            router.navigate_to_route(target, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 角色变化（登录、注销）后重新校验当前页面
    fn setup_role_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let role = router.role.get();
            let route = router.current_route.get_untracked();
            let resolved = route.guard(role);
            if resolved != route {
                tracing::info!(from = %route, to = %resolved, "session changed, redirecting");
                write_history(resolved.to_path(), true);
                router.set_route.set(resolved);
            }
        });
    }
}

fn provide_router(role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(role);
    router.init_popstate_listener();
    router.setup_role_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone + Send + Sync + 'static {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 当前登录角色
    role: Signal<Option<Role>>,
    children: Children,
) -> impl IntoView {
    provide_router(role);
    children()
}

/// 路由出口组件
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
