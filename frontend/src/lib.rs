//! Chicham 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web`: 浏览器平台适配（fetch、存储、路由、日志）
//! - `api` / `session`: 在根部创建一次并注入的共享依赖
//! - `state`: 核心 trait 的 Leptos 实现
//! - `components`: UI 组件层，业务状态全部交给 `chicham` 的控制器

mod api;
mod session;
mod state;
mod components {
    pub mod admin;
    pub mod confirm_dialog;
    pub mod contribute;
    pub mod home;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod pager;
    pub mod register;
    pub mod student;
    pub mod toast;
}
pub mod web;

pub use api::load_config;

use crate::api::AppContext;
use crate::components::admin::dashboard::DashboardPage;
use crate::components::admin::moderation::ModerationPage;
use crate::components::admin::resources::resource_page;
use crate::components::contribute::ContributePage;
use crate::components::home::HomePage;
use crate::components::layout::Shell;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::student::{StudentHome, catalog_page};
use crate::components::toast::Toasts;
use crate::session::SessionContext;
use chicham::AppConfig;
use chicham_shared::{DictionaryEntry, Lesson, Story};
use leptos::prelude::*;
use web::route::{AdminPage, AppRoute, StudentPage};
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件；登录后的页面统一包在 `Shell` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Student(page) => match page {
            StudentPage::Inicio => view! { <Shell title="Inicio"><StudentHome /></Shell> }.into_any(),
            StudentPage::Lecciones => {
                view! { <Shell title="Lecciones">{catalog_page::<Lesson>()}</Shell> }.into_any()
            }
            StudentPage::Diccionario => {
                view! { <Shell title="Diccionario">{catalog_page::<DictionaryEntry>()}</Shell> }
                    .into_any()
            }
            StudentPage::Cuentos => {
                view! { <Shell title="Cuentos">{catalog_page::<Story>()}</Shell> }.into_any()
            }
            StudentPage::Contribuir => {
                view! { <Shell title="Contribuir"><ContributePage /></Shell> }.into_any()
            }
        },
        AppRoute::Admin(page) => match page {
            AdminPage::Dashboard => {
                view! { <Shell title="Panel"><DashboardPage /></Shell> }.into_any()
            }
            AdminPage::Lecciones => {
                view! { <Shell title="Lecciones">{resource_page::<Lesson>()}</Shell> }.into_any()
            }
            AdminPage::Diccionario => {
                view! { <Shell title="Diccionario">{resource_page::<DictionaryEntry>()}</Shell> }
                    .into_any()
            }
            AdminPage::Cuentos => {
                view! { <Shell title="Cuentos">{resource_page::<Story>()}</Shell> }.into_any()
            }
            AdminPage::Contribuciones => {
                view! { <Shell title="Contribuciones"><ModerationPage /></Shell> }.into_any()
            }
        },
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 共享依赖：配置、API 客户端、提示队列
    provide_context(AppContext::new(config));

    // 2. 会话：创建时即从 LocalStorage 恢复
    let session = SessionContext::new();
    provide_context(session.clone());

    // 3. 角色信号注入路由服务
    let role = session.role_signal();

    view! {
        <Router role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <Toasts />
    }
}
