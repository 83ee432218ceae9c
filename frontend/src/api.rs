//! 应用级依赖：配置、API 客户端与提示队列
//!
//! 三者在 `App` 根部创建一次，通过 Context 注入各页面。

use crate::state::Toaster;
use crate::web::{FetchClient, LocalStore};
use chicham::config::{
    KEY_API_BASE_URL, KEY_API_BASE_URL_FALLBACK, KEY_IDENTITY_API_KEY, KEY_IDENTITY_AUTH_DOMAIN, KEY_IDENTITY_PROJECT_ID,
    KEY_LOG_LEVEL,
};
use chicham::{ApiClient, AppConfig, AppResult};
use leptos::prelude::*;

/// 浏览器中的 API 客户端：fetch + LocalStorage 中的令牌
pub type Api = ApiClient<FetchClient, LocalStore>;

/// 构建时注入的环境变量
fn build_env(key: &str) -> Option<&'static str> {
    match key {
        KEY_API_BASE_URL => option_env!("CHICHAM_URL_FETCH"),
        KEY_API_BASE_URL_FALLBACK => option_env!("VITE_URL_FETCH"),
        KEY_LOG_LEVEL => option_env!("CHICHAM_LOG"),
        KEY_IDENTITY_API_KEY => option_env!("CHICHAM_FIREBASE_API_KEY"),
        KEY_IDENTITY_AUTH_DOMAIN => option_env!("CHICHAM_FIREBASE_AUTH_DOMAIN"),
        KEY_IDENTITY_PROJECT_ID => option_env!("CHICHAM_FIREBASE_PROJECT_ID"),
        _ => None,
    }
}

pub fn load_config() -> AppResult<AppConfig> {
    AppConfig::from_lookup(|key| build_env(key).map(str::to_string))
}

/// 根组件持有的共享依赖
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub api: Api,
    pub toaster: Toaster,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let api = ApiClient::new(FetchClient, LocalStore, config.api_base_url.clone());
        Self {
            config,
            api,
            toaster: Toaster::new(),
        }
    }
}

/// 从 Context 获取应用依赖
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
