//! 运行时配置
//!
//! 配置来源由调用方提供（前端为编译期环境变量），这里只负责读取键、
//! 补默认值与校验。

use crate::error::{AppError, AppResult};
use std::str::FromStr;
use tracing::Level;

pub const KEY_API_BASE_URL: &str = "CHICHAM_URL_FETCH";
/// 旧部署沿用的后端地址变量名，`KEY_API_BASE_URL` 缺失时读取
pub const KEY_API_BASE_URL_FALLBACK: &str = "VITE_URL_FETCH";
pub const KEY_LOG_LEVEL: &str = "CHICHAM_LOG";
pub const KEY_IDENTITY_API_KEY: &str = "CHICHAM_FIREBASE_API_KEY";
pub const KEY_IDENTITY_AUTH_DOMAIN: &str = "CHICHAM_FIREBASE_AUTH_DOMAIN";
pub const KEY_IDENTITY_PROJECT_ID: &str = "CHICHAM_FIREBASE_PROJECT_ID";

/// 未配置时使用的默认值
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// 身份提供方（OAuth 弹窗）的公开配置
///
/// 没有内置的回退值：三个键必须全部提供，否则视为未启用 Google 登录。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
    pub identity: Option<IdentityConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            identity: None,
        }
    }
}

impl AppConfig {
    /// 从任意键值来源构建配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = read(KEY_API_BASE_URL).or_else(|| read(KEY_API_BASE_URL_FALLBACK));
        let api_base_url = match base_url {
            Some(url) => {
                let url = url.trim().to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(AppError::Config(format!(
                        "{KEY_API_BASE_URL} must be an http(s) URL, got {url:?}"
                    )));
                }
                url
            }
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let log_level = match read(KEY_LOG_LEVEL) {
            Some(level) => Level::from_str(level.trim())
                .map_err(|_| AppError::Config(format!("unknown log level {level:?}")))?,
            None => DEFAULT_LOG_LEVEL,
        };

        let identity = match (
            read(KEY_IDENTITY_API_KEY),
            read(KEY_IDENTITY_AUTH_DOMAIN),
            read(KEY_IDENTITY_PROJECT_ID),
        ) {
            (Some(api_key), Some(auth_domain), Some(project_id)) => Some(IdentityConfig {
                api_key,
                auth_domain,
                project_id,
            }),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            log_level,
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_identity_requires_all_keys() {
        let partial = AppConfig::from_lookup(lookup(&[(KEY_IDENTITY_API_KEY, "k")])).unwrap();
        assert!(partial.identity.is_none());

        let full = AppConfig::from_lookup(lookup(&[
            (KEY_IDENTITY_API_KEY, "k"),
            (KEY_IDENTITY_AUTH_DOMAIN, "chicham.firebaseapp.com"),
            (KEY_IDENTITY_PROJECT_ID, "chicham"),
        ]))
        .unwrap();
        assert_eq!(full.identity.unwrap().project_id, "chicham");
    }

    #[test]
    fn test_rejects_non_http_base_url_and_bad_level() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(KEY_API_BASE_URL, "ftp://x")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(KEY_LOG_LEVEL, "loud")])),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_fallback_base_url_key() {
        let config = AppConfig::from_lookup(lookup(&[(
            KEY_API_BASE_URL_FALLBACK,
            "https://legado.chicham.ec/",
        )]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://legado.chicham.ec/");

        let config = AppConfig::from_lookup(lookup(&[
            (KEY_API_BASE_URL, "https://api.chicham.ec/"),
            (KEY_API_BASE_URL_FALLBACK, "https://legado.chicham.ec/"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.chicham.ec/");
    }

    #[test]
    fn test_reads_level_and_url() {
        let config = AppConfig::from_lookup(lookup(&[
            (KEY_API_BASE_URL, "https://api.chicham.ec/"),
            (KEY_LOG_LEVEL, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.chicham.ec/");
        assert_eq!(config.log_level, Level::DEBUG);
    }
}
