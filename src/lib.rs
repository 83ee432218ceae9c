//! Chicham 客户端核心
//!
//! 与平台无关的业务逻辑：请求适配、会话、角色策略、贡献提交、审核队列与内容管理。
//! 所有平台相关的能力都通过 trait 注入：
//! - `HttpClient`：浏览器中为 fetch
//! - `KeyValueStore`：浏览器中为 LocalStorage / SessionStorage
//! - `StateCell`：浏览器中为 Leptos signal
//! - `Notifier`：浏览器中为 toast 队列

pub mod account;
pub mod cancel;
pub mod client;
pub mod config;
pub mod contribution;
pub mod error;
pub mod moderation;
pub mod notice;
pub mod policy;
pub mod request;
pub mod resource;
pub mod session;
pub mod state;
pub mod storage;

pub use cancel::TaskScope;
pub use client::ApiClient;
pub use config::AppConfig;
pub use error::{AppError, AppResult, FieldError};
pub use notice::{DialogContent, Notice, NoticeKind, Notifier, Tone};
pub use request::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use session::{SessionState, SessionStore};
pub use state::StateCell;
pub use storage::KeyValueStore;

pub use chicham_shared as shared;
