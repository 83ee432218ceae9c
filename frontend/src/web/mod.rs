//! 浏览器平台适配层
//!
//! 核心 crate 的各个 trait 在这里得到浏览器实现：
//! fetch、LocalStorage / SessionStorage、定时器、History 路由与控制台日志。

pub mod console;
pub mod file;
mod http;
pub mod identity;
pub mod route;
pub mod router;
mod storage;
pub mod timer;

pub use http::FetchClient;
pub use storage::{LocalStore, SessionStore};
