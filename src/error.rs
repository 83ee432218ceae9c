//! 客户端错误类型
//!
//! 所有处理器都在调用点捕获错误并转换为通知或表单内联提示，
//! 因此这里的错误只需携带足够的信息用于展示与日志。

use chicham_shared::{CODE_NETWORK_ERROR, protocol::ApiResponse};
use thiserror::Error;

/// 单个字段的校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: "Este campo es obligatorio".to_string(),
        }
    }

    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// 请求未能到达后端（fetch 被拒绝）
    #[error("network error: {0}")]
    Network(String),

    /// 后端返回了非成功的业务码
    #[error("[{code}] {message}")]
    Backend { code: String, message: String },

    /// 响应结构与预期不符
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// 本地表单校验失败，未发出任何请求
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("unrecognized role: {0:?}")]
    UnknownRole(String),

    /// 本地存储中的数据损坏
    #[error("corrupted storage entry {key}: {detail}")]
    Storage { key: String, detail: String },

    /// 所属的作用域已被取消（组件卸载）
    #[error("operation cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AppError {
    /// 由非成功的归一化响应构造错误
    pub fn from_response(response: ApiResponse) -> Self {
        if response.code == CODE_NETWORK_ERROR {
            AppError::Network(response.message)
        } else {
            AppError::Backend {
                code: response.code,
                message: response.message,
            }
        }
    }

    /// 面向用户的提示文本
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Error".to_string(),
            AppError::Backend { message, code } if message.is_empty() => code.clone(),
            AppError::Backend { message, .. } => message.clone(),
            AppError::Validation(_) => "Por favor completa los campos obligatorios".to_string(),
            AppError::UnknownRole(_) => "Tu cuenta no tiene un rol válido".to_string(),
            AppError::Decode(_) | AppError::Storage { .. } | AppError::Config(_) => {
                "Ocurrió un error inesperado".to_string()
            }
            AppError::Cancelled => "Operación cancelada".to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_sentinel_becomes_network_error() {
        let err = AppError::from_response(ApiResponse::network_error());
        assert_eq!(err, AppError::Network("Error".into()));
        assert_eq!(err.user_message(), "Error");
    }

    #[test]
    fn test_backend_message_is_surfaced_verbatim() {
        let err = AppError::Backend {
            code: "COD_DUPLICATE".into(),
            message: "La palabra ya existe".into(),
        };
        assert_eq!(err.user_message(), "La palabra ya existe");
        assert_eq!(err.to_string(), "[COD_DUPLICATE] La palabra ya existe");
    }
}
