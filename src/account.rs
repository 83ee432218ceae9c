//! 注册表单
//!
//! 注册接口接收 multipart 表单，校验全部在本地完成后才发出请求。

use crate::client::{ApiClient, decode};
use crate::error::{AppError, AppResult, FieldError};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use chicham_shared::protocol::RegisterRequest;
use serde_json::Value;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// 校验并生成请求；返回所有未通过的字段
    pub fn validate(&self) -> Result<RegisterRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::required(field));
            }
        }

        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            errors.push(FieldError::new("email", "Correo electrónico inválido"));
        }
        if !self.password.is_empty() && self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"),
            ));
        }
        if self.password != self.confirm_password {
            errors.push(FieldError::new(
                "confirmPassword",
                "Las contraseñas no coinciden",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

/// 提交注册
pub async fn register<H, S>(api: &ApiClient<H, S>, form: &RegisterForm) -> AppResult<()>
where
    H: HttpClient,
    S: KeyValueStore,
{
    let request = form.validate().map_err(AppError::Validation)?;
    let response = api
        .request_form(RegisterRequest::PATH, request.form_fields())
        .await;
    decode::<Value>(response)?;
    tracing::info!(email = %request.email, "account created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{MockHttpClient, RequestBody};
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn filled() -> RegisterForm {
        RegisterForm {
            first_name: "Tsamaraint".into(),
            last_name: "Wajai".into(),
            email: "tsama@chicham.ec".into(),
            password: "secreto".into(),
            confirm_password: "secreto".into(),
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = RegisterForm::default().validate().unwrap_err();
        assert_eq!(fields(&errors), ["firstName", "lastName", "email", "password"]);
    }

    #[test]
    fn test_checks_email_password_and_confirmation() {
        let form = RegisterForm {
            email: "sin-arroba".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..filled()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(fields(&errors), ["email", "password", "confirmPassword"]);
    }

    #[tokio::test]
    async fn test_register_sends_multipart_fields() {
        let http = MockHttpClient::new();
        http.mock_envelope(
            "https://api.test/api/users/create",
            "COD_OK",
            json!({"id": 1}),
            "",
        );
        let api = ApiClient::new(http.clone(), MemoryStore::new(), "https://api.test");

        register(&api, &filled()).await.unwrap();

        let sent = http.requests();
        assert_eq!(sent.len(), 1);
        let Some(RequestBody::Form(form)) = &sent[0].body else {
            panic!("expected multipart body");
        };
        assert!(form.contains(&("nombre".to_string(), "Tsamaraint".to_string())));
        assert!(form.contains(&("apellido".to_string(), "Wajai".to_string())));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let http = MockHttpClient::new();
        let api = ApiClient::new(http.clone(), MemoryStore::new(), "https://api.test");

        let err = register(&api, &RegisterForm::default()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(http.requests().is_empty());
    }
}
