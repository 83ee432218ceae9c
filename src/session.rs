//! 会话管理
//!
//! `SessionStore` 在应用启动时创建一次，通过上下文注入：
//! - 初始化：`hydrate()` 从本地存储恢复登录状态
//! - 登录：持久化三个键并返回该角色的落地页
//! - 注销：先清空存储与内存状态，再返回根路径供调用方导航

use crate::client::ApiClient;
use crate::error::{AppError, AppResult, FieldError};
use crate::policy::{self, ROOT_ROUTE, Role};
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use chicham_shared::protocol::{GoogleLoginRequest, LoginRequest, LoginResponse};
use chicham_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_ID_KEY, STORAGE_USER_KEY, User};

/// 会话状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 仅在首次从存储恢复期间为 true
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// 当前用户的角色；未登录或角色无法识别时为 `None`
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|u| Role::from_tag(&u.role))
    }
}

/// 已知凭据错误码的可读提示
pub fn login_error_message(code: &str, fallback: &str) -> String {
    let translated = match code {
        "COD_USER_NOT_FOUND" | "COD_USUARIO_NO_EXISTE" => "No existe una cuenta con ese correo",
        "COD_INVALID_PASSWORD" | "COD_PASSWORD_INCORRECTO" => "La contraseña es incorrecta",
        "COD_INVALID_CREDENTIALS" => "Correo o contraseña incorrectos",
        "COD_USER_DISABLED" => "Tu cuenta está deshabilitada",
        _ if fallback.is_empty() => "No se pudo iniciar sesión",
        _ => fallback,
    };
    translated.to_string()
}

#[derive(Clone)]
pub struct SessionStore<S, C> {
    store: S,
    state: C,
}

impl<S, C> SessionStore<S, C>
where
    S: KeyValueStore,
    C: StateCell<SessionState>,
{
    pub fn new(store: S, state: C) -> Self {
        Self { store, state }
    }

    pub fn state(&self) -> SessionState {
        self.state.read(Clone::clone)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read(SessionState::is_logged_in)
    }

    /// 从本地存储恢复会话
    ///
    /// 存储的用户 JSON 损坏时清除所有会话键，按未登录继续。
    pub fn hydrate(&self) {
        let user = match self.store.get(STORAGE_USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    let err = AppError::Storage {
                        key: STORAGE_USER_KEY.to_string(),
                        detail: e.to_string(),
                    };
                    tracing::warn!(error = %err, "discarding persisted session");
                    self.purge();
                    None
                }
            },
            None => None,
        };
        let token = user.as_ref().and_then(|_| self.store.get(STORAGE_TOKEN_KEY));

        self.state.write(|state| {
            state.user = user;
            state.token = token;
            state.loading = false;
        });
    }

    /// 保存登录结果，返回应跳转的路径
    pub fn login(&self, response: LoginResponse) -> &'static str {
        let LoginResponse { user, token } = response;

        match serde_json::to_string(&user) {
            Ok(json) => {
                self.store.set(STORAGE_USER_KEY, &json);
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize user"),
        }
        self.store.set(STORAGE_TOKEN_KEY, &token);
        self.store.set(STORAGE_USER_ID_KEY, &user.id);

        let landing = policy::landing_route(&user.role);
        tracing::info!(user = %user.id, role = %user.role, landing, "session started");

        self.state.write(|state| {
            state.user = Some(user);
            state.token = Some(token);
            state.loading = false;
        });
        landing
    }

    /// 注销：先清理状态，再返回根路径
    pub fn logout(&self) -> &'static str {
        self.purge();
        self.state.write(|state| {
            state.user = None;
            state.token = None;
            state.loading = false;
        });
        tracing::info!("session closed");
        ROOT_ROUTE
    }

    fn purge(&self) {
        for key in [STORAGE_USER_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_ID_KEY] {
            self.store.delete(key);
        }
    }

    /// 邮箱密码登录
    pub async fn authenticate<H, T>(
        &self,
        api: &ApiClient<H, T>,
        credentials: &LoginRequest,
    ) -> AppResult<&'static str>
    where
        H: HttpClient,
        T: KeyValueStore,
    {
        let mut missing = Vec::new();
        if credentials.email.trim().is_empty() {
            missing.push(FieldError::required("email"));
        }
        if credentials.password.is_empty() {
            missing.push(FieldError::required("password"));
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(missing));
        }

        let response = api.call(credentials).await.map_err(translate_login_error)?;
        Ok(self.login(response))
    }

    /// 使用身份提供方签发的 id token 登录
    pub async fn authenticate_google<H, T>(
        &self,
        api: &ApiClient<H, T>,
        id_token: String,
    ) -> AppResult<&'static str>
    where
        H: HttpClient,
        T: KeyValueStore,
    {
        let response = api
            .call(&GoogleLoginRequest { id_token })
            .await
            .map_err(translate_login_error)?;
        Ok(self.login(response))
    }
}

fn translate_login_error(err: AppError) -> AppError {
    match err {
        AppError::Backend { code, message } => {
            let message = login_error_message(&code, &message);
            AppError::Backend { code, message }
        }
        other => other,
    }
}
