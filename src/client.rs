//! 后端 API 客户端
//!
//! 所有请求都经过 `ApiClient::request`：
//! 1. 每次调用时从存储中读取令牌并附加 `Authorization: Bearer`；
//! 2. 后端信封 `{code, result, info}` 归一化为 `{code, data, message}`；
//! 3. 网络失败不会向上抛出，而是返回统一的错误信封。

use crate::error::{AppError, AppResult};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use crate::storage::KeyValueStore;
use chicham_shared::protocol::{ApiRequest, ApiResponse, Envelope};
use chicham_shared::{HEADER_AUTHORIZATION, STORAGE_TOKEN_KEY};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

#[derive(Clone)]
pub struct ApiClient<H, S> {
    http: H,
    store: S,
    base_url: String,
}

impl<H: HttpClient, S: KeyValueStore> ApiClient<H, S> {
    pub fn new(http: H, store: S, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            store,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 令牌所在的存储（会话模块共用同一份）
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn build(&self, endpoint: &str, method: HttpMethod) -> HttpRequest {
        let mut req = HttpRequest::new(&self.url(endpoint), method);
        // 令牌在调用时读取而非构造时缓存
        if let Some(token) = self.store.get(STORAGE_TOKEN_KEY) {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        req
    }

    async fn dispatch(&self, endpoint: &str, req: HttpRequest) -> ApiResponse {
        let method = req.method;
        tracing::debug!(endpoint, method = method.as_str(), "sending request");

        let response = match self.http.send(req).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "request failed before reaching the backend");
                return ApiResponse::network_error();
            }
        };

        match serde_json::from_str::<Envelope>(&response.body) {
            Ok(envelope) => {
                let normalized = ApiResponse::from(envelope);
                if !normalized.is_ok() {
                    tracing::debug!(endpoint, code = %normalized.code, "backend returned an error code");
                }
                normalized
            }
            Err(e) => {
                tracing::warn!(endpoint, status = response.status, error = %e, "response is not an envelope");
                ApiResponse::invalid_response(format!("HTTP {}", response.status))
            }
        }
    }

    /// 通用请求入口
    ///
    /// 非 GET 请求总是以 JSON 发送请求体（缺省为 `{}`）；GET 请求从不携带请求体。
    pub async fn request(
        &self,
        endpoint: &str,
        method: HttpMethod,
        body: Option<Value>,
    ) -> ApiResponse {
        let mut req = self.build(endpoint, method);
        if !matches!(method, HttpMethod::Get) {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body.unwrap_or_else(|| json!({})));
        }
        self.dispatch(endpoint, req).await
    }

    /// multipart 表单请求（注册接口）
    pub async fn request_form(&self, endpoint: &str, fields: Vec<(String, String)>) -> ApiResponse {
        let req = self.build(endpoint, HttpMethod::Post).with_form(fields);
        self.dispatch(endpoint, req).await
    }

    /// 类型化调用：非 `COD_OK` 的响应转换为 `AppError`
    pub async fn call<R: ApiRequest>(&self, request: &R) -> AppResult<R::Response> {
        let body = serde_json::to_value(request)?;
        decode(self.request(R::PATH, R::METHOD, Some(body)).await)
    }

    /// 路径在运行时决定的类型化调用（通用 CRUD 资源使用）
    pub async fn call_endpoint<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        decode(self.request(endpoint, HttpMethod::Post, Some(body)).await)
    }
}

/// 将归一化响应解码为业务数据
pub fn decode<T: DeserializeOwned>(response: ApiResponse) -> AppResult<T> {
    if !response.is_ok() {
        return Err(AppError::from_response(response));
    }
    serde_json::from_value(response.data).map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{MockHttpClient, RequestBody};
    use crate::storage::MemoryStore;
    use chicham_shared::protocol::ListContributionsRequest;
    use chicham_shared::{CODE_INVALID_RESPONSE, CODE_NETWORK_ERROR};

    const BASE: &str = "https://api.test/";

    fn client() -> (ApiClient<MockHttpClient, MemoryStore>, MockHttpClient, MemoryStore) {
        let http = MockHttpClient::new();
        let store = MemoryStore::new();
        (ApiClient::new(http.clone(), store.clone(), BASE), http, store)
    }

    #[tokio::test]
    async fn test_token_is_read_at_call_time() {
        let (api, http, store) = client();
        http.mock_envelope("https://api.test/api/lessons/list", "COD_OK", json!([]), "");

        api.request("api/lessons/list", HttpMethod::Post, None).await;
        store.set(STORAGE_TOKEN_KEY, "t-1");
        api.request("api/lessons/list", HttpMethod::Post, None).await;
        store.delete(STORAGE_TOKEN_KEY);
        api.request("api/lessons/list", HttpMethod::Post, None).await;

        let auth: Vec<Option<String>> = http
            .requests()
            .iter()
            .map(|r| r.headers.get(HEADER_AUTHORIZATION).cloned())
            .collect();
        assert_eq!(auth, vec![None, Some("Bearer t-1".to_string()), None]);
    }

    #[tokio::test]
    async fn test_envelope_is_normalized() {
        let (api, http, _) = client();
        http.mock_envelope(
            "https://api.test/api/login",
            "COD_ERR_PASSWORD",
            Value::Null,
            "Contraseña incorrecta",
        );

        let response = api.request("/api/login", HttpMethod::Post, None).await;
        assert_eq!(response.code, "COD_ERR_PASSWORD");
        assert_eq!(response.message, "Contraseña incorrecta");
        assert!(!response.is_ok());
    }

    #[tokio::test]
    async fn test_network_failure_becomes_sentinel() {
        let (api, http, _) = client();
        http.mock_network_failure("https://api.test/api/contributions/list");

        let response = api
            .request("api/contributions/list", HttpMethod::Post, None)
            .await;
        assert_eq!(response.code, CODE_NETWORK_ERROR);
        assert_eq!(response.message, "Error");
    }

    #[tokio::test]
    async fn test_non_envelope_body_is_reported() {
        let (api, _http, _) = client();
        // 未注册的 URL 返回 404 纯文本
        let response = api.request("api/unknown", HttpMethod::Post, None).await;
        assert_eq!(response.code, CODE_INVALID_RESPONSE);
        assert_eq!(response.message, "HTTP 404");
    }

    #[tokio::test]
    async fn test_post_always_has_json_body_and_get_never_does() {
        let (api, http, _) = client();

        api.request("api/a", HttpMethod::Post, None).await;
        api.request("api/b", HttpMethod::Get, Some(json!({"x": 1}))).await;

        let requests = http.requests();
        assert_eq!(requests[0].body, Some(RequestBody::Json("{}".into())));
        assert_eq!(requests[1].body, None);
    }

    #[tokio::test]
    async fn test_typed_call_decodes_result() {
        let (api, http, _) = client();
        http.mock_envelope(
            "https://api.test/api/contributions/list",
            "COD_OK",
            json!([{
                "id": "c1",
                "type": "dictionary",
                "data": {"wordShuar": "Nase", "wordSpanish": "Viento"},
                "createdAt": 1_700_000_000_000i64
            }]),
            "",
        );

        let list = api.call(&ListContributionsRequest {}).await.unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].data.primary_text(), "Nase");
        assert!(list.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_typed_call_surfaces_backend_error() {
        let (api, http, _) = client();
        http.mock_envelope(
            "https://api.test/api/contributions/list",
            "COD_FORBIDDEN",
            Value::Null,
            "Sin permisos",
        );

        let err = api.call(&ListContributionsRequest {}).await.unwrap_err();
        assert_eq!(
            err,
            AppError::Backend {
                code: "COD_FORBIDDEN".into(),
                message: "Sin permisos".into()
            }
        );
    }
}
