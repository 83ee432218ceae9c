use crate::error::{AppError, AppResult};
pub use chicham_shared::protocol::HttpMethod;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;
#[cfg(test)]
use std::rc::Rc;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// 已序列化的 JSON 文本
    Json(String),
    /// multipart 表单的文本字段
    Form(Vec<(String, String)>),
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// GET 请求从不携带请求体
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        if !matches!(self.method, HttpMethod::Get) {
            self.body = Some(RequestBody::Json(body.to_string()));
        }
        self
    }

    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(fields));
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器环境下的 future 不是 `Send` 的，因此使用 `?Send`。
/// 返回 `Err` 仅表示传输层失败（对应 fetch 被拒绝）。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<RequestBody>,
}

#[cfg(test)]
impl RecordedRequest {
    /// 将 JSON 请求体解析出来便于断言
    pub fn json(&self) -> serde_json::Value {
        match &self.body {
            Some(RequestBody::Json(text)) => serde_json::from_str(text).unwrap(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
struct MockInner {
    // URL -> 依次返回的响应；只剩一个时重复返回
    responses: RefCell<HashMap<String, VecDeque<AppResult<HttpResponse>>>>,
    requests: RefCell<Vec<RecordedRequest>>,
    // 为 true 时每次 send 都会先让出一次执行权，用于模拟“请求进行中”
    yield_first: std::cell::Cell<bool>,
}

#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockHttpClient {
    inner: Rc<MockInner>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yielding() -> Self {
        let client = Self::default();
        client.inner.yield_first.set(true);
        client
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.push(url, Ok(HttpResponse { status, body: body.to_string() }));
    }

    /// 模拟后端信封 `{code, result, info}`
    pub fn mock_envelope(&self, url: &str, code: &str, result: serde_json::Value, info: &str) {
        self.mock_response(
            url,
            200,
            serde_json::json!({ "code": code, "result": result, "info": info }),
        );
    }

    pub fn mock_network_failure(&self, url: &str) {
        self.push(url, Err(AppError::Network("connection refused".into())));
    }

    fn push(&self, url: &str, response: AppResult<HttpResponse>) {
        self.inner
            .responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.url == url).collect()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse> {
        self.inner.requests.borrow_mut().push(RecordedRequest {
            url: req.url.clone(),
            method: req.method,
            headers: req.headers.clone(),
            body: req.body.clone(),
        });

        if self.inner.yield_first.get() {
            tokio::task::yield_now().await;
        }

        let mut responses = self.inner.responses.borrow_mut();
        match responses.get_mut(&req.url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

#[cfg(test)]
fn not_found() -> AppResult<HttpResponse> {
    Ok(HttpResponse {
        status: 404,
        body: "Not Found".to_string(),
    })
}
