//! HTTP 适配器
//!
//! 基于 `gloo-net` 的 fetch 实现核心的 `HttpClient`。
//! 只有传输层失败（fetch 被拒绝、响应体无法读取）才返回 `Err`，
//! 非 2xx 状态码原样交给核心去解析信封。

use chicham::{AppError, AppResult, HttpClient, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use gloo_net::http::{Method, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

/// multipart 表单；不设置 Content-Type，由浏览器补上 boundary
fn form_data(fields: &[(String, String)]) -> AppResult<FormData> {
    let form = FormData::new().map_err(|e| AppError::Network(format!("{e:?}")))?;
    for (key, value) in fields {
        form.append_with_str(key, value)
            .map_err(|e| AppError::Network(format!("{e:?}")))?;
    }
    Ok(form)
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> AppResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(method_of(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match &req.body {
            Some(RequestBody::Json(text)) => builder
                .header("Content-Type", "application/json")
                .body(JsValue::from_str(text)),
            Some(RequestBody::Form(fields)) => builder.body(form_data(fields)?),
            None => builder.build(),
        }
        .map_err(|e| AppError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
