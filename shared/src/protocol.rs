use crate::{CODE_INVALID_RESPONSE, CODE_NETWORK_ERROR, CODE_OK};
use crate::{ContributionData, ContributionList, ContributionType, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The type carried in the `result` field of a successful envelope.
    type Response: DeserializeOwned;
    /// The endpoint path, relative to the configured base URL.
    const PATH: &'static str;
    /// Every endpoint of this backend is a JSON POST.
    const METHOD: HttpMethod = HttpMethod::Post;
}

// =========================================================
// Envelope
// =========================================================

/// Wire envelope returned by every backend endpoint: `{code, result, info}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub info: Value,
}

/// Normalized response: `{code, data, message}`.
///
/// Transport failures are folded into this same shape so callers only ever
/// inspect `code`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub code: String,
    pub data: Value,
    pub message: String,
}

impl ApiResponse {
    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }

    /// Sentinel used when the request never produced a response.
    pub fn network_error() -> Self {
        Self {
            code: CODE_NETWORK_ERROR.to_string(),
            data: Value::Null,
            message: "Error".to_string(),
        }
    }

    /// Sentinel used when the body was not a JSON envelope.
    pub fn invalid_response(detail: impl Into<String>) -> Self {
        Self {
            code: CODE_INVALID_RESPONSE.to_string(),
            data: Value::Null,
            message: detail.into(),
        }
    }
}

impl From<Envelope> for ApiResponse {
    fn from(envelope: Envelope) -> Self {
        let message = match envelope.info {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        };
        Self {
            code: envelope.code,
            data: envelope.result,
            message,
        }
    }
}

// =========================================================
// Shared request bodies
// =========================================================

/// Target a single record by id (get/delete/approve/reject).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdTarget {
    pub id: String,
}

/// 1-based page query as sent on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

/// List payloads come either as a bare array or wrapped with a total.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged {
        #[serde(alias = "data", alias = "rows")]
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Returns the items and the total (falling back to the item count).
    pub fn into_parts(self) -> (Vec<T>, u64) {
        match self {
            ListPayload::Paged { items, total } => {
                let total = total.unwrap_or(items.len() as u64);
                (items, total)
            }
            ListPayload::Bare(items) => {
                let total = items.len() as u64;
                (items, total)
            }
        }
    }
}

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Deserialize, Clone)]
pub struct LoginResponse {
    pub user: User,
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "api/login";
}

/// Exchange an identity-provider id token for a backend session.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

impl ApiRequest for GoogleLoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "api/google-login";
}

/// Registration is sent as multipart form data, not JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub const PATH: &'static str = "api/users/create";

    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            ("nombre".to_string(), self.first_name.clone()),
            ("apellido".to_string(), self.last_name.clone()),
            ("email".to_string(), self.email.clone()),
            ("password".to_string(), self.password.clone()),
        ]
    }
}

// =========================================================
// Contributions
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListContributionsRequest {}

impl ApiRequest for ListContributionsRequest {
    type Response = ContributionList;
    const PATH: &'static str = "api/contributions/list";
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ContributionHistoryRequest {}

impl ApiRequest for ContributionHistoryRequest {
    type Response = ContributionList;
    const PATH: &'static str = "api/contributions/history";
}

/// Payload for `api/contributions/create`.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateContributionRequest {
    #[serde(rename = "type")]
    pub kind: ContributionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub content: ContributionData,
}

impl ApiRequest for CreateContributionRequest {
    type Response = Value;
    const PATH: &'static str = "api/contributions/create";
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApproveContributionRequest {
    pub id: String,
}

impl ApiRequest for ApproveContributionRequest {
    type Response = Value;
    const PATH: &'static str = "api/contributions/approve";
}

impl From<IdTarget> for ApproveContributionRequest {
    fn from(target: IdTarget) -> Self {
        Self { id: target.id }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RejectContributionRequest {
    pub id: String,
}

impl ApiRequest for RejectContributionRequest {
    type Response = Value;
    const PATH: &'static str = "api/contributions/reject";
}

impl From<IdTarget> for RejectContributionRequest {
    fn from(target: IdTarget) -> Self {
        Self { id: target.id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DictionaryContent;
    use serde_json::json;

    #[test]
    fn test_envelope_is_remapped() {
        let envelope: Envelope = serde_json::from_value(json!({
            "code": "COD_OK",
            "result": [1, 2],
            "info": "listo"
        }))
        .unwrap();

        let response = ApiResponse::from(envelope);
        assert!(response.is_ok());
        assert_eq!(response.data, json!([1, 2]));
        assert_eq!(response.message, "listo");
    }

    #[test]
    fn test_list_payload_accepts_both_shapes() {
        let bare: ListPayload<u8> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        let paged: ListPayload<u8> =
            serde_json::from_value(json!({"data": [1], "total": 9})).unwrap();

        assert_eq!(bare.into_parts(), (vec![1, 2, 3], 3));
        assert_eq!(paged.into_parts(), (vec![1], 9));
    }

    #[test]
    fn test_create_contribution_nests_content() {
        let request = CreateContributionRequest {
            kind: ContributionType::Dictionary,
            user_id: Some("7".into()),
            content: ContributionData::Dictionary(DictionaryContent {
                word_shuar: "Entsa".into(),
                word_spanish: "Agua".into(),
                ..Default::default()
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "dictionary");
        assert_eq!(value["userId"], "7");
        assert_eq!(value["content"]["wordShuar"], "Entsa");
    }
}
