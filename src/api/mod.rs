//! Client for the key-management backend.
//!
//! Every call goes through [`ApiClient::request`], the one shared request
//! helper:
//!
//! - `Accept: application/json` is always sent
//! - `Content-Type: application/json` is added only when a body is present
//! - HTTP 401 from *any* endpoint short-circuits to [`ApiError::Unauthorized`]
//!   before the body is looked at
//!
//! The network itself sits behind the [`Transport`] trait so the dashboard
//! can be driven without a live backend.

pub mod http;
pub mod types;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::schema::BackendConfig;

use types::{
    ApiKeyRecord, CreatedKey, IpUsageEnvelope, IpUsageRecord, KeyEnvelope, KeyListEnvelope,
    KeyPayload, MessageEnvelope, UsageInfo, UsageSummary,
};

/// Where the page navigates when the backend answers 401.
pub const LOGIN_REDIRECT: &str = "/admin?error=401";

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request, ready for a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the backend base URL, e.g. `/admin/keys/7`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of any HTTP response, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

/// Failure taxonomy for a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// HTTP 401. The caller must navigate to [`LOGIN_REDIRECT`].
    #[error("unauthorized")]
    Unauthorized,

    /// `{"error": "..."}` in the response body, shown verbatim.
    #[error("{0}")]
    Application(String),

    /// Body was not JSON or not the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Transport seam
// ---------------------------------------------------------------------------

/// Sends a prepared request and returns whatever the server answered.
///
/// Implementations must return non-2xx statuses as `Ok(RawResponse)`; only
/// failures to obtain a response at all are errors.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

// ---------------------------------------------------------------------------
// Endpoint routing
// ---------------------------------------------------------------------------

/// Which generation of the admin API the backend exposes.
///
/// Both path families exist in deployed backends. Only the key endpoints
/// differ; IP, summary, health and predict paths are shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiStyle {
    /// `/admin/keys` and `/admin/keys/:id` with HTTP verbs.
    #[default]
    Rest,
    /// `/admin/list_api_keys`, `/admin/get_api_key/:id`, ...
    Legacy,
}

impl fmt::Display for ApiStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rest => write!(f, "rest"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

/// Backend operations the dashboard knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    ListKeys,
    GetKey(i64),
    CreateKey,
    UpdateKey(i64),
    DeleteKey(i64),
    ListIpUsage,
    ResetIpLimits(&'a str),
    UsageSummary,
    UsageInfo,
    Health,
    Predict,
}

impl Endpoint<'_> {
    /// Endpoints authenticated by the caller's own `X-API-Key` rather than
    /// admin credentials.
    pub fn is_caller_facing(self) -> bool {
        matches!(self, Self::UsageInfo | Self::Predict)
    }
}

impl ApiStyle {
    /// Resolve an endpoint to its method and path under this style.
    pub fn route(self, endpoint: Endpoint<'_>) -> (Method, String) {
        use Endpoint::*;

        match (self, endpoint) {
            (Self::Rest, ListKeys) => (Method::Get, "/admin/keys".to_string()),
            (Self::Rest, GetKey(id)) => (Method::Get, format!("/admin/keys/{id}")),
            (Self::Rest, CreateKey) => (Method::Post, "/admin/keys".to_string()),
            (Self::Rest, UpdateKey(id)) => (Method::Put, format!("/admin/keys/{id}")),
            (Self::Rest, DeleteKey(id)) => (Method::Delete, format!("/admin/keys/{id}")),

            (Self::Legacy, ListKeys) => (Method::Get, "/admin/list_api_keys".to_string()),
            (Self::Legacy, GetKey(id)) => (Method::Get, format!("/admin/get_api_key/{id}")),
            (Self::Legacy, CreateKey) => (Method::Post, "/admin/create_api_key".to_string()),
            (Self::Legacy, UpdateKey(id)) => {
                (Method::Put, format!("/admin/update_api_key/{id}"))
            }
            (Self::Legacy, DeleteKey(id)) => {
                (Method::Delete, format!("/admin/delete_api_key/{id}"))
            }

            (_, ListIpUsage) => (Method::Get, "/admin/list_ip_usage".to_string()),
            (_, ResetIpLimits(ip)) => (
                Method::Post,
                format!("/admin/reset_ip_limits/{}", urlencoding::encode(ip)),
            ),
            (_, UsageSummary) => (Method::Get, "/admin/usage_summary".to_string()),
            (_, UsageInfo) => (Method::Get, "/usage_info".to_string()),
            (_, Health) => (Method::Get, "/health".to_string()),
            (_, Predict) => (Method::Post, "/predict".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Typed client over a [`Transport`].
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
    style: ApiStyle,
    admin_token: Option<String>,
    session_cookie: Option<String>,
    api_key: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, style: ApiStyle) -> Self {
        Self {
            transport,
            style,
            admin_token: None,
            session_cookie: None,
            api_key: None,
        }
    }

    /// Build a client carrying the credentials from `[backend]`.
    pub fn from_config(transport: T, config: &BackendConfig) -> Self {
        Self::new(transport, config.api_style)
            .with_admin_token(non_empty(&config.admin_token))
            .with_session_cookie(non_empty(&config.session_cookie))
            .with_api_key(non_empty(&config.api_key))
    }

    pub fn with_admin_token(mut self, token: Option<String>) -> Self {
        self.admin_token = token;
        self
    }

    pub fn with_session_cookie(mut self, cookie: Option<String>) -> Self {
        self.session_cookie = cookie;
        self
    }

    /// Key sent as `X-API-Key` on the caller-facing endpoints.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn style(&self) -> ApiStyle {
        self.style
    }

    /// Issue a request to `endpoint` and decode the body as JSON.
    ///
    /// A 401 returns [`ApiError::Unauthorized`] regardless of the body. Any
    /// other status is decoded; `{error}` detection is left to the typed
    /// wrappers because some endpoints (`/predict`) pass bodies through.
    pub fn request(
        &self,
        endpoint: Endpoint<'_>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let (method, path) = self.style.route(endpoint);
        let path = path.as_str();
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = &self.admin_token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        if let Some(cookie) = &self.session_cookie {
            headers.push(("Cookie".to_string(), cookie.clone()));
        }
        if endpoint.is_caller_facing()
            && let Some(key) = &self.api_key
        {
            headers.push(("X-API-Key".to_string(), key.clone()));
        }

        let request = ApiRequest {
            method,
            path: path.to_string(),
            headers,
            body: body.map(Value::to_string),
        };

        let response = self.transport.send(&request).map_err(|e| {
            tracing::warn!(%method, path, error = %e, "backend request failed");
            e
        })?;
        tracing::debug!(%method, path, status = response.status, "backend response");

        if response.status == 401 {
            tracing::warn!(%method, path, "backend rejected credentials");
            return Err(ApiError::Unauthorized);
        }

        Ok(serde_json::from_str(&response.body)?)
    }

    fn call<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        body: Option<&Value>,
    ) -> Result<R, ApiError> {
        let value = self.request(endpoint, body)?;
        if let Some(message) = application_error(&value) {
            return Err(ApiError::Application(message));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn list_keys(&self) -> Result<Vec<ApiKeyRecord>, ApiError> {
        let env: KeyListEnvelope = self.call(Endpoint::ListKeys, None)?;
        Ok(env.api_keys)
    }

    pub fn get_key(&self, id: i64) -> Result<ApiKeyRecord, ApiError> {
        let env: KeyEnvelope = self.call(Endpoint::GetKey(id), None)?;
        Ok(env.api_key)
    }

    pub fn create_key(&self, payload: &KeyPayload) -> Result<CreatedKey, ApiError> {
        let body = serde_json::to_value(payload)?;
        self.call(Endpoint::CreateKey, Some(&body))
    }

    /// Returns the server's acknowledgement message, if any.
    pub fn update_key(&self, id: i64, payload: &KeyPayload) -> Result<Option<String>, ApiError> {
        let body = serde_json::to_value(payload)?;
        let env: MessageEnvelope = self.call(Endpoint::UpdateKey(id), Some(&body))?;
        Ok(env.message)
    }

    pub fn delete_key(&self, id: i64) -> Result<Option<String>, ApiError> {
        let env: MessageEnvelope = self.call(Endpoint::DeleteKey(id), None)?;
        Ok(env.message)
    }

    pub fn list_ip_usage(&self) -> Result<Vec<IpUsageRecord>, ApiError> {
        let env: IpUsageEnvelope = self.call(Endpoint::ListIpUsage, None)?;
        Ok(env.ip_usage)
    }

    pub fn reset_ip_limits(&self, ip: &str) -> Result<Option<String>, ApiError> {
        let env: MessageEnvelope = self.call(Endpoint::ResetIpLimits(ip), None)?;
        Ok(env.message)
    }

    pub fn usage_summary(&self) -> Result<UsageSummary, ApiError> {
        self.call(Endpoint::UsageSummary, None)
    }

    pub fn usage_info(&self) -> Result<UsageInfo, ApiError> {
        self.call(Endpoint::UsageInfo, None)
    }

    /// Raw `/health` body. Interpretation lives in the playground.
    pub fn health(&self) -> Result<Value, ApiError> {
        self.request(Endpoint::Health, None)
    }

    /// Raw `/predict` body, passed through untouched.
    pub fn predict(&self, text: &str) -> Result<Value, ApiError> {
        let body = serde_json::json!({ "text": text });
        self.request(Endpoint::Predict, Some(&body))
    }
}

/// Extract a truthy `error` field from a response body.
fn application_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Answers every request with the same response and keeps a copy of it.
    struct Fixed {
        response: RawResponse,
        seen: RefCell<Vec<ApiRequest>>,
    }

    impl Fixed {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: RawResponse::new(status, body),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Fixed {
        fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            Ok(self.response.clone())
        }
    }

    #[test]
    fn accept_header_always_sent_content_type_only_with_body() {
        let client = ApiClient::new(Fixed::new(200, r#"{"api_keys": []}"#), ApiStyle::Rest);
        client.list_keys().unwrap();
        client
            .create_key(&KeyPayload {
                description: "x".to_string(),
                monthly_token_limit: 1,
                is_unlimited: false,
                auto_reset: true,
            })
            .unwrap();

        let seen = client.transport().seen.borrow();
        assert_eq!(seen[0].header("accept"), Some("application/json"));
        assert_eq!(seen[0].header("content-type"), None);
        assert_eq!(seen[1].header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn unauthorized_wins_over_body() {
        let client = ApiClient::new(Fixed::new(401, r#"{"error": "login"}"#), ApiStyle::Rest);
        assert!(matches!(client.list_keys(), Err(ApiError::Unauthorized)));
        assert!(matches!(client.health(), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn error_field_becomes_application_error() {
        let client = ApiClient::new(Fixed::new(404, r#"{"error": "not found"}"#), ApiStyle::Rest);
        match client.delete_key(7) {
            Err(ApiError::Application(msg)) => assert_eq!(msg, "not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_is_decode_error() {
        let client = ApiClient::new(Fixed::new(502, "<html>bad gateway</html>"), ApiStyle::Rest);
        assert!(matches!(client.usage_summary(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn credentials_attached_when_configured() {
        let client = ApiClient::new(Fixed::new(200, "{}"), ApiStyle::Rest)
            .with_admin_token(Some("s3cret".to_string()))
            .with_session_cookie(Some("session=abc".to_string()));
        client.usage_summary().unwrap();

        let seen = client.transport().seen.borrow();
        assert_eq!(seen[0].header("authorization"), Some("Bearer s3cret"));
        assert_eq!(seen[0].header("cookie"), Some("session=abc"));
        assert_eq!(seen[0].header("x-api-key"), None);
    }

    #[test]
    fn api_key_only_sent_to_caller_endpoints() {
        let client = ApiClient::new(Fixed::new(200, "{}"), ApiStyle::Rest)
            .with_api_key(Some("caller-key".to_string()));
        client.usage_summary().unwrap();
        client.usage_info().unwrap();
        client.predict("hello").unwrap();
        client.health().unwrap();

        let seen = client.transport().seen.borrow();
        assert_eq!(seen[0].header("x-api-key"), None);
        assert_eq!(seen[1].header("x-api-key"), Some("caller-key"));
        assert_eq!(seen[2].header("x-api-key"), Some("caller-key"));
        assert_eq!(seen[3].header("x-api-key"), None);
    }

    #[test]
    fn rest_and_legacy_routes() {
        assert_eq!(
            ApiStyle::Rest.route(Endpoint::DeleteKey(7)),
            (Method::Delete, "/admin/keys/7".to_string())
        );
        assert_eq!(
            ApiStyle::Legacy.route(Endpoint::ListKeys),
            (Method::Get, "/admin/list_api_keys".to_string())
        );
        assert_eq!(
            ApiStyle::Legacy.route(Endpoint::UpdateKey(3)),
            (Method::Put, "/admin/update_api_key/3".to_string())
        );
        assert_eq!(
            ApiStyle::Legacy.route(Endpoint::ListIpUsage),
            ApiStyle::Rest.route(Endpoint::ListIpUsage)
        );
    }

    #[test]
    fn ip_segment_is_percent_encoded() {
        let (_, path) = ApiStyle::Rest.route(Endpoint::ResetIpLimits("10.0.0.1/32"));
        assert_eq!(path, "/admin/reset_ip_limits/10.0.0.1%2F32");
    }

    #[test]
    fn application_error_ignores_falsy_values() {
        assert_eq!(application_error(&serde_json::json!({"error": ""})), None);
        assert_eq!(application_error(&serde_json::json!({"error": null})), None);
        assert_eq!(
            application_error(&serde_json::json!({"error": "boom"})),
            Some("boom".to_string())
        );
    }
}
