//! Wire types for the key-management backend.
//!
//! Records are transient mirrors of backend rows: they are decoded from a
//! response, rendered, and dropped on the next reload. Token counts are
//! display values only; nothing here enforces a limit.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single API key as returned by the key endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub api_key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_unlimited: bool,
    #[serde(default, deserialize_with = "nullable_count")]
    pub monthly_token_limit: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub tokens_used: u64,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub auto_reset: bool,
    #[serde(default)]
    pub last_reset_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Per-IP quota and request counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpUsageRecord {
    pub ip_address: String,
    #[serde(default, deserialize_with = "nullable_count")]
    pub monthly_token_limit: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub tokens_used: u64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub request_count: u64,
    #[serde(default)]
    pub last_request_time: Option<String>,
    #[serde(default)]
    pub last_reset_date: Option<String>,
}

/// Aggregate usage numbers for the summary panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageSummary {
    #[serde(deserialize_with = "nullable_count")]
    pub total_api_keys: u64,
    #[serde(deserialize_with = "nullable_count")]
    pub total_ips: u64,
    #[serde(deserialize_with = "nullable_count")]
    pub today_requests: u64,
    #[serde(deserialize_with = "nullable_count")]
    pub monthly_requests: u64,
    pub top_api_keys: Vec<TopApiKey>,
    pub top_ips: Vec<TopIp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopApiKey {
    pub api_key_id: i64,
    #[serde(default, deserialize_with = "nullable_count")]
    pub usage_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopIp {
    /// `None` for the group of requests logged without an address.
    #[serde(default)]
    pub request_ip: Option<String>,
    #[serde(default, deserialize_with = "nullable_count")]
    pub usage_count: u64,
}

/// Quota view for the caller's own key or IP (`GET /usage_info`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageInfo {
    #[serde(deserialize_with = "flexible_bool")]
    pub is_unlimited: bool,
    #[serde(deserialize_with = "nullable_count")]
    pub tokens_used: u64,
    #[serde(deserialize_with = "flexible_bool")]
    pub using_api_key: bool,
    pub monthly_token_limit: Option<u64>,
    pub tokens_remaining: Option<i64>,
    pub request_count: Option<u64>,
    pub rate_limit: Option<RateLimit>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimit {
    pub max_requests: u32,
    pub time_window_minutes: u32,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for both `create` and `update` key requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPayload {
    pub description: String,
    pub monthly_token_limit: u64,
    pub is_unlimited: bool,
    pub auto_reset: bool,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// `{api_keys: [...]}`. A missing list reads as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct KeyListEnvelope {
    #[serde(default)]
    pub api_keys: Vec<ApiKeyRecord>,
}

/// `{api_key: {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct KeyEnvelope {
    pub api_key: ApiKeyRecord,
}

/// `{ip_usage: [...]}`. A missing list reads as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct IpUsageEnvelope {
    #[serde(default)]
    pub ip_usage: Vec<IpUsageRecord>,
}

/// `{message: "..."}` acknowledgement returned by mutations.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of a create request.
///
/// The REST backend answers with the full record, the legacy one with just
/// the generated key string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedKey {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub api_key: Option<CreatedKeyValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CreatedKeyValue {
    Key(String),
    Record(ApiKeyRecord),
}

impl CreatedKey {
    /// The generated key string, whichever shape the backend used.
    pub fn key(&self) -> Option<&str> {
        match self.api_key.as_ref()? {
            CreatedKeyValue::Key(key) => Some(key),
            CreatedKeyValue::Record(record) => Some(&record.api_key),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accept `true`/`false`, `0`/`1` and `null` for boolean columns.
///
/// MySQL-backed services serialize `TINYINT(1)` columns as integers.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flexible {
        Bool(bool),
        Int(i64),
        Null,
    }

    Ok(match Flexible::deserialize(deserializer)? {
        Flexible::Bool(b) => b,
        Flexible::Int(n) => n != 0,
        Flexible::Null => false,
    })
}

/// Nullable integer columns read as zero.
fn nullable_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
