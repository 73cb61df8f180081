//! Configuration schema and defaults.
//!
//! Sections: `[backend]`, `[ui]`, `[server]` and `[logging]`. Every field
//! has a built-in default; users only set what they want to override.

use serde::{Deserialize, Serialize};

use crate::api::ApiStyle;
use crate::i18n::Locale;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Maps to `~/.keydesk/config.toml` and `.keydesk.toml`. All sections and
/// fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeydeskConfig {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the key-management service lives and how to authenticate to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Service root, e.g. `http://127.0.0.1:5000`.
    pub base_url: String,
    /// Admin path family: `rest` or `legacy`.
    pub api_style: ApiStyle,
    /// Sent as `Authorization: Bearer <token>` when non-empty.
    pub admin_token: String,
    /// Raw `Cookie` header value for session-authenticated backends.
    pub session_cookie: String,
    /// Sent as `X-API-Key` to `/usage_info` and `/predict` when non-empty.
    pub api_key: String,
    /// Request timeout in milliseconds. `0` waits indefinitely.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            api_style: ApiStyle::default(),
            admin_token: String::new(),
            session_cookie: String::new(),
            api_key: String::new(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [ui]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub locale: Locale,
    pub toast_ttl_secs: u64,
    /// Limit used when the key form's limit is blank or zero.
    pub default_monthly_limit: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            toast_ttl_secs: 5,
            default_monthly_limit: 100_000,
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for `keydesk serve`.
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `keydesk=debug`. `RUST_LOG` wins.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl KeydeskConfig {
    /// Annotated default config written by `keydesk config init`.
    pub fn default_toml() -> String {
        r#"# keydesk configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (KEYDESK_*)
#   2. Project config (.keydesk.toml in current directory)
#   3. User global config (~/.keydesk/config.toml)
#   4. Built-in defaults

[backend]
base_url = "http://127.0.0.1:5000"
api_style = "rest"      # rest (/admin/keys) | legacy (/admin/list_api_keys, ...)
admin_token = ""        # Authorization: Bearer <token>
session_cookie = ""     # e.g. "session=..."
api_key = ""            # X-API-Key for /usage_info and /predict
timeout_ms = 0          # 0 = no timeout

[ui]
locale = "en"           # en | tr
toast_ttl_secs = 5
default_monthly_limit = 100000

[server]
addr = "127.0.0.1:9747"

[logging]
level = "info"          # RUST_LOG overrides
format = "text"         # text | json
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = KeydeskConfig::default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.backend.api_style, ApiStyle::Rest);
        assert_eq!(config.backend.timeout_ms, 0);
        assert_eq!(config.ui.locale, Locale::En);
        assert_eq!(config.ui.toast_ttl_secs, 5);
        assert_eq!(config.ui.default_monthly_limit, 100_000);
        assert_eq!(config.server.addr, "127.0.0.1:9747");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let config: KeydeskConfig = toml::from_str(
            r#"
[backend]
api_style = "legacy"

[ui]
locale = "tr"
"#,
        )
        .unwrap();
        assert_eq!(config.backend.api_style, ApiStyle::Legacy);
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.ui.locale, Locale::Tr);
        assert_eq!(config.ui.toast_ttl_secs, 5);
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let config: KeydeskConfig = toml::from_str("").unwrap();
        assert_eq!(config, KeydeskConfig::default());
    }

    #[test]
    fn default_toml_parses_back() {
        let config: KeydeskConfig = toml::from_str(&KeydeskConfig::default_toml()).unwrap();
        assert_eq!(config, KeydeskConfig::default());
    }
}
