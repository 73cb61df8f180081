//! Layered configuration.
//!
//! 1. **Built-in defaults**, from [`schema::KeydeskConfig::default()`]
//! 2. **User global config**, `~/.keydesk/config.toml`
//! 3. **Project local config**, `.keydesk.toml` in the current directory
//! 4. **Environment variables**, `KEYDESK_*` (highest precedence)
//!
//! File layers are merged key by key: a file that sets only
//! `backend.base_url` leaves every other value from the layer below intact.
//!
//! ```rust,ignore
//! let cfg = keydesk::config::load();
//! println!("{}", cfg.backend.base_url);
//! ```

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::api::ApiStyle;
use crate::i18n::Locale;

pub use schema::KeydeskConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
pub fn load() -> KeydeskConfig {
    let mut config = load_from(
        global_config_path().as_deref(),
        project_config_path().as_deref(),
    );
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Merge defaults with the given files, without env overrides.
///
/// Missing files are skipped. Malformed files are skipped with a warning so
/// that a typo never takes the dashboard down.
pub fn load_from(global: Option<&Path>, project: Option<&Path>) -> KeydeskConfig {
    let mut merged = match toml::Value::try_from(KeydeskConfig::default()) {
        Ok(value) => value,
        Err(_) => return KeydeskConfig::default(),
    };

    for path in [global, project].into_iter().flatten() {
        if let Some(layer) = read_toml_value(path) {
            merge_values(&mut merged, layer);
        }
    }

    merged.try_into().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "merged config is invalid, using defaults");
        KeydeskConfig::default()
    })
}

fn read_toml_value(path: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config file");
            None
        }
    }
}

/// Recursively overlay `layer` onto `base`. Tables merge; everything else
/// replaces.
fn merge_values(base: &mut toml::Value, layer: toml::Value) {
    match (base, layer) {
        (toml::Value::Table(base), toml::Value::Table(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// `~/.keydesk/config.toml`
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".keydesk").join("config.toml"))
}

/// `.keydesk.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".keydesk.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply `KEYDESK_*` overrides read through `var`.
///
/// Supported variables:
/// - `KEYDESK_BASE_URL`, `KEYDESK_API_STYLE` (`rest` | `legacy`)
/// - `KEYDESK_ADMIN_TOKEN`, `KEYDESK_SESSION_COOKIE`, `KEYDESK_API_KEY`
/// - `KEYDESK_TIMEOUT_MS`
/// - `KEYDESK_LOCALE` (`en` | `tr`)
/// - `KEYDESK_ADDR`
/// - `KEYDESK_LOG_LEVEL`
///
/// Unparsable values are ignored.
pub fn apply_env_overrides(config: &mut KeydeskConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("KEYDESK_BASE_URL")
        && !val.is_empty()
    {
        config.backend.base_url = val;
    }
    if let Some(val) = var("KEYDESK_API_STYLE")
        && let Some(style) = parse_api_style(&val)
    {
        config.backend.api_style = style;
    }
    if let Some(val) = var("KEYDESK_ADMIN_TOKEN") {
        config.backend.admin_token = val;
    }
    if let Some(val) = var("KEYDESK_SESSION_COOKIE") {
        config.backend.session_cookie = val;
    }
    if let Some(val) = var("KEYDESK_API_KEY") {
        config.backend.api_key = val;
    }
    if let Some(val) = var("KEYDESK_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.backend.timeout_ms = ms;
    }
    if let Some(val) = var("KEYDESK_LOCALE")
        && let Some(locale) = Locale::parse(&val)
    {
        config.ui.locale = locale;
    }
    if let Some(val) = var("KEYDESK_ADDR")
        && !val.is_empty()
    {
        config.server.addr = val;
    }
    if let Some(val) = var("KEYDESK_LOG_LEVEL")
        && !val.is_empty()
    {
        config.logging.level = val;
    }
}

fn parse_api_style(val: &str) -> Option<ApiStyle> {
    match val.to_ascii_lowercase().as_str() {
        "rest" => Some(ApiStyle::Rest),
        "legacy" => Some(ApiStyle::Legacy),
        _ => None,
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.keydesk/config.toml`.
///
/// Fails if the file exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    init_config_at(&path, force)?;
    Ok(path)
}

pub fn init_config_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, KeydeskConfig::default_toml()).context("failed to write config file")?;
    Ok(())
}

/// Set a dotted key such as `backend.base_url` in the global config file.
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;
    set_config_value_at(&path, key, value)?;
    Ok(path)
}

/// Set a dotted key in the file at `path`, creating it from defaults if
/// needed. The result must still parse as a valid config.
pub fn set_config_value_at(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(KeydeskConfig::default())
            .context("failed to serialize default config")?
    };

    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    toml::from_str::<KeydeskConfig>(&output)
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, output).context("failed to write config file")?;
    Ok(())
}

/// Set a value in a TOML tree using a dotted key path. Sections must exist;
/// the new value takes the type of the one it replaces.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let (section_path, leaf) = match key.rsplit_once('.') {
        Some((section, leaf)) => (Some(section), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        anyhow::bail!("empty config key");
    }

    let mut current = root;
    for part in section_path.into_iter().flat_map(|s| s.split('.')) {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{}'", section_path.unwrap_or("")))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Overwrite the global config with defaults.
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
