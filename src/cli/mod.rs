//! CLI command implementations.
//!
//! Every admin command drives the same [`Dashboard`] the web page uses:
//! loaders fill panels, mutators toast their outcome. The CLI then prints
//! the resulting panel or toast instead of rendering HTML.
//!
//! - `keydesk keys list|show|create|update|delete`
//! - `keydesk ips list|reset`
//! - `keydesk summary`, `keydesk usage`
//! - `keydesk health`, `keydesk predict "text"`
//! - `keydesk config show|init|set|reset`

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::http::HttpTransport;
use crate::api::types::{ApiKeyRecord, IpUsageRecord, UsageInfo, UsageSummary};
use crate::api::{ApiClient, Transport};
use crate::config::{self, KeydeskConfig};
use crate::dashboard::{Dashboard, DashboardOptions, MutationOutcome, PanelView};
use crate::i18n::Locale;
use crate::playground::{HealthStatus, PredictResult};
use crate::render::format::{format_date, format_number, MISSING};
use crate::ui::{KeyForm, ToastKind};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Dashboard wired to the configured backend.
pub fn connect(config: &KeydeskConfig) -> Dashboard<HttpTransport> {
    let transport = HttpTransport::from_config(&config.backend);
    let client = ApiClient::from_config(transport, &config.backend);
    Dashboard::new(client, DashboardOptions::from_config(config))
}

/// Turn a pending login redirect into an error exit.
fn ensure_authorized<T: Transport>(dash: &Dashboard<T>) -> Result<()> {
    match dash.redirect() {
        Some(_) => anyhow::bail!(
            "unauthorized: the backend rejected the admin credentials \
             (set backend.admin_token or backend.session_cookie)"
        ),
        None => Ok(()),
    }
}

/// Unwrap a loaded panel: `None` for an empty list, error for a banner.
fn panel_data<D, T: Transport>(dash: &Dashboard<T>, view: &PanelView<D>) -> Result<Option<D>>
where
    D: Clone,
{
    ensure_authorized(dash)?;
    match view {
        PanelView::Ready(data) => Ok(Some(data.clone())),
        PanelView::Empty => Ok(None),
        PanelView::Error(message) => anyhow::bail!("{message}"),
        PanelView::Idle | PanelView::Loading => anyhow::bail!("panel did not load"),
    }
}

/// Report a mutation outcome; failures become errors.
fn finish<T: Transport>(dash: &Dashboard<T>, outcome: Option<MutationOutcome>) -> Result<()> {
    ensure_authorized(dash)?;
    match outcome {
        Some(MutationOutcome::Succeeded(message)) => {
            println!("{} {}", "✓".green().bold(), message);
            Ok(())
        }
        Some(MutationOutcome::Failed(message)) => anyhow::bail!("{message}"),
        Some(MutationOutcome::Redirected) => ensure_authorized(dash),
        None => Ok(()),
    }
}

/// Last error toast, if the action produced one.
fn last_error<T: Transport>(dash: &Dashboard<T>) -> Option<String> {
    dash.toasts()
        .last()
        .filter(|t| t.kind == ToastKind::Error)
        .map(|t| t.message.clone())
}

// ---------------------------------------------------------------------------
// keydesk keys
// ---------------------------------------------------------------------------

pub fn run_keys_list<T: Transport>(dash: &mut Dashboard<T>, format: OutputFormat) -> Result<()> {
    dash.load_api_keys();
    let keys = panel_data(dash, dash.keys())?.unwrap_or_default();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Table if keys.is_empty() => {
            println!("{}", dash.messages().keys_empty.yellow());
        }
        OutputFormat::Table => print_keys_table(&keys, dash.locale()),
    }
    Ok(())
}

fn print_keys_table(keys: &[ApiKeyRecord], locale: Locale) {
    let m = locale.messages();
    println!("{}", m.tab_api_keys.bold().cyan());
    println!(
        "  {:>5}  {:<34} {:<24} {:>12} {:>12}  {}",
        m.col_id,
        m.col_api_key,
        m.col_description,
        m.col_monthly_limit,
        m.col_tokens_used,
        m.col_auto_reset
    );
    println!("  {}", "-".repeat(100));

    for (i, key) in keys.iter().enumerate() {
        let limit = if key.is_unlimited {
            "∞".to_string()
        } else {
            format_number(key.monthly_token_limit, locale)
        };
        let line = format!(
            "  {:>5}  {:<34} {:<24} {:>12} {:>12}  {}",
            key.id,
            truncate(&key.api_key, 34),
            truncate(key.description.as_deref().unwrap_or(MISSING), 24),
            limit,
            format_number(key.tokens_used, locale),
            if key.auto_reset { m.yes } else { m.no },
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

pub fn run_keys_show<T: Transport>(
    dash: &mut Dashboard<T>,
    id: i64,
    format: OutputFormat,
) -> Result<()> {
    dash.show_details(id);
    ensure_authorized(dash)?;
    let Some(record) = dash.details().record() else {
        anyhow::bail!(
            last_error(dash).unwrap_or_else(|| dash.messages().key_fetch_failed.to_string())
        );
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let locale = dash.locale();
    let m = locale.messages();
    println!("{}", m.details_title.bold().cyan());
    let rows = [
        (m.col_id, record.id.to_string()),
        (m.col_api_key, record.api_key.clone()),
        (m.col_description, record.description.clone().unwrap_or_else(|| MISSING.to_string())),
        (m.col_unlimited, yes_no(record.is_unlimited, locale).to_string()),
        (m.col_monthly_limit, format_number(record.monthly_token_limit, locale)),
        (m.col_tokens_used, format_number(record.tokens_used, locale)),
        (m.col_auto_reset, yes_no(record.auto_reset, locale).to_string()),
        (m.col_last_reset, format_date(record.last_reset_date.as_deref(), locale)),
        (m.col_created, format_date(record.created_at.as_deref(), locale)),
        (m.col_updated, format_date(record.updated_at.as_deref(), locale)),
    ];
    for (label, value) in rows {
        println!("  {:<18} {}", format!("{label}:").bold(), value);
    }
    Ok(())
}

/// Field changes requested on the command line. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChanges {
    pub description: Option<String>,
    pub monthly_limit: Option<String>,
    pub is_unlimited: Option<bool>,
    pub auto_reset: Option<bool>,
}

impl KeyChanges {
    fn apply(&self, form: &mut KeyForm) {
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(limit) = &self.monthly_limit {
            form.monthly_limit = limit.clone();
        }
        if let Some(unlimited) = self.is_unlimited {
            form.is_unlimited = unlimited;
        }
        if let Some(auto_reset) = self.auto_reset {
            form.auto_reset = auto_reset;
        }
    }
}

pub fn run_keys_create<T: Transport>(dash: &mut Dashboard<T>, changes: &KeyChanges) -> Result<()> {
    dash.open_create();
    let mut form = dash.key_modal().form().clone();
    changes.apply(&mut form);
    dash.edit_form(form);
    let outcome = dash.submit_key_form();
    finish(dash, outcome)
}

pub fn run_keys_update<T: Transport>(
    dash: &mut Dashboard<T>,
    id: i64,
    changes: &KeyChanges,
) -> Result<()> {
    dash.open_edit(id);
    ensure_authorized(dash)?;
    if !dash.key_modal().is_open() {
        anyhow::bail!(
            last_error(dash).unwrap_or_else(|| dash.messages().key_fetch_failed.to_string())
        );
    }
    let mut form = dash.key_modal().form().clone();
    changes.apply(&mut form);
    dash.edit_form(form);
    let outcome = dash.submit_key_form();
    finish(dash, outcome)
}

pub fn run_keys_delete<T: Transport>(dash: &mut Dashboard<T>, id: i64, yes: bool) -> Result<()> {
    let token = dash.request_delete(id);
    confirm_and_run(dash, token, yes)
}

// ---------------------------------------------------------------------------
// keydesk ips
// ---------------------------------------------------------------------------

pub fn run_ips_list<T: Transport>(dash: &mut Dashboard<T>, format: OutputFormat) -> Result<()> {
    dash.load_ip_usage();
    let ips = panel_data(dash, dash.ips())?.unwrap_or_default();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ips)?),
        OutputFormat::Table if ips.is_empty() => {
            println!("{}", dash.messages().ips_empty.yellow());
        }
        OutputFormat::Table => print_ips_table(&ips, dash.locale()),
    }
    Ok(())
}

fn print_ips_table(ips: &[IpUsageRecord], locale: Locale) {
    let m = locale.messages();
    println!("{}", m.tab_ip_usage.bold().cyan());
    println!(
        "  {:<40} {:>12} {:>12} {:>10}  {}",
        m.col_ip_address,
        m.col_token_limit,
        m.col_tokens_used,
        m.col_request_count,
        m.col_last_request
    );
    println!("  {}", "-".repeat(100));

    for (i, ip) in ips.iter().enumerate() {
        let line = format!(
            "  {:<40} {:>12} {:>12} {:>10}  {}",
            truncate(&ip.ip_address, 40),
            format_number(ip.monthly_token_limit, locale),
            format_number(ip.tokens_used, locale),
            format_number(ip.request_count, locale),
            format_date(ip.last_request_time.as_deref(), locale),
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

pub fn run_ips_reset<T: Transport>(dash: &mut Dashboard<T>, ip: &str, yes: bool) -> Result<()> {
    let token = dash.request_reset_ip(ip);
    confirm_and_run(dash, token, yes)
}

/// Show the pending confirmation; run it on `--yes` or a "y" answer.
fn confirm_and_run<T: Transport>(dash: &mut Dashboard<T>, token: u64, yes: bool) -> Result<()> {
    let accepted = yes || {
        let message = dash
            .dialog()
            .pending()
            .map(|p| p.message.clone())
            .unwrap_or_default();
        print!("{} [y/N] ", message.bold());
        io::stdout().flush().context("failed to flush stdout")?;
        read_yes_no(io::stdin().lock())
    };

    if !accepted {
        dash.cancel_dialog();
        println!("{}", dash.messages().cancelled.dimmed());
        return Ok(());
    }
    let outcome = dash.confirm(token);
    finish(dash, outcome)
}

/// `y`/`yes` (any case) accepts; anything else, including EOF, declines.
fn read_yes_no(mut input: impl BufRead) -> bool {
    let mut line = String::new();
    if input.read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "e" | "evet")
}

// ---------------------------------------------------------------------------
// keydesk summary | usage
// ---------------------------------------------------------------------------

pub fn run_summary<T: Transport>(dash: &mut Dashboard<T>, format: OutputFormat) -> Result<()> {
    dash.load_usage_summary();
    let summary = panel_data(dash, dash.summary())?.unwrap_or_default();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table => print_summary(&summary, dash.locale()),
    }
    Ok(())
}

fn print_summary(summary: &UsageSummary, locale: Locale) {
    let m = locale.messages();
    println!("{}", m.general_stats.bold().cyan());
    for (label, value) in [
        (m.total_api_keys, summary.total_api_keys),
        (m.total_ips, summary.total_ips),
        (m.today_requests, summary.today_requests),
        (m.monthly_requests, summary.monthly_requests),
    ] {
        println!("  {:<28} {}", format!("{label}:").bold(), format_number(value, locale));
    }

    if !summary.top_api_keys.is_empty() {
        println!();
        println!("{}", m.top_api_keys.bold().cyan());
        for top in &summary.top_api_keys {
            println!(
                "  {:<28} {} {}",
                format!("{}: {}", m.api_key_id, top.api_key_id),
                format_number(top.usage_count, locale),
                m.requests_suffix
            );
        }
    }

    if !summary.top_ips.is_empty() {
        println!();
        println!("{}", m.top_ips.bold().cyan());
        for top in &summary.top_ips {
            println!(
                "  {:<28} {} {}",
                top.request_ip.as_deref().unwrap_or(MISSING),
                format_number(top.usage_count, locale),
                m.requests_suffix
            );
        }
    }
}

/// Quota of the configured API key (or of this machine's IP).
pub fn run_usage<T: Transport>(dash: &Dashboard<T>, format: OutputFormat) -> Result<()> {
    let info = dash.client().usage_info().map_err(|e| match e {
        crate::api::ApiError::Unauthorized => {
            anyhow::anyhow!("unauthorized: the backend rejected the API key")
        }
        other => anyhow::Error::new(other).context("failed to fetch usage info"),
    })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
        OutputFormat::Table => print_usage(&info, dash.locale()),
    }
    Ok(())
}

fn print_usage(info: &UsageInfo, locale: Locale) {
    let m = locale.messages();
    let title = if info.using_api_key { m.usage_title_key } else { m.usage_title_ip };
    println!("{}", title.bold().cyan());
    for (label, value) in usage_rows(info, locale) {
        println!("  {:<20} {}", format!("{label}:").bold(), value);
    }
}

/// Label and value lines for a caller's quota. An unlimited caller shows
/// no limit figures.
fn usage_rows(info: &UsageInfo, locale: Locale) -> Vec<(&'static str, String)> {
    let m = locale.messages();
    let mut rows = vec![(m.col_tokens_used, format_number(info.tokens_used, locale))];
    if info.is_unlimited {
        rows.push((m.usage_limit, m.usage_unlimited.green().to_string()));
        return rows;
    }
    if let Some(limit) = info.monthly_token_limit {
        rows.push((m.col_monthly_limit, format_number(limit, locale)));
    }
    if let Some(remaining) = info.tokens_remaining {
        let text = remaining.to_string();
        let colored = if remaining > 0 { text.green() } else { text.red() };
        rows.push((m.usage_remaining, colored.to_string()));
    }
    if let Some(count) = info.request_count {
        rows.push((m.col_request_count, format_number(count, locale)));
    }
    if let Some(rate) = info.rate_limit {
        rows.push((
            m.usage_rate_limit,
            format!("{} / {} {}", rate.max_requests, rate.time_window_minutes, m.minutes_suffix),
        ));
    }
    rows
}

// ---------------------------------------------------------------------------
// keydesk health | predict
// ---------------------------------------------------------------------------

pub fn run_health<T: Transport>(dash: &mut Dashboard<T>, config: &KeydeskConfig) -> Result<()> {
    let m = dash.messages();
    println!("{}", "keydesk Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.keydesk/config.toml found"
        } else {
            "not found (run `keydesk config init` to create)"
        },
    );
    print_health_item(
        "Credentials",
        !config.backend.admin_token.is_empty() || !config.backend.session_cookie.is_empty(),
        "backend.admin_token / backend.session_cookie",
    );

    let status = dash.check_health();
    let detail = match status {
        HealthStatus::Running => m.health_running,
        HealthStatus::Error => m.health_error,
        HealthStatus::Unreachable => m.health_unreachable,
    };
    print_health_item(
        m.status_label,
        status.is_ok(),
        &format!("{detail} ({})", config.backend.base_url),
    );
    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

pub fn run_predict<T: Transport>(dash: &mut Dashboard<T>, text: &str) -> Result<()> {
    dash.predict(text);
    ensure_authorized(dash)?;
    match dash.playground().result() {
        Some(PredictResult::Json(body)) => println!("{body}"),
        Some(PredictResult::Warning(message)) => println!("{}", message.yellow()),
        Some(PredictResult::Failed(message)) => anyhow::bail!("{message}"),
        None => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// keydesk config show | init | set | reset
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective keydesk Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.keydesk/config.toml", global_exists);
    print_source(".keydesk.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "KEYDESK_* environment variables".dimmed());
    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Set backend.base_url and backend.admin_token to get started.".dimmed());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} Config reset to defaults at {}", "✓".green().bold(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn yes_no(value: bool, locale: Locale) -> &'static str {
    let m = locale.messages();
    if value { m.yes } else { m.no }
}

/// Truncate to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("açıklama", 4), "açı…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Table);
    }

    #[test]
    fn yes_no_answers() {
        assert!(read_yes_no("y\n".as_bytes()));
        assert!(read_yes_no("YES\n".as_bytes()));
        assert!(read_yes_no("evet\n".as_bytes()));
        assert!(!read_yes_no("n\n".as_bytes()));
        assert!(!read_yes_no("".as_bytes()));
    }

    #[test]
    fn usage_rows_follow_locale() {
        colored::control::set_override(false);
        let info = UsageInfo {
            tokens_used: 1500,
            monthly_token_limit: Some(100_000),
            tokens_remaining: Some(98_500),
            request_count: Some(3),
            rate_limit: Some(crate::api::types::RateLimit {
                max_requests: 15,
                time_window_minutes: 15,
            }),
            ..UsageInfo::default()
        };
        let tr = Locale::Tr.messages();
        let rows = usage_rows(&info, Locale::Tr);
        assert_eq!(rows[0], (tr.col_tokens_used, "1.500".to_string()));
        assert!(rows.contains(&(tr.usage_remaining, "98500".to_string())));
        assert_eq!(rows.last(), Some(&(tr.usage_rate_limit, "15 / 15 dk".to_string())));
    }

    #[test]
    fn unlimited_caller_shows_no_limit_figures() {
        colored::control::set_override(false);
        let info = UsageInfo {
            is_unlimited: true,
            monthly_token_limit: Some(10),
            ..UsageInfo::default()
        };
        let en = Locale::En.messages();
        let rows = usage_rows(&info, Locale::En);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], (en.usage_limit, "unlimited".to_string()));
    }

    #[test]
    fn changes_apply_only_given_fields() {
        let mut form = KeyForm {
            description: "old".to_string(),
            monthly_limit: "500".to_string(),
            is_unlimited: false,
            auto_reset: true,
        };
        KeyChanges {
            monthly_limit: Some("900".to_string()),
            auto_reset: Some(false),
            ..KeyChanges::default()
        }
        .apply(&mut form);
        assert_eq!(form.description, "old");
        assert_eq!(form.monthly_limit, "900");
        assert!(!form.auto_reset);
    }
}
