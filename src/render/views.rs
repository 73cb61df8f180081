//! Panel, modal and page views.
//!
//! Interactive elements carry a `data-event` attribute holding the
//! serialized [`UiEvent`] they fire; the page script posts it verbatim.

use std::time::Instant;

use crate::api::types::{ApiKeyRecord, IpUsageRecord, UsageSummary};
use crate::api::{ApiStyle, Endpoint, Transport};
use crate::dashboard::{Dashboard, PanelView, UiEvent};
use crate::i18n::{Locale, Messages};
use crate::playground::{HealthStatus, Playground, PredictResult};
use crate::ui::{
    ConfirmDialog, KeyModal, LoadTarget, ModalMode, Tab, TabController, ToastKind, ToastQueue,
};

use super::format::{format_date, format_number, MISSING};
use super::{element, shell, Html};

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

fn event_json(event: &UiEvent) -> String {
    serde_json::to_string(event).unwrap_or_default()
}

fn button(class: &str, event: &UiEvent, label: &str) -> Html {
    element(
        "button",
        &[("type", "button"), ("class", class), ("data-event", &event_json(event))],
        Html::text(label),
    )
}

fn yes_no(value: bool, m: &Messages) -> &'static str {
    if value { m.yes } else { m.no }
}

fn th_row(headers: &[&str]) -> Html {
    let mut row = Html::raw("<thead><tr>");
    for header in headers {
        row.push(element("th", &[], Html::text(header)));
    }
    row.push_raw("</tr></thead>");
    row
}

fn td(text: &str) -> Html {
    element("td", &[], Html::text(text))
}

// ---------------------------------------------------------------------------
// Panel states
// ---------------------------------------------------------------------------

pub fn loading(locale: Locale) -> Html {
    element("div", &[("class", "loading")], Html::text(locale.messages().loading))
}

pub fn error_banner(message: &str) -> Html {
    element("div", &[("class", "alert alert-error"), ("role", "alert")], Html::text(message))
}

pub fn empty_state(message: &str) -> Html {
    element("div", &[("class", "empty-state")], Html::text(message))
}

fn panel<D>(
    view: &PanelView<D>,
    empty_message: &str,
    locale: Locale,
    ready: impl FnOnce(&D, Locale) -> Html,
) -> Html {
    match view {
        PanelView::Idle => Html::new(),
        PanelView::Loading => loading(locale),
        PanelView::Error(message) => error_banner(message),
        PanelView::Empty => empty_state(empty_message),
        PanelView::Ready(data) => ready(data, locale),
    }
}

// ---------------------------------------------------------------------------
// API keys
// ---------------------------------------------------------------------------

pub fn api_keys_table(records: &[ApiKeyRecord], locale: Locale) -> Html {
    let m = locale.messages();
    if records.is_empty() {
        return empty_state(m.keys_empty);
    }

    let mut body = Html::raw("<tbody>");
    for record in records {
        let mut row = Html::raw("<tr>");
        row.push(td(&record.id.to_string()));

        let mut key_cell = element("code", &[], Html::text(&record.api_key));
        key_cell.push(element(
            "button",
            &[("type", "button"), ("class", "btn-link"), ("data-copy", &record.api_key)],
            Html::text(m.action_copy),
        ));
        row.push(element("td", &[("class", "key-cell")], key_cell));

        row.push(td(record.description.as_deref().unwrap_or(MISSING)));
        row.push(td(yes_no(record.is_unlimited, m)));
        row.push(td(&format_number(record.monthly_token_limit, locale)));
        row.push(td(&format_number(record.tokens_used, locale)));
        row.push(td(yes_no(record.auto_reset, m)));
        row.push(td(&format_date(record.last_reset_date.as_deref(), locale)));

        let id = record.id;
        let mut actions = button("btn btn-sm", &UiEvent::ShowDetails { id }, m.action_details);
        actions.push(button("btn btn-sm", &UiEvent::OpenEdit { id }, m.action_edit));
        actions.push(button(
            "btn btn-sm btn-danger",
            &UiEvent::RequestDelete { id },
            m.action_delete,
        ));
        row.push(element("td", &[("class", "actions")], actions));

        row.push_raw("</tr>");
        body.push(row);
    }
    body.push_raw("</tbody>");

    let mut table = th_row(&[
        m.col_id,
        m.col_api_key,
        m.col_description,
        m.col_unlimited,
        m.col_monthly_limit,
        m.col_tokens_used,
        m.col_auto_reset,
        m.col_last_reset,
        m.col_actions,
    ]);
    table.push(body);
    element("table", &[("class", "table")], table)
}

pub fn keys_panel(view: &PanelView<Vec<ApiKeyRecord>>, locale: Locale) -> Html {
    let m = locale.messages();
    let mut out = toolbar(LoadTarget::ApiKeys, m);
    out.push(panel(view, m.keys_empty, locale, |records, l| api_keys_table(records, l)));
    out
}

// ---------------------------------------------------------------------------
// IP usage
// ---------------------------------------------------------------------------

pub fn ip_usage_table(records: &[IpUsageRecord], locale: Locale) -> Html {
    let m = locale.messages();
    if records.is_empty() {
        return empty_state(m.ips_empty);
    }

    let mut body = Html::raw("<tbody>");
    for record in records {
        let mut row = Html::raw("<tr>");
        row.push(element("td", &[], element("code", &[], Html::text(&record.ip_address))));
        row.push(td(&format_number(record.monthly_token_limit, locale)));
        row.push(td(&format_number(record.tokens_used, locale)));
        row.push(td(&format_number(record.request_count, locale)));
        row.push(td(&format_date(record.last_request_time.as_deref(), locale)));
        row.push(td(&format_date(record.last_reset_date.as_deref(), locale)));
        let reset = button(
            "btn btn-sm btn-warning",
            &UiEvent::RequestResetIp { ip: record.ip_address.clone() },
            m.action_reset,
        );
        row.push(element("td", &[("class", "actions")], reset));
        row.push_raw("</tr>");
        body.push(row);
    }
    body.push_raw("</tbody>");

    let mut table = th_row(&[
        m.col_ip_address,
        m.col_token_limit,
        m.col_tokens_used,
        m.col_request_count,
        m.col_last_request,
        m.col_last_reset,
        m.col_actions,
    ]);
    table.push(body);
    element("table", &[("class", "table")], table)
}

pub fn ips_panel(view: &PanelView<Vec<IpUsageRecord>>, locale: Locale) -> Html {
    let m = locale.messages();
    let mut out = toolbar(LoadTarget::IpUsage, m);
    out.push(panel(view, m.ips_empty, locale, |records, l| ip_usage_table(records, l)));
    out
}

// ---------------------------------------------------------------------------
// Usage summary
// ---------------------------------------------------------------------------

/// General stats card, plus top keys and top IPs cards when they have rows.
pub fn usage_summary(summary: &UsageSummary, locale: Locale) -> Html {
    let m = locale.messages();

    let mut stats = Html::new();
    for (label, value) in [
        (m.total_api_keys, summary.total_api_keys),
        (m.total_ips, summary.total_ips),
        (m.today_requests, summary.today_requests),
        (m.monthly_requests, summary.monthly_requests),
    ] {
        let figure = Html::text(&format_number(value, locale));
        let mut stat = element("div", &[("class", "stat-value")], figure);
        stat.push(element("div", &[("class", "stat-label")], Html::text(label)));
        stats.push(element("div", &[("class", "stat")], stat));
    }
    let mut out = card(m.general_stats, element("div", &[("class", "stat-grid")], stats));

    if !summary.top_api_keys.is_empty() {
        let items = summary
            .top_api_keys
            .iter()
            .map(|top| {
                list_item(
                    &format!("{}: {}", m.api_key_id, top.api_key_id),
                    &format!("{} {}", format_number(top.usage_count, locale), m.requests_suffix),
                )
            })
            .collect();
        out.push(card(m.top_api_keys, element("ul", &[("class", "top-list")], items)));
    }

    if !summary.top_ips.is_empty() {
        let items = summary
            .top_ips
            .iter()
            .map(|top| {
                list_item(
                    top.request_ip.as_deref().unwrap_or(MISSING),
                    &format!("{} {}", format_number(top.usage_count, locale), m.requests_suffix),
                )
            })
            .collect();
        out.push(card(m.top_ips, element("ul", &[("class", "top-list")], items)));
    }

    out
}

pub fn summary_panel(view: &PanelView<UsageSummary>, locale: Locale) -> Html {
    let m = locale.messages();
    let mut out = toolbar(LoadTarget::UsageSummary, m);
    out.push(panel(view, m.summary_load_failed, locale, usage_summary));
    out
}

fn card(title: &str, body: Html) -> Html {
    let mut inner = element("h3", &[], Html::text(title));
    inner.push(body);
    element("div", &[("class", "card")], inner)
}

fn list_item(label: &str, value: &str) -> Html {
    let mut inner = element("span", &[], Html::text(label));
    inner.push(element("span", &[("class", "badge")], Html::text(value)));
    element("li", &[], inner)
}

fn toolbar(target: LoadTarget, m: &Messages) -> Html {
    let mut buttons = Html::new();
    if target == LoadTarget::ApiKeys {
        buttons.push(button("btn btn-primary", &UiEvent::OpenCreate, m.new_key));
    }
    buttons.push(button("btn", &UiEvent::Refresh { target }, m.refresh));
    element("div", &[("class", "toolbar")], buttons)
}

// ---------------------------------------------------------------------------
// Modals
// ---------------------------------------------------------------------------

/// Create/edit form. Empty while the modal is closed.
pub fn key_modal(modal: &KeyModal, locale: Locale) -> Html {
    let m = locale.messages();
    let Some(mode) = modal.mode() else {
        return Html::new();
    };
    let (title, submit) = match mode {
        ModalMode::Create => (m.modal_create_title, m.modal_create_button),
        ModalMode::Edit { .. } => (m.modal_edit_title, m.modal_update_button),
    };
    let form = modal.form();

    let mut fields = Html::new();
    fields.push(labelled(
        m.form_description,
        element_void(
            "input",
            &[("type", "text"), ("name", "description"), ("value", &form.description)],
        ),
    ));
    fields.push(labelled(
        m.form_monthly_limit,
        element_void(
            "input",
            &[
                ("type", "number"),
                ("min", "1"),
                ("name", "monthly_limit"),
                ("value", &form.monthly_limit),
            ],
        ),
    ));
    fields.push(checkbox("is_unlimited", form.is_unlimited, m.form_unlimited));
    fields.push(checkbox("auto_reset", form.auto_reset, m.form_auto_reset));

    let mut footer = button("btn", &UiEvent::CloseKeyModal, m.cancel);
    footer.push(element(
        "button",
        &[("type", "submit"), ("class", "btn btn-primary")],
        Html::text(submit),
    ));
    fields.push(element("div", &[("class", "modal-footer")], footer));

    let submit_event = r#"{"type":"submit_key_form"}"#;
    let body = element(
        "form",
        &[("id", "keyForm"), ("data-submit", submit_event), ("data-field", "form")],
        fields,
    );
    modal_frame("keyModal", title, &UiEvent::CloseKeyModal, body)
}

/// Read-only view of one key.
pub fn detail_modal(record: &ApiKeyRecord, locale: Locale) -> Html {
    let m = locale.messages();
    let rows = [
        (m.col_id, record.id.to_string()),
        (m.col_api_key, record.api_key.clone()),
        (m.col_description, record.description.clone().unwrap_or_else(|| MISSING.to_string())),
        (m.col_unlimited, yes_no(record.is_unlimited, m).to_string()),
        (m.col_monthly_limit, format_number(record.monthly_token_limit, locale)),
        (m.col_tokens_used, format_number(record.tokens_used, locale)),
        (m.col_auto_reset, yes_no(record.auto_reset, m).to_string()),
        (m.col_last_reset, format_date(record.last_reset_date.as_deref(), locale)),
        (m.col_created, format_date(record.created_at.as_deref(), locale)),
        (m.col_updated, format_date(record.updated_at.as_deref(), locale)),
    ];
    let mut list = Html::new();
    for (label, value) in rows {
        list.push(element("dt", &[], Html::text(label)));
        list.push(element("dd", &[], Html::text(&value)));
    }
    let mut body = element("dl", &[("class", "details")], list);
    body.push(element(
        "div",
        &[("class", "modal-footer")],
        button("btn", &UiEvent::CloseDetails, m.close),
    ));
    modal_frame("detailsModal", m.details_title, &UiEvent::CloseDetails, body)
}

fn modal_frame(id: &str, title: &str, close: &UiEvent, body: Html) -> Html {
    let mut header = element("h2", &[], Html::text(title));
    header.push(button("btn-close", close, "\u{00d7}"));
    let mut inner = element("div", &[("class", "modal-header")], header);
    inner.push(body);
    let dialog = element("div", &[("class", "modal"), ("aria-label", title)], inner);
    element("div", &[("id", id), ("class", "modal-backdrop")], dialog)
}

fn labelled(label: &str, input: Html) -> Html {
    let mut inner = element("span", &[], Html::text(label));
    inner.push(input);
    element("label", &[("class", "field")], inner)
}

fn checkbox(name: &str, checked: bool, label: &str) -> Html {
    let mut attrs = vec![("type", "checkbox"), ("name", name)];
    if checked {
        attrs.push(("checked", "checked"));
    }
    let mut inner = element_void("input", &attrs);
    inner.push(element("span", &[], Html::text(label)));
    element("label", &[("class", "field checkbox")], inner)
}

fn element_void(tag: &str, attrs: &[(&str, &str)]) -> Html {
    let mut out = Html::raw("<");
    out.push_raw(tag);
    for (name, value) in attrs {
        out.push_attr(name, value);
    }
    out.push_raw(">");
    out
}

// ---------------------------------------------------------------------------
// Toasts and confirmation
// ---------------------------------------------------------------------------

/// Stack of live toasts. `data-toast-ttl` is the remaining lifetime in ms.
pub fn toasts(queue: &ToastQueue, now: Instant) -> Html {
    let mut out = Html::new();
    for toast in queue.iter().filter(|t| !t.is_expired(now)) {
        let kind = match toast.kind {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Warning => "toast toast-warning",
            ToastKind::Info => "toast toast-info",
        };
        let ttl = toast.remaining(now).as_millis().to_string();
        let mut inner = element("span", &[], Html::text(&toast.message));
        inner.push(button("btn-close", &UiEvent::DismissToast { id: toast.id }, "\u{00d7}"));
        out.push(element(
            "div",
            &[("class", kind), ("role", "status"), ("data-toast-ttl", &ttl)],
            inner,
        ));
    }
    element("div", &[("id", "toastContainer"), ("class", "toast-container")], out)
}

pub fn dialog(dialog: &ConfirmDialog, locale: Locale) -> Html {
    let m = locale.messages();
    let Some(pending) = dialog.pending() else {
        return Html::new();
    };
    let mut body = element("p", &[], Html::text(&pending.message));
    let mut footer = button("btn", &UiEvent::CancelDialog, m.cancel);
    footer.push(button("btn btn-danger", &UiEvent::Confirm { token: pending.token }, m.confirm));
    body.push(element("div", &[("class", "modal-footer")], footer));
    modal_frame("confirmDialog", &pending.title, &UiEvent::CancelDialog, body)
}

// ---------------------------------------------------------------------------
// Endpoints and playground
// ---------------------------------------------------------------------------

/// Static reference of the backend routes under `style`.
pub fn endpoints_reference(style: ApiStyle, locale: Locale) -> Html {
    let m = locale.messages();
    let endpoints = [
        Endpoint::Predict,
        Endpoint::Health,
        Endpoint::UsageInfo,
        Endpoint::ListKeys,
        Endpoint::GetKey(0),
        Endpoint::CreateKey,
        Endpoint::UpdateKey(0),
        Endpoint::DeleteKey(0),
        Endpoint::ListIpUsage,
        Endpoint::ResetIpLimits(":ip"),
        Endpoint::UsageSummary,
    ];

    let mut rows = Html::new();
    for endpoint in endpoints {
        let (method, path) = style.route(endpoint);
        let path = display_path(endpoint, &path);
        let badge = element("span", &[("class", "method")], Html::text(method.as_str()));
        let mut row = element("td", &[], badge);
        row.push(element("td", &[], element("code", &[], Html::text(&path))));
        row.push(td(m.endpoint_description(endpoint)));
        rows.push(element("tr", &[], row));
    }

    let mut out = element("p", &[("class", "muted")], Html::text(m.endpoints_intro));
    out.push(element("table", &[("class", "table")], element("tbody", &[], rows)));
    out
}

/// Show id placeholders as `:id` instead of the dummy value used to route.
fn display_path(endpoint: Endpoint<'_>, path: &str) -> String {
    match endpoint {
        Endpoint::GetKey(_) | Endpoint::UpdateKey(_) | Endpoint::DeleteKey(_) => {
            match path.rsplit_once('/') {
                Some((prefix, _)) => format!("{prefix}/:id"),
                None => path.to_string(),
            }
        }
        Endpoint::ResetIpLimits(_) => path.replace("%3Aip", ":ip"),
        _ => path.to_string(),
    }
}

pub fn playground(playground: &Playground, locale: Locale) -> Html {
    let m = locale.messages();

    let (class, label) = match playground.health() {
        Some(HealthStatus::Running) => ("badge ok", m.health_running),
        Some(HealthStatus::Error) => ("badge err", m.health_error),
        Some(HealthStatus::Unreachable) => ("badge err", m.health_unreachable),
        None => ("badge", MISSING),
    };
    let mut status = element("span", &[], Html::text(m.status_label));
    status.push(element("span", &[("id", "statusIndicator"), ("class", class)], Html::text(label)));
    status.push(button("btn btn-sm", &UiEvent::CheckHealth, m.health_check));
    let mut out = element("div", &[("class", "status-row")], status);

    let mut form = element(
        "textarea",
        &[("name", "text"), ("rows", "4"), ("placeholder", m.predict_placeholder)],
        Html::text(playground.text()),
    );
    form.push(element(
        "button",
        &[("type", "submit"), ("class", "btn btn-primary")],
        Html::text(m.predict_button),
    ));
    out.push(element(
        "form",
        &[("id", "predictForm"), ("data-submit", r#"{"type":"predict"}"#)],
        form,
    ));

    let result = match playground.result() {
        Some(PredictResult::Warning(text)) => {
            element("div", &[("class", "alert alert-warning")], Html::text(text))
        }
        Some(PredictResult::Json(text)) => element("pre", &[("class", "result")], Html::text(text)),
        Some(PredictResult::Failed(text)) => error_banner(text),
        None => Html::new(),
    };
    out.push(result);
    out
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

fn tab_bar(tabs: &TabController, m: &Messages) -> Html {
    let mut buttons = Html::new();
    for tab in Tab::ALL {
        let class = if tabs.is_visible(tab) { "tab active" } else { "tab" };
        buttons.push(button(class, &UiEvent::SelectTab { tab }, tab.label(m)));
    }
    element("nav", &[("class", "tabs")], buttons)
}

/// Everything inside `<body>`; the page script swaps this on each event.
pub fn app<T: Transport>(dashboard: &Dashboard<T>) -> Html {
    let locale = dashboard.locale();
    let m = locale.messages();
    let tabs = dashboard.tabs();

    let mut out = element("header", &[], element("h1", &[], Html::text(m.app_title)));
    out.push(tab_bar(tabs, m));

    for tab in Tab::ALL {
        let content = match tab {
            Tab::ApiKeys => keys_panel(dashboard.keys(), locale),
            Tab::IpUsage => ips_panel(dashboard.ips(), locale),
            Tab::UsageSummary => summary_panel(dashboard.summary(), locale),
            Tab::Endpoints => endpoints_reference(dashboard.client().style(), locale),
            Tab::Playground => playground(dashboard.playground(), locale),
        };
        let mut attrs = vec![("id", tab.panel_id()), ("class", "tab-content")];
        if !tabs.is_visible(tab) {
            attrs.push(("hidden", "hidden"));
        }
        out.push(element("section", &attrs, content));
    }

    out.push(key_modal(dashboard.key_modal(), locale));
    if let Some(record) = dashboard.details().record() {
        out.push(detail_modal(record, locale));
    }
    out.push(dialog(dashboard.dialog(), locale));
    out.push(toasts(dashboard.toasts(), Instant::now()));

    element("div", &[("id", "app"), ("class", "app")], out)
}

/// Full HTML document for the dashboard.
pub fn page<T: Transport>(dashboard: &Dashboard<T>) -> Html {
    let locale = dashboard.locale();
    shell::document(locale.html_lang(), locale.messages().app_title, app(dashboard))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::types::{TopApiKey, TopIp};

    fn key(id: i64, description: Option<&str>) -> ApiKeyRecord {
        ApiKeyRecord {
            id,
            api_key: format!("key-{id}"),
            description: description.map(str::to_string),
            is_unlimited: false,
            monthly_token_limit: 100_000,
            tokens_used: 1234,
            auto_reset: true,
            last_reset_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn empty_key_list_renders_message_not_table() {
        let html = api_keys_table(&[], Locale::En);
        assert!(html.as_str().contains(Locale::En.messages().keys_empty));
        assert!(!html.as_str().contains("<table"));
    }

    #[test]
    fn key_rows_escape_descriptions_and_carry_events() {
        let html = api_keys_table(&[key(7, Some("<b>bold</b>"))], Locale::En);
        let s = html.as_str();
        assert!(s.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!s.contains("<b>bold"));
        assert!(s.contains(r#"data-event="{&quot;type&quot;:&quot;request_delete&quot;,&quot;id&quot;:7}""#));
        assert!(s.contains(r#"data-copy="key-7""#));
        assert!(s.contains("100,000"));
    }

    #[test]
    fn error_banner_contains_message_verbatim() {
        let html = keys_panel(&PanelView::Error("quota table missing".to_string()), Locale::En);
        assert!(html.as_str().contains("quota table missing"));
        assert!(html.as_str().contains("alert-error"));
    }

    #[test]
    fn summary_hides_empty_top_lists() {
        let mut summary = UsageSummary {
            total_api_keys: 3,
            ..UsageSummary::default()
        };
        let m = Locale::En.messages();
        let bare = usage_summary(&summary, Locale::En);
        assert!(bare.as_str().contains(m.general_stats));
        assert!(!bare.as_str().contains(m.top_api_keys));
        assert!(!bare.as_str().contains(m.top_ips));

        summary.top_ips.push(TopIp {
            request_ip: Some("10.1.1.1".to_string()),
            usage_count: 12,
        });
        let with_ips = usage_summary(&summary, Locale::En);
        assert!(with_ips.as_str().contains(m.top_ips));
        assert!(!with_ips.as_str().contains(m.top_api_keys));

        summary.top_api_keys.push(TopApiKey { api_key_id: 4, usage_count: 2 });
        assert!(usage_summary(&summary, Locale::En).as_str().contains("API Key ID: 4"));
    }

    #[test]
    fn unknown_ip_group_renders_placeholder() {
        let summary = UsageSummary {
            top_ips: vec![TopIp { request_ip: None, usage_count: 6 }],
            ..UsageSummary::default()
        };
        let html = usage_summary(&summary, Locale::En);
        assert!(html.as_str().contains(&list_item(MISSING, "6 requests").into_string()));
    }

    #[test]
    fn closed_modal_and_dialog_render_nothing() {
        assert!(key_modal(&KeyModal::default(), Locale::En).is_empty());
        assert!(dialog(&ConfirmDialog::default(), Locale::En).is_empty());
    }

    #[test]
    fn edit_modal_prefills_fields() {
        let mut modal = KeyModal::default();
        modal.open_edit(&key(3, Some("ci \"runner\"")));
        let html = key_modal(&modal, Locale::Tr);
        let s = html.as_str();
        assert!(s.contains(Locale::Tr.messages().modal_edit_title));
        assert!(s.contains(r#"value="ci &quot;runner&quot;""#));
        assert!(s.contains(r#"name="auto_reset" checked="checked""#));
        assert!(!s.contains(r#"name="is_unlimited" checked"#));
    }

    #[test]
    fn toasts_carry_remaining_ttl() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let now = Instant::now();
        queue.push_at(ToastKind::Success, "saved", now);
        let html = toasts(&queue, now + Duration::from_secs(2));
        assert!(html.as_str().contains(r#"data-toast-ttl="3000""#));
        assert!(html.as_str().contains("toast-success"));

        let later = toasts(&queue, now + Duration::from_secs(6));
        assert!(!later.as_str().contains("saved"));
    }

    #[test]
    fn dialog_confirm_button_carries_token() {
        let mut d = ConfirmDialog::default();
        let token = d.ask("Delete", "Sure?", crate::ui::ConfirmAction::DeleteKey { id: 1 });
        let html = dialog(&d, Locale::En);
        assert!(html.as_str().contains(&format!("&quot;token&quot;:{token}")));
    }

    #[test]
    fn endpoints_reference_follows_style() {
        let rest = endpoints_reference(ApiStyle::Rest, Locale::En);
        assert!(rest.as_str().contains("/admin/keys/:id"));
        assert!(rest.as_str().contains("/admin/reset_ip_limits/:ip"));
        let legacy = endpoints_reference(ApiStyle::Legacy, Locale::En);
        assert!(legacy.as_str().contains("/admin/delete_api_key/:id"));
    }
}
