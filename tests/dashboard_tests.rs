//! End-to-end dashboard behaviour against a scripted backend.

mod common;

use common::{dashboard, dashboard_with_style, key_list, ScriptedTransport, KEY_7};
use keydesk::api::ApiStyle;
use keydesk::dashboard::{MutationOutcome, PanelView, UiEvent};
use keydesk::render::views;
use keydesk::ui::{KeyForm, LoadTarget, ModalMode, Tab, ToastKind};

// ---------------------------------------------------------------------------
// Tabs and loading
// ---------------------------------------------------------------------------

#[test]
fn exactly_one_tab_is_visible_after_any_selection() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /admin/list_ip_usage", 200, r#"{"ip_usage": []}"#)
        .on("GET /admin/usage_summary", 200, "{}")
        .on("GET /health", 200, r#"{"status": "ok"}"#);
    let mut dash = dashboard(transport);
    dash.start();

    for tab in [Tab::Playground, Tab::IpUsage, Tab::Endpoints, Tab::ApiKeys, Tab::UsageSummary] {
        dash.select_tab(tab);
        let visible: Vec<Tab> = Tab::ALL
            .into_iter()
            .filter(|t| dash.tabs().is_visible(*t))
            .collect();
        assert_eq!(visible, vec![tab]);
        assert_eq!(dash.tabs().active(), tab);
    }
}

#[test]
fn loader_runs_only_on_first_activation() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /admin/list_ip_usage", 200, r#"{"ip_usage": []}"#);
    let mut dash = dashboard(transport);
    dash.start();
    dash.select_tab(Tab::IpUsage);
    dash.select_tab(Tab::ApiKeys);
    dash.select_tab(Tab::IpUsage);

    let t = dash.client().transport();
    assert_eq!(t.count("GET /admin/keys"), 1);
    assert_eq!(t.count("GET /admin/list_ip_usage"), 1);
}

#[test]
fn refresh_reloads_an_already_loaded_tab() {
    let transport = ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[]));
    let mut dash = dashboard(transport);
    dash.start();
    dash.handle(UiEvent::Refresh {
        target: LoadTarget::ApiKeys,
    });
    assert_eq!(dash.client().transport().count("GET /admin/keys"), 2);
}

#[test]
fn empty_key_list_shows_empty_state() {
    let mut dash = dashboard(ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[])));
    dash.start();

    assert_eq!(dash.keys(), &PanelView::Empty);
    let panel = views::keys_panel(dash.keys(), dash.locale()).into_string();
    assert!(panel.contains("No API keys have been created yet."));
    assert!(!panel.contains("<table"));
}

#[test]
fn backend_error_shows_banner_with_message() {
    let mut dash = dashboard(
        ScriptedTransport::new().on("GET /admin/keys", 200, r#"{"error": "database offline"}"#),
    );
    dash.start();

    assert_eq!(dash.keys().error(), Some("database offline"));
    let panel = views::keys_panel(dash.keys(), dash.locale()).into_string();
    assert!(panel.contains("alert alert-error"));
    assert!(panel.contains("database offline"));
}

#[test]
fn unreachable_backend_shows_generic_banner() {
    let mut dash = dashboard(ScriptedTransport::new());
    dash.start();
    assert_eq!(
        dash.keys().error(),
        Some("An error occurred while loading API keys.")
    );
}

#[test]
fn unauthorized_load_redirects_without_rendering_data() {
    let mut dash = dashboard(ScriptedTransport::new().on("GET /admin/keys", 401, ""));
    dash.start();

    assert_eq!(dash.redirect(), Some("/admin?error=401"));
    assert!(dash.keys().ready().is_none());
    assert!(dash.keys().error().is_none());
    assert!(dash.toasts().is_empty());
}

#[test]
fn events_are_ignored_once_redirect_is_pending() {
    let mut dash = dashboard(ScriptedTransport::new().on("GET /admin/keys", 401, ""));
    dash.start();
    dash.handle(UiEvent::SelectTab { tab: Tab::IpUsage });

    assert_eq!(dash.tabs().active(), Tab::ApiKeys);
    assert_eq!(dash.client().transport().count("GET /admin/list_ip_usage"), 0);
}

// ---------------------------------------------------------------------------
// Create / edit
// ---------------------------------------------------------------------------

#[test]
fn creating_a_key_toasts_closes_modal_and_reloads() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on(
            "POST /admin/keys",
            201,
            r#"{"message": "created", "api_key": "sk-live-new"}"#,
        );
    let mut dash = dashboard(transport);
    dash.start();

    dash.handle(UiEvent::OpenCreate);
    assert_eq!(dash.key_modal().mode(), Some(ModalMode::Create));
    dash.handle(UiEvent::SubmitKeyForm {
        form: KeyForm {
            description: "batch".to_string(),
            monthly_limit: "".to_string(),
            is_unlimited: false,
            auto_reset: true,
        },
    });

    let t = dash.client().transport();
    let sent = t.last_request("POST /admin/keys").unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["description"], "batch");
    assert_eq!(body["monthly_token_limit"], 100_000);
    assert_eq!(body["auto_reset"], true);
    assert_eq!(sent.header("content-type"), Some("application/json"));

    assert_eq!(t.count("GET /admin/keys"), 2);
    assert!(!dash.key_modal().is_open());
    let toast = dash.toasts().last().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "API key created successfully. sk-live-new");
    assert_eq!(dash.keys().ready().map(Vec::len), Some(1));
}

#[test]
fn edit_round_trips_all_four_fields() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on("GET /admin/keys/7", 200, &format!(r#"{{"api_key": {KEY_7}}}"#))
        .on("PUT /admin/keys/7", 200, r#"{"message": "saved"}"#);
    let mut dash = dashboard(transport);
    dash.start();

    dash.handle(UiEvent::OpenEdit { id: 7 });
    assert_eq!(dash.key_modal().mode(), Some(ModalMode::Edit { id: 7 }));
    let form = dash.key_modal().form().clone();
    assert_eq!(form.description, "reporting job");
    assert_eq!(form.monthly_limit, "250000");
    assert!(!form.is_unlimited);
    assert!(form.auto_reset);

    dash.handle(UiEvent::SubmitKeyForm { form });
    let sent = dash
        .client()
        .transport()
        .last_request("PUT /admin/keys/7")
        .unwrap();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "description": "reporting job",
            "monthly_token_limit": 250000,
            "is_unlimited": false,
            "auto_reset": true
        })
    );
    assert_eq!(dash.toasts().last().unwrap().message, "saved");
}

#[test]
fn failed_edit_fetch_keeps_modal_closed() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on("GET /admin/keys/9", 404, r#"{"error": "API key not found"}"#);
    let mut dash = dashboard(transport);
    dash.start();
    dash.handle(UiEvent::OpenEdit { id: 9 });

    assert!(!dash.key_modal().is_open());
    let toast = dash.toasts().last().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Error: API key not found");
}

// ---------------------------------------------------------------------------
// Confirmed actions
// ---------------------------------------------------------------------------

#[test]
fn confirmed_delete_calls_backend_and_reloads() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on("DELETE /admin/keys/7", 200, r#"{"message": "API key deleted"}"#);
    let mut dash = dashboard(transport);
    dash.start();

    let token = dash.request_delete(7);
    assert!(dash.dialog().is_open());
    let outcome = dash.confirm(token);

    assert_eq!(
        outcome,
        Some(MutationOutcome::Succeeded("API key deleted".to_string()))
    );
    let t = dash.client().transport();
    assert_eq!(t.count("DELETE /admin/keys/7"), 1);
    assert_eq!(t.count("GET /admin/keys"), 2);
    assert!(!dash.dialog().is_open());
}

#[test]
fn failed_delete_toasts_error_without_reload() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on("DELETE /admin/keys/7", 500, r#"{"error": "constraint violation"}"#);
    let mut dash = dashboard(transport);
    dash.start();

    let token = dash.request_delete(7);
    let outcome = dash.confirm(token);

    assert_eq!(
        outcome,
        Some(MutationOutcome::Failed("Error: constraint violation".to_string()))
    );
    assert_eq!(dash.client().transport().count("GET /admin/keys"), 1);
    assert_eq!(dash.toasts().last().unwrap().kind, ToastKind::Error);
}

#[test]
fn cancelled_delete_sends_nothing() {
    let transport = ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[KEY_7]));
    let mut dash = dashboard(transport);
    dash.start();

    let token = dash.request_delete(7);
    dash.handle(UiEvent::CancelDialog);
    assert_eq!(dash.confirm(token), None);
    assert_eq!(dash.client().transport().count("DELETE /admin/keys/7"), 0);
}

#[test]
fn ip_reset_encodes_address_and_reloads_ip_panel() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /admin/list_ip_usage", 200, r#"{"ip_usage": []}"#)
        .on("POST /admin/reset_ip_limits/2001%3Adb8%3A%3A1", 200, "{}");
    let mut dash = dashboard(transport);
    dash.start();
    dash.select_tab(Tab::IpUsage);

    let token = dash.request_reset_ip("2001:db8::1");
    let outcome = dash.confirm(token).unwrap();

    assert!(outcome.is_success());
    assert_eq!(dash.client().transport().count("GET /admin/list_ip_usage"), 2);
    assert_eq!(dash.toasts().last().unwrap().message, "IP limits reset successfully.");
}

#[test]
fn ip_rows_with_null_counters_still_load() {
    let ips = r#"{"ip_usage": [{
        "ip_address": "10.0.0.9",
        "monthly_token_limit": null,
        "tokens_used": null,
        "request_count": 3,
        "last_request_time": null,
        "last_reset_date": null
    }]}"#;
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /admin/list_ip_usage", 200, ips);
    let mut dash = dashboard(transport);
    dash.start();
    dash.select_tab(Tab::IpUsage);

    let PanelView::Ready(rows) = dash.ips() else {
        panic!("expected loaded IP rows, got {:?}", dash.ips());
    };
    assert_eq!(rows[0].ip_address, "10.0.0.9");
    assert_eq!(rows[0].monthly_token_limit, 0);
    assert_eq!(rows[0].request_count, 3);
}

// ---------------------------------------------------------------------------
// Legacy paths
// ---------------------------------------------------------------------------

#[test]
fn legacy_style_uses_legacy_key_paths() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/list_api_keys", 200, &key_list(&[KEY_7]))
        .on("GET /admin/get_api_key/7", 200, &format!(r#"{{"api_key": {KEY_7}}}"#))
        .on("DELETE /admin/delete_api_key/7", 200, "{}");
    let mut dash = dashboard_with_style(transport, ApiStyle::Legacy);
    dash.start();
    dash.show_details(7);
    let token = dash.request_delete(7);
    dash.confirm(token);

    assert_eq!(
        dash.client().transport().calls(),
        vec![
            "GET /admin/list_api_keys",
            "GET /admin/get_api_key/7",
            "DELETE /admin/delete_api_key/7",
            "GET /admin/list_api_keys",
        ]
    );
    assert_eq!(dash.details().record().map(|r| r.id), Some(7));
}

// ---------------------------------------------------------------------------
// Playground
// ---------------------------------------------------------------------------

#[test]
fn opening_playground_checks_health_once() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[]))
        .on("GET /health", 200, r#"{"status": "healthy"}"#);
    let mut dash = dashboard(transport);
    dash.start();
    dash.select_tab(Tab::Playground);
    dash.select_tab(Tab::ApiKeys);
    dash.select_tab(Tab::Playground);

    assert_eq!(dash.client().transport().count("GET /health"), 1);
    assert!(dash.playground().health().is_some_and(|h| h.is_ok()));
}
