//! Page-level rendering checks.

mod common;

use common::{key_list, ScriptedTransport, KEY_7};
use keydesk::api::{ApiClient, ApiStyle};
use keydesk::dashboard::{Dashboard, DashboardOptions, UiEvent};
use keydesk::i18n::Locale;
use keydesk::render::views;
use keydesk::ui::Tab;

fn turkish(transport: ScriptedTransport) -> Dashboard<ScriptedTransport> {
    let options = DashboardOptions {
        locale: Locale::Tr,
        ..DashboardOptions::default()
    };
    Dashboard::new(ApiClient::new(transport, ApiStyle::Rest), options)
}

#[test]
fn page_is_a_complete_document_with_all_panels() {
    let transport = ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[KEY_7]));
    let mut dash = common::dashboard(transport);
    dash.start();
    let html = views::page(&dash).into_string();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"en\">"));
    for tab in Tab::ALL {
        assert!(html.contains(&format!("id=\"{}\"", tab.panel_id())), "missing {tab:?}");
    }
    assert!(html.contains("sk-live-7"));
    assert!(html.contains("250,000"));
}

#[test]
fn turkish_locale_translates_labels_and_numbers() {
    let transport = ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[KEY_7]));
    let mut dash = turkish(transport);
    dash.start();
    let html = views::page(&dash).into_string();

    assert!(html.contains("<html lang=\"tr\">"));
    assert!(html.contains("250.000"));
    assert!(html.contains("Evet"));
}

#[test]
fn inactive_panels_are_hidden() {
    let transport = ScriptedTransport::new().on("GET /admin/keys", 200, &key_list(&[]));
    let mut dash = common::dashboard(transport);
    dash.start();
    let html = views::app(&dash).into_string();

    let visible = format!("<section id=\"{}\" class=\"tab-content\">", Tab::ApiKeys.panel_id());
    assert!(html.contains(&visible));
    assert_eq!(html.matches("hidden=\"hidden\"").count(), Tab::ALL.len() - 1);
}

#[test]
fn open_modal_and_dialog_render_into_app() {
    let transport = ScriptedTransport::new()
        .on("GET /admin/keys", 200, &key_list(&[KEY_7]))
        .on("GET /admin/keys/7", 200, &format!(r#"{{"api_key": {KEY_7}}}"#));
    let mut dash = common::dashboard(transport);
    dash.start();
    dash.handle(UiEvent::OpenEdit { id: 7 });
    dash.handle(UiEvent::RequestDelete { id: 7 });
    let html = views::app(&dash).into_string();

    assert!(html.contains("id=\"keyForm\""));
    assert!(html.contains("value=\"reporting job\""));
    assert!(html.contains("Are you sure"));
}
