//! UI events posted by the page.

use serde::{Deserialize, Serialize};

use crate::api::Transport;
use crate::ui::{KeyForm, LoadTarget, Tab};

use super::Dashboard;

/// Everything a user can do on the page.
///
/// Serialized as `{"type": "open_edit", "id": 7}` and embedded in the
/// `data-event` attribute of the element that fires it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    SelectTab { tab: Tab },
    Refresh { target: LoadTarget },
    OpenCreate,
    OpenEdit { id: i64 },
    CloseKeyModal,
    SubmitKeyForm { form: KeyForm },
    ShowDetails { id: i64 },
    CloseDetails,
    RequestDelete { id: i64 },
    RequestResetIp { ip: String },
    Confirm { token: u64 },
    CancelDialog,
    DismissToast { id: u64 },
    KeyCopied,
    CheckHealth,
    Predict { text: String },
}

impl<T: Transport> Dashboard<T> {
    /// Dispatch one event. Ignored once a login redirect is pending.
    pub fn handle(&mut self, event: UiEvent) {
        if self.redirect.is_some() {
            tracing::debug!(?event, "redirect pending, event ignored");
            return;
        }
        tracing::debug!(?event, "ui event");

        match event {
            UiEvent::SelectTab { tab } => self.select_tab(tab),
            UiEvent::Refresh { target } => self.load(target),
            UiEvent::OpenCreate => self.open_create(),
            UiEvent::OpenEdit { id } => self.open_edit(id),
            UiEvent::CloseKeyModal => self.close_key_modal(),
            UiEvent::SubmitKeyForm { form } => {
                self.edit_form(form);
                self.submit_key_form();
            }
            UiEvent::ShowDetails { id } => self.show_details(id),
            UiEvent::CloseDetails => self.close_details(),
            UiEvent::RequestDelete { id } => {
                self.request_delete(id);
            }
            UiEvent::RequestResetIp { ip } => {
                self.request_reset_ip(&ip);
            }
            UiEvent::Confirm { token } => {
                self.confirm(token);
            }
            UiEvent::CancelDialog => self.cancel_dialog(),
            UiEvent::DismissToast { id } => {
                self.toasts.dismiss(id);
            }
            UiEvent::KeyCopied => self.key_copied(),
            UiEvent::CheckHealth => {
                self.check_health();
            }
            UiEvent::Predict { text } => self.predict(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::dashboard;
    use super::*;

    #[test]
    fn events_use_snake_case_tags() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type": "request_reset_ip", "ip": "1.2.3.4"}"#).unwrap();
        assert_eq!(event, UiEvent::RequestResetIp { ip: "1.2.3.4".to_string() });

        let json = serde_json::to_string(&UiEvent::SelectTab { tab: Tab::IpUsage }).unwrap();
        assert_eq!(json, r#"{"type":"select_tab","tab":"ip_usage"}"#);
    }

    #[test]
    fn submit_form_event_carries_partial_form() {
        let event: UiEvent = serde_json::from_str(
            r#"{"type": "submit_key_form", "form": {"description": "ci", "is_unlimited": true}}"#,
        )
        .unwrap();
        match event {
            UiEvent::SubmitKeyForm { form } => {
                assert_eq!(form.description, "ci");
                assert!(form.is_unlimited);
                assert_eq!(form.monthly_limit, "");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn events_ignored_after_redirect() {
        let mut dash = dashboard(&[(401, "")]);
        dash.handle(UiEvent::SelectTab { tab: Tab::ApiKeys });
        assert!(dash.redirect().is_some());

        dash.handle(UiEvent::OpenCreate);
        assert!(!dash.key_modal().is_open());
        assert_eq!(dash.client().transport().sent.borrow().len(), 1);
    }

    #[test]
    fn dismiss_removes_toast() {
        let mut dash = dashboard(&[]);
        dash.handle(UiEvent::KeyCopied);
        let id = dash.toasts().last().map(|t| t.id).unwrap();
        dash.handle(UiEvent::DismissToast { id });
        assert!(dash.toasts().is_empty());
    }
}
