//! Key and IP mutations, modal openers and the playground actions.
//!
//! Every mutation follows the same shape: issue the request, toast the
//! outcome, and on success re-run the loader of the affected panel. Nothing
//! is updated optimistically.

use crate::api::types::{ApiKeyRecord, KeyPayload};
use crate::api::{ApiError, Transport};
use crate::playground::{pretty_json, HealthStatus, PredictResult};
use crate::ui::{ConfirmAction, KeyForm, LoadTarget, Submission};

use super::Dashboard;

/// What a mutation ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Success toast text.
    Succeeded(String),
    /// Error toast text.
    Failed(String),
    /// Session rejected; see [`Dashboard::redirect`].
    Redirected,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

impl<T: Transport> Dashboard<T> {
    // -----------------------------------------------------------------------
    // Key modal
    // -----------------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.key_modal.open_create();
    }

    /// Fetch the key and open the modal in edit mode with its fields.
    pub fn open_edit(&mut self, id: i64) {
        if let Some(record) = self.fetch_key(id) {
            self.key_modal.open_edit(&record);
        }
    }

    pub fn close_key_modal(&mut self) {
        self.key_modal.close();
    }

    /// Replace what is typed in the open key form.
    pub fn edit_form(&mut self, form: KeyForm) {
        self.key_modal.set_form(form);
    }

    /// Send the open form as a create or an update, depending on mode.
    ///
    /// Returns `None` when no modal is open.
    pub fn submit_key_form(&mut self) -> Option<MutationOutcome> {
        let submission = self
            .key_modal
            .submission(self.options.default_monthly_limit)?;
        Some(match submission {
            Submission::Create(payload) => self.create_key(&payload),
            Submission::Update { id, payload } => self.update_key(id, &payload),
        })
    }

    pub fn create_key(&mut self, payload: &KeyPayload) -> MutationOutcome {
        let messages = self.messages();
        match self.client.create_key(payload) {
            Ok(created) => {
                tracing::info!(description = %payload.description, "api key created");
                let text = match created.key() {
                    Some(key) => messages.key_created_with(key),
                    None => messages.key_created.to_string(),
                };
                self.key_modal.close();
                self.succeed(text, LoadTarget::ApiKeys)
            }
            Err(err) => self.fail(&err, messages.key_create_failed),
        }
    }

    pub fn update_key(&mut self, id: i64, payload: &KeyPayload) -> MutationOutcome {
        let messages = self.messages();
        match self.client.update_key(id, payload) {
            Ok(message) => {
                tracing::info!(id, "api key updated");
                self.key_modal.close();
                let text = message.unwrap_or_else(|| messages.key_updated.to_string());
                self.succeed(text, LoadTarget::ApiKeys)
            }
            Err(err) => self.fail(&err, messages.key_update_failed),
        }
    }

    // -----------------------------------------------------------------------
    // Details
    // -----------------------------------------------------------------------

    pub fn show_details(&mut self, id: i64) {
        if let Some(record) = self.fetch_key(id) {
            self.details.open(record);
        }
    }

    pub fn close_details(&mut self) {
        self.details.close();
    }

    fn fetch_key(&mut self, id: i64) -> Option<ApiKeyRecord> {
        match self.client.get_key(id) {
            Ok(record) => Some(record),
            Err(err) => {
                let generic = self.messages().key_fetch_failed;
                self.report_failure(&err, generic);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Confirmed actions
    // -----------------------------------------------------------------------

    /// Ask for confirmation before deleting key `id`. Returns the dialog token.
    pub fn request_delete(&mut self, id: i64) -> u64 {
        let messages = self.messages();
        self.dialog.ask(
            messages.delete_title,
            messages.delete_prompt(id),
            ConfirmAction::DeleteKey { id },
        )
    }

    /// Ask for confirmation before resetting the counters of `ip`.
    pub fn request_reset_ip(&mut self, ip: &str) -> u64 {
        let messages = self.messages();
        self.dialog.ask(
            messages.reset_title,
            messages.reset_prompt(ip),
            ConfirmAction::ResetIp { ip: ip.to_string() },
        )
    }

    /// Run the pending action if `token` is still current.
    pub fn confirm(&mut self, token: u64) -> Option<MutationOutcome> {
        let action = self.dialog.confirm(token)?;
        Some(match action {
            ConfirmAction::DeleteKey { id } => self.delete_key(id),
            ConfirmAction::ResetIp { ip } => self.reset_ip(&ip),
        })
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.cancel();
    }

    fn delete_key(&mut self, id: i64) -> MutationOutcome {
        let messages = self.messages();
        match self.client.delete_key(id) {
            Ok(message) => {
                tracing::info!(id, "api key deleted");
                let text = message.unwrap_or_else(|| messages.key_deleted.to_string());
                self.succeed(text, LoadTarget::ApiKeys)
            }
            Err(err) => self.fail(&err, messages.key_delete_failed),
        }
    }

    fn reset_ip(&mut self, ip: &str) -> MutationOutcome {
        let messages = self.messages();
        match self.client.reset_ip_limits(ip) {
            Ok(message) => {
                tracing::info!(ip, "ip limits reset");
                let text = message.unwrap_or_else(|| messages.ip_reset.to_string());
                self.succeed(text, LoadTarget::IpUsage)
            }
            Err(err) => self.fail(&err, messages.ip_reset_failed),
        }
    }

    fn succeed(&mut self, text: String, reload: LoadTarget) -> MutationOutcome {
        self.toasts.success(text.clone());
        self.load(reload);
        MutationOutcome::Succeeded(text)
    }

    fn fail(&mut self, err: &ApiError, generic: &str) -> MutationOutcome {
        match self.report_failure(err, generic) {
            Some(text) => MutationOutcome::Failed(text),
            None => MutationOutcome::Redirected,
        }
    }

    // -----------------------------------------------------------------------
    // Clipboard and playground
    // -----------------------------------------------------------------------

    pub fn key_copied(&mut self) {
        let text = self.messages().key_copied;
        self.toasts.success(text);
    }

    pub fn check_health(&mut self) -> HealthStatus {
        let status = match self.client.health() {
            Ok(body) => HealthStatus::from_body(&body),
            Err(ApiError::Unauthorized) => {
                self.redirect_to_login();
                HealthStatus::Error
            }
            Err(err) => {
                tracing::warn!(error = %err, "health check failed");
                HealthStatus::Unreachable
            }
        };
        tracing::debug!(?status, "health check");
        self.playground.set_health(status);
        status
    }

    pub fn predict(&mut self, text: &str) {
        let messages = self.messages();
        let Some(text) = self.playground.begin_predict(text, messages.predict_empty) else {
            return;
        };
        let result = match self.client.predict(&text) {
            Ok(body) => PredictResult::Json(pretty_json(&body)),
            Err(ApiError::Unauthorized) => {
                self.redirect_to_login();
                return;
            }
            Err(err) => PredictResult::Failed(messages.error(&err.to_string())),
        };
        self.playground.finish_predict(result);
    }
}
