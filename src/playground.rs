//! Service status check and ad-hoc `/predict` tester.
//!
//! These come from the service landing page: a status indicator driven by
//! `GET /health`, and a text box whose contents are posted to `/predict`
//! with the raw JSON answer shown back.

use serde_json::Value;

/// Interpretation of the `/health` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// `{"status": "healthy"}`
    Running,
    /// Any other JSON body.
    Error,
    /// No usable response at all.
    Unreachable,
}

impl HealthStatus {
    pub fn from_body(body: &Value) -> Self {
        match body.get("status").and_then(Value::as_str) {
            Some("healthy") => Self::Running,
            _ => Self::Error,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Self::Running
    }
}

/// What the tester shows below the text box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictResult {
    /// Input rejected before sending.
    Warning(String),
    /// Pretty-printed response body.
    Json(String),
    /// Request failed.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct Playground {
    health: Option<HealthStatus>,
    text: String,
    result: Option<PredictResult>,
}

impl Playground {
    pub fn health(&self) -> Option<HealthStatus> {
        self.health
    }

    pub fn set_health(&mut self, status: HealthStatus) {
        self.health = Some(status);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> Option<&PredictResult> {
        self.result.as_ref()
    }

    /// Record the submitted text. Returns the text to send, or `None` when it
    /// is blank and nothing should be sent.
    pub fn begin_predict(&mut self, text: &str, empty_warning: &str) -> Option<String> {
        self.text = text.to_string();
        if text.trim().is_empty() {
            self.result = Some(PredictResult::Warning(empty_warning.to_string()));
            return None;
        }
        self.result = None;
        Some(text.to_string())
    }

    pub fn finish_predict(&mut self, result: PredictResult) {
        self.result = Some(result);
    }
}

/// Pretty-print a response body for display.
pub fn pretty_json(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn healthy_body_means_running() {
        assert_eq!(
            HealthStatus::from_body(&json!({"status": "healthy"})),
            HealthStatus::Running
        );
        assert_eq!(
            HealthStatus::from_body(&json!({"status": "degraded"})),
            HealthStatus::Error
        );
        assert_eq!(HealthStatus::from_body(&json!([])), HealthStatus::Error);
    }

    #[test]
    fn blank_text_is_not_sent() {
        let mut playground = Playground::default();
        assert_eq!(playground.begin_predict("   ", "enter text"), None);
        assert_eq!(
            playground.result(),
            Some(&PredictResult::Warning("enter text".to_string()))
        );
    }

    #[test]
    fn new_prediction_clears_previous_result() {
        let mut playground = Playground::default();
        playground.finish_predict(PredictResult::Failed("x".to_string()));
        assert_eq!(
            playground.begin_predict("hello", "enter text"),
            Some("hello".to_string())
        );
        assert_eq!(playground.result(), None);
        assert_eq!(playground.text(), "hello");
    }
}
