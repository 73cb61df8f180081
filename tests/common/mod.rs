//! Shared test transport.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use keydesk::api::{ApiClient, ApiRequest, ApiStyle, RawResponse, Transport, TransportError};
use keydesk::dashboard::{Dashboard, DashboardOptions};

/// Answers requests from per-route queues and records everything it sees.
///
/// Routes are keyed as `"METHOD /path"`. The last queued response of a route
/// is repeated once the queue drains; unscripted routes fail to connect.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: RefCell<HashMap<String, VecDeque<RawResponse>>>,
    sent: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(self, route: &str, status: u16, body: &str) -> Self {
        self.routes
            .borrow_mut()
            .entry(route.to_string())
            .or_default()
            .push_back(RawResponse::new(status, body));
        self
    }

    /// Every request as `"METHOD /path"`, in order.
    pub fn calls(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }

    pub fn count(&self, route: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == route).count()
    }

    pub fn last_request(&self, route: &str) -> Option<ApiRequest> {
        self.sent
            .borrow()
            .iter()
            .rev()
            .find(|r| format!("{} {}", r.method.as_str(), r.path) == route)
            .cloned()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        let key = format!("{} {}", request.method.as_str(), request.path);
        let mut routes = self.routes.borrow_mut();
        let queue = routes
            .get_mut(&key)
            .ok_or_else(|| TransportError::Connect(format!("no script for {key}")))?;
        match queue.len() {
            0 => Err(TransportError::Connect(format!("no script for {key}"))),
            1 => Ok(queue[0].clone()),
            _ => Ok(queue.pop_front().unwrap_or_else(|| RawResponse::new(500, ""))),
        }
    }
}

pub fn dashboard(transport: ScriptedTransport) -> Dashboard<ScriptedTransport> {
    dashboard_with_style(transport, ApiStyle::Rest)
}

pub fn dashboard_with_style(
    transport: ScriptedTransport,
    style: ApiStyle,
) -> Dashboard<ScriptedTransport> {
    Dashboard::new(ApiClient::new(transport, style), DashboardOptions::default())
}

pub const KEY_7: &str = r#"{
    "id": 7,
    "api_key": "sk-live-7",
    "description": "reporting job",
    "is_unlimited": 0,
    "monthly_token_limit": 250000,
    "tokens_used": 1200,
    "auto_reset": 1,
    "last_reset_date": "2024-03-01T00:00:00",
    "created_at": "2024-01-15T10:30:00",
    "updated_at": null
}"#;

pub fn key_list(records: &[&str]) -> String {
    format!(r#"{{"api_keys": [{}]}}"#, records.join(","))
}
