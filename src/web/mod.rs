//! Local dashboard server.
//!
//! A sync `tiny_http` server that owns one [`Dashboard`] and serves:
//! - `GET /`, which starts a fresh dashboard (a page load) and renders it
//! - `POST /events`, which applies one [`UiEvent`] and returns the new markup
//! - `GET /health`, the server's own liveness check
//!
//! Requests are handled one at a time on the calling thread.
//!
//! Launched via `keydesk serve` (default: `http://127.0.0.1:9747`).

use std::io::Cursor;
use std::time::Instant;

use anyhow::Result;
use serde_json::json;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::api::http::HttpTransport;
use crate::api::{ApiClient, Transport};
use crate::config::KeydeskConfig;
use crate::dashboard::{Dashboard, DashboardOptions, UiEvent};
use crate::render::views;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Serve the dashboard for the configured backend. Blocks the current thread.
pub fn serve(config: &KeydeskConfig, addr: &str) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let backend = config.backend.clone();
    let options = DashboardOptions::from_config(config);
    let mut app = WebApp::new(backend.base_url.clone(), move || {
        let client = ApiClient::from_config(HttpTransport::from_config(&backend), &backend);
        Dashboard::new(client, options)
    });

    println!("keydesk dashboard running at http://{addr}");
    println!("backend: {}", config.backend.base_url);
    println!("Press Ctrl+C to stop.\n");
    tracing::info!(addr, backend = %config.backend.base_url, "dashboard server started");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let started = Instant::now();
        let reply = app.dispatch(&method, &url, body.as_deref());
        tracing::info!(
            %method,
            url,
            status = reply.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request"
        );

        if let Err(e) = request.respond(reply.into_response()) {
            tracing::warn!(error = %e, "failed to send response");
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Application state and router
// ---------------------------------------------------------------------------

/// Server-side state: the live dashboard and how to build a fresh one.
pub struct WebApp<T, F> {
    base_url: String,
    make: F,
    dashboard: Dashboard<T>,
}

impl<T, F> WebApp<T, F>
where
    T: Transport,
    F: Fn() -> Dashboard<T>,
{
    /// `base_url` is the backend root, used to resolve the login redirect.
    pub fn new(base_url: impl Into<String>, make: F) -> Self {
        let dashboard = make();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            make,
            dashboard,
        }
    }

    pub fn dashboard(&self) -> &Dashboard<T> {
        &self.dashboard
    }

    pub fn dispatch(&mut self, method: &Method, url: &str, body: Option<&str>) -> Reply {
        let path = url.split('?').next().unwrap_or(url);

        match (method, path) {
            (&Method::Get, "/") | (&Method::Get, "/index.html") => self.page_load(),
            (&Method::Post, "/events") => self.post_event(body.unwrap_or("")),
            (&Method::Get, "/health") => Reply::json(200, &json!({ "status": "ok" })),
            _ => Reply::json(404, &json!({ "error": "not found" })),
        }
    }

    /// A page load discards all client state and starts over.
    fn page_load(&mut self) -> Reply {
        self.dashboard = (self.make)();
        self.dashboard.start();
        match self.dashboard.redirect() {
            Some(target) => Reply::redirect(self.resolve(target)),
            None => Reply::html(views::page(&self.dashboard).into_string()),
        }
    }

    fn post_event(&mut self, body: &str) -> Reply {
        let event: UiEvent = match serde_json::from_str(body) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed event");
                return Reply::json(400, &json!({ "error": format!("invalid event: {e}") }));
            }
        };

        self.dashboard.handle(event);
        self.dashboard.toasts_mut().prune(Instant::now());

        match self.dashboard.redirect() {
            Some(target) => Reply::json(200, &json!({ "redirect": self.resolve(target) })),
            None => Reply::json(200, &json!({ "html": views::app(&self.dashboard).into_string() })),
        }
    }

    fn resolve(&self, target: &str) -> String {
        format!("{}{}", self.base_url, target)
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// A response before it is handed to `tiny_http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub location: Option<String>,
    pub body: String,
}

impl Reply {
    fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            location: None,
            body: body.to_string(),
        }
    }

    fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            location: None,
            body,
        }
    }

    fn redirect(location: String) -> Self {
        Self {
            status: 302,
            content_type: "text/plain; charset=utf-8",
            location: Some(location),
            body: String::new(),
        }
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body.into_bytes())
            .with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes("Content-Type", self.content_type) {
            response = response.with_header(header);
        }
        if let Some(location) = self.location
            && let Ok(header) = Header::from_bytes("Location", location.as_bytes())
        {
            response = response.with_header(header);
        }
        response
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiRequest, ApiStyle, RawResponse, TransportError};

    /// Always answers with the same status and body.
    struct Static(u16, &'static str);

    impl Transport for Static {
        fn send(&self, _request: &ApiRequest) -> Result<RawResponse, TransportError> {
            Ok(RawResponse::new(self.0, self.1))
        }
    }

    fn app(status: u16, body: &'static str) -> WebApp<Static, impl Fn() -> Dashboard<Static>> {
        WebApp::new("http://backend:5000/", move || {
            Dashboard::new(
                ApiClient::new(Static(status, body), ApiStyle::Rest),
                DashboardOptions::default(),
            )
        })
    }

    #[test]
    fn page_load_renders_document() {
        let mut app = app(200, r#"{"api_keys": []}"#);
        let reply = app.dispatch(&Method::Get, "/", None);
        assert_eq!(reply.status, 200);
        assert!(reply.body.starts_with("<!DOCTYPE html>"));
        assert!(reply.body.contains("No API keys have been created yet."));
    }

    #[test]
    fn unauthorized_page_load_redirects_to_backend_login() {
        let mut app = app(401, "");
        let reply = app.dispatch(&Method::Get, "/", None);
        assert_eq!(reply.status, 302);
        assert_eq!(reply.location.as_deref(), Some("http://backend:5000/admin?error=401"));
    }

    #[test]
    fn event_returns_app_markup() {
        let mut app = app(200, r#"{"api_keys": []}"#);
        app.dispatch(&Method::Get, "/", None);
        let reply = app.dispatch(&Method::Post, "/events", Some(r#"{"type": "open_create"}"#));
        assert_eq!(reply.status, 200);
        let body: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        let html = body["html"].as_str().unwrap();
        assert!(html.starts_with("<div id=\"app\""));
        assert!(html.contains("keyModal"));
    }

    #[test]
    fn malformed_event_is_rejected() {
        let mut app = app(200, "{}");
        let reply = app.dispatch(&Method::Post, "/events", Some(r#"{"type": "explode"}"#));
        assert_eq!(reply.status, 400);
    }

    #[test]
    fn unknown_route_is_404_json() {
        let mut app = app(200, "{}");
        let reply = app.dispatch(&Method::Get, "/nope", None);
        assert_eq!(reply.status, 404);
        assert_eq!(reply.body, r#"{"error":"not found"}"#);
    }
}
