//! `ureq`-backed [`Transport`] for the real backend.
//!
//! Requests are synchronous and made on the caller's thread. No timeout is
//! applied unless `backend.timeout_ms` is set, so a hung backend leaves the
//! action pending.

use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use super::{ApiRequest, RawResponse, Transport, TransportError};
use crate::config::schema::BackendConfig;

#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    agent: Agent,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: builder.build(),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        Self::new(&config.base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut req = self
            .agent
            .request(request.method.as_str(), &self.url(&request.path));
        for (name, value) in &request.headers {
            req = req.set(name, value);
        }

        let result = match &request.body {
            Some(body) => req.send_string(body),
            None => req.call(),
        };

        // ureq reports 4xx/5xx as errors; the dashboard wants the body.
        let response = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(e)) => return Err(TransportError::Connect(e.to_string())),
        };

        let status = response.status();
        let body = response.into_string()?;
        Ok(RawResponse { status, body })
    }
}
