//! Panel loaders.
//!
//! A load is split into [`start_load`](Dashboard::start_load) (panel shows
//! loading), [`fetch`](Dashboard::fetch) (the request, no state change) and
//! [`finish_load`](Dashboard::finish_load) (apply the outcome). Outcomes are
//! applied in whatever order they are finished, so when two loads of the
//! same panel overlap the one finished last wins.

use crate::api::types::{ApiKeyRecord, IpUsageRecord, UsageSummary};
use crate::api::{ApiError, Transport};
use crate::ui::LoadTarget;

use super::{Dashboard, PanelView};

/// Result of a panel fetch, waiting to be applied.
#[derive(Debug)]
pub enum Fetched {
    ApiKeys(Result<Vec<ApiKeyRecord>, ApiError>),
    IpUsage(Result<Vec<IpUsageRecord>, ApiError>),
    UsageSummary(Result<UsageSummary, ApiError>),
}

impl Fetched {
    pub fn target(&self) -> LoadTarget {
        match self {
            Self::ApiKeys(_) => LoadTarget::ApiKeys,
            Self::IpUsage(_) => LoadTarget::IpUsage,
            Self::UsageSummary(_) => LoadTarget::UsageSummary,
        }
    }
}

impl<T: Transport> Dashboard<T> {
    pub fn load(&mut self, target: LoadTarget) {
        self.start_load(target);
        let fetched = self.fetch(target);
        self.finish_load(fetched);
    }

    pub fn load_api_keys(&mut self) {
        self.load(LoadTarget::ApiKeys);
    }

    pub fn load_ip_usage(&mut self) {
        self.load(LoadTarget::IpUsage);
    }

    pub fn load_usage_summary(&mut self) {
        self.load(LoadTarget::UsageSummary);
    }

    pub fn start_load(&mut self, target: LoadTarget) {
        match target {
            LoadTarget::ApiKeys => self.keys = PanelView::Loading,
            LoadTarget::IpUsage => self.ips = PanelView::Loading,
            LoadTarget::UsageSummary => self.summary = PanelView::Loading,
        }
    }

    pub fn fetch(&self, target: LoadTarget) -> Fetched {
        match target {
            LoadTarget::ApiKeys => Fetched::ApiKeys(self.client.list_keys()),
            LoadTarget::IpUsage => Fetched::IpUsage(self.client.list_ip_usage()),
            LoadTarget::UsageSummary => Fetched::UsageSummary(self.client.usage_summary()),
        }
    }

    pub fn finish_load(&mut self, fetched: Fetched) {
        let target = fetched.target();
        let messages = self.messages();
        match fetched {
            Fetched::ApiKeys(result) => {
                if let Some(view) = self.list_view(target, result, messages.keys_load_failed) {
                    self.keys = view;
                }
            }
            Fetched::IpUsage(result) => {
                if let Some(view) = self.list_view(target, result, messages.ips_load_failed) {
                    self.ips = view;
                }
            }
            Fetched::UsageSummary(result) => {
                let view = match result {
                    Ok(summary) => Some(PanelView::Ready(summary)),
                    Err(err) => self.failed_view(target, err, messages.summary_load_failed),
                };
                if let Some(view) = view {
                    self.summary = view;
                }
            }
        }
    }

    fn list_view<R>(
        &mut self,
        target: LoadTarget,
        result: Result<Vec<R>, ApiError>,
        generic: &str,
    ) -> Option<PanelView<Vec<R>>> {
        match result {
            Ok(records) if records.is_empty() => {
                tracing::debug!(?target, "panel loaded, no records");
                Some(PanelView::Empty)
            }
            Ok(records) => {
                tracing::debug!(?target, count = records.len(), "panel loaded");
                Some(PanelView::Ready(records))
            }
            Err(err) => self.failed_view(target, err, generic),
        }
    }

    /// Banner for a failed load. `None` leaves the panel untouched (401).
    fn failed_view<R>(
        &mut self,
        target: LoadTarget,
        err: ApiError,
        generic: &str,
    ) -> Option<PanelView<R>> {
        match err {
            ApiError::Unauthorized => {
                self.redirect_to_login();
                None
            }
            ApiError::Application(message) => {
                tracing::warn!(?target, %message, "backend reported an error");
                Some(PanelView::Error(message))
            }
            other => {
                tracing::warn!(?target, error = %other, "panel load failed");
                Some(PanelView::Error(generic.to_string()))
            }
        }
    }
}
