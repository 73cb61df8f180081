//! Dashboard root: owns every piece of UI state and the API client.
//!
//! All mutation happens through `&mut Dashboard`, either directly from the
//! CLI or through [`Dashboard::handle`] from the web shell. The dashboard
//! never renders; views in [`crate::render`] read it.

mod events;
mod loaders;
mod mutators;

use std::time::Duration;

use crate::api::{ApiClient, ApiError, Transport, LOGIN_REDIRECT};
use crate::api::types::{ApiKeyRecord, IpUsageRecord, UsageSummary};
use crate::config::schema::KeydeskConfig;
use crate::i18n::{Locale, Messages};
use crate::playground::Playground;
use crate::ui::modal::DEFAULT_MONTHLY_LIMIT;
use crate::ui::notify::DEFAULT_TOAST_TTL;
use crate::ui::{ConfirmDialog, DetailModal, KeyModal, Tab, TabController, ToastQueue};

pub use events::UiEvent;
pub use loaders::Fetched;
pub use mutators::MutationOutcome;

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

/// What a data panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView<T> {
    /// Never loaded.
    Idle,
    Loading,
    /// Banner text: the backend's `error` field or a generic failure message.
    Error(String),
    /// Loaded, zero records.
    Empty,
    Ready(T),
}

impl<T> Default for PanelView<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> PanelView<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub locale: Locale,
    pub toast_ttl: Duration,
    /// Limit sent when the form's limit field is blank or zero.
    pub default_monthly_limit: u64,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            toast_ttl: DEFAULT_TOAST_TTL,
            default_monthly_limit: DEFAULT_MONTHLY_LIMIT,
        }
    }
}

impl DashboardOptions {
    pub fn from_config(config: &KeydeskConfig) -> Self {
        Self {
            locale: config.ui.locale,
            toast_ttl: Duration::from_secs(config.ui.toast_ttl_secs),
            default_monthly_limit: match config.ui.default_monthly_limit {
                0 => DEFAULT_MONTHLY_LIMIT,
                n => n,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub struct Dashboard<T> {
    client: ApiClient<T>,
    options: DashboardOptions,
    tabs: TabController,
    key_modal: KeyModal,
    details: DetailModal,
    toasts: ToastQueue,
    dialog: ConfirmDialog,
    playground: Playground,
    keys: PanelView<Vec<ApiKeyRecord>>,
    ips: PanelView<Vec<IpUsageRecord>>,
    summary: PanelView<UsageSummary>,
    redirect: Option<String>,
}

impl<T: Transport> Dashboard<T> {
    pub fn new(client: ApiClient<T>, options: DashboardOptions) -> Self {
        Self {
            client,
            options,
            tabs: TabController::new(),
            key_modal: KeyModal::default(),
            details: DetailModal::default(),
            toasts: ToastQueue::new(options.toast_ttl),
            dialog: ConfirmDialog::default(),
            playground: Playground::default(),
            keys: PanelView::Idle,
            ips: PanelView::Idle,
            summary: PanelView::Idle,
            redirect: None,
        }
    }

    /// Page-load behaviour: the default tab is visible and its loader runs.
    pub fn start(&mut self) {
        self.select_tab(Tab::ApiKeys);
    }

    /// Show `tab`, running its loader the first time it becomes visible.
    pub fn select_tab(&mut self, tab: Tab) {
        if let Some(target) = self.tabs.activate(tab) {
            self.load(target);
        }
        if tab == Tab::Playground && self.playground.health().is_none() {
            self.check_health();
        }
    }

    /// Push an error toast for a failed action and return its text.
    ///
    /// `Unauthorized` redirects instead and returns `None`.
    fn report_failure(&mut self, err: &ApiError, generic: &str) -> Option<String> {
        let message = match err {
            ApiError::Unauthorized => {
                self.redirect_to_login();
                return None;
            }
            ApiError::Application(detail) => self.messages().error(detail),
            ApiError::Transport(_) | ApiError::Decode(_) => generic.to_string(),
        };
        tracing::warn!(error = %err, "dashboard action failed");
        self.toasts.error(message.clone());
        Some(message)
    }

    fn redirect_to_login(&mut self) {
        if self.redirect.is_none() {
            tracing::warn!(location = LOGIN_REDIRECT, "session rejected, redirecting to login");
        }
        self.redirect = Some(LOGIN_REDIRECT.to_string());
    }

    // -- accessors ----------------------------------------------------------

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn options(&self) -> &DashboardOptions {
        &self.options
    }

    pub fn locale(&self) -> Locale {
        self.options.locale
    }

    pub fn messages(&self) -> &'static Messages {
        self.options.locale.messages()
    }

    pub fn tabs(&self) -> &TabController {
        &self.tabs
    }

    pub fn key_modal(&self) -> &KeyModal {
        &self.key_modal
    }

    pub fn details(&self) -> &DetailModal {
        &self.details
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastQueue {
        &mut self.toasts
    }

    pub fn dialog(&self) -> &ConfirmDialog {
        &self.dialog
    }

    pub fn playground(&self) -> &Playground {
        &self.playground
    }

    pub fn keys(&self) -> &PanelView<Vec<ApiKeyRecord>> {
        &self.keys
    }

    pub fn ips(&self) -> &PanelView<Vec<IpUsageRecord>> {
        &self.ips
    }

    pub fn summary(&self) -> &PanelView<UsageSummary> {
        &self.summary
    }

    /// Login URL to navigate to after a 401. Once set, events are ignored.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}
