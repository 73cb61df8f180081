//! Tab visibility and first-load tracking.
//!
//! Exactly one tab is active at any time. Each tab remembers whether it has
//! been activated before; only the first activation asks for its loader.

use serde::{Deserialize, Serialize};

use crate::i18n::Messages;

const TAB_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    ApiKeys,
    IpUsage,
    UsageSummary,
    Endpoints,
    Playground,
}

/// Data set a tab loads on first activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTarget {
    ApiKeys,
    IpUsage,
    UsageSummary,
}

impl Tab {
    /// Tabs in display order. The first one is active on start.
    pub const ALL: [Tab; TAB_COUNT] = [
        Tab::ApiKeys,
        Tab::IpUsage,
        Tab::UsageSummary,
        Tab::Endpoints,
        Tab::Playground,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Loader fired on first activation; `None` for static tabs.
    pub fn loader(self) -> Option<LoadTarget> {
        match self {
            Self::ApiKeys => Some(LoadTarget::ApiKeys),
            Self::IpUsage => Some(LoadTarget::IpUsage),
            Self::UsageSummary => Some(LoadTarget::UsageSummary),
            Self::Endpoints | Self::Playground => None,
        }
    }

    /// DOM id of the content panel.
    pub fn panel_id(self) -> &'static str {
        match self {
            Self::ApiKeys => "apiKeysContent",
            Self::IpUsage => "ipUsageContent",
            Self::UsageSummary => "usageSummaryContent",
            Self::Endpoints => "endpointsContent",
            Self::Playground => "playgroundContent",
        }
    }

    pub fn label(self, messages: &Messages) -> &'static str {
        match self {
            Self::ApiKeys => messages.tab_api_keys,
            Self::IpUsage => messages.tab_ip_usage,
            Self::UsageSummary => messages.tab_usage_summary,
            Self::Endpoints => messages.tab_endpoints,
            Self::Playground => messages.tab_playground,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabController {
    active: Tab,
    loaded: [bool; TAB_COUNT],
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}

impl TabController {
    /// First tab active, nothing loaded yet. Call [`activate`](Self::activate)
    /// with the first tab to trigger its initial load.
    pub fn new() -> Self {
        Self {
            active: Tab::ALL[0],
            loaded: [false; TAB_COUNT],
        }
    }

    /// Make `tab` the only visible tab.
    ///
    /// Returns the tab's loader on its first activation only. The loaded flag
    /// is set even for tabs without a loader.
    pub fn activate(&mut self, tab: Tab) -> Option<LoadTarget> {
        self.active = tab;
        let seen = &mut self.loaded[tab.index()];
        if *seen {
            return None;
        }
        *seen = true;
        tab.loader()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_visible(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn is_loaded(&self, tab: Tab) -> bool {
        self.loaded[tab.index()]
    }
}
