//! Toast notifications and the single confirmation dialog.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// How long a toast stays up unless dismissed.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Upper bound for a configured toast lifetime.
pub const MAX_TOAST_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// Toasts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Independently timed toasts, kept in arrival order.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastQueue {
    /// `ttl` is capped at [`MAX_TOAST_TTL`].
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
            ttl: ttl.min(MAX_TOAST_TTL),
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            expires_at: now.checked_add(self.ttl).unwrap_or(now),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Close a toast early. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop every toast whose deadline has passed.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| !t.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn last(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// ---------------------------------------------------------------------------
// Confirmation dialog
// ---------------------------------------------------------------------------

/// Action carried out when a confirmation is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConfirmAction {
    DeleteKey { id: i64 },
    ResetIp { ip: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub token: u64,
    pub title: String,
    pub message: String,
    pub action: ConfirmAction,
}

/// Single-slot confirm/cancel prompt.
///
/// A new [`ask`](Self::ask) replaces the pending confirmation and mints a new
/// token; a confirm carrying an older token is ignored.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pending: Option<PendingConfirm>,
    next_token: u64,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            pending: None,
            next_token: 1,
        }
    }
}

impl ConfirmDialog {
    pub fn ask(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: ConfirmAction,
    ) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.pending = Some(PendingConfirm {
            token,
            title: title.into(),
            message: message.into(),
            action,
        });
        token
    }

    /// Accept the pending confirmation if `token` is current. Closes the dialog.
    pub fn confirm(&mut self, token: u64) -> Option<ConfirmAction> {
        if self.pending.as_ref()?.token != token {
            return None;
        }
        self.pending.take().map(|p| p.action)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingConfirm> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack_in_arrival_order() {
        let mut queue = ToastQueue::default();
        queue.success("first");
        queue.error("second");
        let messages: Vec<_> = queue.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn oversized_ttl_is_capped() {
        let mut queue = ToastQueue::new(Duration::from_secs(u64::MAX));
        assert_eq!(queue.ttl(), MAX_TOAST_TTL);
        let now = Instant::now();
        queue.push_at(ToastKind::Info, "still here", now);
        assert_eq!(queue.last().unwrap().remaining(now), MAX_TOAST_TTL);
    }

    #[test]
    fn toasts_expire_independently() {
        let mut queue = ToastQueue::new(Duration::from_secs(5));
        let start = Instant::now();
        queue.push_at(ToastKind::Info, "early", start);
        queue.push_at(ToastKind::Info, "late", start + Duration::from_secs(3));

        queue.prune(start + Duration::from_secs(4));
        assert_eq!(queue.len(), 2);

        queue.prune(start + Duration::from_secs(5));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.last().unwrap().message, "late");

        queue.prune(start + Duration::from_secs(8));
        assert!(queue.is_empty());
    }

    #[test]
    fn dismiss_closes_one_toast_early() {
        let mut queue = ToastQueue::default();
        let a = queue.success("a");
        let b = queue.success("b");
        assert!(queue.dismiss(a));
        assert!(!queue.dismiss(a));
        assert_eq!(queue.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn second_ask_replaces_pending_confirmation() {
        let mut dialog = ConfirmDialog::default();
        let first = dialog.ask("t", "m", ConfirmAction::DeleteKey { id: 1 });
        let second = dialog.ask("t", "m", ConfirmAction::ResetIp { ip: "1.1.1.1".into() });
        assert_ne!(first, second);

        assert_eq!(dialog.confirm(first), None);
        assert!(dialog.is_open());
        assert_eq!(
            dialog.confirm(second),
            Some(ConfirmAction::ResetIp { ip: "1.1.1.1".into() })
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn cancel_drops_pending_action() {
        let mut dialog = ConfirmDialog::default();
        let token = dialog.ask("t", "m", ConfirmAction::DeleteKey { id: 4 });
        dialog.cancel();
        assert_eq!(dialog.confirm(token), None);
    }
}
