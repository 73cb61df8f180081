//! View-state controllers owned by the dashboard root.

pub mod modal;
pub mod notify;
pub mod tabs;

pub use modal::{DetailModal, KeyForm, KeyModal, ModalMode, Submission};
pub use notify::{ConfirmAction, ConfirmDialog, PendingConfirm, Toast, ToastKind, ToastQueue};
pub use tabs::{LoadTarget, Tab, TabController};
