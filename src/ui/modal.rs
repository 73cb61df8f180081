//! Create/edit form modal and the read-only detail modal.

use serde::{Deserialize, Serialize};

use crate::api::types::{ApiKeyRecord, KeyPayload};

/// Limit applied when the form's limit field is empty, zero or unparsable.
pub const DEFAULT_MONTHLY_LIMIT: u64 = 100_000;

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Raw form fields as the user typed them.
///
/// `monthly_limit` stays text until submission so that an edit can round-trip
/// whatever the user left in the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyForm {
    pub description: String,
    pub monthly_limit: String,
    pub is_unlimited: bool,
    pub auto_reset: bool,
}

impl KeyForm {
    /// Fresh form for create mode. Auto-reset defaults to on.
    pub fn cleared() -> Self {
        Self {
            auto_reset: true,
            ..Self::default()
        }
    }

    pub fn from_record(record: &ApiKeyRecord) -> Self {
        Self {
            description: record.description.clone().unwrap_or_default(),
            monthly_limit: record.monthly_token_limit.to_string(),
            is_unlimited: record.is_unlimited,
            auto_reset: record.auto_reset,
        }
    }

    pub fn to_payload(&self, fallback_limit: u64) -> KeyPayload {
        KeyPayload {
            description: self.description.clone(),
            monthly_token_limit: parse_limit(&self.monthly_limit).unwrap_or(fallback_limit),
            is_unlimited: self.is_unlimited,
            auto_reset: self.auto_reset,
        }
    }
}

/// Leading-digit integer parse. Zero counts as "not set".
fn parse_limit(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .split(|c: char| !c.is_ascii_digit())
        .next()?;
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}

// ---------------------------------------------------------------------------
// Create / edit modal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit { id: i64 },
}

/// What a form submission should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(KeyPayload),
    Update { id: i64, payload: KeyPayload },
}

#[derive(Debug, Clone, Default)]
pub struct KeyModal {
    mode: Option<ModalMode>,
    form: KeyForm,
}

impl KeyModal {
    pub fn open_create(&mut self) {
        self.mode = Some(ModalMode::Create);
        self.form = KeyForm::cleared();
    }

    pub fn open_edit(&mut self, record: &ApiKeyRecord) {
        self.mode = Some(ModalMode::Edit { id: record.id });
        self.form = KeyForm::from_record(record);
    }

    /// Hide the modal and drop whatever was typed.
    pub fn close(&mut self) {
        self.mode = None;
        self.form = KeyForm::default();
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn mode(&self) -> Option<ModalMode> {
        self.mode
    }

    pub fn form(&self) -> &KeyForm {
        &self.form
    }

    /// Replace the form contents; ignored while the modal is closed.
    pub fn set_form(&mut self, form: KeyForm) {
        if self.is_open() {
            self.form = form;
        }
    }

    /// Route the current form to create or update by mode.
    pub fn submission(&self, fallback_limit: u64) -> Option<Submission> {
        let payload = self.form.to_payload(fallback_limit);
        match self.mode? {
            ModalMode::Create => Some(Submission::Create(payload)),
            ModalMode::Edit { id } => Some(Submission::Update { id, payload }),
        }
    }
}

// ---------------------------------------------------------------------------
// Detail modal
// ---------------------------------------------------------------------------

/// Read-only view of one key. Rebuilt on every open, dropped on close.
#[derive(Debug, Clone, Default)]
pub struct DetailModal {
    record: Option<ApiKeyRecord>,
}

impl DetailModal {
    pub fn open(&mut self, record: ApiKeyRecord) {
        self.record = Some(record);
    }

    pub fn close(&mut self) {
        self.record = None;
    }

    pub fn record(&self) -> Option<&ApiKeyRecord> {
        self.record.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }
}
