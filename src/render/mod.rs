//! Pure rendering from dashboard data to HTML.
//!
//! Every view is a plain function from data to [`Html`]; none of them touch
//! the network or the dashboard's mutable state. Text coming from the
//! backend is always escaped on the way in, so a key description can never
//! inject markup.

pub mod format;
mod shell;
pub mod views;

use std::fmt;

/// Escaped HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Trusted markup, inserted as-is. Only for literals written in this crate.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Untrusted text, escaped.
    pub fn text(text: &str) -> Self {
        Self(html_escape::encode_text(text).into_owned())
    }

    pub fn push_raw(&mut self, markup: &str) -> &mut Self {
        self.0.push_str(markup);
        self
    }

    pub fn push_text(&mut self, text: &str) -> &mut Self {
        self.0.push_str(&html_escape::encode_text(text));
        self
    }

    /// ` name="value"`, with the value escaped for a double-quoted attribute.
    pub fn push_attr(&mut self, name: &str, value: &str) -> &mut Self {
        self.0.push(' ');
        self.0.push_str(name);
        self.0.push_str("=\"");
        self.0.push_str(&html_escape::encode_double_quoted_attribute(value));
        self.0.push('"');
        self
    }

    pub fn push(&mut self, other: Html) -> &mut Self {
        self.0.push_str(&other.0);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromIterator<Html> for Html {
    fn from_iter<I: IntoIterator<Item = Html>>(iter: I) -> Self {
        let mut out = Html::new();
        for part in iter {
            out.push(part);
        }
        out
    }
}

/// Build `<tag attr="value"...>body</tag>` with escaped attribute values.
pub fn element(tag: &str, attrs: &[(&str, &str)], body: Html) -> Html {
    let mut out = Html::new();
    out.push_raw("<").push_raw(tag);
    for (name, value) in attrs {
        out.push_attr(name, value);
    }
    out.push_raw(">").push(body).push_raw("</").push_raw(tag).push_raw(">");
    out
}
