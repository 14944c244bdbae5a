#![deny(missing_docs)]

//! # Event Formatting
//!
//! Renders a single Server-Sent Event into its wire lines.
//!
//! Field order is fixed: comment, `id`, `event`, `retry`, `data`, followed by the
//! blank line that terminates the event.

use std::fmt;

/// A single SSE message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Serialized payload text. Embedded line breaks are not escaped.
    pub data: String,
    /// Optional event label (`event:` field).
    pub event: Option<String>,
    /// Optional sequence identifier (`id:` field).
    pub id: Option<String>,
    /// Optional client reconnect hint in milliseconds (`retry:` field).
    pub retry: Option<u64>,
    /// Optional leading comment line.
    pub comment: Option<String>,
}

impl EventRecord {
    /// Creates a record carrying only `data`.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            event: None,
            id: None,
            retry: None,
            comment: None,
        }
    }

    /// Sets the event label.
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Sets the sequence identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the retry hint.
    pub fn with_retry(mut self, retry: u64) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets the leading comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns the wire lines of this event, ending with the empty terminator line.
    ///
    /// Empty `comment` and `event` values are treated as absent.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(6);
        if let Some(comment) = self.comment.as_deref().filter(|c| !c.is_empty()) {
            lines.push(format!(": {}", comment));
        }
        if let Some(id) = &self.id {
            lines.push(format!("id: {}", id));
        }
        if let Some(event) = self.event.as_deref().filter(|e| !e.is_empty()) {
            lines.push(format!("event: {}", event));
        }
        if let Some(retry) = self.retry {
            lines.push(format!("retry: {}", retry));
        }
        lines.push(format!("data: {}", self.data));
        lines.push(String::new());
        lines
    }

    /// Formats the event as newline-joined wire text.
    pub fn format(&self) -> String {
        self.lines().join("\n")
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
