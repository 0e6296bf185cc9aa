//! Accumulating diagnostics report.
//!
//! Lifecycle calls do not abort on the first problem; they append entries
//! to a [`Diagnostics`] report and let the caller inspect the whole run.
//! The report is append-only: entries are never removed or reordered, and
//! entries from independent checks may coexist.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a single diagnostics entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The operation failed; persisted state must not change.
    Error,
    /// Something noteworthy happened but the operation may proceed.
    Warning,
}

/// A single labeled entry: a short summary naming the failed operation and
/// a detail message carrying the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    /// Creates an error entry.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Creates a warning entry.
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}

/// An ordered, append-only collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error entry.
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.entries.push(Diagnostic::error(summary, detail));
    }

    /// Appends a warning entry.
    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.entries.push(Diagnostic::warning(summary, detail));
    }

    /// Appends a prebuilt entry.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Appends every entry of `other`, preserving its order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// `true` once at least one error entry has been recorded. Callers must
    /// not apply state changes past this point; warnings alone do not fail
    /// an operation.
    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_report_is_empty() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 0);
    }

    #[test]
    fn error_entries_fail_the_report() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("Error creating car", "Unexpected status code: 500");
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn warnings_alone_do_not_fail_the_report() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_warning("Deprecated attribute", "Attribute is ignored");
        assert!(!diagnostics.has_errors());
        assert!(!diagnostics.is_empty());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("first", "a");
        diagnostics.add_warning("second", "b");
        diagnostics.add_error("third", "c");

        let summaries: Vec<&str> = diagnostics.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, ["first", "second", "third"]);
    }

    #[test]
    fn extend_appends_in_order() {
        let mut left = Diagnostics::new();
        left.add_error("one", "a");

        let mut right = Diagnostics::new();
        right.add_warning("two", "b");
        right.push(Diagnostic::error("three", "c"));

        left.extend(right);
        assert_eq!(left.len(), 3);
        assert_eq!(left.entries()[2].summary, "three");
    }

    #[test]
    fn diagnostic_displays_summary_and_detail() {
        let diagnostic = Diagnostic::error("Error reading car", "Network error: timed out");
        assert_eq!(
            diagnostic.to_string(),
            "Error reading car: Network error: timed out"
        );
    }

    #[test]
    fn report_serializes_as_entry_list() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.add_error("Error creating car", "Unexpected status code: 500");

        let value = serde_json::to_value(&diagnostics).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "severity": "error",
                "summary": "Error creating car",
                "detail": "Unexpected status code: 500",
            }])
        );
    }
}
