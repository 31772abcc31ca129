//! Load-time data-quality diagnostics.
//!
//! None of these abort a load; the affected units go through the resolver's
//! fallback chain instead.

use std::fmt;

use serde::Serialize;

use crate::types::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DiagnosticKind {
    /// Message outside of a named context; dropped.
    MissingContext,
    /// Neither source text nor translation; dropped.
    MissingText,
    /// Same source text and disambiguator twice in one context; first wins.
    DuplicateMessage,
    /// Fewer numerus forms than the target language needs.
    InsufficientPluralForms { expected: usize, found: usize },
    /// Known message without a translation; resolves to its source text.
    EmptyTranslation,
    /// Unrecognized `<translation type="...">`; treated as current.
    UnknownStatus { value: String },
}

impl DiagnosticKind {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::EmptyTranslation => Severity::Info,
            Self::MissingContext
            | Self::MissingText
            | Self::DuplicateMessage
            | Self::InsufficientPluralForms { .. }
            | Self::UnknownStatus { .. } => Severity::Warning,
        }
    }
}

/// A non-fatal problem found while building a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub context: String,
    pub source_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    pub message: String,
}

impl Diagnostic {
    #[must_use]
    pub fn new(
        kind: DiagnosticKind,
        context: impl Into<String>,
        source_text: impl Into<String>,
        location: Option<SourceLocation>,
    ) -> Self {
        let context = context.into();
        let source_text = source_text.into();
        let message = match &kind {
            DiagnosticKind::MissingContext => {
                format!("Message \"{source_text}\" has no context and was dropped")
            }
            DiagnosticKind::MissingText => {
                format!("Message in context '{context}' has neither source nor translation")
            }
            DiagnosticKind::DuplicateMessage => {
                format!("Duplicate message \"{source_text}\" in context '{context}'")
            }
            DiagnosticKind::InsufficientPluralForms { expected, found } => format!(
                "Message \"{source_text}\" in context '{context}' has {found} plural form(s), \
                 {expected} expected"
            ),
            DiagnosticKind::EmptyTranslation => {
                format!("Message \"{source_text}\" in context '{context}' is not translated")
            }
            DiagnosticKind::UnknownStatus { value } => format!(
                "Message \"{source_text}\" in context '{context}' has unknown type '{value}'"
            ),
        };
        Self { severity: kind.severity(), kind, context, source_text, location, message }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {location}: {}", self.severity, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}
