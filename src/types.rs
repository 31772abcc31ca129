//! Core types used throughout the project.

use std::fmt;

use serde::Serialize;

/// Where a message was extracted from (tooling only, never read by the resolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    pub filename: String,
    /// 1-indexed line, as written by `lupdate`. `None` for `<location filename=".."/>`.
    pub line: Option<u32>,
}

impl SourceLocation {
    #[must_use]
    pub fn new(filename: impl Into<String>, line: u32) -> Self {
        Self { filename: filename.into(), line: Some(line) }
    }

    /// A location naming only the file, as `.ui` forms are often recorded.
    #[must_use]
    pub fn file_only(filename: impl Into<String>) -> Self {
        Self { filename: filename.into(), line: None }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.filename),
            None => f.write_str(&self.filename),
        }
    }
}

/// Lifecycle state of a translation unit.
///
/// Only [`UnitStatus::Current`] and [`UnitStatus::Unfinished`] units take part
/// in lookup; retired units are kept for translators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitStatus {
    #[default]
    Current,
    /// Present in the sources but awaiting translator review.
    Unfinished,
    /// Removed from the sources since the last extraction.
    Vanished,
    /// Marked obsolete by an older extraction run.
    Obsolete,
}

impl UnitStatus {
    /// Parses the `type` attribute of a `<translation>` element.
    ///
    /// Returns `None` for values the format does not define.
    #[must_use]
    pub fn from_type_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Current),
            Some("unfinished") => Some(Self::Unfinished),
            Some("vanished") => Some(Self::Vanished),
            Some("obsolete") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// The `type` attribute value to write back, `None` for current units.
    #[must_use]
    pub const fn as_type_attr(self) -> Option<&'static str> {
        match self {
            Self::Current => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    #[must_use]
    pub const fn is_retired(self) -> bool {
        matches!(self, Self::Vanished | Self::Obsolete)
    }
}
