//! Diagnostic locations
//!
//! This module defines the location handle attached to validation events and
//! carried into diagnostics: an optional source identifier plus a line/column
//! position in the instance document.

use std::fmt;

/// Position of an event in the instance document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Identifier of the document source (system id, file name, ...)
    pub source: Option<String>,
    /// 1-based line number, if known
    pub line: Option<u64>,
    /// 1-based column number, if known
    pub column: Option<u64>,
}

impl Location {
    /// A location with no position information
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A line/column location with no source identifier
    pub fn at(line: u64, column: u64) -> Self {
        Self {
            source: None,
            line: Some(line),
            column: Some(column),
        }
    }

    /// Attach a source identifier
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check if no position information is present
    pub fn is_unknown(&self) -> bool {
        self.source.is_none() && self.line.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref source) = self.source {
            write!(f, "{}:", source)?;
        }
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}", line, column),
            (Some(line), None) => write!(f, "{}", line),
            _ => write!(f, "?"),
        }
    }
}
