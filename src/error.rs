//! Error types and diagnostic plumbing for xsdstream
//!
//! Two kinds of failure live here. `Error` is the crate-level error type for
//! API misuse (bad patterns, bad names) and is returned through `Result`.
//! `ValidationError` is a *diagnostic*: a non-fatal finding about the instance
//! document, delivered to an [`ErrorSink`] while validation continues.

use crate::locations::Location;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Result type alias using the xsdstream Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xsdstream operations
#[derive(Error, Debug)]
pub enum Error {
    /// Value error (invalid value for a facet or builtin type)
    #[error("value error: {0}")]
    Value(String),

    /// Name error (invalid XML name)
    #[error("name error: {0}")]
    Name(String),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Severity of a validation diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A violation; the document is invalid
    Error,
    /// Suspicious but not invalidating
    Warning,
    /// Informational note, never invalidating
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A validation diagnostic with context
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Diagnostic message
    pub message: String,
    /// Severity of the finding
    pub severity: Severity,
    /// Where in the instance document the problem was observed
    pub location: Location,
    /// Additional reason detail
    pub reason: Option<String>,
}

impl ValidationError {
    /// Create a new error-severity diagnostic
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            location: Location::unknown(),
            reason: None,
        }
    }

    /// Create a warning-severity diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::new(message)
        }
    }

    /// Create an info-severity diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::new(message)
        }
    }

    /// Set the location where the problem was observed
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Set the reason detail
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;

        if let Some(ref reason) = self.reason {
            write!(f, " ({})", reason)?;
        }

        if !self.location.is_unknown() {
            write!(f, " at {}", self.location)?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Receiver of validation diagnostics.
///
/// The validator never stops on a diagnostic; it records it here and
/// continues with the remainder of the document.
pub trait ErrorSink {
    /// Record a single diagnostic
    fn record(&mut self, diagnostic: ValidationError);
}

/// Vec-backed [`ErrorSink`] that keeps every diagnostic.
///
/// Clones share the same underlying storage, so a caller can keep a handle
/// while handing another clone to the validator.
#[derive(Debug, Clone, Default)]
pub struct ErrorCollector {
    diagnostics: Rc<RefCell<Vec<ValidationError>>>,
}

impl ErrorCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all collected diagnostics, in recording order
    pub fn diagnostics(&self) -> Vec<ValidationError> {
        self.diagnostics.borrow().clone()
    }

    /// Number of collected diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Check if no diagnostic has been collected
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl ErrorSink for ErrorCollector {
    fn record(&mut self, diagnostic: ValidationError) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Diagnostic dispatcher shared by the validator and the simple-type engine.
///
/// Keeps the monotonic error counter used to detect whether a speculative
/// sub-validation (xsi:type qname parse, union member trial) introduced a
/// problem, and the suspend depth under which diagnostics are counted but
/// neither sunk nor validity-flipping.
pub struct Reporter {
    sink: Box<dyn ErrorSink>,
    error_count: u64,
    suspend_depth: u32,
    invalid: bool,
}

impl Reporter {
    /// Create a reporter over the given sink
    pub fn new(sink: Box<dyn ErrorSink>) -> Self {
        Self {
            sink,
            error_count: 0,
            suspend_depth: 0,
            invalid: false,
        }
    }

    /// Monotonic count of error-severity diagnostics, suspended or not
    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    /// Whether an unsuspended error-severity diagnostic has been recorded
    pub fn invalid(&self) -> bool {
        self.invalid
    }

    /// Enter a speculative sub-validation
    pub fn suspend(&mut self) {
        self.suspend_depth += 1;
    }

    /// Leave a speculative sub-validation
    pub fn resume(&mut self) {
        debug_assert!(self.suspend_depth > 0);
        self.suspend_depth = self.suspend_depth.saturating_sub(1);
    }

    /// Whether diagnostics are currently suppressed
    pub fn is_suspended(&self) -> bool {
        self.suspend_depth > 0
    }

    /// Dispatch a diagnostic.
    ///
    /// Error severity always bumps the counter. While suspended, nothing
    /// reaches the sink and validity is untouched.
    pub fn report(&mut self, diagnostic: ValidationError) {
        if diagnostic.severity == Severity::Error {
            self.error_count += 1;
        }
        if self.suspend_depth == 0 {
            if diagnostic.severity == Severity::Error {
                self.invalid = true;
            }
            self.sink.record(diagnostic);
        }
    }
}
