//! # xsdstream
//!
//! Streaming, push-based XML Schema instance validation.
//!
//! The crate validates an already-tokenized stream of document events
//! (element start, attribute, attribute boundary, text, element end)
//! against a compiled schema component graph. It never builds a document
//! tree: an explicit stack of per-element states stands in for the
//! recursion of a tree walker, so memory use is bounded by document depth.
//!
//! Validation never stops at the first problem. Diagnostics go to an
//! [`error::ErrorSink`]; after an error the offending subtree is skipped
//! and validation resumes at its end.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xsdstream::error::ErrorCollector;
//! use xsdstream::events::{DocumentEvent, EventKind};
//! use xsdstream::namespaces::QName;
//! use xsdstream::validators::{
//!     BuiltinKind, ElementDecl, GlobalMaps, SchemaType, SimpleTypeDef, StreamValidator,
//! };
//!
//! let price = Arc::new(ElementDecl::new(
//!     QName::local("price"),
//!     Arc::new(SchemaType::simple(Arc::new(SimpleTypeDef::builtin(
//!         BuiltinKind::Decimal,
//!     )))),
//! ));
//!
//! let errors = ErrorCollector::new();
//! let registry = Arc::new(GlobalMaps::with_builtins());
//! let mut validator = StreamValidator::for_element(registry, price, Box::new(errors.clone()));
//!
//! validator.next_event(EventKind::Begin, &DocumentEvent::begin(QName::local("price")));
//! validator.next_event(EventKind::EndAttrs, &DocumentEvent::boundary());
//! validator.next_event(EventKind::Text, &DocumentEvent::text("19.90"));
//! validator.next_event(EventKind::End, &DocumentEvent::boundary());
//!
//! assert!(validator.is_valid());
//! assert!(errors.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// The XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// The XML Schema instance namespace (xsi:type, xsi:nil, ...)
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub mod error;
pub mod events;
pub mod locations;
pub mod names;
pub mod namespaces;
pub mod validators;

pub use error::{ErrorCollector, ErrorSink, Severity, ValidationError};
pub use events::{DocumentEvent, EventKind, ValidationEvent};
pub use locations::Location;
pub use namespaces::{NamespaceContext, PrefixResolver, QName};
pub use validators::StreamValidator;
