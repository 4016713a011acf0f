//! Validation events
//!
//! The validator consumes an already-tokenized stream of document structure
//! events. The event source must deliver them in well-nested document order:
//! one BEGIN, zero or more ATTR, one ENDATTRS boundary, interleaved TEXT and
//! child BEGIN/END pairs, then one END per BEGIN.

use crate::locations::Location;
use crate::namespaces::{NamespaceContext, PrefixResolver, QName};

/// Kind of a validation event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Element start
    Begin,
    /// One attribute of the current element
    Attr,
    /// Boundary after the last attribute of the current element
    EndAttrs,
    /// Character content
    Text,
    /// Element end
    End,
}

/// A single event from the event source.
///
/// The event is opaque to the validator beyond this interface: a qualified
/// name (BEGIN/ATTR), text (TEXT/ATTR), the four raw xsi:* attribute values
/// (BEGIN only), a whitespace-only predicate, prefix resolution scoped to the
/// current element, and a diagnostic location.
pub trait ValidationEvent {
    /// Qualified name of the element (BEGIN) or attribute (ATTR)
    fn name(&self) -> Option<&QName>;

    /// Raw text of a TEXT event or attribute value of an ATTR event
    fn text(&self) -> Option<&str>;

    /// Whether the text consists entirely of XML whitespace
    fn is_whitespace(&self) -> bool;

    /// Raw xsi:type attribute value (BEGIN only)
    fn xsi_type(&self) -> Option<&str>;

    /// Raw xsi:nil attribute value (BEGIN only)
    fn xsi_nil(&self) -> Option<&str>;

    /// Raw xsi:schemaLocation attribute value (BEGIN only)
    fn xsi_schema_location(&self) -> Option<&str>;

    /// Raw xsi:noNamespaceSchemaLocation attribute value (BEGIN only)
    fn xsi_no_namespace_schema_location(&self) -> Option<&str>;

    /// Resolve a namespace prefix in the scope of the current element.
    /// The empty prefix asks for the default namespace.
    fn resolve_prefix(&self, prefix: &str) -> Option<String>;

    /// Location of this event in the instance document
    fn location(&self) -> Location;
}

/// Adapter presenting a [`ValidationEvent`] as a [`PrefixResolver`]
pub struct EventResolver<'a>(pub &'a dyn ValidationEvent);

impl PrefixResolver for EventResolver<'_> {
    fn resolve_prefix(&self, prefix: &str) -> Option<String> {
        self.0.resolve_prefix(prefix)
    }
}

/// Concrete [`ValidationEvent`] for simple event sources and tests
#[derive(Debug, Clone, Default)]
pub struct DocumentEvent {
    name: Option<QName>,
    text: Option<String>,
    xsi_type: Option<String>,
    xsi_nil: Option<String>,
    xsi_schema_location: Option<String>,
    xsi_no_namespace_schema_location: Option<String>,
    namespaces: NamespaceContext,
    location: Location,
}

impl DocumentEvent {
    /// Event for an element start
    pub fn begin(name: QName) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// Event for one attribute
    pub fn attr(name: QName, value: impl Into<String>) -> Self {
        Self {
            name: Some(name),
            text: Some(value.into()),
            ..Self::default()
        }
    }

    /// Event for character content
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            text: Some(value.into()),
            ..Self::default()
        }
    }

    /// Carrier event for ENDATTRS and END, which have no payload
    pub fn boundary() -> Self {
        Self::default()
    }

    /// Attach a raw xsi:type value (BEGIN only)
    pub fn with_xsi_type(mut self, value: impl Into<String>) -> Self {
        self.xsi_type = Some(value.into());
        self
    }

    /// Attach a raw xsi:nil value (BEGIN only)
    pub fn with_xsi_nil(mut self, value: impl Into<String>) -> Self {
        self.xsi_nil = Some(value.into());
        self
    }

    /// Attach a raw xsi:schemaLocation value (BEGIN only)
    pub fn with_xsi_schema_location(mut self, value: impl Into<String>) -> Self {
        self.xsi_schema_location = Some(value.into());
        self
    }

    /// Attach a raw xsi:noNamespaceSchemaLocation value (BEGIN only)
    pub fn with_xsi_no_namespace_schema_location(mut self, value: impl Into<String>) -> Self {
        self.xsi_no_namespace_schema_location = Some(value.into());
        self
    }

    /// Declare a prefix mapping in the scope of this element
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.namespaces.add_prefix(prefix, namespace);
        self
    }

    /// Declare the default namespace in the scope of this element
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.set_default_namespace(namespace);
        self
    }

    /// Attach a document position
    pub fn at(mut self, line: u64, column: u64) -> Self {
        self.location = Location::at(line, column);
        self
    }
}

impl ValidationEvent for DocumentEvent {
    fn name(&self) -> Option<&QName> {
        self.name.as_ref()
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn is_whitespace(&self) -> bool {
        self.text
            .as_deref()
            .map(|t| t.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')))
            .unwrap_or(true)
    }

    fn xsi_type(&self) -> Option<&str> {
        self.xsi_type.as_deref()
    }

    fn xsi_nil(&self) -> Option<&str> {
        self.xsi_nil.as_deref()
    }

    fn xsi_schema_location(&self) -> Option<&str> {
        self.xsi_schema_location.as_deref()
    }

    fn xsi_no_namespace_schema_location(&self) -> Option<&str> {
        self.xsi_no_namespace_schema_location.as_deref()
    }

    fn resolve_prefix(&self, prefix: &str) -> Option<String> {
        self.namespaces.resolve_prefix(prefix)
    }

    fn location(&self) -> Location {
        self.location.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_event() {
        let ev = DocumentEvent::begin(QName::local("order"))
            .with_xsi_type("p:ExtendedOrder")
            .with_prefix("p", "http://example.com/p")
            .at(1, 1);

        assert_eq!(ev.name().unwrap().local_name, "order");
        assert_eq!(ev.xsi_type(), Some("p:ExtendedOrder"));
        assert_eq!(
            ev.resolve_prefix("p").as_deref(),
            Some("http://example.com/p")
        );
        assert_eq!(ev.location(), Location::at(1, 1));
    }

    #[test]
    fn test_whitespace_predicate() {
        assert!(DocumentEvent::text("  \n\t ").is_whitespace());
        assert!(!DocumentEvent::text(" x ").is_whitespace());
        assert!(DocumentEvent::boundary().is_whitespace());
    }
}
