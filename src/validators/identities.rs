//! Identity constraints
//!
//! Declarations for xs:unique, xs:key and xs:keyref, and the
//! [`IdentityHandler`] trait through which an external engine observes the
//! validated stream. The validator forwards every element boundary, every
//! declared attribute and every typed text value; evaluating selector and
//! field XPaths and bucketing the tuples is the handler's job.

use crate::events::ValidationEvent;
use crate::namespaces::QName;
use std::sync::Arc;

use super::builtins::XsdValue;
use super::simple_types::SimpleTypeDef;
use super::types::SchemaType;

/// Category of an identity constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintCategory {
    /// xs:unique - field tuples must not repeat within scope
    Unique,
    /// xs:key - like unique, and every field must be present
    Key,
    /// xs:keyref - field tuples must match those of the referred key
    KeyRef {
        /// Name of the referred key constraint
        refer: QName,
    },
}

/// An identity constraint declared on an element
#[derive(Debug, Clone)]
pub struct IdentityConstraintDef {
    /// Constraint name
    pub name: QName,
    /// Category
    pub category: ConstraintCategory,
    /// Selector XPath, relative to the scoping element
    pub selector: String,
    /// Field XPaths, relative to a selected node
    pub fields: Vec<String>,
}

impl IdentityConstraintDef {
    /// Declare a xs:unique constraint
    pub fn unique(name: QName, selector: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name,
            category: ConstraintCategory::Unique,
            selector: selector.into(),
            fields,
        }
    }

    /// Declare a xs:key constraint
    pub fn key(name: QName, selector: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            name,
            category: ConstraintCategory::Key,
            selector: selector.into(),
            fields,
        }
    }

    /// Declare a xs:keyref constraint
    pub fn key_ref(
        name: QName,
        refer: QName,
        selector: impl Into<String>,
        fields: Vec<String>,
    ) -> Self {
        Self {
            name,
            category: ConstraintCategory::KeyRef { refer },
            selector: selector.into(),
            fields,
        }
    }
}

/// Observer of the validated stream for identity constraint evaluation
pub trait IdentityHandler {
    /// An element opened; `constraints` are the ones newly scoped to it
    fn on_element_begin(
        &mut self,
        event: &dyn ValidationEvent,
        schema_type: &SchemaType,
        constraints: &[Arc<IdentityConstraintDef>],
    );

    /// A declared attribute was validated; `value` is None when validation
    /// failed
    fn on_attribute(
        &mut self,
        event: &dyn ValidationEvent,
        name: &QName,
        attr_type: &SimpleTypeDef,
        value: Option<&XsdValue>,
    );

    /// The element's text was validated. `text_type` is None for mixed or
    /// element-only content; `is_empty` marks an element that closed without
    /// any text
    fn on_text(
        &mut self,
        event: &dyn ValidationEvent,
        text_type: Option<&SimpleTypeDef>,
        value: Option<&XsdValue>,
        is_empty: bool,
    );

    /// An element closed
    fn on_element_end(&mut self, event: &dyn ValidationEvent);

    /// Whether all observed constraints hold so far
    fn is_valid(&self) -> bool;
}

/// Handler that ignores the stream and never objects
#[derive(Debug, Default)]
pub struct NoopIdentityHandler;

impl IdentityHandler for NoopIdentityHandler {
    fn on_element_begin(
        &mut self,
        _event: &dyn ValidationEvent,
        _schema_type: &SchemaType,
        _constraints: &[Arc<IdentityConstraintDef>],
    ) {
    }

    fn on_attribute(
        &mut self,
        _event: &dyn ValidationEvent,
        _name: &QName,
        _attr_type: &SimpleTypeDef,
        _value: Option<&XsdValue>,
    ) {
    }

    fn on_text(
        &mut self,
        _event: &dyn ValidationEvent,
        _text_type: Option<&SimpleTypeDef>,
        _value: Option<&XsdValue>,
        _is_empty: bool,
    ) {
    }

    fn on_element_end(&mut self, _event: &dyn ValidationEvent) {}

    fn is_valid(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_constructors() {
        let key = IdentityConstraintDef::key(
            QName::local("pk"),
            "item",
            vec!["@id".to_string()],
        );
        assert_eq!(key.category, ConstraintCategory::Key);
        assert_eq!(key.fields.len(), 1);

        let kref = IdentityConstraintDef::key_ref(
            QName::local("fk"),
            QName::local("pk"),
            "ref",
            vec!["@target".to_string()],
        );
        match kref.category {
            ConstraintCategory::KeyRef { refer } => assert_eq!(refer, QName::local("pk")),
            other => panic!("unexpected category: {:?}", other),
        }
    }

    #[test]
    fn test_noop_handler_is_valid() {
        let handler = NoopIdentityHandler;
        assert!(handler.is_valid());
    }
}
