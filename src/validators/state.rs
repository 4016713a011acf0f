//! Per-element validation state
//!
//! One [`ValidationState`] is pushed for every open element. It pins the
//! effective type (after any xsi:type override), the governing declaration,
//! content flags derived from the type, a fresh content-model cursor and the
//! set of attribute names seen so far.

use crate::namespaces::QName;
use indexmap::IndexSet;
use std::sync::Arc;

use super::attributes::AttributeModel;
use super::elements::FieldRef;
use super::particles::ContentAutomaton;
use super::types::{ContentKind, SchemaType, TypeKind};

/// State of one open element
#[derive(Debug)]
pub struct ValidationState {
    /// Effective governing type
    pub schema_type: Arc<SchemaType>,
    /// Declaration the element was matched against, when known
    pub field: Option<FieldRef>,
    /// Whether attributes other than xsi:* are allowed
    pub can_have_attrs: bool,
    /// Whether non-whitespace text between child elements is allowed
    pub can_have_mixed_content: bool,
    /// Whether text is governed by a simple type
    pub has_simple_content: bool,
    /// Whether child elements are allowed
    pub can_have_elements: bool,
    /// A TEXT event was seen
    pub saw_text: bool,
    /// No TEXT event and no child element seen yet
    pub is_empty: bool,
    /// The element carried xsi:nil="true"
    pub is_nil: bool,
    /// Content-model cursor, for element content
    pub cursor: Option<Box<dyn ContentAutomaton>>,
    /// Attribute surface of the effective type
    pub attributes: Option<Arc<dyn AttributeModel + Send + Sync>>,
    /// Attribute names seen on this element, for duplicate detection
    pub seen_attributes: IndexSet<QName>,
}

impl ValidationState {
    /// Derive the state for an element governed by `schema_type`
    pub fn new(schema_type: Arc<SchemaType>, field: Option<FieldRef>, is_nil: bool) -> Self {
        let (has_simple_content, can_have_elements, can_have_mixed_content) =
            match &schema_type.kind {
                TypeKind::Simple(_) => (true, false, false),
                TypeKind::Complex(complex) => match &complex.content {
                    ContentKind::Empty => (false, false, false),
                    ContentKind::Simple(_) => (true, false, false),
                    ContentKind::ElementOnly(_) => (false, true, false),
                    ContentKind::Mixed(_) => (false, true, true),
                    ContentKind::AnyContent => (false, true, true),
                },
            };

        let cursor = if is_nil {
            None
        } else {
            schema_type.new_content_cursor()
        };
        let attributes = schema_type.attribute_model();

        Self {
            can_have_attrs: attributes.is_some(),
            schema_type,
            field,
            can_have_mixed_content,
            has_simple_content,
            can_have_elements,
            saw_text: false,
            is_empty: true,
            is_nil,
            cursor,
            attributes,
            seen_attributes: IndexSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::builtins::BuiltinKind;
    use crate::validators::simple_types::SimpleTypeDef;

    #[test]
    fn test_flags_for_simple_type() {
        let ty = Arc::new(SchemaType::simple(Arc::new(SimpleTypeDef::builtin(
            BuiltinKind::String,
        ))));
        let state = ValidationState::new(ty, None, false);

        assert!(state.has_simple_content);
        assert!(!state.can_have_elements);
        assert!(!state.can_have_attrs);
        assert!(state.cursor.is_none());
        assert!(state.is_empty);
    }

    #[test]
    fn test_flags_for_any_type() {
        let state = ValidationState::new(SchemaType::any_type(), None, false);

        assert!(state.can_have_elements);
        assert!(state.can_have_mixed_content);
        assert!(state.can_have_attrs);
        assert!(state.cursor.is_some());
    }

    #[test]
    fn test_nil_state_has_no_cursor() {
        let state = ValidationState::new(SchemaType::any_type(), None, true);
        assert!(state.cursor.is_none());
        assert!(state.is_nil);
    }
}
