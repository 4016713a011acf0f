//! Element declarations
//!
//! An [`ElementDecl`] carries everything the validator needs about a declared
//! element: its governing type, nillability, default/fixed value constraints,
//! blocked derivations and attached identity constraints. [`FieldRef`] is the
//! uniform view over the element or attribute declaration a value is being
//! validated against, used for value constraints and error attribution.

use crate::namespaces::QName;
use std::sync::Arc;

use super::attributes::AttributeDecl;
use super::identities::IdentityConstraintDef;
use super::types::{DerivationFlags, SchemaType};

/// An element declaration
#[derive(Debug)]
pub struct ElementDecl {
    /// Qualified name
    pub name: QName,
    /// Governing type
    pub element_type: Arc<SchemaType>,
    /// Whether xsi:nil="true" is allowed on instances
    pub nillable: bool,
    /// Abstract declarations cannot appear in instances directly
    pub is_abstract: bool,
    /// Default value lexical, substituted for empty content
    pub default: Option<String>,
    /// Fixed value lexical; empty content substitutes it, other content must
    /// equal it by value
    pub fixed: Option<String>,
    /// Derivation methods blocked for xsi:type overrides and substitution
    pub block: DerivationFlags,
    /// Identity constraints scoped to this element
    pub identity_constraints: Vec<Arc<IdentityConstraintDef>>,
}

impl ElementDecl {
    /// Create a plain element declaration
    pub fn new(name: QName, element_type: Arc<SchemaType>) -> Self {
        Self {
            name,
            element_type,
            nillable: false,
            is_abstract: false,
            default: None,
            fixed: None,
            block: DerivationFlags::default(),
            identity_constraints: Vec::new(),
        }
    }

    /// Allow xsi:nil on instances of this element
    pub fn nillable(mut self) -> Self {
        self.nillable = true;
        self
    }

    /// Mark the declaration abstract
    pub fn abstract_decl(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the fixed value
    pub fn with_fixed(mut self, value: impl Into<String>) -> Self {
        self.fixed = Some(value.into());
        self
    }

    /// Set blocked derivations
    pub fn with_block(mut self, block: DerivationFlags) -> Self {
        self.block = block;
        self
    }

    /// Attach an identity constraint
    pub fn with_identity_constraint(mut self, constraint: Arc<IdentityConstraintDef>) -> Self {
        self.identity_constraints.push(constraint);
        self
    }

    /// The lexical substituted for empty content, if any
    pub fn absent_value(&self) -> Option<&str> {
        self.fixed.as_deref().or(self.default.as_deref())
    }
}

/// The element or attribute declaration a value is validated against
#[derive(Debug, Clone)]
pub enum FieldRef {
    /// An element declaration
    Element(Arc<ElementDecl>),
    /// An attribute declaration
    Attribute(Arc<AttributeDecl>),
}

impl FieldRef {
    /// Declared name
    pub fn name(&self) -> &QName {
        match self {
            FieldRef::Element(decl) => &decl.name,
            FieldRef::Attribute(decl) => &decl.name,
        }
    }

    /// Whether the field allows xsi:nil
    pub fn nillable(&self) -> bool {
        match self {
            FieldRef::Element(decl) => decl.nillable,
            FieldRef::Attribute(_) => false,
        }
    }

    /// Default value lexical, if declared
    pub fn default_value(&self) -> Option<&str> {
        match self {
            FieldRef::Element(decl) => decl.default.as_deref(),
            FieldRef::Attribute(decl) => decl.default.as_deref(),
        }
    }

    /// Fixed value lexical, if declared
    pub fn fixed_value(&self) -> Option<&str> {
        match self {
            FieldRef::Element(decl) => decl.fixed.as_deref(),
            FieldRef::Attribute(decl) => decl.fixed.as_deref(),
        }
    }

    /// The lexical substituted when content is absent, if any
    pub fn absent_value(&self) -> Option<&str> {
        self.fixed_value().or_else(|| self.default_value())
    }

    /// Derivation methods blocked by the declaration
    pub fn block(&self) -> DerivationFlags {
        match self {
            FieldRef::Element(decl) => decl.block,
            FieldRef::Attribute(_) => DerivationFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_flags() {
        let decl = ElementDecl::new(QName::local("note"), SchemaType::any_type())
            .nillable()
            .with_default("n/a");

        assert!(decl.nillable);
        assert!(!decl.is_abstract);
        assert_eq!(decl.absent_value(), Some("n/a"));
    }

    #[test]
    fn test_field_ref_fixed_wins_over_default() {
        let decl = Arc::new(
            ElementDecl::new(QName::local("version"), SchemaType::any_type())
                .with_default("1")
                .with_fixed("2"),
        );
        let field = FieldRef::Element(decl);
        assert_eq!(field.absent_value(), Some("2"));
        assert_eq!(field.name(), &QName::local("version"));
    }
}
