//! Attribute declarations and attribute models
//!
//! A complex type exposes its attributes through the [`AttributeModel`]
//! trait: declared attributes looked up by name plus an optional attribute
//! wildcard (xs:anyAttribute). [`AttributeGroup`] is the map-backed
//! implementation the schema compiler produces.

use crate::namespaces::QName;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::simple_types::SimpleTypeDef;
use super::wildcards::{NamespaceConstraint, ProcessContents};

/// Use mode of an attribute declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeUse {
    /// May be absent
    #[default]
    Optional,
    /// Must be present
    Required,
    /// Must be absent
    Prohibited,
}

/// An attribute declaration
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    /// Qualified name
    pub name: QName,
    /// Simple type governing the value
    pub attr_type: Arc<SimpleTypeDef>,
    /// Use mode
    pub use_mode: AttributeUse,
    /// Default value lexical, substituted when the attribute is absent
    pub default: Option<String>,
    /// Fixed value lexical; also substituted when absent
    pub fixed: Option<String>,
}

impl AttributeDecl {
    /// Create an optional attribute declaration
    pub fn new(name: QName, attr_type: Arc<SimpleTypeDef>) -> Self {
        Self {
            name,
            attr_type,
            use_mode: AttributeUse::Optional,
            default: None,
            fixed: None,
        }
    }

    /// Set the use mode
    pub fn with_use(mut self, use_mode: AttributeUse) -> Self {
        self.use_mode = use_mode;
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

    /// The lexical substituted when the attribute is absent, if any
    pub fn absent_value(&self) -> Option<&str> {
        self.fixed.as_deref().or(self.default.as_deref())
    }
}

/// Attribute surface of a complex type
pub trait AttributeModel: fmt::Debug {
    /// Look up a declared attribute by name
    fn lookup(&self, name: &QName) -> Option<Arc<AttributeDecl>>;

    /// Process-contents mode of the attribute wildcard, if one is present
    fn wildcard_process(&self) -> Option<ProcessContents>;

    /// Namespace constraint of the attribute wildcard, if one is present
    fn wildcard_namespace(&self) -> Option<&NamespaceConstraint>;

    /// All declared attributes, in declaration order
    fn declarations(&self) -> Vec<Arc<AttributeDecl>>;
}

/// Map-backed [`AttributeModel`]
#[derive(Debug, Default)]
pub struct AttributeGroup {
    attributes: IndexMap<QName, Arc<AttributeDecl>>,
    wildcard: Option<(NamespaceConstraint, ProcessContents)>,
}

impl AttributeGroup {
    /// Create an empty attribute group
    pub fn new() -> Self {
        Self::default()
    }

    /// Group with only a lax any-namespace wildcard, as used by xs:anyType
    pub fn any_lax() -> Self {
        Self {
            attributes: IndexMap::new(),
            wildcard: Some((NamespaceConstraint::Any, ProcessContents::Lax)),
        }
    }

    /// Add an attribute declaration
    pub fn with_attribute(mut self, decl: AttributeDecl) -> Self {
        self.attributes.insert(decl.name.clone(), Arc::new(decl));
        self
    }

    /// Set the attribute wildcard
    pub fn with_wildcard(
        mut self,
        namespace: NamespaceConstraint,
        process: ProcessContents,
    ) -> Self {
        self.wildcard = Some((namespace, process));
        self
    }
}

impl AttributeModel for AttributeGroup {
    fn lookup(&self, name: &QName) -> Option<Arc<AttributeDecl>> {
        self.attributes.get(name).cloned()
    }

    fn wildcard_process(&self) -> Option<ProcessContents> {
        self.wildcard.as_ref().map(|(_, process)| *process)
    }

    fn wildcard_namespace(&self) -> Option<&NamespaceConstraint> {
        self.wildcard.as_ref().map(|(namespace, _)| namespace)
    }

    fn declarations(&self) -> Vec<Arc<AttributeDecl>> {
        self.attributes.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::builtins::BuiltinKind;

    fn string_type() -> Arc<SimpleTypeDef> {
        Arc::new(SimpleTypeDef::builtin(BuiltinKind::String))
    }

    #[test]
    fn test_lookup_declared_attribute() {
        let group = AttributeGroup::new()
            .with_attribute(AttributeDecl::new(QName::local("id"), string_type()));

        assert!(group.lookup(&QName::local("id")).is_some());
        assert!(group.lookup(&QName::local("missing")).is_none());
    }

    #[test]
    fn test_declaration_order_preserved() {
        let group = AttributeGroup::new()
            .with_attribute(AttributeDecl::new(QName::local("b"), string_type()))
            .with_attribute(AttributeDecl::new(QName::local("a"), string_type()));

        let names: Vec<String> = group
            .declarations()
            .iter()
            .map(|d| d.name.local_name.clone())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_absent_value_prefers_fixed() {
        let decl = AttributeDecl::new(QName::local("version"), string_type())
            .with_default("1.0")
            .with_fixed("2.0");
        assert_eq!(decl.absent_value(), Some("2.0"));
    }

    #[test]
    fn test_any_lax_wildcard() {
        let group = AttributeGroup::any_lax();
        assert_eq!(group.wildcard_process(), Some(ProcessContents::Lax));
        assert!(group
            .wildcard_namespace()
            .unwrap()
            .allows("http://anywhere"));
    }
}
