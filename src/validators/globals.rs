//! Global schema component registry
//!
//! The validator resolves xsi:type names, wildcard-matched elements and
//! laxly validated attributes against the [`SchemaRegistry`] trait.
//! [`GlobalMaps`] is the map-backed implementation, optionally preloaded
//! with the XSD built-in types so xsi:type="xs:..." overrides resolve.

use crate::namespaces::QName;
use crate::XSD_NAMESPACE;
use std::collections::HashMap;
use std::sync::Arc;

use super::attributes::AttributeDecl;
use super::builtins::BuiltinKind;
use super::elements::ElementDecl;
use super::simple_types::SimpleTypeDef;
use super::types::SchemaType;

/// Lookup surface over the global declarations of a compiled schema set
pub trait SchemaRegistry {
    /// Global element declaration by name
    fn global_element(&self, name: &QName) -> Option<Arc<ElementDecl>>;

    /// Global attribute declaration by name
    fn global_attribute(&self, name: &QName) -> Option<Arc<AttributeDecl>>;

    /// Global type definition by name
    fn global_type(&self, name: &QName) -> Option<Arc<SchemaType>>;
}

/// Map-backed [`SchemaRegistry`]
#[derive(Debug, Default)]
pub struct GlobalMaps {
    elements: HashMap<QName, Arc<ElementDecl>>,
    attributes: HashMap<QName, Arc<AttributeDecl>>,
    types: HashMap<QName, Arc<SchemaType>>,
}

impl GlobalMaps {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the XSD built-in simple types and xs:anyType
    pub fn with_builtins() -> Self {
        let mut maps = Self::new();
        for kind in BuiltinKind::ALL {
            let name = QName::namespaced(XSD_NAMESPACE, kind.xsd_name());
            let def = Arc::new(SimpleTypeDef::builtin(*kind).with_name(name.clone()));
            maps.insert_type(Arc::new(SchemaType::simple(def)));
        }
        maps.insert_type(SchemaType::any_type());
        maps
    }

    /// Register a global element declaration
    pub fn insert_element(&mut self, decl: Arc<ElementDecl>) {
        self.elements.insert(decl.name.clone(), decl);
    }

    /// Register a global attribute declaration
    pub fn insert_attribute(&mut self, decl: Arc<AttributeDecl>) {
        self.attributes.insert(decl.name.clone(), decl);
    }

    /// Register a global type; anonymous types are ignored
    pub fn insert_type(&mut self, ty: Arc<SchemaType>) {
        if let Some(name) = ty.name.clone() {
            self.types.insert(name, ty);
        }
    }
}

impl SchemaRegistry for GlobalMaps {
    fn global_element(&self, name: &QName) -> Option<Arc<ElementDecl>> {
        self.elements.get(name).cloned()
    }

    fn global_attribute(&self, name: &QName) -> Option<Arc<AttributeDecl>> {
        self.attributes.get(name).cloned()
    }

    fn global_type(&self, name: &QName) -> Option<Arc<SchemaType>> {
        self.types.get(name).cloned()
    }
}
