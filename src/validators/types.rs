//! Schema type components
//!
//! [`SchemaType`] is the unified view of simple and complex type definitions
//! the validator works with. Complex types describe their content kind and
//! attribute surface; every type records its base type and derivation method
//! so xsi:type overrides can be checked for assignability and blocked
//! derivations.

use crate::namespaces::QName;
use once_cell::sync::Lazy;
use std::ops::BitOr;
use std::sync::Arc;

use super::attributes::{AttributeGroup, AttributeModel};
use super::particles::{AnyContentCursor, ContentAutomaton, ModelGroup};
use super::simple_types::SimpleTypeDef;

/// Derivation method of a type from its base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivationMethod {
    /// Derived by extension
    Extension,
    /// Derived by restriction
    Restriction,
}

impl std::fmt::Display for DerivationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extension => write!(f, "extension"),
            Self::Restriction => write!(f, "restriction"),
        }
    }
}

/// Set of blocked derivation methods (the `block` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DerivationFlags {
    /// Extension is blocked
    pub extension: bool,
    /// Restriction is blocked
    pub restriction: bool,
    /// Substitution is blocked (element declarations only)
    pub substitution: bool,
}

impl DerivationFlags {
    /// No blocked derivations
    pub fn none() -> Self {
        Self::default()
    }

    /// Block extension
    pub fn extension() -> Self {
        Self {
            extension: true,
            ..Self::default()
        }
    }

    /// Block restriction
    pub fn restriction() -> Self {
        Self {
            restriction: true,
            ..Self::default()
        }
    }

    /// Block substitution
    pub fn substitution() -> Self {
        Self {
            substitution: true,
            ..Self::default()
        }
    }

    /// Block everything (#all)
    pub fn all() -> Self {
        Self {
            extension: true,
            restriction: true,
            substitution: true,
        }
    }

    /// Check if a derivation method is blocked
    pub fn blocks(&self, method: DerivationMethod) -> bool {
        match method {
            DerivationMethod::Extension => self.extension,
            DerivationMethod::Restriction => self.restriction,
        }
    }
}

impl BitOr for DerivationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            extension: self.extension || rhs.extension,
            restriction: self.restriction || rhs.restriction,
            substitution: self.substitution || rhs.substitution,
        }
    }
}

/// Content kind of a complex type
#[derive(Debug)]
pub enum ContentKind {
    /// No text, no child elements
    Empty,
    /// Character content governed by a simple type, no child elements
    Simple(Arc<SimpleTypeDef>),
    /// Child elements per the particle tree, whitespace-only text allowed
    ElementOnly(Arc<ModelGroup>),
    /// Child elements per the particle tree plus arbitrary text
    Mixed(Arc<ModelGroup>),
    /// Anything, validated laxly (xs:anyType)
    AnyContent,
}

/// Complex type definition: content plus attribute surface
#[derive(Debug)]
pub struct ComplexDef {
    /// Content kind
    pub content: ContentKind,
    /// Attribute declarations and wildcard
    pub attributes: Arc<dyn AttributeModel + Send + Sync>,
}

/// Simple or complex flavor of a schema type
#[derive(Debug)]
pub enum TypeKind {
    /// Simple type
    Simple(Arc<SimpleTypeDef>),
    /// Complex type
    Complex(ComplexDef),
}

/// A schema type definition
#[derive(Debug)]
pub struct SchemaType {
    /// Qualified name; None for anonymous types
    pub name: Option<QName>,
    /// Simple or complex definition
    pub kind: TypeKind,
    /// Base type, when derived
    pub base: Option<Arc<SchemaType>>,
    /// How this type derives from its base
    pub derivation: Option<DerivationMethod>,
    /// Abstract types cannot govern instance elements directly
    pub is_abstract: bool,
    /// Derivations blocked for xsi:type overrides of this type
    pub block: DerivationFlags,
    /// Sentinel flag: the element had no resolvable type at compile time
    pub no_type: bool,
}

static ANY_TYPE: Lazy<Arc<SchemaType>> = Lazy::new(|| {
    Arc::new(SchemaType {
        name: Some(QName::namespaced(crate::XSD_NAMESPACE, "anyType")),
        kind: TypeKind::Complex(ComplexDef {
            content: ContentKind::AnyContent,
            attributes: Arc::new(AttributeGroup::any_lax()),
        }),
        base: None,
        derivation: None,
        is_abstract: false,
        block: DerivationFlags::none(),
        no_type: false,
    })
});

static NO_TYPE: Lazy<Arc<SchemaType>> = Lazy::new(|| {
    Arc::new(SchemaType {
        name: None,
        kind: TypeKind::Complex(ComplexDef {
            content: ContentKind::AnyContent,
            attributes: Arc::new(AttributeGroup::any_lax()),
        }),
        base: None,
        derivation: None,
        is_abstract: false,
        block: DerivationFlags::none(),
        no_type: true,
    })
});

impl SchemaType {
    /// The ur-type xs:anyType
    pub fn any_type() -> Arc<SchemaType> {
        ANY_TYPE.clone()
    }

    /// Sentinel for elements whose type could not be resolved when the
    /// schema was compiled
    pub fn no_type() -> Arc<SchemaType> {
        NO_TYPE.clone()
    }

    /// Anonymous type wrapping a simple type definition
    pub fn simple(def: Arc<SimpleTypeDef>) -> Self {
        Self {
            name: def.name.clone(),
            kind: TypeKind::Simple(def),
            base: None,
            derivation: None,
            is_abstract: false,
            block: DerivationFlags::none(),
            no_type: false,
        }
    }

    /// Anonymous complex type
    pub fn complex(
        content: ContentKind,
        attributes: Arc<dyn AttributeModel + Send + Sync>,
    ) -> Self {
        Self {
            name: None,
            kind: TypeKind::Complex(ComplexDef {
                content,
                attributes,
            }),
            base: None,
            derivation: None,
            is_abstract: false,
            block: DerivationFlags::none(),
            no_type: false,
        }
    }

    /// Name the type
    pub fn with_name(mut self, name: QName) -> Self {
        self.name = Some(name);
        self
    }

    /// Record the base type and derivation method
    pub fn derived_from(mut self, base: Arc<SchemaType>, method: DerivationMethod) -> Self {
        self.base = Some(base);
        self.derivation = Some(method);
        self
    }

    /// Mark the type abstract
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set blocked derivations
    pub fn with_block(mut self, block: DerivationFlags) -> Self {
        self.block = block;
        self
    }

    /// Name for diagnostics; anonymous types render as their content
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => "anonymous type".to_string(),
        }
    }

    /// Identity of two type definitions: same object, or same global name
    pub fn same_type(a: &Arc<SchemaType>, b: &Arc<SchemaType>) -> bool {
        if Arc::ptr_eq(a, b) {
            return true;
        }
        match (&a.name, &b.name) {
            (Some(na), Some(nb)) => na == nb,
            _ => false,
        }
    }

    /// Check whether `candidate` equals `ancestor` or derives from it
    pub fn is_derived_from(candidate: &Arc<SchemaType>, ancestor: &Arc<SchemaType>) -> bool {
        let mut current = candidate.clone();
        loop {
            if Self::same_type(&current, ancestor) {
                return true;
            }
            match &current.base {
                Some(base) => current = base.clone(),
                None => return false,
            }
        }
    }

    /// Walk the derivation chain from `candidate` up to `declared` and
    /// return the first derivation method the combined block flags forbid
    pub fn blocked_derivation(
        candidate: &Arc<SchemaType>,
        declared: &Arc<SchemaType>,
        block: DerivationFlags,
    ) -> Option<DerivationMethod> {
        let mut current = candidate.clone();
        while !Self::same_type(&current, declared) {
            let method = current.derivation?;
            if block.blocks(method) {
                return Some(method);
            }
            match &current.base {
                Some(base) => current = base.clone(),
                None => return None,
            }
        }
        None
    }

    /// The simple type governing character content, if the type has one
    pub fn simple_content_def(&self) -> Option<Arc<SimpleTypeDef>> {
        match &self.kind {
            TypeKind::Simple(def) => Some(def.clone()),
            TypeKind::Complex(complex) => match &complex.content {
                ContentKind::Simple(def) => Some(def.clone()),
                _ => None,
            },
        }
    }

    /// Attribute surface, for complex types
    pub fn attribute_model(&self) -> Option<Arc<dyn AttributeModel + Send + Sync>> {
        match &self.kind {
            TypeKind::Complex(complex) => Some(complex.attributes.clone()),
            TypeKind::Simple(_) => None,
        }
    }

    /// Whether text interleaved with child elements is allowed
    pub fn is_mixed(&self) -> bool {
        matches!(
            &self.kind,
            TypeKind::Complex(ComplexDef {
                content: ContentKind::Mixed(_) | ContentKind::AnyContent,
                ..
            })
        )
    }

    /// Whether the type allows child elements at all
    pub fn has_element_content(&self) -> bool {
        matches!(
            &self.kind,
            TypeKind::Complex(ComplexDef {
                content: ContentKind::ElementOnly(_)
                    | ContentKind::Mixed(_)
                    | ContentKind::AnyContent,
                ..
            })
        )
    }

    /// Create a content-model cursor, when the type has element content
    pub fn new_content_cursor(&self) -> Option<Box<dyn ContentAutomaton>> {
        match &self.kind {
            TypeKind::Complex(complex) => match &complex.content {
                ContentKind::ElementOnly(group) | ContentKind::Mixed(group) => {
                    Some(group.new_cursor())
                }
                ContentKind::AnyContent => Some(Box::new(AnyContentCursor::new())),
                _ => None,
            },
            TypeKind::Simple(_) => None,
        }
    }
}
