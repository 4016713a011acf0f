//! Schema components and the streaming validation engine
//!
//! The schema compiler hands the validator a graph of the components in
//! this module: types, element and attribute declarations, particles and
//! identity constraints. [`validation::StreamValidator`] drives the event
//! stream against that graph.

pub mod attributes;
pub mod builtins;
pub mod elements;
pub mod facets;
pub mod globals;
pub mod identities;
pub mod particles;
pub mod simple_types;
pub mod state;
pub mod types;
pub mod validation;
pub mod wildcards;

pub use attributes::{AttributeDecl, AttributeGroup, AttributeModel, AttributeUse};
pub use builtins::{validate_builtin, BuiltinKind, XsdValue};
pub use elements::{ElementDecl, FieldRef};
pub use facets::{FacetSet, PatternFacet, WhiteSpace};
pub use globals::{GlobalMaps, SchemaRegistry};
pub use identities::{
    ConstraintCategory, IdentityConstraintDef, IdentityHandler, NoopIdentityHandler,
};
pub use particles::{Compositor, ContentAutomaton, GroupTerm, ModelGroup, Occurs, Particle};
pub use simple_types::{validate_simple_value, SimpleTypeDef, Variety};
pub use state::ValidationState;
pub use types::{
    ComplexDef, ContentKind, DerivationFlags, DerivationMethod, SchemaType, TypeKind,
};
pub use validation::StreamValidator;
pub use wildcards::{NamespaceConstraint, ProcessContents};
