//! Simple type definitions and the simple content engine
//!
//! A [`SimpleTypeDef`] is an atomic builtin, a list over an item type or a
//! union over member types, each with its own whitespace rule and facets.
//! [`validate_simple_value`] drives the whole pipeline for one value:
//! whitespace normalization, default/fixed substitution for the governing
//! field, variety dispatch, facet checks and fixed-value enforcement.

use crate::error::{Reporter, ValidationError};
use crate::locations::Location;
use crate::namespaces::{PrefixResolver, QName};
use once_cell::sync::Lazy;
use std::sync::Arc;

use super::builtins::{validate_builtin, BuiltinKind, XsdValue};
use super::elements::FieldRef;
use super::facets::{FacetSet, WhiteSpace};

/// Variety of a simple type
#[derive(Debug, Clone)]
pub enum Variety {
    /// A primitive builtin, possibly restricted by facets
    Atomic(BuiltinKind),
    /// Whitespace-separated list over an item type
    List(Arc<SimpleTypeDef>),
    /// First-match union over member types
    Union(Vec<Arc<SimpleTypeDef>>),
}

/// A simple type definition
#[derive(Debug, Clone)]
pub struct SimpleTypeDef {
    /// Qualified name; None for anonymous types
    pub name: Option<QName>,
    /// Variety
    pub variety: Variety,
    /// Constraining facets
    pub facets: FacetSet,
    /// Whitespace normalization applied before validation
    pub white_space: WhiteSpace,
}

static STRING_DEF: Lazy<Arc<SimpleTypeDef>> = Lazy::new(|| {
    Arc::new(
        SimpleTypeDef::builtin(BuiltinKind::String)
            .with_name(QName::namespaced(crate::XSD_NAMESPACE, "string")),
    )
});

impl SimpleTypeDef {
    /// Restriction of a primitive builtin. Strings preserve whitespace;
    /// every other builtin collapses it.
    pub fn builtin(kind: BuiltinKind) -> Self {
        let white_space = match kind {
            BuiltinKind::String => WhiteSpace::Preserve,
            _ => WhiteSpace::Collapse,
        };
        Self {
            name: None,
            variety: Variety::Atomic(kind),
            facets: FacetSet::new(),
            white_space,
        }
    }

    /// List type over an item type
    pub fn list(item: Arc<SimpleTypeDef>) -> Self {
        Self {
            name: None,
            variety: Variety::List(item),
            facets: FacetSet::new(),
            white_space: WhiteSpace::Collapse,
        }
    }

    /// Union type over member types. Whitespace is left to the members,
    /// each of which applies its own rule during its trial.
    pub fn union(members: Vec<Arc<SimpleTypeDef>>) -> Self {
        Self {
            name: None,
            variety: Variety::Union(members),
            facets: FacetSet::new(),
            white_space: WhiteSpace::Preserve,
        }
    }

    /// Name the type
    pub fn with_name(mut self, name: QName) -> Self {
        self.name = Some(name);
        self
    }

    /// Attach constraining facets
    pub fn with_facets(mut self, facets: FacetSet) -> Self {
        self.facets = facets;
        self
    }

    /// Override the whitespace rule
    pub fn with_white_space(mut self, white_space: WhiteSpace) -> Self {
        self.white_space = white_space;
        self
    }

    /// The xs:string definition, shared for mixed-content value checks
    pub fn string_def() -> Arc<SimpleTypeDef> {
        STRING_DEF.clone()
    }

    /// Whether values of this type embed namespace bindings, which makes
    /// default/fixed substitution unreliable outside the instance scope
    pub fn is_qname_governed(&self) -> bool {
        match &self.variety {
            Variety::Atomic(kind) => {
                matches!(kind, BuiltinKind::QName | BuiltinKind::Notation)
            }
            Variety::List(item) => item.is_qname_governed(),
            Variety::Union(members) => members.iter().any(|m| m.is_qname_governed()),
        }
    }

    /// Name for diagnostics
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => match &self.variety {
                Variety::Atomic(kind) => format!("xs:{}", kind.xsd_name()),
                Variety::List(_) => "anonymous list type".to_string(),
                Variety::Union(_) => "anonymous union type".to_string(),
            },
        }
    }
}

/// Validate one simple value against its type.
///
/// `field` is the element or attribute declaration the value belongs to,
/// when there is one; it supplies default/fixed value constraints. Returns
/// the typed value, or None when validation failed or when defaulting was
/// skipped for a QName-governed type.
pub fn validate_simple_value(
    stype: &SimpleTypeDef,
    field: Option<&FieldRef>,
    raw_text: &str,
    resolver: &dyn PrefixResolver,
    location: &Location,
    reporter: &mut Reporter,
) -> Option<XsdValue> {
    let normalized = stype.white_space.normalize(raw_text);
    let is_absent = WhiteSpace::Collapse.normalize(raw_text).is_empty();

    // Default/fixed substitution for empty content
    let mut substituted = false;
    let lexical = match field.and_then(|f| f.absent_value()) {
        Some(declared) if is_absent => {
            if stype.is_qname_governed() {
                reporter.report(
                    ValidationError::info(format!(
                        "default or fixed value for the QName-governed type {} is not \
                         applied outside its original namespace scope",
                        stype.display_name()
                    ))
                    .with_location(location.clone()),
                );
                return None;
            }
            substituted = true;
            WhiteSpace::Collapse.normalize(declared)
        }
        _ => normalized,
    };

    let value = validate_variety(stype, &lexical, resolver, location, reporter);

    // Fixed enforcement applies only to actual content; substituted content
    // is the fixed value already
    if let (Some(fixed), false) = (field.and_then(|f| f.fixed_value()), substituted) {
        if !is_absent {
            enforce_fixed(stype, &lexical, fixed, value.as_ref(), resolver, location, reporter);
        }
    }

    value
}

fn validate_variety(
    stype: &SimpleTypeDef,
    lexical: &str,
    resolver: &dyn PrefixResolver,
    location: &Location,
    reporter: &mut Reporter,
) -> Option<XsdValue> {
    match &stype.variety {
        Variety::Atomic(kind) => {
            let value = validate_builtin(*kind, lexical, resolver, reporter, location)?;
            stype.facets.validate_patterns(lexical, reporter, location);
            stype.facets.validate_enumeration(lexical, reporter, location);
            if stype.facets.has_length_facets() {
                stype.facets.validate_length(
                    lexical.chars().count(),
                    "characters",
                    reporter,
                    location,
                );
            }
            stype.facets.validate_range(&value, lexical, reporter, location);
            stype.facets.validate_digits(&value, reporter, location);
            Some(value)
        }

        Variety::List(item) => {
            let collapsed = WhiteSpace::Collapse.normalize(lexical);
            let items: Vec<&str> = collapsed.split_whitespace().collect();

            let mut item_failed = false;
            let mut values = Vec::with_capacity(items.len());
            for item_lexical in &items {
                let before = reporter.error_count();
                match validate_simple_value(item, None, item_lexical, resolver, location, reporter)
                {
                    Some(value) if reporter.error_count() == before => values.push(value),
                    _ => item_failed = true,
                }
            }

            // Length facets count items and apply even when an item failed
            stype
                .facets
                .validate_length(items.len(), "items", reporter, location);
            stype.facets.validate_patterns(&collapsed, reporter, location);
            if !item_failed {
                stype
                    .facets
                    .validate_enumeration(&collapsed, reporter, location);
            }

            if item_failed {
                None
            } else {
                Some(XsdValue::List(values))
            }
        }

        Variety::Union(members) => {
            for member in members {
                let before = reporter.error_count();
                reporter.suspend();
                let value =
                    validate_simple_value(member, None, lexical, resolver, location, reporter);
                reporter.resume();

                if reporter.error_count() == before {
                    if let Some(value) = value {
                        let collapsed = WhiteSpace::Collapse.normalize(lexical);
                        stype.facets.validate_patterns(&collapsed, reporter, location);
                        stype
                            .facets
                            .validate_enumeration(&collapsed, reporter, location);
                        return Some(value);
                    }
                }
            }

            reporter.report(
                ValidationError::new(format!(
                    "'{}' does not match any member of the union type {}",
                    WhiteSpace::Collapse.normalize(lexical),
                    stype.display_name()
                ))
                .with_location(location.clone()),
            );
            None
        }
    }
}

/// Check actual content against a fixed value constraint, comparing in the
/// value space when both sides have typed values and falling back to
/// collapsed lexical comparison otherwise
fn enforce_fixed(
    stype: &SimpleTypeDef,
    lexical: &str,
    fixed: &str,
    value: Option<&XsdValue>,
    resolver: &dyn PrefixResolver,
    location: &Location,
    reporter: &mut Reporter,
) {
    let fixed_lexical = stype.white_space.normalize(fixed);
    reporter.suspend();
    let fixed_value = validate_variety(stype, &fixed_lexical, resolver, location, reporter);
    reporter.resume();

    let equal = match (value, &fixed_value) {
        (Some(actual), Some(expected)) => actual.eq_value(expected),
        _ => {
            WhiteSpace::Collapse.normalize(lexical) == WhiteSpace::Collapse.normalize(fixed)
        }
    };

    if !equal {
        reporter.report(
            ValidationError::new(format!(
                "value does not equal the fixed value '{}'",
                fixed
            ))
            .with_location(location.clone()),
        );
    }
}
