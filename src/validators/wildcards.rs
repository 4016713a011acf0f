//! Wildcard particles
//!
//! Namespace constraints and process-contents modes shared by element
//! wildcards (xs:any) and attribute wildcards (xs:anyAttribute).
//!
//! Reference: https://www.w3.org/TR/xmlschema-1/#Wildcards

use std::collections::HashSet;

/// Process contents mode for wildcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessContents {
    /// Validate strictly - a global declaration must be resolvable
    #[default]
    Strict,
    /// Validate if a declaration is found, otherwise accept
    Lax,
    /// Skip validation entirely
    Skip,
}

impl ProcessContents {
    /// Parse from the `processContents` attribute value
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strict" => Some(Self::Strict),
            "lax" => Some(Self::Lax),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProcessContents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lax => write!(f, "lax"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Namespace constraint for wildcards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceConstraint {
    /// Any namespace is allowed (##any)
    #[default]
    Any,
    /// Any namespace except the target namespace and no-namespace (##other)
    Other {
        /// The target namespace to exclude
        target_namespace: Option<String>,
    },
    /// Specific set of allowed namespaces; the empty string stands for
    /// no-namespace (##local)
    Enumeration(HashSet<String>),
}

impl NamespaceConstraint {
    /// Constraint listing exactly the given namespace URIs
    pub fn of<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enumeration(namespaces.into_iter().map(Into::into).collect())
    }

    /// Check if a namespace (empty string for no-namespace) is allowed
    pub fn allows(&self, namespace: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Other { target_namespace } => {
                if namespace.is_empty() {
                    return false;
                }
                match target_namespace {
                    Some(tns) => namespace != tns,
                    None => true,
                }
            }
            Self::Enumeration(set) => set.contains(namespace),
        }
    }
}
