//! Constraining facets
//!
//! Whitespace normalization plus the facet checks applied after a lexical
//! form passes its builtin validation: pattern, length, enumeration, range
//! bounds and digit counts. Facets report diagnostics through the shared
//! [`Reporter`] and never abort validation.

use crate::error::{Reporter, Result, ValidationError};
use crate::locations::Location;
use regex::Regex;

use super::builtins::XsdValue;

/// Whitespace handling applied before any other processing of a lexical form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteSpace {
    /// Keep the text as delivered
    Preserve,
    /// Replace tab, newline and carriage return with spaces
    Replace,
    /// Replace, then trim and squeeze runs of spaces to one
    Collapse,
}

impl WhiteSpace {
    /// Apply this normalization to a lexical form
    pub fn normalize(&self, text: &str) -> String {
        match self {
            WhiteSpace::Preserve => text.to_string(),
            WhiteSpace::Replace => text
                .chars()
                .map(|c| if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c })
                .collect(),
            WhiteSpace::Collapse => text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

/// A compiled pattern facet; the expression is implicitly anchored
#[derive(Debug, Clone)]
pub struct PatternFacet {
    /// Pattern source as written in the schema
    pub source: String,
    regex: Regex,
}

impl PatternFacet {
    /// Compile a pattern facet
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!("^(?:{})$", pattern);
        let regex = Regex::new(&anchored)
            .map_err(|e| crate::error::Error::Value(format!("invalid pattern '{}': {}", pattern, e)))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Check a lexical form against the pattern
    pub fn matches(&self, lexical: &str) -> bool {
        self.regex.is_match(lexical)
    }
}

/// The constraining facets of one simple type definition
#[derive(Debug, Clone, Default)]
pub struct FacetSet {
    /// Exact length (characters, or items for list types)
    pub length: Option<usize>,
    /// Minimum length
    pub min_length: Option<usize>,
    /// Maximum length
    pub max_length: Option<usize>,
    /// Patterns; a lexical must match every one
    pub patterns: Vec<PatternFacet>,
    /// Admitted lexical values
    pub enumeration: Option<Vec<String>>,
    /// Inclusive lower bound
    pub min_inclusive: Option<XsdValue>,
    /// Exclusive lower bound
    pub min_exclusive: Option<XsdValue>,
    /// Inclusive upper bound
    pub max_inclusive: Option<XsdValue>,
    /// Exclusive upper bound
    pub max_exclusive: Option<XsdValue>,
    /// Maximum count of significant decimal digits
    pub total_digits: Option<u32>,
    /// Maximum count of fraction digits
    pub fraction_digits: Option<u32>,
}

impl FacetSet {
    /// Empty facet set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any length facet is present
    pub fn has_length_facets(&self) -> bool {
        self.length.is_some() || self.min_length.is_some() || self.max_length.is_some()
    }

    /// Set the exact length
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the minimum length
    pub fn with_min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    /// Set the maximum length
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    /// Add a pattern facet
    pub fn with_pattern(mut self, pattern: PatternFacet) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Set the enumeration facet
    pub fn with_enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the inclusive lower bound
    pub fn with_min_inclusive(mut self, bound: XsdValue) -> Self {
        self.min_inclusive = Some(bound);
        self
    }

    /// Set the exclusive lower bound
    pub fn with_min_exclusive(mut self, bound: XsdValue) -> Self {
        self.min_exclusive = Some(bound);
        self
    }

    /// Set the inclusive upper bound
    pub fn with_max_inclusive(mut self, bound: XsdValue) -> Self {
        self.max_inclusive = Some(bound);
        self
    }

    /// Set the exclusive upper bound
    pub fn with_max_exclusive(mut self, bound: XsdValue) -> Self {
        self.max_exclusive = Some(bound);
        self
    }

    /// Set the totalDigits facet
    pub fn with_total_digits(mut self, digits: u32) -> Self {
        self.total_digits = Some(digits);
        self
    }

    /// Set the fractionDigits facet
    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = Some(digits);
        self
    }

    /// Check the length facets against a unit count (characters for atomic
    /// string-like types, items for lists)
    pub fn validate_length(
        &self,
        count: usize,
        unit: &str,
        reporter: &mut Reporter,
        location: &Location,
    ) {
        if let Some(length) = self.length {
            if count != length {
                reporter.report(
                    ValidationError::new(format!(
                        "length of {} {} violates the length facet ({})",
                        count, unit, length
                    ))
                    .with_location(location.clone()),
                );
            }
        }
        if let Some(min) = self.min_length {
            if count < min {
                reporter.report(
                    ValidationError::new(format!(
                        "length of {} {} violates the minLength facet ({})",
                        count, unit, min
                    ))
                    .with_location(location.clone()),
                );
            }
        }
        if let Some(max) = self.max_length {
            if count > max {
                reporter.report(
                    ValidationError::new(format!(
                        "length of {} {} violates the maxLength facet ({})",
                        count, unit, max
                    ))
                    .with_location(location.clone()),
                );
            }
        }
    }

    /// Check every pattern facet against a lexical form
    pub fn validate_patterns(&self, lexical: &str, reporter: &mut Reporter, location: &Location) {
        for pattern in &self.patterns {
            if !pattern.matches(lexical) {
                reporter.report(
                    ValidationError::new(format!(
                        "'{}' does not match the pattern '{}'",
                        lexical, pattern.source
                    ))
                    .with_location(location.clone()),
                );
            }
        }
    }

    /// Check the enumeration facet against a lexical form
    pub fn validate_enumeration(
        &self,
        lexical: &str,
        reporter: &mut Reporter,
        location: &Location,
    ) {
        if let Some(admitted) = &self.enumeration {
            if !admitted.iter().any(|value| value == lexical) {
                reporter.report(
                    ValidationError::new(format!(
                        "'{}' is not among the enumerated values [{}]",
                        lexical,
                        admitted.join(", ")
                    ))
                    .with_location(location.clone()),
                );
            }
        }
    }

    /// Check the range bound facets against a typed value. Incomparable
    /// pairs pass; the bound simply does not constrain them.
    pub fn validate_range(
        &self,
        value: &XsdValue,
        lexical: &str,
        reporter: &mut Reporter,
        location: &Location,
    ) {
        use std::cmp::Ordering;

        let mut fail = |facet: &str, reporter: &mut Reporter| {
            reporter.report(
                ValidationError::new(format!("'{}' violates the {} facet", lexical, facet))
                    .with_location(location.clone()),
            );
        };

        if let Some(bound) = &self.min_inclusive {
            if value.compare(bound) == Some(Ordering::Less) {
                fail("minInclusive", reporter);
            }
        }
        if let Some(bound) = &self.min_exclusive {
            if matches!(
                value.compare(bound),
                Some(Ordering::Less) | Some(Ordering::Equal)
            ) {
                fail("minExclusive", reporter);
            }
        }
        if let Some(bound) = &self.max_inclusive {
            if value.compare(bound) == Some(Ordering::Greater) {
                fail("maxInclusive", reporter);
            }
        }
        if let Some(bound) = &self.max_exclusive {
            if matches!(
                value.compare(bound),
                Some(Ordering::Greater) | Some(Ordering::Equal)
            ) {
                fail("maxExclusive", reporter);
            }
        }
    }

    /// Check totalDigits/fractionDigits against a decimal value
    pub fn validate_digits(&self, value: &XsdValue, reporter: &mut Reporter, location: &Location) {
        let decimal = match value {
            XsdValue::Decimal(d) => d,
            _ => return,
        };

        if let Some(max) = self.total_digits {
            let digits = decimal
                .abs()
                .normalize()
                .to_string()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .count() as u32;
            if digits > max {
                reporter.report(
                    ValidationError::new(format!(
                        "'{}' has more than {} total digits",
                        decimal, max
                    ))
                    .with_location(location.clone()),
                );
            }
        }
        if let Some(max) = self.fraction_digits {
            if decimal.normalize().scale() > max {
                reporter.report(
                    ValidationError::new(format!(
                        "'{}' has more than {} fraction digits",
                        decimal, max
                    ))
                    .with_location(location.clone()),
                );
            }
        }
    }
}
