//! Per-relation-kind predicate evaluation.
//!
//! Every predicate judges `asserted op member` for one resolved member
//! value. The caller applies existential semantics over a member's value
//! set: one satisfying value is enough.

use crate::error::{Result, ValidationError};
use crate::geometry;
use crate::relation::RelationKind;
use crate::temporal::parse_temporal;
use crate::term::Term;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The family of relations a validation run checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationCategory {
    Temporal,
    Lexical,
    Geospatial,
}

impl RelationCategory {
    /// The closed kind set this category evaluates. A relation of any
    /// other kind encountered during a run of this category is a fatal
    /// configuration error.
    pub fn allows(&self, kind: RelationKind) -> bool {
        match self {
            RelationCategory::Temporal => matches!(
                kind,
                RelationKind::EqualTo
                    | RelationKind::GreaterThan
                    | RelationKind::GreaterThanOrEqual
                    | RelationKind::LessThan
                    | RelationKind::LessThanOrEqual
            ),
            RelationCategory::Lexical => matches!(
                kind,
                RelationKind::EqualTo
                    | RelationKind::GreaterThan
                    | RelationKind::GreaterThanOrEqual
                    | RelationKind::LessThan
                    | RelationKind::LessThanOrEqual
                    | RelationKind::Prefix
                    | RelationKind::Suffix
                    | RelationKind::Substring
            ),
            RelationCategory::Geospatial => matches!(kind, RelationKind::GeospatiallyContains),
        }
    }
}

impl FromStr for RelationCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "temporal" | "time" | "timestamp" => Ok(RelationCategory::Temporal),
            "lexical" | "string" => Ok(RelationCategory::Lexical),
            "geospatial" | "geo" => Ok(RelationCategory::Geospatial),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for RelationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationCategory::Temporal => write!(f, "temporal"),
            RelationCategory::Lexical => write!(f, "lexical"),
            RelationCategory::Geospatial => write!(f, "geospatial"),
        }
    }
}

fn ordering_satisfies(kind: RelationKind, ordering: Option<Ordering>) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match kind {
        RelationKind::EqualTo => ordering == Ordering::Equal,
        RelationKind::GreaterThan => ordering == Ordering::Greater,
        RelationKind::GreaterThanOrEqual => ordering != Ordering::Less,
        RelationKind::LessThan => ordering == Ordering::Less,
        RelationKind::LessThanOrEqual => ordering != Ordering::Greater,
        _ => false,
    }
}

/// Decide whether one member value satisfies the asserted condition.
pub fn evaluate(
    category: RelationCategory,
    kind: RelationKind,
    asserted: &Term,
    member_value: &Term,
) -> Result<bool> {
    match category {
        RelationCategory::Temporal => {
            let asserted = parse_temporal(asserted)?;
            let member = parse_temporal(member_value)?;
            Ok(ordering_satisfies(kind, asserted.partial_cmp(&member)))
        }
        RelationCategory::Lexical => {
            let asserted = asserted.lexical_form();
            let member = member_value.lexical_form();
            Ok(match kind {
                RelationKind::Prefix => member.starts_with(asserted),
                RelationKind::Suffix => member.ends_with(asserted),
                RelationKind::Substring => member.contains(asserted),
                ordered => ordering_satisfies(ordered, Some(asserted.cmp(member))),
            })
        }
        RelationCategory::Geospatial => {
            let outer = geometry::parse_geometry(asserted.lexical_form())?;
            let inner = geometry::parse_geometry(member_value.lexical_form())?;
            Ok(geometry::geometry_contains(&outer, &inner))
        }
    }
}
