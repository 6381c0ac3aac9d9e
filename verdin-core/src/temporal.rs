//! Typed temporal literals.
//!
//! The datatype tag on the literal selects the parse format. An
//! unrecognized (or absent) tag on a value used in a temporal comparison
//! is a fatal error, never a silent skip.

use crate::error::{Result, ValidationError};
use crate::term::Term;
use crate::vocab::xsd;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemporalValue {
    Time(NaiveTime),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl TemporalValue {
    /// Ordering is only defined between values of the same variant.
    /// Comparing a date against a time yields `None`, which a predicate
    /// treats as unsatisfied.
    pub fn partial_cmp(&self, other: &TemporalValue) -> Option<Ordering> {
        match (self, other) {
            (TemporalValue::Time(a), TemporalValue::Time(b)) => Some(a.cmp(b)),
            (TemporalValue::Date(a), TemporalValue::Date(b)) => Some(a.cmp(b)),
            (TemporalValue::DateTime(a), TemporalValue::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

fn parse_time(lexical: &str) -> Result<NaiveTime> {
    // xsd:time allows a trailing zone offset; chrono's NaiveTime does
    // not carry one, so a trailing Z / +hh:mm is stripped first.
    let trimmed = lexical
        .strip_suffix('Z')
        .map(str::to_string)
        .unwrap_or_else(|| {
            if let Some(idx) = lexical.rfind(['+', '-'])
                && idx >= 8
            {
                lexical[..idx].to_string()
            } else {
                lexical.to_string()
            }
        });
    NaiveTime::parse_from_str(&trimmed, "%H:%M:%S%.f")
        .map_err(|_| ValidationError::UnknownDatatype(format!("invalid xsd:time value [{lexical}]")))
}

/// Parse a temporal value from a typed literal term.
pub fn parse_temporal(term: &Term) -> Result<TemporalValue> {
    let Some(lit) = term.as_literal() else {
        return Err(ValidationError::UnknownDatatype(term.to_string()));
    };
    match lit.datatype.as_deref() {
        Some(xsd::TIME) => Ok(TemporalValue::Time(parse_time(&lit.lexical)?)),
        Some(xsd::DATE) => NaiveDate::parse_from_str(&lit.lexical, "%Y-%m-%d")
            .map(TemporalValue::Date)
            .map_err(|_| {
                ValidationError::UnknownDatatype(format!(
                    "invalid xsd:date value [{}]",
                    lit.lexical
                ))
            }),
        Some(xsd::DATE_TIME) | Some(xsd::DATE_TIME_STAMP) => {
            DateTime::parse_from_rfc3339(&lit.lexical)
                .map(TemporalValue::DateTime)
                .map_err(|_| {
                    ValidationError::UnknownDatatype(format!(
                        "invalid xsd:dateTime value [{}]",
                        lit.lexical
                    ))
                })
        }
        Some(other) => Err(ValidationError::UnknownDatatype(other.to_string())),
        None => Err(ValidationError::UnknownDatatype(format!(
            "untyped literal [{}]",
            lit.lexical
        ))),
    }
}
