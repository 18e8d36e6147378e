//! Record validation logic.
//!
//! Two passes over the fields in declaration order: first every required
//! field is checked for emptiness, then fields that are present are checked
//! against their format rule. A field reported missing is never also
//! reported malformed. Numeric zero is not empty; it fails the positivity
//! rule in the second pass. When size and both spacings are well formed, a
//! last check makes sure the tree density and count come out finite.

use std::collections::BTreeSet;

use bf_core::parse_decimal;
use serde::{Serialize, Serializer};

use crate::metrics::{DeriveError, stocking};
use crate::schema::{BlockRecord, FieldKind, FieldName, FieldValue, parse_planting_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    PositiveNumber,
    CalendarDate,
    ComputableRange,
}

impl FormatRule {
    fn complaint(self) -> &'static str {
        match self {
            FormatRule::PositiveNumber => "should be positive float!",
            FormatRule::CalendarDate => "should be formatted as DD/MM/YYYY!",
            FormatRule::ComputableRange => "is out of range for the tree density!",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{}", .field.missing_message())]
    MissingField { field: FieldName },

    #[error("{} {}", .field.label(), .rule.complaint())]
    InvalidFormat { field: FieldName, rule: FormatRule },
}

impl FieldError {
    pub fn field(&self) -> FieldName {
        match self {
            FieldError::MissingField { field } | FieldError::InvalidFormat { field, .. } => *field,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldError::MissingField { .. })
    }
}

// Rendered as the message text the form displays.
impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn is_empty_set<T>(set: &BTreeSet<T>) -> bool {
    set.is_empty()
}

pub fn is_unset<T>(value: &Option<T>) -> bool {
    value.is_none()
}

fn is_empty(value: FieldValue<'_>) -> bool {
    match value {
        FieldValue::Text(text) => is_blank(text),
        FieldValue::Crops(crops) => is_empty_set(crops),
        FieldValue::Choice(choice) => is_unset(&choice),
    }
}

/// Parse a numeric input and require it to be strictly positive.
pub fn positive_number(text: &str) -> Option<f64> {
    parse_decimal(text, "positive number")
        .ok()
        .filter(|value| *value > 0.0)
}

fn format_violation(field: FieldName, value: FieldValue<'_>) -> Option<FormatRule> {
    let FieldValue::Text(text) = value else {
        return None;
    };
    match field.kind() {
        FieldKind::Number if positive_number(text).is_none() => Some(FormatRule::PositiveNumber),
        FieldKind::Date if parse_planting_date(text).is_err() => Some(FormatRule::CalendarDate),
        _ => None,
    }
}

fn range_violation(record: &BlockRecord) -> Option<FieldError> {
    let size = positive_number(&record.size)?;
    let row_spacing = positive_number(&record.row_spacing)?;
    let tree_spacing = positive_number(&record.tree_spacing)?;
    match stocking(size, row_spacing, tree_spacing) {
        Err(DeriveError::Input { field, .. }) => Some(FieldError::InvalidFormat {
            field,
            rule: FormatRule::ComputableRange,
        }),
        _ => None,
    }
}

/// Evaluate every rule and collect the failures. An empty list means the
/// record can be submitted.
pub fn validate_record(record: &BlockRecord) -> Vec<FieldError> {
    let missing: Vec<FieldName> = FieldName::ALL
        .into_iter()
        .filter(|field| is_empty(record.value(*field)))
        .collect();

    let malformed = FieldName::ALL
        .into_iter()
        .filter(|field| !missing.contains(field))
        .filter_map(|field| {
            format_violation(field, record.value(field))
                .map(|rule| FieldError::InvalidFormat { field, rule })
        });

    missing
        .iter()
        .map(|field| FieldError::MissingField { field: *field })
        .chain(malformed)
        .chain(range_violation(record))
        .collect()
}
