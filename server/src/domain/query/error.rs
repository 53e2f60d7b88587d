//! Filter compilation errors
//!
//! Every variant is a client error detected before the store is touched.

use thiserror::Error;

use super::clause::Operator;
use super::schema::FieldKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Malformed filter clause '{clause}': {reason}")]
    MalformedClause { clause: String, reason: &'static str },

    #[error("Too many filter clauses (maximum {limit})")]
    TooManyClauses { limit: usize },

    #[error("Unknown field '{field}'")]
    UnknownField { field: String },

    #[error("Operator '{operator}' cannot be applied to {kind} field '{field}'")]
    InvalidOperator {
        field: String,
        operator: Operator,
        kind: FieldKind,
    },

    #[error("Cannot parse '{value}' as {kind} for field '{field}'")]
    ValueParseError {
        field: String,
        value: String,
        kind: FieldKind,
    },

    #[error("Field '{field}' is not sortable")]
    UnsortableField { field: String },
}

impl QueryError {
    pub(crate) fn malformed(clause: &str, reason: &'static str) -> Self {
        Self::MalformedClause {
            clause: clause.to_string(),
            reason,
        }
    }

    /// Stable machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedClause { .. } => "MALFORMED_CLAUSE",
            Self::TooManyClauses { .. } => "TOO_MANY_CLAUSES",
            Self::UnknownField { .. } => "UNKNOWN_FIELD",
            Self::InvalidOperator { .. } => "INVALID_OPERATOR",
            Self::ValueParseError { .. } => "VALUE_PARSE_ERROR",
            Self::UnsortableField { .. } => "UNSORTABLE_FIELD",
        }
    }
}
