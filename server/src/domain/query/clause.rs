//! Filter expression parsing
//!
//! Turns `"pp>=200,mode=0"` into an ordered list of [`FilterClause`]s.
//! Parsing is purely syntactic; field names and values are checked later
//! against the entity schema by the compiler.

use std::fmt;

use super::error::QueryError;

/// Maximum number of clauses accepted in one filter expression
pub const MAX_FILTER_CLAUSES: usize = 50;

/// Comparison operator of a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    /// Tokens in match priority order. Two-character operators come before
    /// their one-character prefixes so `>=` never splits into `>` and `=`.
    const TOKENS: [(&'static str, Operator); 6] = [
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        ("!=", Operator::Ne),
        ("=", Operator::Eq),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ];

    /// Textual token as written in a filter expression
    pub fn token(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// SQL comparison operator
    pub fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    /// Returns `true` for `>`, `>=`, `<`, `<=`
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Gte | Self::Lt | Self::Lte)
    }

    /// Longest operator token at the start of `s`, if any
    fn match_prefix(s: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(token, _)| s.starts_with(token))
            .map(|(_, op)| *op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One `field operator value` unit of a filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub operator: Operator,
    pub raw_value: String,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: Operator, raw_value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            raw_value: raw_value.into(),
        }
    }

    /// Parse a single clause such as `"pp >= 200"`.
    ///
    /// The clause is split at the first operator occurrence. A value that
    /// itself contains an operator token is ambiguous and rejected.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let clause = raw.trim();

        let (position, operator) =
            find_operator(clause).ok_or_else(|| QueryError::malformed(clause, "missing operator"))?;

        let field = clause[..position].trim();
        if field.is_empty() {
            return Err(QueryError::malformed(clause, "missing field name"));
        }

        let value = clause[position + operator.token().len()..].trim();
        if find_operator(value).is_some() {
            return Err(QueryError::malformed(
                clause,
                "value contains more than one operator",
            ));
        }

        Ok(Self::new(field, operator, value))
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.operator, self.raw_value)
    }
}

/// Parse a comma-separated filter expression.
///
/// A blank expression yields no clauses. Clause order is preserved so the
/// first failing clause is always the one reported.
pub fn parse_filter_expression(expression: &str) -> Result<Vec<FilterClause>, QueryError> {
    if expression.trim().is_empty() {
        return Ok(Vec::new());
    }

    let segments: Vec<&str> = expression.split(',').collect();
    if segments.len() > MAX_FILTER_CLAUSES {
        return Err(QueryError::TooManyClauses {
            limit: MAX_FILTER_CLAUSES,
        });
    }

    segments.into_iter().map(FilterClause::parse).collect()
}

fn find_operator(s: &str) -> Option<(usize, Operator)> {
    s.char_indices()
        .find_map(|(i, _)| Operator::match_prefix(&s[i..]).map(|op| (i, op)))
}
