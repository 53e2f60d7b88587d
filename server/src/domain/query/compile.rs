//! Predicate compilation
//!
//! Validates parsed clauses against an entity's field table and coerces raw
//! values into typed [`FieldValue`]s.

use std::fmt;

use chrono::NaiveDate;

use super::clause::{FilterClause, Operator, parse_filter_expression};
use super::error::QueryError;
use super::schema::{EntityFields, FieldDescriptor, FieldKind};
use crate::data::sql::{SqlDialect, SqlParams};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Typed filter value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    Boolean(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Float(_) => FieldKind::Float,
            Self::String(_) => FieldKind::String,
            Self::Date(_) => FieldKind::Date,
            Self::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Coerce a raw string into a value of `kind`. Returns `None` when the
    /// text is not a valid literal of that kind.
    pub fn parse(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Integer => raw.parse().ok().map(Self::Integer),
            FieldKind::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Float),
            FieldKind::String => Some(Self::String(raw.to_string())),
            FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(Self::Date),
            FieldKind::Boolean => parse_bool(raw).map(Self::Boolean),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            // Debug keeps the fractional part so 200.0 stays distinguishable from 200
            Self::Float(v) => write!(f, "{:?}", v),
            Self::String(v) => f.write_str(v),
            Self::Date(v) => write!(f, "{}", v.format(DATE_FORMAT)),
            Self::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

/// A clause that passed validation. The value's kind always equals the
/// field's kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    pub field: &'static FieldDescriptor,
    pub operator: Operator,
    pub value: FieldValue,
}

impl CompiledPredicate {
    /// Validate one clause: field lookup, operator legality, value coercion
    pub fn compile(clause: &FilterClause, fields: &EntityFields) -> Result<Self, QueryError> {
        let field = fields.require(&clause.field)?;

        if clause.operator.is_ordering() && !field.kind.is_orderable() {
            return Err(QueryError::InvalidOperator {
                field: field.name.to_string(),
                operator: clause.operator,
                kind: field.kind,
            });
        }

        let value = FieldValue::parse(field.kind, &clause.raw_value).ok_or_else(|| {
            QueryError::ValueParseError {
                field: field.name.to_string(),
                value: clause.raw_value.clone(),
                kind: field.kind,
            }
        })?;

        Ok(Self {
            field,
            operator: clause.operator,
            value,
        })
    }

    /// Predicate built directly from a typed value, used for route-fixed
    /// scope and internal lookups that never pass through the parser.
    pub fn new(field: &'static FieldDescriptor, operator: Operator, value: FieldValue) -> Self {
        Self {
            field,
            operator,
            value,
        }
    }

    /// Render as a SQL condition, pushing the value onto `params`
    pub fn to_sql(&self, params: &mut SqlParams, dialect: &dyn SqlDialect) -> String {
        let placeholder = params.push(self.value.clone(), dialect);
        format!(
            "{} {} {}",
            self.field.column,
            self.operator.sql(),
            placeholder
        )
    }

    /// Textual clause that compiles back into this predicate
    pub fn to_clause(&self) -> FilterClause {
        FilterClause::new(self.field.name, self.operator, self.value.to_string())
    }
}

impl fmt::Display for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field.name, self.operator, self.value)
    }
}

/// Validated sort directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static FieldDescriptor,
    pub descending: bool,
}

impl SortSpec {
    pub fn compile(name: &str, descending: bool, fields: &EntityFields) -> Result<Self, QueryError> {
        let field = fields.require(name.trim())?;
        if !field.sortable {
            return Err(QueryError::UnsortableField {
                field: field.name.to_string(),
            });
        }
        Ok(Self { field, descending })
    }
}

/// Parse and compile a whole filter expression. Fails on the first invalid
/// clause; no partial predicate list is ever returned.
pub fn compile_filters(
    expression: &str,
    fields: &EntityFields,
) -> Result<Vec<CompiledPredicate>, QueryError> {
    parse_filter_expression(expression)?
        .iter()
        .map(|clause| CompiledPredicate::compile(clause, fields))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::{PostgresDialect, SqliteDialect};
    use crate::domain::query::schema::{EntityKind, SchemaRegistry};

    fn fields(kind: EntityKind) -> &'static EntityFields {
        SchemaRegistry::global().entity(kind)
    }

    #[test]
    fn test_float_field_coerces_integer_literal() {
        let predicates = compile_filters("pp>=200", fields(EntityKind::Score)).unwrap();
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].operator, Operator::Gte);
        assert_eq!(predicates[0].value, FieldValue::Float(200.0));
        assert_eq!(predicates[0].to_string(), "pp >= 200.0");
    }

    #[test]
    fn test_string_equality_compiles() {
        let predicates = compile_filters("name=Foo", fields(EntityKind::Clan)).unwrap();
        assert_eq!(predicates[0].value, FieldValue::String("Foo".to_string()));
        assert_eq!(predicates[0].field.column, "name");
    }

    #[test]
    fn test_ordering_on_string_is_rejected() {
        let err = compile_filters("username>abc", fields(EntityKind::User)).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidOperator {
                field: "username".to_string(),
                operator: Operator::Gt,
                kind: FieldKind::String,
            }
        );
    }

    #[test]
    fn test_ordering_on_boolean_is_rejected() {
        let err = compile_filters("restricted<=1", fields(EntityKind::User)).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERATOR");
    }

    #[test]
    fn test_unknown_field() {
        let err = compile_filters("mode=0,nope=1", fields(EntityKind::Score)).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownField {
                field: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_value_parse_errors() {
        let scores = fields(EntityKind::Score);
        for expr in ["mode=zero", "pp>lots", "date<2024-13-01", "date=yesterday"] {
            let err = compile_filters(expr, scores).unwrap_err();
            assert_eq!(err.code(), "VALUE_PARSE_ERROR", "{}", expr);
        }
        let err = compile_filters("restricted=yes", fields(EntityKind::User)).unwrap_err();
        assert_eq!(err.code(), "VALUE_PARSE_ERROR");
    }

    #[test]
    fn test_boolean_literals() {
        let users = fields(EntityKind::User);
        for (raw, expected) in [
            ("TRUE", true),
            ("true", true),
            ("1", true),
            ("False", false),
            ("0", false),
        ] {
            let p = compile_filters(&format!("restricted={}", raw), users).unwrap();
            assert_eq!(p[0].value, FieldValue::Boolean(expected), "{}", raw);
        }
    }

    #[test]
    fn test_date_value() {
        let p = compile_filters("date>=2024-01-31", fields(EntityKind::Score)).unwrap();
        assert_eq!(
            p[0].value,
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
    }

    #[test]
    fn test_one_bad_clause_fails_whole_set() {
        let result = compile_filters("mode=0,relax=1,pp>=x", fields(EntityKind::Score));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_expression_compiles_to_nothing() {
        assert!(compile_filters("", fields(EntityKind::Score)).unwrap().is_empty());
    }

    #[test]
    fn test_display_parse_compile_round_trip() {
        let scores = fields(EntityKind::Score);
        for expr in ["pp>=200", "mode!=3", "date<2023-06-01", "rank=SH", "accuracy<=99.25"] {
            let original = &compile_filters(expr, scores).unwrap()[0];

            let reparsed = FilterClause::parse(&original.to_string()).unwrap();
            let recompiled = CompiledPredicate::compile(&reparsed, scores).unwrap();
            assert_eq!(&recompiled, original, "{}", expr);

            let via_clause = CompiledPredicate::compile(&original.to_clause(), scores).unwrap();
            assert_eq!(&via_clause, original, "{}", expr);
        }
    }

    #[test]
    fn test_to_sql_uses_column_and_dialect() {
        let p = &compile_filters("id=5,pp>1", fields(EntityKind::Score)).unwrap();

        let mut params = SqlParams::default();
        assert_eq!(p[0].to_sql(&mut params, &SqliteDialect), "score_id = ?");
        assert_eq!(p[1].to_sql(&mut params, &SqliteDialect), "pp > ?");
        assert_eq!(params.values, vec![FieldValue::Integer(5), FieldValue::Float(1.0)]);

        let mut params = SqlParams::default();
        assert_eq!(p[0].to_sql(&mut params, &PostgresDialect), "score_id = $1");
        assert_eq!(p[1].to_sql(&mut params, &PostgresDialect), "pp > $2");
    }

    #[test]
    fn test_not_equal_renders_sql_operator() {
        let p = &compile_filters("mode!=0", fields(EntityKind::Score)).unwrap()[0];
        let mut params = SqlParams::default();
        assert_eq!(p.to_sql(&mut params, &SqliteDialect), "mode <> ?");
    }

    #[test]
    fn test_sort_spec() {
        let scores = fields(EntityKind::Score);
        let sort = SortSpec::compile("pp", true, scores).unwrap();
        assert_eq!(sort.field.column, "pp");
        assert!(sort.descending);

        assert_eq!(
            SortSpec::compile("mods", false, scores).unwrap_err(),
            QueryError::UnsortableField {
                field: "mods".to_string()
            }
        );
        assert_eq!(
            SortSpec::compile("bogus", false, scores).unwrap_err().code(),
            "UNKNOWN_FIELD"
        );
    }
}
