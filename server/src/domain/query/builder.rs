//! Immutable entity query
//!
//! An [`EntityQuery`] collects scope predicates, user filters, a sort and a
//! page window. Every builder step consumes the query and returns a new one.
//! Rendering produces two independent statements: a count over the filtered
//! set and a windowed select.

use super::clause::Operator;
use super::compile::{CompiledPredicate, FieldValue, SortSpec, compile_filters};
use super::error::QueryError;
use super::page::PageRequest;
use super::schema::{EntityFields, EntityKind, SchemaRegistry};
use crate::data::sql::{SqlDialect, SqlParams, SqlStatement};

#[derive(Debug, Clone)]
pub struct EntityQuery {
    fields: &'static EntityFields,
    predicates: Vec<CompiledPredicate>,
    sort: Option<SortSpec>,
    page: Option<PageRequest>,
}

impl EntityQuery {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            fields: SchemaRegistry::global().entity(kind),
            predicates: Vec::new(),
            sort: None,
            page: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.fields.schema().kind
    }

    pub fn predicates(&self) -> &[CompiledPredicate] {
        &self.predicates
    }

    pub fn page(&self) -> Option<PageRequest> {
        self.page
    }

    /// Add a route-fixed equality predicate on a registered field
    pub fn with_scope(self, field: &str, value: impl Into<FieldValue>) -> Result<Self, QueryError> {
        self.with_predicate(field, Operator::Eq, value)
    }

    /// Add a typed predicate on a registered field.
    ///
    /// Applies the same operator and kind checks as a compiled filter clause.
    pub fn with_predicate(
        mut self,
        field: &str,
        operator: Operator,
        value: impl Into<FieldValue>,
    ) -> Result<Self, QueryError> {
        let field = self.fields.require(field)?;
        if operator.is_ordering() && !field.kind.is_orderable() {
            return Err(QueryError::InvalidOperator {
                field: field.name.to_string(),
                operator,
                kind: field.kind,
            });
        }
        let value = value.into();
        if value.kind() != field.kind {
            return Err(QueryError::ValueParseError {
                field: field.name.to_string(),
                value: value.to_string(),
                kind: field.kind,
            });
        }
        self.predicates
            .push(CompiledPredicate::new(field, operator, value));
        Ok(self)
    }

    /// Compile a user filter expression and AND it with existing predicates
    pub fn with_filter(self, expression: &str) -> Result<Self, QueryError> {
        let predicates = compile_filters(expression, self.fields)?;
        Ok(self.with_predicates(predicates))
    }

    pub fn with_predicates(mut self, predicates: Vec<CompiledPredicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    /// Sort by a named field. `None` keeps the entity default ordering.
    pub fn sorted_by(mut self, field: Option<&str>, descending: bool) -> Result<Self, QueryError> {
        self.sort = field
            .filter(|name| !name.trim().is_empty())
            .map(|name| SortSpec::compile(name, descending, self.fields))
            .transpose()?;
        Ok(self)
    }

    /// Window the result. The length is clamped to the entity's cap.
    pub fn paged(mut self, page: PageRequest) -> Self {
        self.page = Some(page.clamp(self.fields.schema().max_page_length));
        self
    }

    /// Window holding at most one row
    pub fn single(mut self) -> Self {
        self.page = Some(PageRequest::single());
        self
    }

    fn where_clause(&self, params: &mut SqlParams, dialect: &dyn SqlDialect) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .predicates
            .iter()
            .map(|p| p.to_sql(params, dialect))
            .collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }

    fn order_clause(&self) -> String {
        let schema = self.fields.schema();
        let mut terms: Vec<String> = Vec::new();
        let mut used: Vec<&str> = Vec::new();

        let mut push = |column: &'static str, descending: bool| {
            if !used.contains(&column) {
                used.push(column);
                terms.push(format!(
                    "{} {}",
                    column,
                    if descending { "DESC" } else { "ASC" }
                ));
            }
        };

        match self.sort {
            Some(sort) => push(sort.field.column, sort.descending),
            None => {
                for term in schema.default_order {
                    push(term.column, term.descending);
                }
            }
        }
        for column in schema.primary_key {
            push(column, false);
        }

        format!(" ORDER BY {}", terms.join(", "))
    }

    /// `SELECT COUNT(*)` over the filtered set, ignoring sort and window
    pub fn count_statement(&self, dialect: &dyn SqlDialect) -> SqlStatement {
        let mut params = SqlParams::default();
        let where_clause = self.where_clause(&mut params, dialect);
        SqlStatement {
            sql: format!(
                "SELECT COUNT(*) FROM {}{}",
                self.fields.schema().table,
                where_clause
            ),
            params,
        }
    }

    /// Ordered, windowed select
    pub fn select_statement(&self, dialect: &dyn SqlDialect) -> SqlStatement {
        let mut params = SqlParams::default();
        let where_clause = self.where_clause(&mut params, dialect);
        let mut sql = format!(
            "SELECT * FROM {}{}{}",
            self.fields.schema().table,
            where_clause,
            self.order_clause()
        );
        if let Some(page) = self.page {
            sql.push(' ');
            sql.push_str(&dialect.limit_offset(page.length, page.offset()));
        }
        SqlStatement { sql, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sql::{PostgresDialect, SqliteDialect};

    fn leaderboard() -> EntityQuery {
        EntityQuery::new(EntityKind::Leaderboard)
            .with_scope("server", "akatsuki")
            .unwrap()
            .with_scope("mode", 0i64)
            .unwrap()
            .with_scope("relax", 1i64)
            .unwrap()
            .with_scope("leaderboard_type", "pp")
            .unwrap()
    }

    #[test]
    fn test_scope_and_filters_are_one_conjunction() {
        let query = leaderboard().with_filter("pp>=5000,country=us").unwrap();
        let stmt = query.count_statement(&SqliteDialect);
        assert_eq!(
            stmt.sql,
            "SELECT COUNT(*) FROM leaderboard WHERE server = ? AND mode = ? AND relax = ? \
             AND leaderboard_type = ? AND pp >= ? AND country = ?"
        );
        assert_eq!(stmt.params.values.len(), 6);
        assert_eq!(stmt.params.values[4], FieldValue::Float(5000.0));
    }

    #[test]
    fn test_default_order_then_primary_key() {
        let stmt = leaderboard()
            .paged(PageRequest::new(2, 50))
            .select_statement(&SqliteDialect);
        assert!(stmt.sql.ends_with(
            " ORDER BY global_rank ASC, server ASC, user_id ASC, mode ASC, relax ASC, \
             leaderboard_type ASC LIMIT 50 OFFSET 50"
        ));
    }

    #[test]
    fn test_explicit_sort_replaces_default() {
        let stmt = leaderboard()
            .sorted_by(Some("pp"), true)
            .unwrap()
            .select_statement(&SqliteDialect);
        assert!(stmt.sql.contains(" ORDER BY pp DESC, server ASC"));
        assert!(!stmt.sql.contains("global_rank"));
        assert!(!stmt.sql.contains("LIMIT"));
    }

    #[test]
    fn test_sort_on_primary_key_is_not_repeated() {
        let stmt = EntityQuery::new(EntityKind::Beatmap)
            .sorted_by(Some("id"), true)
            .unwrap()
            .select_statement(&SqliteDialect);
        assert_eq!(
            stmt.sql,
            "SELECT * FROM beatmaps ORDER BY beatmap_id DESC"
        );
    }

    #[test]
    fn test_blank_sort_keeps_default() {
        let query = EntityQuery::new(EntityKind::User)
            .sorted_by(Some("  "), false)
            .unwrap();
        assert!(query.sort.is_none());
    }

    #[test]
    fn test_length_is_clamped_to_entity_cap() {
        let users = EntityQuery::new(EntityKind::User).paged(PageRequest::new(1, 5000));
        assert_eq!(users.page().unwrap().length, 100);

        let scores = EntityQuery::new(EntityKind::Score).paged(PageRequest::new(1, 5000));
        assert_eq!(scores.page().unwrap().length, 1000);
    }

    #[test]
    fn test_postgres_placeholders_are_numbered() {
        let stmt = EntityQuery::new(EntityKind::Score)
            .with_filter("mode=0,pp>100")
            .unwrap()
            .select_statement(&PostgresDialect);
        assert!(stmt.sql.contains("WHERE mode = $1 AND pp > $2"));
    }

    #[test]
    fn test_scope_kind_mismatch_is_rejected() {
        let err = EntityQuery::new(EntityKind::Score)
            .with_scope("mode", "osu")
            .unwrap_err();
        assert_eq!(err.code(), "VALUE_PARSE_ERROR");
    }

    #[test]
    fn test_builder_steps_do_not_touch_original() {
        let base = EntityQuery::new(EntityKind::Score).with_filter("mode=0").unwrap();
        let narrowed = base.clone().with_filter("pp>100").unwrap();
        assert_eq!(base.predicates().len(), 1);
        assert_eq!(narrowed.predicates().len(), 2);
    }

    #[test]
    fn test_unfiltered_count_has_no_where() {
        let stmt = EntityQuery::new(EntityKind::Clan).count_statement(&SqliteDialect);
        assert_eq!(stmt.sql, "SELECT COUNT(*) FROM clans");
        assert!(stmt.params.values.is_empty());
    }

    #[test]
    fn test_typed_predicate_skips_parser() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let query = EntityQuery::new(EntityKind::FirstPlace)
            .with_predicate("date", Operator::Lt, date)
            .unwrap();
        let stmt = query.count_statement(&SqliteDialect);
        assert_eq!(stmt.sql, "SELECT COUNT(*) FROM first_places WHERE date < ?");
        assert_eq!(stmt.params.values[0], FieldValue::Date(date));
    }

    #[test]
    fn test_typed_predicate_checks_operator() {
        let err = EntityQuery::new(EntityKind::User)
            .with_predicate("username", Operator::Gt, "alpha")
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_OPERATOR");
    }
}
