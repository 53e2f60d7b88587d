use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use super::builder::EntityQuery;
use super::error::QueryError;
use super::schema::EntityKind;

/// Identifies one user's play on one server, mode and relax variant.
/// Stats, first places and pack completion are all scoped by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct UserModeKey {
    #[validate(length(min = 1, message = "server must not be empty"))]
    pub server: String,
    #[serde(alias = "user_id")]
    pub id: i64,
    pub mode: i64,
    pub relax: i64,
}

impl UserModeKey {
    pub fn new(server: impl Into<String>, id: i64, mode: i64, relax: i64) -> Self {
        Self {
            server: server.into(),
            id,
            mode,
            relax,
        }
    }

    /// Query over `kind` restricted to this key
    pub fn query(&self, kind: EntityKind) -> Result<EntityQuery, QueryError> {
        EntityQuery::new(kind)
            .with_scope("server", self.server.as_str())?
            .with_scope("user_id", self.id)?
            .with_scope("mode", self.mode)?
            .with_scope("relax", self.relax)
    }
}
