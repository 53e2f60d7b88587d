//! Shared API types
//!
//! Error rendering and the list parameters every search endpoint accepts.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::core::constants::{DEFAULT_PAGE_LENGTH, NOT_FOUND_MESSAGE};
use crate::data::DataError;
use crate::domain::first_places::SnapshotError;
use crate::domain::query::{EntityKind, EntityQuery, PageRequest, QueryError};

/// Default page number
pub const DEFAULT_PAGE: u32 = 1;

pub fn default_page() -> u32 {
    DEFAULT_PAGE
}

pub fn default_length() -> u32 {
    DEFAULT_PAGE_LENGTH
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Lookup miss
    pub fn not_found() -> Self {
        Self::NotFound {
            code: "NOT_FOUND".to_string(),
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        tracing::error!(
            error = %e,
            backend = e.backend(),
            transient = e.is_transient(),
            "Data error"
        );
        Self::Internal {
            message: "Database operation failed".to_string(),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        Self::bad_request(e.code(), e.to_string())
    }
}

impl From<SnapshotError> for ApiError {
    fn from(e: SnapshotError) -> Self {
        match e {
            SnapshotError::Query(e) => e.into(),
            SnapshotError::Data(e) => Self::from_data(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Filter, sort and window parameters of a search endpoint
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Comma-separated filter, e.g. `pp>=200,mode=0`
    #[serde(default)]
    pub query: String,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be >= 1"))]
    pub page: u32,

    /// Clamped to the endpoint's maximum
    #[serde(default = "default_length")]
    #[validate(range(min = 1, message = "Length must be >= 1"))]
    pub length: u32,

    /// Field to sort by
    pub sort: Option<String>,

    /// Sort descending
    pub desc: Option<bool>,
}

impl ListParams {
    /// Apply filter, sort and window onto a (possibly pre-scoped) query
    pub fn apply(&self, query: EntityQuery, default_desc: bool) -> Result<EntityQuery, QueryError> {
        Ok(query
            .with_filter(&self.query)?
            .sorted_by(self.sort.as_deref(), self.desc.unwrap_or(default_desc))?
            .paged(PageRequest::new(self.page, self.length)))
    }
}

/// Server-scoped primary key lookup
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    #[validate(length(min = 1, message = "server must not be empty"))]
    pub server: String,
    pub id: i64,
}

impl LookupParams {
    /// Single-row query on `server` and `id`
    pub fn query(&self, kind: EntityKind) -> Result<EntityQuery, QueryError> {
        Ok(EntityQuery::new(kind)
            .with_scope("server", self.server.as_str())?
            .with_scope("id", self.id)?
            .single())
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE,
            length: DEFAULT_PAGE_LENGTH,
            sort: None,
            desc: None,
        }
    }
}
