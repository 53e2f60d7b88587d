//! User API types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::types::{default_length, default_page};
use crate::data::types::{FirstPlaceRow, UserRow};
use crate::domain::first_places::DiffMode;
use crate::domain::query::UserModeKey;

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub count: u64,
    pub users: Vec<UserRow>,
}

/// Stats snapshot lookup; `date` defaults to today
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    #[validate(length(min = 1, message = "server must not be empty"))]
    pub server: String,
    #[serde(alias = "user_id")]
    pub id: i64,
    pub mode: i64,
    pub relax: i64,
    pub date: Option<NaiveDate>,
}

impl StatsQuery {
    pub fn key(&self) -> UserModeKey {
        UserModeKey::new(self.server.as_str(), self.id, self.mode, self.relax)
    }
}

/// Dates with a recorded stats snapshot, oldest first
#[derive(Debug, Serialize, ToSchema)]
pub struct StatDatesResponse {
    pub total: u64,
    pub stats: Vec<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FirstPlacesQuery {
    #[validate(length(min = 1, message = "server must not be empty"))]
    pub server: String,
    #[serde(alias = "user_id")]
    pub id: i64,
    pub mode: i64,
    pub relax: i64,

    /// `all`, `new` or `lost`
    #[serde(rename = "type", default)]
    pub kind: DiffMode,

    /// Reference snapshot date; defaults to the latest
    pub date: Option<NaiveDate>,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be >= 1"))]
    pub page: u32,

    #[serde(default = "default_length")]
    #[validate(range(min = 1, message = "Length must be >= 1"))]
    pub length: u32,
}

impl FirstPlacesQuery {
    pub fn key(&self) -> UserModeKey {
        UserModeKey::new(self.server.as_str(), self.id, self.mode, self.relax)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FirstPlacesResponse {
    /// Snapshot the scores belong to; null when there is nothing to show
    pub date: Option<NaiveDate>,
    pub count: u64,
    pub scores: Vec<FirstPlaceRow>,
}
