//! Beatmap API types

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::{BeatmapRow, BeatmapsetRow};

#[derive(Debug, Serialize, ToSchema)]
pub struct BeatmapListResponse {
    pub count: u64,
    pub beatmaps: Vec<BeatmapRow>,
}

/// Beatmapset with its difficulties
#[derive(Debug, Serialize, ToSchema)]
pub struct BeatmapsetDetail {
    #[serde(flatten)]
    pub beatmapset: BeatmapsetRow,
    pub beatmaps: Vec<BeatmapRow>,
}
