//! API route handlers

pub mod beatmaps;
pub mod clans;
pub mod health;
pub mod leaderboard;
pub mod scores;
pub mod users;

use std::sync::Arc;

use crate::data::StatsRepository;

/// Shared state for the stats endpoints
#[derive(Clone)]
pub struct StatsApiState {
    pub repo: Arc<dyn StatsRepository>,
}

impl StatsApiState {
    pub fn new(repo: Arc<dyn StatsRepository>) -> Self {
        Self { repo }
    }
}
