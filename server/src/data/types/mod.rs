//! Shared data types for all database backends
//!
//! Row types are decoded with `sqlx::FromRow` from both SQLite and PostgreSQL
//! and serialized as API responses.

mod metadata;
mod scores;

pub use metadata::{BeatmapPackRow, BeatmapRow, BeatmapsetRow, ClanRow, UserRow};
pub use scores::{FirstPlaceRow, LeaderboardRow, ScoreRow, StatsRow};

/// Beatmap ids of a pack split by whether the user completed them
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, utoipa::ToSchema)]
pub struct PackCompletion {
    pub completed: Vec<i64>,
    pub uncompleted: Vec<i64>,
}

impl PackCompletion {
    /// Partition `pack` by membership in `completed`. Both lists keep the
    /// order of `pack`.
    pub fn partition(pack: Vec<i64>, completed: &[i64]) -> Self {
        let (completed, uncompleted) = pack.into_iter().partition(|id| completed.contains(id));
        Self {
            completed,
            uncompleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_completion_partition() {
        let result = PackCompletion::partition(vec![1, 2, 3, 4], &[4, 2, 9]);
        assert_eq!(result.completed, vec![2, 4]);
        assert_eq!(result.uncompleted, vec![1, 3]);
    }

    #[test]
    fn test_pack_completion_empty_pack() {
        assert_eq!(PackCompletion::partition(vec![], &[1]), PackCompletion::default());
    }
}
