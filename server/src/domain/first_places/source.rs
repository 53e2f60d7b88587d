//! Snapshot source backed by the `first_places` table

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::data::types::FirstPlaceRow;
use crate::data::{StatsRepository, find_one};
use crate::domain::query::{EntityKind, EntityQuery, Operator, UserModeKey};

use super::{SnapshotError, SnapshotSource};

/// First-place snapshots of one user/mode/relax key
pub struct FirstPlaceSnapshots<'a> {
    repo: &'a dyn StatsRepository,
    key: &'a UserModeKey,
}

impl<'a> FirstPlaceSnapshots<'a> {
    pub fn new(repo: &'a dyn StatsRepository, key: &'a UserModeKey) -> Self {
        Self { repo, key }
    }

    fn query(&self) -> Result<EntityQuery, SnapshotError> {
        Ok(self.key.query(EntityKind::FirstPlace)?)
    }

    async fn newest(&self, query: EntityQuery) -> Result<Option<NaiveDate>, SnapshotError> {
        let query = query.sorted_by(Some("date"), true)?.single();
        let row = find_one(self.repo.search_first_places(&query)).await?;
        Ok(row.map(|row| row.date))
    }
}

#[async_trait]
impl SnapshotSource for FirstPlaceSnapshots<'_> {
    type Entry = FirstPlaceRow;

    async fn latest_date(&self) -> Result<Option<NaiveDate>, SnapshotError> {
        self.newest(self.query()?).await
    }

    async fn latest_date_before(
        &self,
        date: NaiveDate,
    ) -> Result<Option<NaiveDate>, SnapshotError> {
        let query = self.query()?.with_predicate("date", Operator::Lt, date)?;
        self.newest(query).await
    }

    async fn entries_at(&self, date: NaiveDate) -> Result<Vec<FirstPlaceRow>, SnapshotError> {
        let query = self.query()?.with_scope("date", date)?;
        Ok(self.repo.search_first_places(&query).await?.items)
    }
}
