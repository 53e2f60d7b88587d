//! First-place snapshot diffing
//!
//! The importer records a user's first-place scores once per day. A
//! snapshot is the set recorded on one date for a (server, user, mode,
//! relax) key, and the engine compares two of them to find which first
//! places were gained or lost.

mod error;
mod source;

pub use error::SnapshotError;
pub use source::FirstPlaceSnapshots;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::data::types::FirstPlaceRow;

/// Which view of the snapshots to return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Entries at the reference date
    #[default]
    All,
    /// Entries at the reference date missing from the previous snapshot
    New,
    /// Entries of the previous snapshot missing at the reference date
    Lost,
}

/// An entry whose identity within a snapshot is independent of its payload
pub trait SnapshotEntry {
    fn identity(&self) -> i64;
}

impl SnapshotEntry for FirstPlaceRow {
    fn identity(&self) -> i64 {
        self.beatmap_id
    }
}

/// Dated snapshots for a single key
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    type Entry: SnapshotEntry + Send;

    /// Most recent date with any entries
    async fn latest_date(&self) -> Result<Option<NaiveDate>, SnapshotError>;

    /// Most recent date with entries strictly before `date`
    async fn latest_date_before(&self, date: NaiveDate)
    -> Result<Option<NaiveDate>, SnapshotError>;

    async fn entries_at(&self, date: NaiveDate) -> Result<Vec<Self::Entry>, SnapshotError>;
}

/// Outcome of a diff: the snapshot date the entries belong to
#[derive(Debug, Clone, PartialEq)]
pub struct DiffResult<T> {
    pub date: Option<NaiveDate>,
    pub entries: Vec<T>,
}

impl<T> DiffResult<T> {
    fn empty() -> Self {
        Self {
            date: None,
            entries: Vec::new(),
        }
    }
}

/// Entries of `from` whose identity does not appear in `other`
fn difference<T: SnapshotEntry>(from: Vec<T>, other: &[T]) -> Vec<T> {
    let seen: HashSet<i64> = other.iter().map(SnapshotEntry::identity).collect();
    from.into_iter()
        .filter(|entry| !seen.contains(&entry.identity()))
        .collect()
}

/// Compute the requested view relative to a reference date.
///
/// The reference date defaults to the latest snapshot. `new` and `lost`
/// compare it with the latest snapshot strictly before it and return an empty
/// result with no date when there is none. `lost` entries are dated with the
/// previous snapshot, since that is where they were last seen.
pub async fn diff_snapshots<S>(
    source: &S,
    mode: DiffMode,
    reference: Option<NaiveDate>,
) -> Result<DiffResult<S::Entry>, SnapshotError>
where
    S: SnapshotSource + ?Sized,
{
    let Some(latest) = source.latest_date().await? else {
        return Ok(DiffResult::empty());
    };
    let reference = reference.unwrap_or(latest);

    if mode == DiffMode::All {
        return Ok(DiffResult {
            date: Some(reference),
            entries: source.entries_at(reference).await?,
        });
    }

    let Some(previous) = source.latest_date_before(reference).await? else {
        tracing::debug!(%reference, ?mode, "No earlier snapshot to diff against");
        return Ok(DiffResult::empty());
    };

    let current = source.entries_at(reference).await?;
    let before = source.entries_at(previous).await?;

    Ok(match mode {
        DiffMode::New => DiffResult {
            date: Some(reference),
            entries: difference(current, &before),
        },
        _ => DiffResult {
            date: Some(previous),
            entries: difference(before, &current),
        },
    })
}
