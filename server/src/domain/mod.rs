//! Domain logic for the stats API
//!
//! - `query` - filter expression compiler and query builder
//! - `first_places` - first place snapshot diffing

pub mod first_places;
pub mod query;

pub use first_places::{
    DiffMode, DiffResult, FirstPlaceSnapshots, SnapshotEntry, SnapshotError, SnapshotSource,
    diff_snapshots,
};
pub use query::{EntityKind, EntityQuery, PageRequest, PageResult, QueryError};
