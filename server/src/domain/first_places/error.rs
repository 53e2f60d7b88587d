use thiserror::Error;

use crate::data::DataError;
use crate::domain::query::QueryError;

/// Failure while reading snapshots
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Data(#[from] DataError),
}
