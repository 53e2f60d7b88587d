//! Query-filter compiler
//!
//! - `clause` - filter expression parsing
//! - `schema` - per-entity field registry
//! - `compile` - clause validation and value coercion
//! - `builder` - immutable query with scope, sort and page window
//! - `key` - user/mode scope shared by per-user entities
//! - `page` - page request and result types

mod builder;
mod clause;
mod compile;
mod error;
mod key;
mod page;
mod schema;

pub use builder::EntityQuery;
pub use clause::{FilterClause, MAX_FILTER_CLAUSES, Operator, parse_filter_expression};
pub use compile::{CompiledPredicate, FieldValue, SortSpec, compile_filters};
pub use error::QueryError;
pub use key::UserModeKey;
pub use page::{PageRequest, PageResult};
pub use schema::{
    EntityFields, EntityKind, EntitySchema, FieldDescriptor, FieldKind,
    MAX_METADATA_PAGE_LENGTH, MAX_SCORE_PAGE_LENGTH, SchemaRegistry,
};
