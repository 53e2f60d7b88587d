//! Field schema registry
//!
//! Each entity kind exposes a bounded, static table of filterable fields,
//! their primitive kinds and backing columns. The registry indexes those
//! tables by name once at startup and is shared read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use super::error::QueryError;

/// Page length cap for user, clan and beatmap lists
pub const MAX_METADATA_PAGE_LENGTH: u32 = 100;

/// Page length cap for score, leaderboard and first place lists
pub const MAX_SCORE_PAGE_LENGTH: u32 = 1000;

/// Primitive kind of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Integer,
    Float,
    String,
    Date,
    Boolean,
}

impl FieldKind {
    /// Whether `>`, `>=`, `<`, `<=` are meaningful for this kind
    pub fn is_orderable(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Date)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Date => write!(f, "date"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// A filterable field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
    pub sortable: bool,
}

impl FieldDescriptor {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            column: name,
            kind,
            sortable: false,
        }
    }

    const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    const fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    const fn column(mut self, column: &'static str) -> Self {
        self.column = column;
        self
    }
}

/// Entity kinds exposed through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Clan,
    Beatmap,
    Beatmapset,
    BeatmapPack,
    Score,
    Stats,
    Leaderboard,
    FirstPlace,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::User,
        EntityKind::Clan,
        EntityKind::Beatmap,
        EntityKind::Beatmapset,
        EntityKind::BeatmapPack,
        EntityKind::Score,
        EntityKind::Stats,
        EntityKind::Leaderboard,
        EntityKind::FirstPlace,
    ];

    fn schema(self) -> &'static EntitySchema {
        match self {
            Self::User => &tables::USERS,
            Self::Clan => &tables::CLANS,
            Self::Beatmap => &tables::BEATMAPS,
            Self::Beatmapset => &tables::BEATMAPSETS,
            Self::BeatmapPack => &tables::BEATMAP_PACKS,
            Self::Score => &tables::SCORES,
            Self::Stats => &tables::USER_STATS,
            Self::Leaderboard => &tables::LEADERBOARD,
            Self::FirstPlace => &tables::FIRST_PLACES,
        }
    }
}

/// One term of an entity's default ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    pub column: &'static str,
    pub descending: bool,
}

impl OrderTerm {
    const fn asc(column: &'static str) -> Self {
        Self {
            column,
            descending: false,
        }
    }

    const fn desc(column: &'static str) -> Self {
        Self {
            column,
            descending: true,
        }
    }
}

/// Static description of an entity table
#[derive(Debug)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub table: &'static str,
    pub fields: &'static [FieldDescriptor],
    /// Primary key columns, appended to every ordering as a tie-breaker
    pub primary_key: &'static [&'static str],
    pub default_order: &'static [OrderTerm],
    pub max_page_length: u32,
}

/// Name index over one entity's fields
#[derive(Debug)]
pub struct EntityFields {
    schema: &'static EntitySchema,
    by_name: HashMap<&'static str, &'static FieldDescriptor>,
}

impl EntityFields {
    fn build(schema: &'static EntitySchema) -> Self {
        let by_name = schema.fields.iter().map(|f| (f.name, f)).collect();
        Self { schema, by_name }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.by_name.get(name).copied()
    }

    /// Look up a field, failing with `UnknownField`
    pub fn require(&self, name: &str) -> Result<&'static FieldDescriptor, QueryError> {
        self.get(name).ok_or_else(|| QueryError::UnknownField {
            field: name.to_string(),
        })
    }
}

/// Field registry for every entity kind
#[derive(Debug)]
pub struct SchemaRegistry {
    entities: Vec<EntityFields>,
}

static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(SchemaRegistry::build);

impl SchemaRegistry {
    fn build() -> Self {
        let entities = EntityKind::ALL
            .iter()
            .map(|kind| EntityFields::build(kind.schema()))
            .collect();
        Self { entities }
    }

    /// Process-wide registry, built on first access
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    pub fn entity(&self, kind: EntityKind) -> &EntityFields {
        &self.entities[kind as usize]
    }

    /// Total number of registered fields across all entities
    pub fn field_count(&self) -> usize {
        self.entities.iter().map(|e| e.by_name.len()).sum()
    }
}

/// Static field tables, one per entity
mod tables {
    use super::{
        EntityKind, EntitySchema, FieldDescriptor as F, MAX_METADATA_PAGE_LENGTH,
        MAX_SCORE_PAGE_LENGTH, OrderTerm,
    };

    pub static USERS: EntitySchema = EntitySchema {
        kind: EntityKind::User,
        table: "users",
        fields: &[
            F::integer("id").column("user_id").sortable(),
            F::string("server"),
            F::string("username").sortable(),
            F::string("country").sortable(),
            F::integer("clan_id"),
            F::date("registered_on").sortable(),
            F::date("latest_activity").sortable(),
            F::boolean("restricted"),
        ],
        primary_key: &["user_id", "server"],
        default_order: &[],
        max_page_length: MAX_METADATA_PAGE_LENGTH,
    };

    pub static CLANS: EntitySchema = EntitySchema {
        kind: EntityKind::Clan,
        table: "clans",
        fields: &[
            F::integer("id").column("clan_id").sortable(),
            F::string("server"),
            F::string("name").sortable(),
            F::string("tag").sortable(),
            F::integer("owner_id"),
            F::integer("member_count").sortable(),
        ],
        primary_key: &["clan_id", "server"],
        default_order: &[],
        max_page_length: MAX_METADATA_PAGE_LENGTH,
    };

    pub static BEATMAPS: EntitySchema = EntitySchema {
        kind: EntityKind::Beatmap,
        table: "beatmaps",
        fields: &[
            F::integer("id").column("beatmap_id").sortable(),
            F::integer("beatmapset_id").sortable(),
            F::string("artist").sortable(),
            F::string("title").sortable(),
            F::string("version"),
            F::integer("mode"),
            F::integer("status"),
            F::float("stars").sortable(),
            F::integer("length").sortable(),
            F::float("bpm").sortable(),
            F::float("ar").sortable(),
            F::float("od").sortable(),
            F::float("cs").sortable(),
            F::float("hp").sortable(),
            F::integer("max_combo").sortable(),
            F::date("last_update").sortable(),
        ],
        primary_key: &["beatmap_id"],
        default_order: &[],
        max_page_length: MAX_METADATA_PAGE_LENGTH,
    };

    pub static BEATMAPSETS: EntitySchema = EntitySchema {
        kind: EntityKind::Beatmapset,
        table: "beatmapsets",
        fields: &[
            F::integer("id").column("beatmapset_id").sortable(),
            F::string("artist").sortable(),
            F::string("title").sortable(),
            F::string("creator").sortable(),
            F::string("source"),
            F::date("last_update").sortable(),
        ],
        primary_key: &["beatmapset_id"],
        default_order: &[],
        max_page_length: MAX_METADATA_PAGE_LENGTH,
    };

    pub static BEATMAP_PACKS: EntitySchema = EntitySchema {
        kind: EntityKind::BeatmapPack,
        table: "beatmap_packs",
        fields: &[
            F::string("tag").sortable(),
            F::string("name").sortable(),
            F::date("created_on").sortable(),
        ],
        primary_key: &["tag"],
        default_order: &[],
        max_page_length: MAX_METADATA_PAGE_LENGTH,
    };

    pub static SCORES: EntitySchema = EntitySchema {
        kind: EntityKind::Score,
        table: "scores",
        fields: &[
            F::integer("id").column("score_id").sortable(),
            F::string("server"),
            F::integer("user_id"),
            F::integer("beatmap_id"),
            F::integer("mode"),
            F::integer("relax"),
            F::integer("score").sortable(),
            F::float("accuracy").sortable(),
            F::float("pp").sortable(),
            F::integer("max_combo").sortable(),
            F::integer("mods"),
            F::string("rank"),
            F::integer("completed"),
            F::date("date").sortable(),
        ],
        primary_key: &["score_id", "server"],
        default_order: &[],
        max_page_length: MAX_SCORE_PAGE_LENGTH,
    };

    pub static USER_STATS: EntitySchema = EntitySchema {
        kind: EntityKind::Stats,
        table: "user_stats",
        fields: &[
            F::string("server"),
            F::integer("user_id"),
            F::integer("mode"),
            F::integer("relax"),
            F::date("date").sortable(),
            F::integer("ranked_score").sortable(),
            F::integer("total_score").sortable(),
            F::integer("play_count").sortable(),
            F::integer("play_time").sortable(),
            F::float("accuracy").sortable(),
            F::float("pp").sortable(),
            F::integer("global_rank").sortable(),
            F::integer("country_rank").sortable(),
        ],
        primary_key: &["server", "user_id", "mode", "relax", "date"],
        default_order: &[OrderTerm::asc("date")],
        max_page_length: MAX_SCORE_PAGE_LENGTH,
    };

    pub static LEADERBOARD: EntitySchema = EntitySchema {
        kind: EntityKind::Leaderboard,
        table: "leaderboard",
        fields: &[
            F::string("server"),
            F::integer("user_id"),
            F::integer("mode"),
            F::integer("relax"),
            F::string("leaderboard_type"),
            F::date("date"),
            F::string("country").sortable(),
            F::integer("ranked_score").sortable(),
            F::integer("total_score").sortable(),
            F::integer("play_count").sortable(),
            F::float("accuracy").sortable(),
            F::float("pp").sortable(),
            F::integer("global_rank").sortable(),
            F::integer("country_rank").sortable(),
        ],
        primary_key: &["server", "user_id", "mode", "relax", "leaderboard_type"],
        default_order: &[OrderTerm::asc("global_rank")],
        max_page_length: MAX_SCORE_PAGE_LENGTH,
    };

    pub static FIRST_PLACES: EntitySchema = EntitySchema {
        kind: EntityKind::FirstPlace,
        table: "first_places",
        fields: &[
            F::string("server"),
            F::integer("user_id"),
            F::integer("mode"),
            F::integer("relax"),
            F::integer("beatmap_id").sortable(),
            F::date("date").sortable(),
            F::integer("score_id"),
            F::float("pp").sortable(),
            F::float("accuracy").sortable(),
        ],
        primary_key: &["server", "user_id", "mode", "relax", "beatmap_id", "date"],
        default_order: &[OrderTerm::desc("date"), OrderTerm::asc("beatmap_id")],
        max_page_length: MAX_SCORE_PAGE_LENGTH,
    };
}
