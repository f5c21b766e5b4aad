//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the CRUD + reorder contract shared by every catalog collection.
//! - Isolate SQLite query details from service/validation orchestration.
//!
//! # Invariants
//! - Repositories only accept connections migrated to the latest schema.
//! - Lists are ordered `position ASC, id ASC`.
//! - Multi-row writes run inside one immediate transaction.
//! - `update` never changes `position` or the parent link.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::{CatalogEntity, CatalogId, Language, Scope};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod book_repo;
pub mod game_repo;
pub mod genre_repo;
mod links;
pub mod movie_repo;
pub mod music_repo;
pub mod position;
pub mod program_repo;
pub mod show_repo;
pub mod stats_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all catalog collections.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// No row with this id exists in the collection.
    NotFound {
        label: &'static str,
        id: CatalogId,
    },
    /// Scope does not apply to the collection (e.g. parent scope for genres).
    InvalidScope {
        label: &'static str,
        scope: Scope,
    },
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { label, id } => write!(f, "{label} not found: {id}"),
            Self::InvalidScope { label, scope } => {
                write!(f, "scope {scope:?} does not apply to {label}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "catalog repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "catalog repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// CRUD and reorder contract implemented by every collection repository.
pub trait CatalogRepository {
    type Entity: CatalogEntity;

    /// Persists a new record with the position it carries.
    fn insert(&self, entity: &Self::Entity) -> RepoResult<()>;
    /// Replaces stored data of an existing record, keeping position and parent.
    fn update(&self, entity: &Self::Entity) -> RepoResult<()>;
    fn get(&self, id: CatalogId) -> RepoResult<Option<Self::Entity>>;
    /// Lists records of one scope ordered by position.
    fn list(&self, scope: Scope) -> RepoResult<Vec<Self::Entity>>;
    /// Deletes one record; children cascade.
    fn delete(&self, id: CatalogId) -> RepoResult<()>;
    /// Deletes every record of the collection.
    fn clear(&self) -> RepoResult<()>;
    /// Returns `MAX(position) + 1` for the scope, `0` when empty.
    fn next_position(&self, scope: Scope) -> RepoResult<i64>;
    /// Exchanges the positions of two records.
    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()>;
    /// Assigns positions `0..n` following the given order.
    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()>;
    /// Copies a record (and its children) under a fresh id at `position`.
    fn duplicate(&self, source: &Self::Entity, position: i64) -> RepoResult<Self::Entity>;
}

pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[&'static str]) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn language_to_db(language: Language) -> &'static str {
    match language {
        Language::Cz => "cz",
        Language::En => "en",
        Language::Fr => "fr",
        Language::Jp => "jp",
        Language::Sk => "sk",
    }
}

pub(crate) fn parse_language(value: &str, column: &'static str) -> RepoResult<Language> {
    match value {
        "cz" => Ok(Language::Cz),
        "en" => Ok(Language::En),
        "fr" => Ok(Language::Fr),
        "jp" => Ok(Language::Jp),
        "sk" => Ok(Language::Sk),
        other => Err(RepoError::InvalidData(format!(
            "invalid language `{other}` in {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn imdb_to_db(code: Option<u32>) -> Option<i64> {
    code.map(i64::from)
}

pub(crate) fn parse_imdb(value: Option<i64>, column: &'static str) -> RepoResult<Option<u32>> {
    value
        .map(|code| {
            u32::try_from(code).map_err(|_| {
                RepoError::InvalidData(format!("invalid imdb code `{code}` in {column}"))
            })
        })
        .transpose()
}
