//! Genre repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a genre drops its movie/show links (FK cascade).

use super::position::{self, OrderedTable};
use super::{ensure_connection_ready, parse_uuid, CatalogRepository, RepoError, RepoResult};
use crate::model::genre::Genre;
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use uuid::Uuid;

pub(crate) const GENRES: OrderedTable = OrderedTable::root("genres", "genre");

/// Genre persistence with the lookup needed by movie/show validation.
pub trait GenreRepository: CatalogRepository<Entity = Genre> {
    /// Returns the subset of `ids` that are stored.
    fn existing_ids(&self, ids: &[CatalogId]) -> RepoResult<HashSet<CatalogId>>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["genres"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteGenreRepository<'_> {
    type Entity = Genre;

    fn insert(&self, genre: &Genre) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO genres (id, name, position) VALUES (?1, ?2, ?3);",
            params![genre.id.to_string(), genre.name.as_str(), genre.position],
        )?;
        Ok(())
    }

    fn update(&self, genre: &Genre) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE genres
             SET name = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![genre.id.to_string(), genre.name.as_str()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: GENRES.label,
                id: genre.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Genre>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, position FROM genres WHERE id = ?1;")?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_genre_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Genre>> {
        GENRES.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, position FROM genres ORDER BY position ASC, id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut genres = Vec::new();
        while let Some(row) = rows.next()? {
            genres.push(parse_genre_row(row)?);
        }
        Ok(genres)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &GENRES, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &GENRES)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &GENRES, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &GENRES, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &GENRES, ordered)
    }

    fn duplicate(&self, source: &Genre, position: i64) -> RepoResult<Genre> {
        let copy = Genre {
            id: Uuid::new_v4(),
            name: source.name.clone(),
            position,
        };
        self.insert(&copy)?;
        Ok(copy)
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn existing_ids(&self, ids: &[CatalogId]) -> RepoResult<HashSet<CatalogId>> {
        let mut found = HashSet::new();
        for id in ids {
            if position::exists(self.conn, &GENRES, *id)? {
                found.insert(*id);
            }
        }
        Ok(found)
    }
}

fn parse_genre_row(row: &Row<'_>) -> RepoResult<Genre> {
    let id_text: String = row.get("id")?;
    Ok(Genre {
        id: parse_uuid(&id_text, "genres.id")?,
        name: row.get("name")?,
        position: row.get("position")?,
    })
}
