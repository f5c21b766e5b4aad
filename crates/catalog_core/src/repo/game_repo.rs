//! Game repository and SQLite implementation.

use super::position::{self, OrderedTable};
use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, parse_uuid, CatalogRepository, RepoError,
    RepoResult,
};
use crate::model::game::Game;
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const GAMES: OrderedTable = OrderedTable::root("games", "game");

const GAME_SELECT_SQL: &str = "SELECT
    id,
    name,
    wiki_en,
    wiki_cz,
    media_count,
    crack,
    serial_key,
    patch,
    trainer,
    trainer_data,
    editor,
    saves,
    other_data,
    note,
    position
FROM games";

/// SQLite-backed game repository.
pub struct SqliteGameRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGameRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["games"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteGameRepository<'_> {
    type Entity = Game;

    fn insert(&self, game: &Game) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO games (
                id,
                name,
                wiki_en,
                wiki_cz,
                media_count,
                crack,
                serial_key,
                patch,
                trainer,
                trainer_data,
                editor,
                saves,
                other_data,
                note,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                game.id.to_string(),
                game.name.as_str(),
                game.wiki_en.as_str(),
                game.wiki_cz.as_str(),
                game.media_count,
                bool_to_int(game.crack),
                bool_to_int(game.serial_key),
                bool_to_int(game.patch),
                bool_to_int(game.trainer),
                bool_to_int(game.trainer_data),
                bool_to_int(game.editor),
                bool_to_int(game.saves),
                game.other_data.as_str(),
                game.note.as_str(),
                game.position,
            ],
        )?;
        Ok(())
    }

    fn update(&self, game: &Game) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE games
             SET
                name = ?2,
                wiki_en = ?3,
                wiki_cz = ?4,
                media_count = ?5,
                crack = ?6,
                serial_key = ?7,
                patch = ?8,
                trainer = ?9,
                trainer_data = ?10,
                editor = ?11,
                saves = ?12,
                other_data = ?13,
                note = ?14,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                game.id.to_string(),
                game.name.as_str(),
                game.wiki_en.as_str(),
                game.wiki_cz.as_str(),
                game.media_count,
                bool_to_int(game.crack),
                bool_to_int(game.serial_key),
                bool_to_int(game.patch),
                bool_to_int(game.trainer),
                bool_to_int(game.trainer_data),
                bool_to_int(game.editor),
                bool_to_int(game.saves),
                game.other_data.as_str(),
                game.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: GAMES.label,
                id: game.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Game>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GAME_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_game_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Game>> {
        GAMES.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{GAME_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut games = Vec::new();
        while let Some(row) = rows.next()? {
            games.push(parse_game_row(row)?);
        }
        Ok(games)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &GAMES, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &GAMES)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &GAMES, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &GAMES, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &GAMES, ordered)
    }

    fn duplicate(&self, source: &Game, position: i64) -> RepoResult<Game> {
        let copy = Game {
            id: Uuid::new_v4(),
            position,
            ..source.clone()
        };
        self.insert(&copy)?;
        Ok(copy)
    }
}

fn parse_game_row(row: &Row<'_>) -> RepoResult<Game> {
    let id_text: String = row.get("id")?;
    Ok(Game {
        id: parse_uuid(&id_text, "games.id")?,
        name: row.get("name")?,
        wiki_en: row.get("wiki_en")?,
        wiki_cz: row.get("wiki_cz")?,
        media_count: row.get("media_count")?,
        crack: int_to_bool(row.get("crack")?, "games.crack")?,
        serial_key: int_to_bool(row.get("serial_key")?, "games.serial_key")?,
        patch: int_to_bool(row.get("patch")?, "games.patch")?,
        trainer: int_to_bool(row.get("trainer")?, "games.trainer")?,
        trainer_data: int_to_bool(row.get("trainer_data")?, "games.trainer_data")?,
        editor: int_to_bool(row.get("editor")?, "games.editor")?,
        saves: int_to_bool(row.get("saves")?, "games.saves")?,
        other_data: row.get("other_data")?,
        note: row.get("note")?,
        position: row.get("position")?,
    })
}
