//! Program repository and SQLite implementation.

use super::position::{self, OrderedTable};
use super::{
    bool_to_int, ensure_connection_ready, int_to_bool, parse_uuid, CatalogRepository, RepoError,
    RepoResult,
};
use crate::model::program::Program;
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

pub(crate) const PROGRAMS: OrderedTable = OrderedTable::root("programs", "program");

const PROGRAM_SELECT_SQL: &str = "SELECT
    id,
    name,
    wiki_en,
    wiki_cz,
    media_count,
    crack,
    serial_key,
    other_data,
    note,
    position
FROM programs";

/// SQLite-backed program repository.
pub struct SqliteProgramRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProgramRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["programs"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteProgramRepository<'_> {
    type Entity = Program;

    fn insert(&self, program: &Program) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO programs (
                id,
                name,
                wiki_en,
                wiki_cz,
                media_count,
                crack,
                serial_key,
                other_data,
                note,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                program.id.to_string(),
                program.name.as_str(),
                program.wiki_en.as_str(),
                program.wiki_cz.as_str(),
                program.media_count,
                bool_to_int(program.crack),
                bool_to_int(program.serial_key),
                program.other_data.as_str(),
                program.note.as_str(),
                program.position,
            ],
        )?;
        Ok(())
    }

    fn update(&self, program: &Program) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE programs
             SET
                name = ?2,
                wiki_en = ?3,
                wiki_cz = ?4,
                media_count = ?5,
                crack = ?6,
                serial_key = ?7,
                other_data = ?8,
                note = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                program.id.to_string(),
                program.name.as_str(),
                program.wiki_en.as_str(),
                program.wiki_cz.as_str(),
                program.media_count,
                bool_to_int(program.crack),
                bool_to_int(program.serial_key),
                program.other_data.as_str(),
                program.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: PROGRAMS.label,
                id: program.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Program>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROGRAM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_program_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Program>> {
        PROGRAMS.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{PROGRAM_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut programs = Vec::new();
        while let Some(row) = rows.next()? {
            programs.push(parse_program_row(row)?);
        }
        Ok(programs)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &PROGRAMS, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &PROGRAMS)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &PROGRAMS, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &PROGRAMS, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &PROGRAMS, ordered)
    }

    fn duplicate(&self, source: &Program, position: i64) -> RepoResult<Program> {
        let copy = Program {
            id: Uuid::new_v4(),
            position,
            ..source.clone()
        };
        self.insert(&copy)?;
        Ok(copy)
    }
}

fn parse_program_row(row: &Row<'_>) -> RepoResult<Program> {
    let id_text: String = row.get("id")?;
    Ok(Program {
        id: parse_uuid(&id_text, "programs.id")?,
        name: row.get("name")?,
        wiki_en: row.get("wiki_en")?,
        wiki_cz: row.get("wiki_cz")?,
        media_count: row.get("media_count")?,
        crack: int_to_bool(row.get("crack")?, "programs.crack")?,
        serial_key: int_to_bool(row.get("serial_key")?, "programs.serial_key")?,
        other_data: row.get("other_data")?,
        note: row.get("note")?,
        position: row.get("position")?,
    })
}
