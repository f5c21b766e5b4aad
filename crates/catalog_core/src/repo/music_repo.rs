//! Music and song repositories and SQLite implementations.
//!
//! # Invariants
//! - Songs are ordered per music record and cascade on its deletion.
//! - Duplicating music copies its songs in the same transaction.

use super::position::{self, OrderedTable};
use super::{ensure_connection_ready, parse_uuid, CatalogRepository, RepoError, RepoResult};
use crate::model::music::{Music, Song};
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

pub(crate) const MUSIC: OrderedTable = OrderedTable::root("music", "music");
pub(crate) const SONGS: OrderedTable = OrderedTable::child("songs", "music_id", "song");

const MUSIC_SELECT_SQL: &str = "SELECT
    id,
    name,
    wiki_en,
    wiki_cz,
    media_count,
    note,
    position
FROM music";

const SONG_SELECT_SQL: &str = "SELECT
    id,
    music_id,
    name,
    length,
    note,
    position
FROM songs";

/// SQLite-backed music repository.
pub struct SqliteMusicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMusicRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["music", "songs"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteMusicRepository<'_> {
    type Entity = Music;

    fn insert(&self, music: &Music) -> RepoResult<()> {
        insert_music_row(self.conn, music)
    }

    fn update(&self, music: &Music) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE music
             SET
                name = ?2,
                wiki_en = ?3,
                wiki_cz = ?4,
                media_count = ?5,
                note = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                music.id.to_string(),
                music.name.as_str(),
                music.wiki_en.as_str(),
                music.wiki_cz.as_str(),
                music.media_count,
                music.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: MUSIC.label,
                id: music.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Music>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MUSIC_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_music_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Music>> {
        MUSIC.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{MUSIC_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_music_row(row)?);
        }
        Ok(items)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &MUSIC, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &MUSIC)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &MUSIC, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &MUSIC, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &MUSIC, ordered)
    }

    fn duplicate(&self, source: &Music, position: i64) -> RepoResult<Music> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let copy = Music {
            id: Uuid::new_v4(),
            position,
            ..source.clone()
        };
        insert_music_row(&tx, &copy)?;
        for song in list_songs(&tx, source.id)? {
            let song_copy = Song {
                id: Uuid::new_v4(),
                music_id: copy.id,
                ..song
            };
            insert_song_row(&tx, &song_copy)?;
        }
        tx.commit()?;
        Ok(copy)
    }
}

/// SQLite-backed song repository.
pub struct SqliteSongRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSongRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["songs"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteSongRepository<'_> {
    type Entity = Song;

    fn insert(&self, song: &Song) -> RepoResult<()> {
        insert_song_row(self.conn, song)
    }

    fn update(&self, song: &Song) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE songs
             SET
                name = ?2,
                length = ?3,
                note = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                song.id.to_string(),
                song.name.as_str(),
                song.length,
                song.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: SONGS.label,
                id: song.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Song>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SONG_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_song_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Song>> {
        match scope {
            Scope::Parent(music_id) => list_songs(self.conn, music_id),
            Scope::Root => Err(RepoError::InvalidScope {
                label: SONGS.label,
                scope,
            }),
        }
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &SONGS, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &SONGS)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &SONGS, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &SONGS, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &SONGS, ordered)
    }

    fn duplicate(&self, source: &Song, position: i64) -> RepoResult<Song> {
        let copy = Song {
            id: Uuid::new_v4(),
            position,
            ..source.clone()
        };
        insert_song_row(self.conn, &copy)?;
        Ok(copy)
    }
}

fn insert_music_row(conn: &Connection, music: &Music) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO music (
            id,
            name,
            wiki_en,
            wiki_cz,
            media_count,
            note,
            position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            music.id.to_string(),
            music.name.as_str(),
            music.wiki_en.as_str(),
            music.wiki_cz.as_str(),
            music.media_count,
            music.note.as_str(),
            music.position,
        ],
    )?;
    Ok(())
}

fn insert_song_row(conn: &Connection, song: &Song) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO songs (
            id,
            music_id,
            name,
            length,
            note,
            position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            song.id.to_string(),
            song.music_id.to_string(),
            song.name.as_str(),
            song.length,
            song.note.as_str(),
            song.position,
        ],
    )?;
    Ok(())
}

fn list_songs(conn: &Connection, music_id: CatalogId) -> RepoResult<Vec<Song>> {
    let mut stmt = conn.prepare(&format!(
        "{SONG_SELECT_SQL} WHERE music_id = ?1 ORDER BY position ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([music_id.to_string()])?;
    let mut songs = Vec::new();
    while let Some(row) = rows.next()? {
        songs.push(parse_song_row(row)?);
    }
    Ok(songs)
}

fn parse_music_row(row: &Row<'_>) -> RepoResult<Music> {
    let id_text: String = row.get("id")?;
    Ok(Music {
        id: parse_uuid(&id_text, "music.id")?,
        name: row.get("name")?,
        wiki_en: row.get("wiki_en")?,
        wiki_cz: row.get("wiki_cz")?,
        media_count: row.get("media_count")?,
        note: row.get("note")?,
        position: row.get("position")?,
    })
}

fn parse_song_row(row: &Row<'_>) -> RepoResult<Song> {
    let id_text: String = row.get("id")?;
    let music_id_text: String = row.get("music_id")?;
    Ok(Song {
        id: parse_uuid(&id_text, "songs.id")?,
        music_id: parse_uuid(&music_id_text, "songs.music_id")?,
        name: row.get("name")?,
        length: row.get("length")?,
        note: row.get("note")?,
        position: row.get("position")?,
    })
}
