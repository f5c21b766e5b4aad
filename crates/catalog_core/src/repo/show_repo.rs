//! Show, season and episode repositories and SQLite implementations.
//!
//! # Responsibility
//! - Persist the show -> season -> episode hierarchy.
//! - Deep-copy subtrees for duplicate operations.
//!
//! # Invariants
//! - Seasons are ordered per show, episodes per season.
//! - Deleting a show or season cascades to its children (FK cascade).
//! - Duplicating a show copies every season and episode in one transaction.

use super::links::{self, SEASON_SUBTITLES, SHOW_GENRES};
use super::position::{self, OrderedTable};
use super::{
    ensure_connection_ready, imdb_to_db, language_to_db, parse_imdb, parse_language, parse_uuid,
    CatalogRepository, RepoError, RepoResult,
};
use crate::model::show::{Episode, Season, Show};
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

pub(crate) const SHOWS: OrderedTable = OrderedTable::root("shows", "show");
pub(crate) const SEASONS: OrderedTable = OrderedTable::child("seasons", "show_id", "season");
pub(crate) const EPISODES: OrderedTable = OrderedTable::child("episodes", "season_id", "episode");

const SHOW_SELECT_SQL: &str = "SELECT
    id,
    czech_name,
    original_name,
    csfd,
    imdb_code,
    wiki_en,
    wiki_cz,
    picture,
    note,
    position
FROM shows";

const SEASON_SELECT_SQL: &str = "SELECT
    id,
    show_id,
    number,
    start_year,
    end_year,
    language,
    note,
    position
FROM seasons";

const EPISODE_SELECT_SQL: &str = "SELECT
    id,
    season_id,
    number,
    name,
    length,
    note,
    position
FROM episodes";

/// SQLite-backed show repository.
pub struct SqliteShowRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShowRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["shows", "show_genres", "seasons", "episodes"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteShowRepository<'_> {
    type Entity = Show;

    fn insert(&self, show: &Show) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        insert_show_row(&tx, show)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, show: &Show) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE shows
             SET
                czech_name = ?2,
                original_name = ?3,
                csfd = ?4,
                imdb_code = ?5,
                wiki_en = ?6,
                wiki_cz = ?7,
                picture = ?8,
                note = ?9,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                show.id.to_string(),
                show.czech_name.as_str(),
                show.original_name.as_str(),
                show.csfd.as_str(),
                imdb_to_db(show.imdb_code),
                show.wiki_en.as_str(),
                show.wiki_cz.as_str(),
                show.picture.as_deref(),
                show.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: SHOWS.label,
                id: show.id,
            });
        }
        links::replace_ids(&tx, &SHOW_GENRES, show.id, &show.genres)?;
        tx.commit()?;
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Show>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SHOW_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut show = parse_show_row(row)?;
            show.genres = links::load_ids(self.conn, &SHOW_GENRES, show.id)?;
            return Ok(Some(show));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Show>> {
        SHOWS.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{SHOW_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut shows = Vec::new();
        while let Some(row) = rows.next()? {
            shows.push(parse_show_row(row)?);
        }
        for show in &mut shows {
            show.genres = links::load_ids(self.conn, &SHOW_GENRES, show.id)?;
        }
        Ok(shows)
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &SHOWS, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &SHOWS)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &SHOWS, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &SHOWS, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &SHOWS, ordered)
    }

    fn duplicate(&self, source: &Show, position: i64) -> RepoResult<Show> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.position = position;
        insert_show_row(&tx, &copy)?;

        for season in list_seasons(&tx, source.id)? {
            let mut season_copy = season.clone();
            season_copy.id = Uuid::new_v4();
            season_copy.show_id = copy.id;
            copy_season_tree(&tx, season.id, &season_copy)?;
        }

        tx.commit()?;
        Ok(copy)
    }
}

/// SQLite-backed season repository.
pub struct SqliteSeasonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSeasonRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["seasons", "season_subtitles", "episodes"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteSeasonRepository<'_> {
    type Entity = Season;

    fn insert(&self, season: &Season) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        insert_season_row(&tx, season)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, season: &Season) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE seasons
             SET
                number = ?2,
                start_year = ?3,
                end_year = ?4,
                language = ?5,
                note = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                season.id.to_string(),
                season.number,
                season.start_year,
                season.end_year,
                language_to_db(season.language),
                season.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: SEASONS.label,
                id: season.id,
            });
        }
        links::replace_languages(&tx, &SEASON_SUBTITLES, season.id, &season.subtitles)?;
        tx.commit()?;
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Season>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SEASON_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let mut season = parse_season_row(row)?;
            season.subtitles = links::load_languages(self.conn, &SEASON_SUBTITLES, season.id)?;
            return Ok(Some(season));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Season>> {
        match scope {
            Scope::Parent(show_id) => list_seasons(self.conn, show_id),
            Scope::Root => Err(RepoError::InvalidScope {
                label: SEASONS.label,
                scope,
            }),
        }
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &SEASONS, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &SEASONS)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &SEASONS, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &SEASONS, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &SEASONS, ordered)
    }

    fn duplicate(&self, source: &Season, position: i64) -> RepoResult<Season> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.position = position;
        copy_season_tree(&tx, source.id, &copy)?;
        tx.commit()?;
        Ok(copy)
    }
}

/// SQLite-backed episode repository.
pub struct SqliteEpisodeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEpisodeRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["episodes"])?;
        Ok(Self { conn })
    }
}

impl CatalogRepository for SqliteEpisodeRepository<'_> {
    type Entity = Episode;

    fn insert(&self, episode: &Episode) -> RepoResult<()> {
        insert_episode_row(self.conn, episode)
    }

    fn update(&self, episode: &Episode) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE episodes
             SET
                number = ?2,
                name = ?3,
                length = ?4,
                note = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                episode.id.to_string(),
                episode.number,
                episode.name.as_str(),
                episode.length,
                episode.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: EPISODES.label,
                id: episode.id,
            });
        }
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Episode>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EPISODE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_episode_row(row)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Episode>> {
        match scope {
            Scope::Parent(season_id) => list_episodes(self.conn, season_id),
            Scope::Root => Err(RepoError::InvalidScope {
                label: EPISODES.label,
                scope,
            }),
        }
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &EPISODES, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &EPISODES)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &EPISODES, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &EPISODES, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &EPISODES, ordered)
    }

    fn duplicate(&self, source: &Episode, position: i64) -> RepoResult<Episode> {
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.position = position;
        insert_episode_row(self.conn, &copy)?;
        Ok(copy)
    }
}

fn insert_show_row(conn: &Connection, show: &Show) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO shows (
            id,
            czech_name,
            original_name,
            csfd,
            imdb_code,
            wiki_en,
            wiki_cz,
            picture,
            note,
            position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
        params![
            show.id.to_string(),
            show.czech_name.as_str(),
            show.original_name.as_str(),
            show.csfd.as_str(),
            imdb_to_db(show.imdb_code),
            show.wiki_en.as_str(),
            show.wiki_cz.as_str(),
            show.picture.as_deref(),
            show.note.as_str(),
            show.position,
        ],
    )?;
    links::replace_ids(conn, &SHOW_GENRES, show.id, &show.genres)
}

fn insert_season_row(conn: &Connection, season: &Season) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO seasons (
            id,
            show_id,
            number,
            start_year,
            end_year,
            language,
            note,
            position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        params![
            season.id.to_string(),
            season.show_id.to_string(),
            season.number,
            season.start_year,
            season.end_year,
            language_to_db(season.language),
            season.note.as_str(),
            season.position,
        ],
    )?;
    links::replace_languages(conn, &SEASON_SUBTITLES, season.id, &season.subtitles)
}

fn insert_episode_row(conn: &Connection, episode: &Episode) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO episodes (
            id,
            season_id,
            number,
            name,
            length,
            note,
            position
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            episode.id.to_string(),
            episode.season_id.to_string(),
            episode.number,
            episode.name.as_str(),
            episode.length,
            episode.note.as_str(),
            episode.position,
        ],
    )?;
    Ok(())
}

/// Inserts `copy` and clones every episode of `source_season_id` under it.
fn copy_season_tree(conn: &Connection, source_season_id: CatalogId, copy: &Season) -> RepoResult<()> {
    insert_season_row(conn, copy)?;
    for episode in list_episodes(conn, source_season_id)? {
        let episode_copy = Episode {
            id: Uuid::new_v4(),
            season_id: copy.id,
            ..episode
        };
        insert_episode_row(conn, &episode_copy)?;
    }
    Ok(())
}

fn list_seasons(conn: &Connection, show_id: CatalogId) -> RepoResult<Vec<Season>> {
    let mut stmt = conn.prepare(&format!(
        "{SEASON_SELECT_SQL} WHERE show_id = ?1 ORDER BY position ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([show_id.to_string()])?;
    let mut seasons = Vec::new();
    while let Some(row) = rows.next()? {
        seasons.push(parse_season_row(row)?);
    }
    for season in &mut seasons {
        season.subtitles = links::load_languages(conn, &SEASON_SUBTITLES, season.id)?;
    }
    Ok(seasons)
}

fn list_episodes(conn: &Connection, season_id: CatalogId) -> RepoResult<Vec<Episode>> {
    let mut stmt = conn.prepare(&format!(
        "{EPISODE_SELECT_SQL} WHERE season_id = ?1 ORDER BY position ASC, id ASC;"
    ))?;
    let mut rows = stmt.query([season_id.to_string()])?;
    let mut episodes = Vec::new();
    while let Some(row) = rows.next()? {
        episodes.push(parse_episode_row(row)?);
    }
    Ok(episodes)
}

fn parse_show_row(row: &Row<'_>) -> RepoResult<Show> {
    let id_text: String = row.get("id")?;
    Ok(Show {
        id: parse_uuid(&id_text, "shows.id")?,
        czech_name: row.get("czech_name")?,
        original_name: row.get("original_name")?,
        csfd: row.get("csfd")?,
        imdb_code: parse_imdb(row.get("imdb_code")?, "shows.imdb_code")?,
        wiki_en: row.get("wiki_en")?,
        wiki_cz: row.get("wiki_cz")?,
        picture: row.get("picture")?,
        note: row.get("note")?,
        position: row.get("position")?,
        genres: Vec::new(),
    })
}

fn parse_season_row(row: &Row<'_>) -> RepoResult<Season> {
    let id_text: String = row.get("id")?;
    let show_id_text: String = row.get("show_id")?;
    let language_text: String = row.get("language")?;
    Ok(Season {
        id: parse_uuid(&id_text, "seasons.id")?,
        show_id: parse_uuid(&show_id_text, "seasons.show_id")?,
        number: row.get("number")?,
        start_year: row.get("start_year")?,
        end_year: row.get("end_year")?,
        language: parse_language(&language_text, "seasons.language")?,
        subtitles: Vec::new(),
        note: row.get("note")?,
        position: row.get("position")?,
    })
}

fn parse_episode_row(row: &Row<'_>) -> RepoResult<Episode> {
    let id_text: String = row.get("id")?;
    let season_id_text: String = row.get("season_id")?;
    Ok(Episode {
        id: parse_uuid(&id_text, "episodes.id")?,
        season_id: parse_uuid(&season_id_text, "episodes.season_id")?,
        number: row.get("number")?,
        name: row.get("name")?,
        length: row.get("length")?,
        note: row.get("note")?,
        position: row.get("position")?,
    })
}
