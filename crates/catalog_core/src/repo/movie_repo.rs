//! Movie repository and SQLite implementation.
//!
//! # Responsibility
//! - Persist movies together with subtitles, media and genre links.
//!
//! # Invariants
//! - A movie row and its child rows are written in one transaction.
//! - Child lists come back in the order they were stored.

use super::links::{self, MOVIE_GENRES, MOVIE_SUBTITLES};
use super::position::{self, OrderedTable};
use super::{
    ensure_connection_ready, imdb_to_db, language_to_db, parse_imdb, parse_language, parse_uuid,
    CatalogRepository, RepoError, RepoResult,
};
use crate::model::movie::{Medium, Movie};
use crate::model::{CatalogId, Scope};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

pub(crate) const MOVIES: OrderedTable = OrderedTable::root("movies", "movie");

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    czech_name,
    original_name,
    year,
    language,
    csfd,
    imdb_code,
    wiki_en,
    wiki_cz,
    picture,
    note,
    position
FROM movies";

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &["movies", "movie_subtitles", "movie_media", "movie_genres"],
        )?;
        Ok(Self { conn })
    }

    fn load_children(&self, mut movie: Movie) -> RepoResult<Movie> {
        movie.subtitles = links::load_languages(self.conn, &MOVIE_SUBTITLES, movie.id)?;
        movie.genres = links::load_ids(self.conn, &MOVIE_GENRES, movie.id)?;
        movie.media = load_media(self.conn, movie.id)?;
        Ok(movie)
    }
}

impl CatalogRepository for SqliteMovieRepository<'_> {
    type Entity = Movie;

    fn insert(&self, movie: &Movie) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO movies (
                id,
                czech_name,
                original_name,
                year,
                language,
                csfd,
                imdb_code,
                wiki_en,
                wiki_cz,
                picture,
                note,
                position
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
            params![
                movie.id.to_string(),
                movie.czech_name.as_str(),
                movie.original_name.as_str(),
                movie.year,
                language_to_db(movie.language),
                movie.csfd.as_str(),
                imdb_to_db(movie.imdb_code),
                movie.wiki_en.as_str(),
                movie.wiki_cz.as_str(),
                movie.picture.as_deref(),
                movie.note.as_str(),
                movie.position,
            ],
        )?;
        write_children(&tx, movie)?;
        tx.commit()?;
        Ok(())
    }

    fn update(&self, movie: &Movie) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE movies
             SET
                czech_name = ?2,
                original_name = ?3,
                year = ?4,
                language = ?5,
                csfd = ?6,
                imdb_code = ?7,
                wiki_en = ?8,
                wiki_cz = ?9,
                picture = ?10,
                note = ?11,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                movie.id.to_string(),
                movie.czech_name.as_str(),
                movie.original_name.as_str(),
                movie.year,
                language_to_db(movie.language),
                movie.csfd.as_str(),
                imdb_to_db(movie.imdb_code),
                movie.wiki_en.as_str(),
                movie.wiki_cz.as_str(),
                movie.picture.as_deref(),
                movie.note.as_str(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                label: MOVIES.label,
                id: movie.id,
            });
        }
        write_children(&tx, movie)?;
        tx.commit()?;
        Ok(())
    }

    fn get(&self, id: CatalogId) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let movie = parse_movie_row(row)?;
            return Ok(Some(self.load_children(movie)?));
        }
        Ok(None)
    }

    fn list(&self, scope: Scope) -> RepoResult<Vec<Movie>> {
        MOVIES.scope_filter(scope)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY position ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();
        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }
        movies
            .into_iter()
            .map(|movie| self.load_children(movie))
            .collect()
    }

    fn delete(&self, id: CatalogId) -> RepoResult<()> {
        position::delete_row(self.conn, &MOVIES, id)
    }

    fn clear(&self) -> RepoResult<()> {
        position::clear_table(self.conn, &MOVIES)
    }

    fn next_position(&self, scope: Scope) -> RepoResult<i64> {
        position::next_position(self.conn, &MOVIES, scope)
    }

    fn swap_positions(&self, first: CatalogId, second: CatalogId) -> RepoResult<()> {
        position::swap_positions(self.conn, &MOVIES, first, second)
    }

    fn renumber(&self, ordered: &[CatalogId]) -> RepoResult<()> {
        position::renumber(self.conn, &MOVIES, ordered)
    }

    fn duplicate(&self, source: &Movie, position: i64) -> RepoResult<Movie> {
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.position = position;
        self.insert(&copy)?;
        Ok(copy)
    }
}

fn write_children(conn: &Connection, movie: &Movie) -> RepoResult<()> {
    links::replace_languages(conn, &MOVIE_SUBTITLES, movie.id, &movie.subtitles)?;
    links::replace_ids(conn, &MOVIE_GENRES, movie.id, &movie.genres)?;

    conn.execute(
        "DELETE FROM movie_media WHERE movie_id = ?1;",
        [movie.id.to_string()],
    )?;
    let mut stmt =
        conn.prepare("INSERT INTO movie_media (movie_id, number, length) VALUES (?1, ?2, ?3);")?;
    for medium in &movie.media {
        stmt.execute(params![movie.id.to_string(), medium.number, medium.length])?;
    }
    Ok(())
}

fn load_media(conn: &Connection, movie_id: CatalogId) -> RepoResult<Vec<Medium>> {
    let mut stmt = conn.prepare(
        "SELECT number, length
         FROM movie_media
         WHERE movie_id = ?1
         ORDER BY number ASC;",
    )?;
    let mut rows = stmt.query([movie_id.to_string()])?;
    let mut media = Vec::new();
    while let Some(row) = rows.next()? {
        media.push(Medium {
            number: row.get(0)?,
            length: row.get(1)?,
        });
    }
    Ok(media)
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    let id_text: String = row.get("id")?;
    let language_text: String = row.get("language")?;
    Ok(Movie {
        id: parse_uuid(&id_text, "movies.id")?,
        czech_name: row.get("czech_name")?,
        original_name: row.get("original_name")?,
        year: row.get("year")?,
        language: parse_language(&language_text, "movies.language")?,
        subtitles: Vec::new(),
        media: Vec::new(),
        csfd: row.get("csfd")?,
        imdb_code: parse_imdb(row.get("imdb_code")?, "movies.imdb_code")?,
        wiki_en: row.get("wiki_en")?,
        wiki_cz: row.get("wiki_cz")?,
        picture: row.get("picture")?,
        note: row.get("note")?,
        position: row.get("position")?,
        genres: Vec::new(),
    })
}
