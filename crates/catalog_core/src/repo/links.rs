//! Ordered link tables (genre links, subtitle/language lists).
//!
//! Links are always replaced as a whole; `ordinal` keeps caller order.

use super::{language_to_db, parse_language, parse_uuid, RepoResult};
use crate::model::{CatalogId, Language};
use rusqlite::{params, Connection};

/// Static description of one link table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkTable {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub value_column: &'static str,
}

pub(crate) const MOVIE_GENRES: LinkTable = LinkTable {
    table: "movie_genres",
    owner_column: "movie_id",
    value_column: "genre_id",
};
pub(crate) const SHOW_GENRES: LinkTable = LinkTable {
    table: "show_genres",
    owner_column: "show_id",
    value_column: "genre_id",
};
pub(crate) const MOVIE_SUBTITLES: LinkTable = LinkTable {
    table: "movie_subtitles",
    owner_column: "movie_id",
    value_column: "language",
};
pub(crate) const SEASON_SUBTITLES: LinkTable = LinkTable {
    table: "season_subtitles",
    owner_column: "season_id",
    value_column: "language",
};
pub(crate) const BOOK_LANGUAGES: LinkTable = LinkTable {
    table: "book_languages",
    owner_column: "book_id",
    value_column: "language",
};

pub(crate) fn replace_ids(
    conn: &Connection,
    link: &LinkTable,
    owner: CatalogId,
    values: &[CatalogId],
) -> RepoResult<()> {
    let texts = values.iter().map(ToString::to_string).collect::<Vec<_>>();
    replace_values(conn, link, owner, &texts)
}

pub(crate) fn load_ids(
    conn: &Connection,
    link: &LinkTable,
    owner: CatalogId,
) -> RepoResult<Vec<CatalogId>> {
    load_values(conn, link, owner)?
        .iter()
        .map(|value| parse_uuid(value, link.value_column))
        .collect()
}

pub(crate) fn replace_languages(
    conn: &Connection,
    link: &LinkTable,
    owner: CatalogId,
    values: &[Language],
) -> RepoResult<()> {
    let texts = values
        .iter()
        .map(|language| language_to_db(*language).to_string())
        .collect::<Vec<_>>();
    replace_values(conn, link, owner, &texts)
}

pub(crate) fn load_languages(
    conn: &Connection,
    link: &LinkTable,
    owner: CatalogId,
) -> RepoResult<Vec<Language>> {
    load_values(conn, link, owner)?
        .iter()
        .map(|value| parse_language(value, link.value_column))
        .collect()
}

fn replace_values(
    conn: &Connection,
    link: &LinkTable,
    owner: CatalogId,
    values: &[String],
) -> RepoResult<()> {
    conn.execute(
        &format!("DELETE FROM {} WHERE {} = ?1;", link.table, link.owner_column),
        [owner.to_string()],
    )?;
    let sql = format!(
        "INSERT INTO {} ({}, {}, ordinal) VALUES (?1, ?2, ?3);",
        link.table, link.owner_column, link.value_column
    );
    let mut stmt = conn.prepare(&sql)?;
    for (ordinal, value) in values.iter().enumerate() {
        stmt.execute(params![owner.to_string(), value, ordinal as i64])?;
    }
    Ok(())
}

fn load_values(conn: &Connection, link: &LinkTable, owner: CatalogId) -> RepoResult<Vec<String>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1 ORDER BY ordinal ASC;",
        link.value_column, link.table, link.owner_column
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([owner.to_string()])?;
    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        values.push(row.get(0)?);
    }
    Ok(values)
}
