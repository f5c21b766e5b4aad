//! TV show, season and episode records.
//!
//! # Invariants
//! - A season belongs to exactly one show; an episode to exactly one season.
//! - Seasons are ordered per show, episodes per season.

use super::{impl_catalog_entity, CatalogId, Language};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: CatalogId,
    pub czech_name: String,
    pub original_name: String,
    pub csfd: String,
    pub imdb_code: Option<u32>,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub picture: Option<String>,
    pub note: String,
    pub position: i64,
    pub genres: Vec<CatalogId>,
}

impl Show {
    pub fn new(czech_name: impl Into<String>, original_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            czech_name: czech_name.into(),
            original_name: original_name.into(),
            csfd: String::new(),
            imdb_code: None,
            wiki_en: String::new(),
            wiki_cz: String::new(),
            picture: None,
            note: String::new(),
            position: 0,
            genres: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: CatalogId,
    pub show_id: CatalogId,
    pub number: i32,
    pub start_year: i32,
    pub end_year: i32,
    pub language: Language,
    pub subtitles: Vec<Language>,
    pub note: String,
    pub position: i64,
}

impl Season {
    pub fn new(
        show_id: CatalogId,
        number: i32,
        start_year: i32,
        end_year: i32,
        language: Language,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            show_id,
            number,
            start_year,
            end_year,
            language,
            subtitles: Vec::new(),
            note: String::new(),
            position: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: CatalogId,
    pub season_id: CatalogId,
    pub number: i32,
    pub name: String,
    /// Length in seconds.
    pub length: i32,
    pub note: String,
    pub position: i64,
}

impl Episode {
    pub fn new(season_id: CatalogId, number: i32, name: impl Into<String>, length: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            season_id,
            number,
            name: name.into(),
            length,
            note: String::new(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Show, "SHOW", "Show");
impl_catalog_entity!(Season, "SEASON", "Season", parent = show_id);
impl_catalog_entity!(Episode, "EPISODE", "Episode", parent = season_id);
