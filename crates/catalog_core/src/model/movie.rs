//! Movie record and its physical media.
//!
//! # Invariants
//! - `media` numbers are 1-based and unique within one movie.
//! - Stored media are listed by `number`, whatever order they were added in.
//! - `genres` reference existing `Genre` ids; order is preserved.

use super::{impl_catalog_entity, CatalogId, Language};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One physical medium (disc, file) of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medium {
    /// 1-based medium number.
    pub number: i32,
    /// Length in seconds.
    pub length: i32,
}

impl Medium {
    pub fn new(number: i32, length: i32) -> Self {
        Self { number, length }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: CatalogId,
    pub czech_name: String,
    pub original_name: String,
    pub year: i32,
    pub language: Language,
    pub subtitles: Vec<Language>,
    pub media: Vec<Medium>,
    /// ČSFD page identifier, empty when unknown.
    pub csfd: String,
    /// IMDB numeric code without the `tt` prefix.
    pub imdb_code: Option<u32>,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub picture: Option<String>,
    pub note: String,
    pub position: i64,
    pub genres: Vec<CatalogId>,
}

impl Movie {
    /// Creates a movie with a generated id and empty optional data.
    pub fn new(
        czech_name: impl Into<String>,
        original_name: impl Into<String>,
        year: i32,
        language: Language,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            czech_name: czech_name.into(),
            original_name: original_name.into(),
            year,
            language,
            subtitles: Vec::new(),
            media: Vec::new(),
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

    /// Sum of all media lengths in seconds.
    pub fn total_length(&self) -> i64 {
        self.media.iter().map(|medium| i64::from(medium.length)).sum()
    }
}

impl_catalog_entity!(Movie, "MOVIE", "Movie");
