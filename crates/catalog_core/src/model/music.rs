//! Music album and song records.

use super::{impl_catalog_entity, CatalogId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Music {
    pub id: CatalogId,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: i32,
    pub note: String,
    pub position: i64,
}

impl Music {
    pub fn new(name: impl Into<String>, media_count: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wiki_en: String::new(),
            wiki_cz: String::new(),
            media_count,
            note: String::new(),
            position: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: CatalogId,
    pub music_id: CatalogId,
    pub name: String,
    /// Length in seconds.
    pub length: i32,
    pub note: String,
    pub position: i64,
}

impl Song {
    pub fn new(music_id: CatalogId, name: impl Into<String>, length: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            music_id,
            name: name.into(),
            length,
            note: String::new(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Music, "MUSIC", "Music");
impl_catalog_entity!(Song, "SONG", "Song", parent = music_id);
