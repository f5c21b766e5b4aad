//! Game record.

use super::{impl_catalog_entity, CatalogId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Game with install media and extras bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: CatalogId,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: i32,
    pub crack: bool,
    pub serial_key: bool,
    pub patch: bool,
    pub trainer: bool,
    pub trainer_data: bool,
    pub editor: bool,
    pub saves: bool,
    /// Free-form description of any other bundled data.
    pub other_data: String,
    pub note: String,
    pub position: i64,
}

impl Game {
    pub fn new(name: impl Into<String>, media_count: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wiki_en: String::new(),
            wiki_cz: String::new(),
            media_count,
            crack: false,
            serial_key: false,
            patch: false,
            trainer: false,
            trainer_data: false,
            editor: false,
            saves: false,
            other_data: String::new(),
            note: String::new(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Game, "GAME", "Game");
