//! Program (application software) record.

use super::{impl_catalog_entity, CatalogId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: CatalogId,
    pub name: String,
    pub wiki_en: String,
    pub wiki_cz: String,
    pub media_count: i32,
    pub crack: bool,
    pub serial_key: bool,
    pub other_data: String,
    pub note: String,
    pub position: i64,
}

impl Program {
    pub fn new(name: impl Into<String>, media_count: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wiki_en: String::new(),
            wiki_cz: String::new(),
            media_count,
            crack: false,
            serial_key: false,
            other_data: String::new(),
            note: String::new(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Program, "PROGRAM", "Program");
