//! Book record.

use super::{impl_catalog_entity, CatalogId, Language};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: CatalogId,
    pub czech_name: String,
    pub original_name: String,
    /// Languages the owned copies are written in, in display order.
    pub languages: Vec<Language>,
    pub note: String,
    pub position: i64,
}

impl Book {
    pub fn new(
        czech_name: impl Into<String>,
        original_name: impl Into<String>,
        languages: Vec<Language>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            czech_name: czech_name.into(),
            original_name: original_name.into(),
            languages,
            note: String::new(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Book, "BOOK", "Book");
