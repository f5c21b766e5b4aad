//! Genre record.

use super::{impl_catalog_entity, CatalogId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre label shared by movies and shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: CatalogId,
    pub name: String,
    pub position: i64,
}

impl Genre {
    /// Creates a genre with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a genre with a caller-provided id.
    pub fn with_id(id: CatalogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
        }
    }
}

impl_catalog_entity!(Genre, "GENRE", "Genre");
