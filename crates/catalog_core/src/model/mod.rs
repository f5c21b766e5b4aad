//! Catalog domain model.
//!
//! # Responsibility
//! - Define the records persisted for every catalog collection.
//! - Describe ordering scope (`Scope`) shared by repositories and services.
//!
//! # Invariants
//! - Every record is identified by a stable `CatalogId`.
//! - `position` orders records among siblings of the same `Scope`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod book;
pub mod game;
pub mod genre;
pub mod movie;
pub mod music;
pub mod program;
pub mod show;

/// Stable identifier for every catalog record.
pub type CatalogId = Uuid;

/// Sibling group a record is ordered within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Top-level collection (movies, shows, games, ...).
    Root,
    /// Children of one parent record (seasons of a show, songs of music, ...).
    Parent(CatalogId),
}

/// Audio/subtitle language of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Cz,
    En,
    Fr,
    Jp,
    Sk,
}

/// Common accessors every persisted catalog record provides.
///
/// Services use this to run lifecycle validation and reorder records without
/// knowing the concrete collection.
pub trait CatalogEntity: Clone {
    /// Upper-case prefix of validation event keys, e.g. `MOVIE`.
    const PREFIX: &'static str;
    /// Display label used in validation messages, e.g. `Movie`.
    const LABEL: &'static str;

    fn id(&self) -> CatalogId;
    fn scope(&self) -> Scope;
    fn position(&self) -> i64;
    fn set_position(&mut self, position: i64);
}

macro_rules! impl_catalog_entity {
    ($ty:ty, $prefix:literal, $label:literal) => {
        impl $crate::model::CatalogEntity for $ty {
            const PREFIX: &'static str = $prefix;
            const LABEL: &'static str = $label;

            fn id(&self) -> $crate::model::CatalogId {
                self.id
            }

            fn scope(&self) -> $crate::model::Scope {
                $crate::model::Scope::Root
            }

            fn position(&self) -> i64 {
                self.position
            }

            fn set_position(&mut self, position: i64) {
                self.position = position;
            }
        }
    };
    ($ty:ty, $prefix:literal, $label:literal, parent = $parent:ident) => {
        impl $crate::model::CatalogEntity for $ty {
            const PREFIX: &'static str = $prefix;
            const LABEL: &'static str = $label;

            fn id(&self) -> $crate::model::CatalogId {
                self.id
            }

            fn scope(&self) -> $crate::model::Scope {
                $crate::model::Scope::Parent(self.$parent)
            }

            fn position(&self) -> i64 {
                self.position
            }

            fn set_position(&mut self, position: i64) {
                self.position = position;
            }
        }
    };
}

pub(crate) use impl_catalog_entity;

/// Formats a length in seconds as `H:MM:SS`, or `M:SS` below one hour.
///
/// Negative values are clamped to zero.
pub fn format_length(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}
