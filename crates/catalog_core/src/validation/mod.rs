//! Validation of catalog records before persistence.
//!
//! # Responsibility
//! - Collect every violated rule as a keyed `ValidationEvent`.
//! - Provide lifecycle checks (`New`, `Exists`, `Up`, `Down`) shared by all
//!   collections; field rules (`Deep`) live in per-collection validators.
//!
//! # Invariants
//! - Event keys are `<PREFIX>_<PROBLEM>`, e.g. `MOVIE_YEAR_NOT_VALID`.
//! - Validation never stops at the first failure; a missing record only
//!   skips the position checks that need it.

use crate::model::{CatalogEntity, CatalogId};
use crate::repo::RepoResult;
use serde::Serialize;
use std::fmt::{Display, Formatter};

mod fields;
pub mod collections;
pub mod genre;
pub mod movie;
pub mod show;

pub use collections::{BookValidator, GameValidator, MusicValidator, ProgramValidator, SongValidator};
pub use genre::GenreValidator;
pub use movie::MovieValidator;
pub use show::{EpisodeValidator, SeasonValidator, ShowValidator};

/// Rule group requested by a service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationType {
    /// Record must not be stored yet.
    New,
    /// Record must be stored.
    Exists,
    /// Record must not be first among its siblings.
    Up,
    /// Record must not be last among its siblings.
    Down,
    /// Field-level and referential rules.
    Deep,
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationEvent {
    pub key: String,
    pub message: String,
}

impl Display for ValidationEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Ordered collection of validation events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    events: Vec<ValidationEvent>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one event keyed `<prefix>_<problem>`.
    pub fn push(&mut self, prefix: &str, problem: &str, message: impl Into<String>) {
        self.events.push(ValidationEvent {
            key: format!("{prefix}_{problem}"),
            message: message.into(),
        });
    }

    pub fn is_ok(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[ValidationEvent] {
        &self.events
    }

    pub fn contains(&self, key: &str) -> bool {
        self.events.iter().any(|event| event.key == key)
    }

    pub fn into_events(self) -> Vec<ValidationEvent> {
        self.events
    }
}

/// Field-level (`Deep`) rules of one collection.
///
/// Implementations may query repositories for referential checks, hence the
/// `RepoResult` wrapper around an otherwise infallible report update.
pub trait Validator<E: CatalogEntity> {
    fn validate_fields(&self, entity: &E, report: &mut ValidationReport) -> RepoResult<()>;
}

/// Runs lifecycle checks for `id`.
///
/// `stored` tells whether the id exists; `siblings` are the ids of its scope
/// in display order.
pub fn check_lifecycle<E: CatalogEntity>(
    id: CatalogId,
    stored: bool,
    siblings: &[CatalogId],
    types: &[ValidationType],
    report: &mut ValidationReport,
) {
    for validation_type in types {
        match validation_type {
            ValidationType::New if stored => {
                report.push(E::PREFIX, "ALREADY_EXISTS", format!("{} already exists.", E::LABEL));
            }
            ValidationType::Exists if !stored => {
                report.push(E::PREFIX, "NOT_EXIST", format!("{} doesn't exist.", E::LABEL));
            }
            ValidationType::Up if stored => {
                if siblings.first() == Some(&id) {
                    report.push(
                        E::PREFIX,
                        "NOT_MOVABLE",
                        format!("{} can't be moved up.", E::LABEL),
                    );
                }
            }
            ValidationType::Down if stored => {
                if siblings.last() == Some(&id) {
                    report.push(
                        E::PREFIX,
                        "NOT_MOVABLE",
                        format!("{} can't be moved down.", E::LABEL),
                    );
                }
            }
            _ => {}
        }
    }
}

/// Updates keep the record under its stored parent.
pub fn check_same_scope<E: CatalogEntity>(stored: &E, updated: &E, report: &mut ValidationReport) {
    if stored.scope() != updated.scope() {
        report.push(
            E::PREFIX,
            "PARENT_CHANGED",
            format!("{} can't be moved to another parent.", E::LABEL),
        );
    }
}
