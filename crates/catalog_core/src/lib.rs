//! Core domain logic for the media catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{CatalogConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{init_logging, LogLevel, LogSettings, LoggingError};
pub use model::book::Book;
pub use model::game::Game;
pub use model::genre::Genre;
pub use model::movie::{Medium, Movie};
pub use model::music::{Music, Song};
pub use model::program::Program;
pub use model::show::{Episode, Season, Show};
pub use model::{format_length, CatalogEntity, CatalogId, Language, Scope};
pub use repo::stats_repo::{CatalogStats, SqliteStatsRepository, StatsRepository};
pub use repo::{CatalogRepository, RepoError, RepoResult};
pub use service::{CatalogService, ServiceError, ServiceResult};
pub use validation::{ValidationEvent, ValidationType};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
