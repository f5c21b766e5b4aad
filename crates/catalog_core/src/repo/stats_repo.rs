//! Aggregate catalog statistics.
//!
//! # Invariants
//! - Totals over empty collections are `0`, never `NULL`.
//! - Lengths are summed in seconds.

use super::{ensure_connection_ready, RepoResult};
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MovieStats {
    pub count: i64,
    pub media_count: i64,
    pub total_length: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShowStats {
    pub count: i64,
    pub seasons_count: i64,
    pub episodes_count: i64,
    pub total_length: i64,
}

/// Shared shape for games and programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MediaStats {
    pub count: i64,
    pub media_count: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MusicStats {
    pub count: i64,
    pub media_count: i64,
    pub songs_count: i64,
    pub total_length: i64,
}

/// Snapshot of every collection's statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub genres_count: i64,
    pub movies: MovieStats,
    pub shows: ShowStats,
    pub games: MediaStats,
    pub music: MusicStats,
    pub programs: MediaStats,
    pub books_count: i64,
}

pub trait StatsRepository {
    fn movie_stats(&self) -> RepoResult<MovieStats>;
    fn show_stats(&self) -> RepoResult<ShowStats>;
    fn game_stats(&self) -> RepoResult<MediaStats>;
    fn music_stats(&self) -> RepoResult<MusicStats>;
    fn program_stats(&self) -> RepoResult<MediaStats>;
    fn genres_count(&self) -> RepoResult<i64>;
    fn books_count(&self) -> RepoResult<i64>;

    /// Collects every collection statistic in one snapshot.
    fn catalog_stats(&self) -> RepoResult<CatalogStats> {
        Ok(CatalogStats {
            genres_count: self.genres_count()?,
            movies: self.movie_stats()?,
            shows: self.show_stats()?,
            games: self.game_stats()?,
            music: self.music_stats()?,
            programs: self.program_stats()?,
            books_count: self.books_count()?,
        })
    }
}

pub struct SqliteStatsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatsRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                "genres",
                "movies",
                "movie_media",
                "shows",
                "seasons",
                "episodes",
                "games",
                "music",
                "songs",
                "programs",
                "books",
            ],
        )?;
        Ok(Self { conn })
    }

    fn scalar(&self, sql: &str) -> RepoResult<i64> {
        Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
    }
}

impl StatsRepository for SqliteStatsRepository<'_> {
    fn movie_stats(&self) -> RepoResult<MovieStats> {
        Ok(MovieStats {
            count: self.scalar("SELECT COUNT(*) FROM movies;")?,
            media_count: self.scalar("SELECT COUNT(*) FROM movie_media;")?,
            total_length: self.scalar("SELECT COALESCE(SUM(length), 0) FROM movie_media;")?,
        })
    }

    fn show_stats(&self) -> RepoResult<ShowStats> {
        Ok(ShowStats {
            count: self.scalar("SELECT COUNT(*) FROM shows;")?,
            seasons_count: self.scalar("SELECT COUNT(*) FROM seasons;")?,
            episodes_count: self.scalar("SELECT COUNT(*) FROM episodes;")?,
            total_length: self.scalar("SELECT COALESCE(SUM(length), 0) FROM episodes;")?,
        })
    }

    fn game_stats(&self) -> RepoResult<MediaStats> {
        Ok(MediaStats {
            count: self.scalar("SELECT COUNT(*) FROM games;")?,
            media_count: self.scalar("SELECT COALESCE(SUM(media_count), 0) FROM games;")?,
        })
    }

    fn music_stats(&self) -> RepoResult<MusicStats> {
        Ok(MusicStats {
            count: self.scalar("SELECT COUNT(*) FROM music;")?,
            media_count: self.scalar("SELECT COALESCE(SUM(media_count), 0) FROM music;")?,
            songs_count: self.scalar("SELECT COUNT(*) FROM songs;")?,
            total_length: self.scalar("SELECT COALESCE(SUM(length), 0) FROM songs;")?,
        })
    }

    fn program_stats(&self) -> RepoResult<MediaStats> {
        Ok(MediaStats {
            count: self.scalar("SELECT COUNT(*) FROM programs;")?,
            media_count: self.scalar("SELECT COALESCE(SUM(media_count), 0) FROM programs;")?,
        })
    }

    fn genres_count(&self) -> RepoResult<i64> {
        self.scalar("SELECT COUNT(*) FROM genres;")
    }

    fn books_count(&self) -> RepoResult<i64> {
        self.scalar("SELECT COUNT(*) FROM books;")
    }
}
