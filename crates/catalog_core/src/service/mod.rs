//! Service layer for catalog use-cases.
//!
//! Each collection gets a `CatalogService` bound to its SQLite repository and
//! validator. The `*_service` constructors wire both from one connection.

pub mod catalog_service;

pub use catalog_service::{CatalogService, ServiceError, ServiceResult};

use crate::repo::book_repo::SqliteBookRepository;
use crate::repo::game_repo::SqliteGameRepository;
use crate::repo::genre_repo::SqliteGenreRepository;
use crate::repo::movie_repo::SqliteMovieRepository;
use crate::repo::music_repo::{SqliteMusicRepository, SqliteSongRepository};
use crate::repo::program_repo::SqliteProgramRepository;
use crate::repo::show_repo::{
    SqliteEpisodeRepository, SqliteSeasonRepository, SqliteShowRepository,
};
use crate::repo::RepoResult;
use crate::validation::{
    BookValidator, EpisodeValidator, GameValidator, GenreValidator, MovieValidator,
    MusicValidator, ProgramValidator, SeasonValidator, ShowValidator, SongValidator,
};
use rusqlite::Connection;

pub type GenreService<'conn> = CatalogService<SqliteGenreRepository<'conn>, GenreValidator>;
pub type MovieService<'conn> =
    CatalogService<SqliteMovieRepository<'conn>, MovieValidator<SqliteGenreRepository<'conn>>>;
pub type ShowService<'conn> =
    CatalogService<SqliteShowRepository<'conn>, ShowValidator<SqliteGenreRepository<'conn>>>;
pub type SeasonService<'conn> =
    CatalogService<SqliteSeasonRepository<'conn>, SeasonValidator<SqliteShowRepository<'conn>>>;
pub type EpisodeService<'conn> = CatalogService<
    SqliteEpisodeRepository<'conn>,
    EpisodeValidator<SqliteSeasonRepository<'conn>>,
>;
pub type GameService<'conn> = CatalogService<SqliteGameRepository<'conn>, GameValidator>;
pub type MusicService<'conn> = CatalogService<SqliteMusicRepository<'conn>, MusicValidator>;
pub type SongService<'conn> =
    CatalogService<SqliteSongRepository<'conn>, SongValidator<SqliteMusicRepository<'conn>>>;
pub type ProgramService<'conn> = CatalogService<SqliteProgramRepository<'conn>, ProgramValidator>;
pub type BookService<'conn> = CatalogService<SqliteBookRepository<'conn>, BookValidator>;

pub fn genre_service(conn: &Connection) -> RepoResult<GenreService<'_>> {
    Ok(CatalogService::new(
        SqliteGenreRepository::try_new(conn)?,
        GenreValidator,
    ))
}

pub fn movie_service(conn: &Connection) -> RepoResult<MovieService<'_>> {
    Ok(CatalogService::new(
        SqliteMovieRepository::try_new(conn)?,
        MovieValidator::new(SqliteGenreRepository::try_new(conn)?),
    ))
}

pub fn show_service(conn: &Connection) -> RepoResult<ShowService<'_>> {
    Ok(CatalogService::new(
        SqliteShowRepository::try_new(conn)?,
        ShowValidator::new(SqliteGenreRepository::try_new(conn)?),
    ))
}

pub fn season_service(conn: &Connection) -> RepoResult<SeasonService<'_>> {
    Ok(CatalogService::new(
        SqliteSeasonRepository::try_new(conn)?,
        SeasonValidator::new(SqliteShowRepository::try_new(conn)?),
    ))
}

pub fn episode_service(conn: &Connection) -> RepoResult<EpisodeService<'_>> {
    Ok(CatalogService::new(
        SqliteEpisodeRepository::try_new(conn)?,
        EpisodeValidator::new(SqliteSeasonRepository::try_new(conn)?),
    ))
}

pub fn game_service(conn: &Connection) -> RepoResult<GameService<'_>> {
    Ok(CatalogService::new(
        SqliteGameRepository::try_new(conn)?,
        GameValidator,
    ))
}

pub fn music_service(conn: &Connection) -> RepoResult<MusicService<'_>> {
    Ok(CatalogService::new(
        SqliteMusicRepository::try_new(conn)?,
        MusicValidator,
    ))
}

pub fn song_service(conn: &Connection) -> RepoResult<SongService<'_>> {
    Ok(CatalogService::new(
        SqliteSongRepository::try_new(conn)?,
        SongValidator::new(SqliteMusicRepository::try_new(conn)?),
    ))
}

pub fn program_service(conn: &Connection) -> RepoResult<ProgramService<'_>> {
    Ok(CatalogService::new(
        SqliteProgramRepository::try_new(conn)?,
        ProgramValidator,
    ))
}

pub fn book_service(conn: &Connection) -> RepoResult<BookService<'_>> {
    Ok(CatalogService::new(
        SqliteBookRepository::try_new(conn)?,
        BookValidator,
    ))
}
