//! Field rules for games, music, songs, programs and books.

use super::fields::{check_not_blank, check_not_negative, check_positive, check_unique_languages};
use super::{ValidationReport, Validator};
use crate::model::book::Book;
use crate::model::game::Game;
use crate::model::music::{Music, Song};
use crate::model::program::Program;
use crate::model::CatalogEntity;
use crate::repo::{CatalogRepository, RepoResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct GameValidator;

impl Validator<Game> for GameValidator {
    fn validate_fields(&self, game: &Game, report: &mut ValidationReport) -> RepoResult<()> {
        check_not_blank(report, Game::PREFIX, "NAME", "Name", &game.name);
        check_positive(report, Game::PREFIX, "MEDIA_COUNT", "Count of media", game.media_count);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramValidator;

impl Validator<Program> for ProgramValidator {
    fn validate_fields(&self, program: &Program, report: &mut ValidationReport) -> RepoResult<()> {
        check_not_blank(report, Program::PREFIX, "NAME", "Name", &program.name);
        check_positive(
            report,
            Program::PREFIX,
            "MEDIA_COUNT",
            "Count of media",
            program.media_count,
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MusicValidator;

impl Validator<Music> for MusicValidator {
    fn validate_fields(&self, music: &Music, report: &mut ValidationReport) -> RepoResult<()> {
        check_not_blank(report, Music::PREFIX, "NAME", "Name", &music.name);
        check_positive(
            report,
            Music::PREFIX,
            "MEDIA_COUNT",
            "Count of media",
            music.media_count,
        );
        Ok(())
    }
}

/// Song rules; the owning music record must be stored.
pub struct SongValidator<M: CatalogRepository<Entity = Music>> {
    music: M,
}

impl<M: CatalogRepository<Entity = Music>> SongValidator<M> {
    pub fn new(music: M) -> Self {
        Self { music }
    }
}

impl<M: CatalogRepository<Entity = Music>> Validator<Song> for SongValidator<M> {
    fn validate_fields(&self, song: &Song, report: &mut ValidationReport) -> RepoResult<()> {
        if self.music.get(song.music_id)?.is_none() {
            report.push(Music::PREFIX, "NOT_EXIST", "Music doesn't exist.");
        }
        check_not_blank(report, Song::PREFIX, "NAME", "Name", &song.name);
        check_not_negative(report, Song::PREFIX, "LENGTH", "Length of song", song.length);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BookValidator;

impl Validator<Book> for BookValidator {
    fn validate_fields(&self, book: &Book, report: &mut ValidationReport) -> RepoResult<()> {
        check_not_blank(report, Book::PREFIX, "CZECH_NAME", "Czech name", &book.czech_name);
        check_not_blank(
            report,
            Book::PREFIX,
            "ORIGINAL_NAME",
            "Original name",
            &book.original_name,
        );
        if book.languages.is_empty() {
            report.push(Book::PREFIX, "LANGUAGES_EMPTY", "Languages mustn't be empty list.");
        }
        check_unique_languages(report, Book::PREFIX, "LANGUAGES", "Languages", &book.languages);
        Ok(())
    }
}
