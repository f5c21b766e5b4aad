//! Show, season and episode field rules.

use super::fields::{
    check_genres, check_imdb_code, check_not_blank, check_not_negative, check_positive,
    check_unique_languages, check_year,
};
use super::{ValidationReport, Validator};
use crate::model::show::{Episode, Season, Show};
use crate::model::CatalogEntity;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::{CatalogRepository, RepoResult};

pub struct ShowValidator<G: GenreRepository> {
    genres: G,
}

impl<G: GenreRepository> ShowValidator<G> {
    pub fn new(genres: G) -> Self {
        Self { genres }
    }
}

impl<G: GenreRepository> Validator<Show> for ShowValidator<G> {
    fn validate_fields(&self, show: &Show, report: &mut ValidationReport) -> RepoResult<()> {
        let prefix = Show::PREFIX;
        check_not_blank(report, prefix, "CZECH_NAME", "Czech name", &show.czech_name);
        check_not_blank(
            report,
            prefix,
            "ORIGINAL_NAME",
            "Original name",
            &show.original_name,
        );
        check_imdb_code(report, prefix, show.imdb_code);

        let existing = self.genres.existing_ids(&show.genres)?;
        check_genres(report, prefix, &show.genres, &existing);
        Ok(())
    }
}

/// Season rules; the owning show must be stored.
pub struct SeasonValidator<S: CatalogRepository<Entity = Show>> {
    shows: S,
}

impl<S: CatalogRepository<Entity = Show>> SeasonValidator<S> {
    pub fn new(shows: S) -> Self {
        Self { shows }
    }
}

impl<S: CatalogRepository<Entity = Show>> Validator<Season> for SeasonValidator<S> {
    fn validate_fields(&self, season: &Season, report: &mut ValidationReport) -> RepoResult<()> {
        let prefix = Season::PREFIX;
        if self.shows.get(season.show_id)?.is_none() {
            report.push(Show::PREFIX, "NOT_EXIST", "Show doesn't exist.");
        }
        check_positive(report, prefix, "NUMBER", "Number of season", season.number);
        check_year(report, prefix, "START_YEAR", "Starting year", season.start_year);
        check_year(report, prefix, "END_YEAR", "Ending year", season.end_year);
        if season.start_year > season.end_year {
            report.push(
                prefix,
                "YEARS_NOT_VALID",
                "Starting year mustn't be greater than ending year.",
            );
        }
        check_unique_languages(report, prefix, "SUBTITLES", "Subtitles", &season.subtitles);
        Ok(())
    }
}

/// Episode rules; the owning season must be stored.
pub struct EpisodeValidator<S: CatalogRepository<Entity = Season>> {
    seasons: S,
}

impl<S: CatalogRepository<Entity = Season>> EpisodeValidator<S> {
    pub fn new(seasons: S) -> Self {
        Self { seasons }
    }
}

impl<S: CatalogRepository<Entity = Season>> Validator<Episode> for EpisodeValidator<S> {
    fn validate_fields(&self, episode: &Episode, report: &mut ValidationReport) -> RepoResult<()> {
        let prefix = Episode::PREFIX;
        if self.seasons.get(episode.season_id)?.is_none() {
            report.push(Season::PREFIX, "NOT_EXIST", "Season doesn't exist.");
        }
        check_positive(report, prefix, "NUMBER", "Number of episode", episode.number);
        check_not_blank(report, prefix, "NAME", "Name", &episode.name);
        check_not_negative(report, prefix, "LENGTH", "Length of episode", episode.length);
        Ok(())
    }
}
