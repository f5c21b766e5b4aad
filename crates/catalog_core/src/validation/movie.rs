//! Movie field rules.
//!
//! # Invariants
//! - Media must be non-empty with unique positive numbers and non-negative lengths.
//! - Each rule is reported once per movie, however many media break it.
//! - Genres must reference stored genres.

use super::fields::{
    check_genres, check_imdb_code, check_not_blank, check_not_negative, check_positive,
    check_unique_languages, check_year,
};
use super::{ValidationReport, Validator};
use crate::model::movie::Movie;
use crate::model::CatalogEntity;
use crate::repo::genre_repo::GenreRepository;
use crate::repo::RepoResult;
use std::collections::HashSet;

pub struct MovieValidator<G: GenreRepository> {
    genres: G,
}

impl<G: GenreRepository> MovieValidator<G> {
    pub fn new(genres: G) -> Self {
        Self { genres }
    }
}

impl<G: GenreRepository> Validator<Movie> for MovieValidator<G> {
    fn validate_fields(&self, movie: &Movie, report: &mut ValidationReport) -> RepoResult<()> {
        let prefix = Movie::PREFIX;
        check_not_blank(report, prefix, "CZECH_NAME", "Czech name", &movie.czech_name);
        check_not_blank(
            report,
            prefix,
            "ORIGINAL_NAME",
            "Original name",
            &movie.original_name,
        );
        check_year(report, prefix, "YEAR", "Year", movie.year);
        check_unique_languages(report, prefix, "SUBTITLES", "Subtitles", &movie.subtitles);
        check_imdb_code(report, prefix, movie.imdb_code);

        if movie.media.is_empty() {
            report.push(prefix, "MEDIA_EMPTY", "Media mustn't be empty list.");
        }
        if let Some(lowest) = movie.media.iter().map(|medium| medium.number).min() {
            check_positive(report, "MEDIUM", "NUMBER", "Number of medium", lowest);
        }
        if let Some(shortest) = movie.media.iter().map(|medium| medium.length).min() {
            check_not_negative(report, "MEDIUM", "LENGTH", "Length of medium", shortest);
        }
        let mut numbers = HashSet::new();
        if movie.media.iter().any(|medium| !numbers.insert(medium.number)) {
            report.push(
                prefix,
                "MEDIA_DUPLICATE",
                "Media mustn't contain duplicate numbers.",
            );
        }

        let existing = self.genres.existing_ids(&movie.genres)?;
        check_genres(report, prefix, &movie.genres, &existing);
        Ok(())
    }
}
