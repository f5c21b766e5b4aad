//! Field rules shared by collection validators.

use super::ValidationReport;
use crate::model::{CatalogId, Language};
use chrono::Datelike;
use std::collections::HashSet;

pub(crate) const MIN_YEAR: i32 = 1930;
pub(crate) const MAX_IMDB_CODE: u32 = 9_999_999;

/// Current calendar year, the upper bound of release years.
pub(crate) fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub(crate) fn check_not_blank(
    report: &mut ValidationReport,
    prefix: &str,
    field: &str,
    label: &str,
    value: &str,
) {
    if value.trim().is_empty() {
        report.push(
            prefix,
            &format!("{field}_EMPTY"),
            format!("{label} mustn't be empty string."),
        );
    }
}

pub(crate) fn check_year(report: &mut ValidationReport, prefix: &str, field: &str, label: &str, year: i32) {
    let max_year = current_year();
    if !(MIN_YEAR..=max_year).contains(&year) {
        report.push(
            prefix,
            &format!("{field}_NOT_VALID"),
            format!("{label} must be between {MIN_YEAR} and {max_year}."),
        );
    }
}

pub(crate) fn check_positive(report: &mut ValidationReport, prefix: &str, field: &str, label: &str, value: i32) {
    if value <= 0 {
        report.push(
            prefix,
            &format!("{field}_NOT_POSITIVE"),
            format!("{label} must be positive number."),
        );
    }
}

pub(crate) fn check_not_negative(
    report: &mut ValidationReport,
    prefix: &str,
    field: &str,
    label: &str,
    value: i32,
) {
    if value < 0 {
        report.push(
            prefix,
            &format!("{field}_NEGATIVE"),
            format!("{label} mustn't be negative number."),
        );
    }
}

pub(crate) fn check_imdb_code(report: &mut ValidationReport, prefix: &str, code: Option<u32>) {
    if let Some(code) = code {
        if !(1..=MAX_IMDB_CODE).contains(&code) {
            report.push(
                prefix,
                "IMDB_CODE_NOT_VALID",
                format!("IMDB code must be between 1 and {MAX_IMDB_CODE}."),
            );
        }
    }
}

pub(crate) fn check_unique_languages(
    report: &mut ValidationReport,
    prefix: &str,
    field: &str,
    label: &str,
    values: &[Language],
) {
    let mut seen = HashSet::new();
    if values.iter().any(|language| !seen.insert(*language)) {
        report.push(
            prefix,
            &format!("{field}_DUPLICATE"),
            format!("{label} mustn't contain duplicate values."),
        );
    }
}

/// Genres must be present, unique and stored; `existing` is the stored subset.
pub(crate) fn check_genres(
    report: &mut ValidationReport,
    prefix: &str,
    genres: &[CatalogId],
    existing: &HashSet<CatalogId>,
) {
    if genres.is_empty() {
        report.push(prefix, "GENRES_EMPTY", "Genres mustn't be empty list.");
        return;
    }

    let mut seen = HashSet::new();
    if genres.iter().any(|id| !seen.insert(*id)) {
        report.push(
            prefix,
            "GENRES_DUPLICATE",
            "Genres mustn't contain duplicate values.",
        );
    }

    if genres.iter().any(|id| !existing.contains(id)) {
        report.push("GENRE", "NOT_EXIST", "Genre doesn't exist.");
    }
}
