//! Genre field rules.

use super::fields::check_not_blank;
use super::{ValidationReport, Validator};
use crate::model::genre::Genre;
use crate::model::CatalogEntity;
use crate::repo::RepoResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct GenreValidator;

impl Validator<Genre> for GenreValidator {
    fn validate_fields(&self, genre: &Genre, report: &mut ValidationReport) -> RepoResult<()> {
        check_not_blank(report, Genre::PREFIX, "NAME", "Name", &genre.name);
        Ok(())
    }
}
