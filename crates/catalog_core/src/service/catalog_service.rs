//! Generic catalog use-case service.
//!
//! # Responsibility
//! - Provide the uniform create/read/update/delete/reorder operations for
//!   every collection.
//! - Run lifecycle and field validation before any write.
//!
//! # Invariants
//! - No write happens when validation reports any event.
//! - New records are appended at the end of their scope.
//! - Move up/down swaps positions with the adjacent sibling only.

use crate::model::{CatalogEntity, CatalogId, Scope};
use crate::repo::{CatalogRepository, RepoError};
use crate::validation::{
    check_lifecycle, check_same_scope, ValidationEvent, ValidationReport, ValidationType,
    Validator,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// One or more validation rules failed; nothing was written.
    Validation(Vec<ValidationEvent>),
    Repo(RepoError),
}

impl ServiceError {
    /// Returns whether a validation event with `key` was reported.
    pub fn has_event(&self, key: &str) -> bool {
        match self {
            Self::Validation(events) => events.iter().any(|event| event.key == key),
            Self::Repo(_) => false,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(events) => {
                write!(f, "validation failed:")?;
                for event in events {
                    write!(f, " [{event}]")?;
                }
                Ok(())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Validation(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Collection facade combining one repository with its validator.
pub struct CatalogService<R, V>
where
    R: CatalogRepository,
    V: Validator<R::Entity>,
{
    repo: R,
    validator: V,
}

impl<R, V> CatalogService<R, V>
where
    R: CatalogRepository,
    V: Validator<R::Entity>,
{
    pub fn new(repo: R, validator: V) -> Self {
        Self { repo, validator }
    }

    /// Removes every record of the collection, children included.
    pub fn new_data(&self) -> ServiceResult<()> {
        self.repo.clear()?;
        info!(
            "event=catalog_new_data module=service status=ok kind={}",
            R::Entity::PREFIX
        );
        Ok(())
    }

    /// Lists records of one scope in display order.
    pub fn get_all(&self, scope: Scope) -> ServiceResult<Vec<R::Entity>> {
        Ok(self.repo.list(scope)?)
    }

    pub fn get(&self, id: CatalogId) -> ServiceResult<Option<R::Entity>> {
        Ok(self.repo.get(id)?)
    }

    /// Validates and stores a new record at the end of its scope.
    ///
    /// Returns the record as read back from storage, with its assigned
    /// position.
    pub fn add(&self, entity: &R::Entity) -> ServiceResult<R::Entity> {
        self.validate_record(entity, &[ValidationType::New, ValidationType::Deep], "add")?;

        let mut created = entity.clone();
        created.set_position(self.repo.next_position(entity.scope())?);
        self.repo.insert(&created)?;
        let stored = self.repo.get(created.id())?.ok_or(RepoError::NotFound {
            label: R::Entity::LABEL,
            id: created.id(),
        })?;
        info!(
            "event=catalog_add module=service status=ok kind={} id={} position={}",
            R::Entity::PREFIX,
            stored.id(),
            stored.position()
        );
        Ok(stored)
    }

    /// Validates and replaces stored data; position is kept and a changed
    /// parent is rejected.
    pub fn update(&self, entity: &R::Entity) -> ServiceResult<()> {
        self.validate_record(entity, &[ValidationType::Exists, ValidationType::Deep], "update")?;

        self.repo.update(entity)?;
        info!(
            "event=catalog_update module=service status=ok kind={} id={}",
            R::Entity::PREFIX,
            entity.id()
        );
        Ok(())
    }

    pub fn remove(&self, id: CatalogId) -> ServiceResult<()> {
        self.load_checked(id, ValidationType::Exists, "remove")?;
        self.repo.delete(id)?;
        info!(
            "event=catalog_remove module=service status=ok kind={} id={id}",
            R::Entity::PREFIX
        );
        Ok(())
    }

    /// Copies a record (and its children) to the end of its scope.
    pub fn duplicate(&self, id: CatalogId) -> ServiceResult<R::Entity> {
        let source = self.load_checked(id, ValidationType::Exists, "duplicate")?;
        let position = self.repo.next_position(source.scope())?;
        let copy = self.repo.duplicate(&source, position)?;
        info!(
            "event=catalog_duplicate module=service status=ok kind={} source_id={id} id={}",
            R::Entity::PREFIX,
            copy.id()
        );
        Ok(copy)
    }

    pub fn move_up(&self, id: CatalogId) -> ServiceResult<()> {
        self.move_by(id, ValidationType::Up, "move_up")
    }

    pub fn move_down(&self, id: CatalogId) -> ServiceResult<()> {
        self.move_by(id, ValidationType::Down, "move_down")
    }

    /// Renumbers the scope to `0..n` keeping the current order.
    pub fn update_positions(&self, scope: Scope) -> ServiceResult<()> {
        let ordered = self
            .repo
            .list(scope)?
            .iter()
            .map(CatalogEntity::id)
            .collect::<Vec<_>>();
        self.repo.renumber(&ordered)?;
        info!(
            "event=catalog_update_positions module=service status=ok kind={} count={}",
            R::Entity::PREFIX,
            ordered.len()
        );
        Ok(())
    }

    fn move_by(
        &self,
        id: CatalogId,
        direction: ValidationType,
        operation: &'static str,
    ) -> ServiceResult<()> {
        let entity = self.load_checked(id, direction, operation)?;
        let siblings = self.sibling_ids(entity.scope())?;
        let index = siblings
            .iter()
            .position(|sibling| *sibling == id)
            .ok_or(RepoError::NotFound {
                label: R::Entity::LABEL,
                id,
            })?;
        let neighbor = match direction {
            ValidationType::Up => index.checked_sub(1).and_then(|prev| siblings.get(prev)),
            _ => siblings.get(index + 1),
        }
        .copied()
        .ok_or(RepoError::NotFound {
            label: R::Entity::LABEL,
            id,
        })?;

        self.repo.swap_positions(id, neighbor)?;
        info!(
            "event=catalog_{operation} module=service status=ok kind={} id={id} neighbor_id={neighbor}",
            R::Entity::PREFIX
        );
        Ok(())
    }

    /// Loads a stored record, failing validation when it is missing or when
    /// the requested position check does not hold.
    fn load_checked(
        &self,
        id: CatalogId,
        check: ValidationType,
        operation: &'static str,
    ) -> ServiceResult<R::Entity> {
        let entity = self.repo.get(id)?;
        let siblings = match (&entity, check) {
            (Some(entity), ValidationType::Up | ValidationType::Down) => {
                self.sibling_ids(entity.scope())?
            }
            _ => Vec::new(),
        };

        let checks = [ValidationType::Exists, check];
        let types = if check == ValidationType::Exists {
            &checks[..1]
        } else {
            &checks[..]
        };
        let mut report = ValidationReport::new();
        check_lifecycle::<R::Entity>(id, entity.is_some(), &siblings, types, &mut report);
        self.ensure_valid(operation, report)?;

        entity.ok_or(ServiceError::Repo(RepoError::NotFound {
            label: R::Entity::LABEL,
            id,
        }))
    }

    /// Runs lifecycle checks for a record carried by the caller, plus field
    /// rules when `Deep` is requested.
    fn validate_record(
        &self,
        entity: &R::Entity,
        types: &[ValidationType],
        operation: &'static str,
    ) -> ServiceResult<()> {
        let stored = self.repo.get(entity.id())?;
        let mut report = ValidationReport::new();
        check_lifecycle::<R::Entity>(entity.id(), stored.is_some(), &[], types, &mut report);
        if let Some(stored) = &stored {
            if types.contains(&ValidationType::Exists) {
                check_same_scope(stored, entity, &mut report);
            }
        }
        if types.contains(&ValidationType::Deep) {
            self.validator.validate_fields(entity, &mut report)?;
        }
        self.ensure_valid(operation, report)
    }

    fn sibling_ids(&self, scope: Scope) -> ServiceResult<Vec<CatalogId>> {
        Ok(self
            .repo
            .list(scope)?
            .iter()
            .map(CatalogEntity::id)
            .collect())
    }

    fn ensure_valid(&self, operation: &'static str, report: ValidationReport) -> ServiceResult<()> {
        if report.is_ok() {
            return Ok(());
        }
        warn!(
            "event=catalog_{operation} module=service status=rejected kind={} error_code=validation_failed events={}",
            R::Entity::PREFIX,
            report.events().len()
        );
        Err(ServiceError::Validation(report.into_events()))
    }
}
