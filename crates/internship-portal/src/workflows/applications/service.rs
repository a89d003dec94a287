use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Utc};
use tracing::{debug, info};

use crate::workflows::catalog::{Catalog, CatalogError, InternshipId};

use super::domain::{
    ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus, ValidatedFields,
};
use super::repository::{ApplicationRepository, RepositoryError};
use super::validation::{validate, ValidationErrors};

/// Validates drafts against the catalog and records accepted applications.
pub struct ApplicationService<R> {
    catalog: Arc<Catalog>,
    repository: Arc<R>,
    sequence: IdSequence,
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(catalog: Arc<Catalog>, repository: Arc<R>) -> Self {
        Self {
            catalog,
            repository,
            sequence: IdSequence::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Check a draft for `internship_id` without recording anything.
    pub fn check(
        &self,
        internship_id: InternshipId,
        draft: &ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<ValidatedFields, ApplicationServiceError> {
        self.catalog.find(internship_id)?;
        let current_year = now.with_timezone(&Local).year();
        validate(draft, current_year).map_err(|errors| {
            debug!(%internship_id, failing = errors.len(), "application draft rejected");
            ApplicationServiceError::Validation(errors)
        })
    }

    /// Submit a draft, returning the stored record.
    pub fn submit(
        &self,
        internship_id: InternshipId,
        draft: &ApplicationDraft,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.submit_at(internship_id, draft, Utc::now())
    }

    pub fn submit_at(
        &self,
        internship_id: InternshipId,
        draft: &ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let fields = self.check(internship_id, draft, now)?;
        let record = ApplicationRecord {
            id: self.sequence.next(now),
            internship_id,
            fields,
            submitted_at: now,
            status: ApplicationStatus::Submitted,
        };

        let stored = self.repository.append(record)?;
        info!(
            application_id = %stored.id,
            %internship_id,
            "application submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, id: ApplicationId) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.repository
            .fetch(id)?
            .ok_or(ApplicationServiceError::UnknownApplication(id))
    }

    pub fn applications(&self) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn applications_for(
        &self,
        internship_id: InternshipId,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.for_internship(internship_id)?)
    }
}

/// Millisecond timestamps, bumped when two submissions land in the same millisecond.
#[derive(Debug, Default)]
struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    fn next(&self, now: DateTime<Utc>) -> ApplicationId {
        let candidate = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let next = candidate.max(current + 1);
            match self
                .last
                .compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return ApplicationId(next),
                Err(observed) => current = observed,
            }
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("application {0} not found")]
    UnknownApplication(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
