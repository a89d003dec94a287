use std::sync::{Arc, Mutex};

use crate::workflows::catalog::InternshipId;

use super::domain::{ApplicationId, ApplicationRecord};

/// Append-only storage for accepted applications.
pub trait ApplicationRepository: Send + Sync {
    fn append(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn for_internship(
        &self,
        internship_id: InternshipId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("application {0} already recorded")]
    Conflict(ApplicationId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Session-scoped list of applications, discarded with the process.
#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application store poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn append(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict(record.id));
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.iter().find(|record| record.id == id).cloned())
    }

    fn for_internship(
        &self,
        internship_id: InternshipId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .iter()
            .filter(|record| record.internship_id == internship_id)
            .cloned()
            .collect())
    }
}
