use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use crate::workflows::catalog::{CatalogError, InternshipId};

use super::domain::{ApplicationDraft, ApplicationRecord, DraftField};
use super::notice::{NoticeFlag, SubmissionNotice};
use super::repository::ApplicationRepository;
use super::service::{ApplicationService, ApplicationServiceError};
use super::validation::ValidationErrors;

/// Where an open application form stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Accepting edits. `errors` holds the outcome of the last failed submit.
    Editing { errors: ValidationErrors },
    /// Terminal: the draft became this record.
    Submitted(ApplicationRecord),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("this application has already been submitted")]
    AlreadySubmitted,
    #[error("application has errors: {0}")]
    Rejected(ValidationErrors),
    #[error(transparent)]
    Service(ApplicationServiceError),
}

impl From<ApplicationServiceError> for SessionError {
    fn from(value: ApplicationServiceError) -> Self {
        match value {
            ApplicationServiceError::Validation(errors) => Self::Rejected(errors),
            other => Self::Service(other),
        }
    }
}

/// One open application form, bound to a single internship.
///
/// Dropping the session (navigating away) discards the draft and cancels the pending
/// clear of the success notice.
pub struct FormSession<R> {
    service: Arc<ApplicationService<R>>,
    internship_id: InternshipId,
    draft: ApplicationDraft,
    state: SessionState,
    notice: SubmissionNotice,
}

impl<R> FormSession<R>
where
    R: ApplicationRepository + 'static,
{
    /// Open a blank form. Fails when the internship is not in the catalog.
    pub fn open(
        service: Arc<ApplicationService<R>>,
        internship_id: InternshipId,
        notice_ttl: Duration,
    ) -> Result<Self, CatalogError> {
        service.catalog().find(internship_id)?;
        Ok(Self {
            service,
            internship_id,
            draft: ApplicationDraft::default(),
            state: SessionState::Editing {
                errors: ValidationErrors::default(),
            },
            notice: SubmissionNotice::new(notice_ttl),
        })
    }

    pub fn internship_id(&self) -> InternshipId {
        self.internship_id
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Errors from the last failed submit, minus fields edited since.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match &self.state {
            SessionState::Editing { errors } => Some(errors),
            SessionState::Submitted(_) => None,
        }
    }

    pub fn record(&self) -> Option<&ApplicationRecord> {
        match &self.state {
            SessionState::Submitted(record) => Some(record),
            SessionState::Editing { .. } => None,
        }
    }

    pub fn notice(&self) -> NoticeFlag {
        self.notice.flag()
    }

    pub fn edit(&mut self, field: DraftField, value: impl Into<String>) -> Result<(), SessionError> {
        let SessionState::Editing { errors } = &mut self.state else {
            return Err(SessionError::AlreadySubmitted);
        };
        errors.clear(field);
        self.draft.set(field, value);
        Ok(())
    }

    /// Replace the whole draft, e.g. when a form is restored from a saved payload.
    pub fn fill(&mut self, draft: ApplicationDraft) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }
        self.draft = draft;
        Ok(())
    }

    pub fn submit(&mut self) -> Result<ApplicationRecord, SessionError> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }

        match self.service.submit(self.internship_id, &self.draft) {
            Ok(record) => Ok(self.accept(record)),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Validate, wait out `latency` as a stand-in for the network round trip, then submit.
    /// Invalid drafts return without waiting.
    pub async fn submit_with_latency(
        &mut self,
        latency: Duration,
    ) -> Result<ApplicationRecord, SessionError> {
        if !matches!(self.state, SessionState::Editing { .. }) {
            return Err(SessionError::AlreadySubmitted);
        }

        if let Err(err) = self.service.check(self.internship_id, &self.draft, Utc::now()) {
            return Err(self.reject(err));
        }

        tokio::time::sleep(latency).await;
        self.submit()
    }

    fn accept(&mut self, record: ApplicationRecord) -> ApplicationRecord {
        self.notice.raise();
        self.state = SessionState::Submitted(record.clone());
        record
    }

    fn reject(&mut self, err: ApplicationServiceError) -> SessionError {
        let err = SessionError::from(err);
        if let SessionError::Rejected(errors) = &err {
            debug!(
                internship_id = %self.internship_id,
                failing = errors.len(),
                "form kept open with errors"
            );
            self.state = SessionState::Editing {
                errors: errors.clone(),
            };
        }
        err
    }
}
