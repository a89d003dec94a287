//! Application intake: typed drafts, field validation, and the submission flow.

pub mod domain;
mod notice;
pub mod repository;
pub mod service;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus, Availability,
    DraftField, EducationDetails, PersonalDetails, ResumeAttachment, SupplementaryDetails,
    ValidatedFields,
};
pub use notice::{NoticeFlag, ScheduledClear, SubmissionNotice};
pub use repository::{ApplicationRepository, InMemoryApplicationRepository, RepositoryError};
pub use service::{ApplicationService, ApplicationServiceError};
pub use session::{FormSession, SessionError, SessionState};
pub use validation::{validate, validate_now, FieldError, ValidationErrors};
