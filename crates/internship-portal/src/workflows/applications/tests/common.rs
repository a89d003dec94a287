use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::workflows::applications::domain::{
    ApplicationDraft, Availability, EducationDetails, PersonalDetails, ResumeAttachment,
    SupplementaryDetails,
};
use crate::workflows::applications::{ApplicationService, InMemoryApplicationRepository};
use crate::workflows::catalog::Catalog;

pub(super) const YEAR: i32 = 2026;

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(YEAR, 6, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn this_year() -> i32 {
    Local::now().year()
}

pub(super) fn valid_draft() -> ApplicationDraft {
    valid_draft_for_year(YEAR + 1)
}

pub(super) fn valid_draft_for_year(graduation_year: i32) -> ApplicationDraft {
    ApplicationDraft {
        personal: PersonalDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: "+1 (555) 010-4477".to_string(),
        },
        education: EducationDetails {
            university: "State University".to_string(),
            major: "Computer Science".to_string(),
            graduation_year: graduation_year.to_string(),
            gpa: Some("3.9".to_string()),
        },
        supplementary: SupplementaryDetails {
            cover_letter: "I would love to build interfaces with your team.".to_string(),
            resume: Some(ResumeAttachment::new("ada-lovelace.pdf")),
            linkedin_url: Some("https://www.linkedin.com/in/ada".to_string()),
            portfolio_url: None,
            availability: Some(Availability::Immediately),
            experience: Some("  Analytical engine notes  ".to_string()),
        },
    }
}

pub(super) fn service() -> (
    Arc<ApplicationService<InMemoryApplicationRepository>>,
    Arc<InMemoryApplicationRepository>,
) {
    let repository = Arc::new(InMemoryApplicationRepository::default());
    let service = ApplicationService::new(Arc::new(Catalog::seeded()), repository.clone());
    (Arc::new(service), repository)
}
