//! End-to-end application scenarios through the portal container and form sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};

use internship_portal::config::SubmissionConfig;
use internship_portal::error::AppError;
use internship_portal::workflows::applications::{
    ApplicationDraft, DraftField, FieldError, InMemoryApplicationRepository, SessionError,
};
use internship_portal::workflows::catalog::{Catalog, CatalogError, InternshipId};
use internship_portal::workflows::portal::Portal;

fn portal() -> Portal<InMemoryApplicationRepository> {
    Portal::new(
        Catalog::seeded(),
        Arc::new(InMemoryApplicationRepository::default()),
        SubmissionConfig {
            simulated_latency: Duration::from_millis(1000),
            notice_ttl: Duration::from_secs(5),
        },
    )
}

fn fill_valid(draft: &mut ApplicationDraft, first_name: &str) {
    let year = (Local::now().year() + 2).to_string();
    let edits = [
        (DraftField::FirstName, first_name),
        (DraftField::LastName, "Hopper"),
        (DraftField::Email, "grace@navy.example.com"),
        (DraftField::Phone, "555-0199"),
        (DraftField::University, "Yale"),
        (DraftField::Major, "Mathematics"),
        (DraftField::GraduationYear, year.as_str()),
        (DraftField::Gpa, "3.9"),
        (DraftField::CoverLetter, "Compilers are my thing."),
        (DraftField::Availability, "flexible"),
    ];
    for (field, value) in edits {
        draft.set(field, value);
    }
}

#[test]
fn detail_and_form_signal_not_found_for_unknown_ids() {
    let portal = portal();
    let today = NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date");

    let detail = portal.detail(InternshipId(1), today).expect("listing exists");
    assert_eq!(detail.company, "TechCorp Inc.");
    assert!(detail.accepting_applications);

    let missing = portal.detail(InternshipId(42), today).map_err(AppError::from);
    assert!(missing.expect_err("unknown id").is_not_found());
    assert!(matches!(
        portal.open_application(InternshipId(42)),
        Err(CatalogError::NotFound(InternshipId(42)))
    ));
}

#[test]
fn missing_first_name_and_bad_email_are_reported_together() {
    let portal = portal();
    let mut session = portal.open_application(InternshipId(1)).expect("form opens");
    let mut draft = ApplicationDraft::default();
    fill_valid(&mut draft, "");
    draft.set(DraftField::Email, "bad");
    session.fill(draft).expect("editable");

    match session.submit() {
        Err(SessionError::Rejected(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get(DraftField::FirstName), Some(FieldError::Required));
            assert_eq!(errors.get(DraftField::Email).map(FieldError::kind), Some("invalid format"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(portal.applications().expect("list").is_empty());
}

#[tokio::test(start_paused = true)]
async fn accepted_applications_accumulate_in_the_session_list() {
    let portal = portal();
    let latency = portal.submission().simulated_latency;

    let mut first = portal.open_application(InternshipId(3)).expect("form opens");
    let mut draft = ApplicationDraft::default();
    fill_valid(&mut draft, "Grace");
    first.fill(draft).expect("editable");
    let first_record = first.submit_with_latency(latency).await.expect("accepted");

    let mut second = portal.open_application(InternshipId(3)).expect("form opens");
    let mut draft = ApplicationDraft::default();
    fill_valid(&mut draft, "Katherine");
    second.fill(draft).expect("editable");
    let second_record = second.submit_with_latency(latency).await.expect("accepted");

    assert_eq!(first_record.internship_id, InternshipId(3));
    assert_eq!(first_record.status.label(), "submitted");
    assert_ne!(first_record.id, second_record.id);

    let stored = portal.applications().expect("list");
    assert_eq!(stored, vec![first_record, second_record]);
}
