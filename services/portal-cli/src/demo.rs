use chrono::{Datelike, Local};
use internship_portal::error::AppError;
use internship_portal::workflows::applications::{
    DraftField, InMemoryApplicationRepository, SessionError,
};
use internship_portal::workflows::catalog::{CatalogAction, FilterUpdate, InternshipId};
use internship_portal::workflows::portal::Portal;
use tracing::info;

use crate::render;

const DEMO_INTERNSHIP: InternshipId = InternshipId(1);

pub(crate) async fn run_demo(
    portal: &mut Portal<InMemoryApplicationRepository>,
) -> Result<(), AppError> {
    println!("Internship portal demo");

    let steps = [
        ("Technology listings", FilterUpdate::category("Technology")),
        ("...that are remote", FilterUpdate::work_type("Remote")),
        ("Search everything for 'intern'", FilterUpdate::search("intern")),
    ];
    for (label, update) in steps {
        portal.dispatch(CatalogAction::SetFilters(update));
        println!("\n== {label}");
        render::listing(portal);
    }

    portal.dispatch(CatalogAction::ClearFilters);
    println!("\n== Filters cleared");
    println!("{}", portal.view().summary_label());

    let latency = portal.submission().simulated_latency;
    let graduation_year = (Local::now().year() + 1).to_string();

    println!("\n== Submitting an incomplete application");
    let mut session = portal.open_application(DEMO_INTERNSHIP)?;
    session.edit(DraftField::FirstName, "Ada")?;
    session.edit(DraftField::Email, "ada-at-example")?;
    match session.submit_with_latency(latency).await {
        Err(SessionError::Rejected(errors)) => render::validation_errors(&errors),
        Err(other) => return Err(other.into()),
        Ok(record) => info!(application_id = %record.id, "incomplete draft was accepted"),
    }

    println!("\n== Correcting the draft and resubmitting");
    let corrections = [
        (DraftField::LastName, "Lovelace"),
        (DraftField::Email, "ada@example.org"),
        (DraftField::Phone, "+44 20 7946 0958"),
        (DraftField::University, "University of London"),
        (DraftField::Major, "Mathematics"),
        (DraftField::GraduationYear, graduation_year.as_str()),
        (DraftField::Gpa, "3.8"),
        (DraftField::CoverLetter, "I enjoy turning notes into working programs."),
        (DraftField::Resume, "ada-lovelace.pdf"),
        (DraftField::Availability, "2-weeks"),
    ];
    for (field, value) in corrections {
        session.edit(field, value)?;
    }
    let record = session.submit_with_latency(latency).await?;
    let listing = portal.catalog().find(record.internship_id)?;
    render::submitted(&record, listing);
    println!("Success notice raised: {}", session.notice().is_raised());
    drop(session);

    println!("\n== A second application to the same internship");
    let mut second = portal.open_application(DEMO_INTERNSHIP)?;
    let mut draft = second.draft().clone();
    for (field, value) in corrections {
        draft.set(field, value);
    }
    draft.set(DraftField::FirstName, "Grace");
    draft.set(DraftField::LastName, "Hopper");
    second.fill(draft)?;
    let second_record = second.submit_with_latency(latency).await?;
    render::submitted(&second_record, listing);

    let applications = portal.applications()?;
    println!("\nApplications this session: {}", applications.len());
    for application in &applications {
        println!(
            "- {} | internship {} | {} | {}",
            application.id,
            application.internship_id,
            application.fields.full_name(),
            application.status.label()
        );
    }

    Ok(())
}
