use std::io;

use internship_portal::error::AppError;
use internship_portal::workflows::applications::{
    ApplicationRecord, ApplicationRepository, ValidationErrors,
};
use internship_portal::workflows::catalog::{
    InternshipDetailView, InternshipId, InternshipRecord, ListingCard,
};
use internship_portal::workflows::portal::Portal;
use serde::Serialize;

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn listing<R>(portal: &Portal<R>)
where
    R: ApplicationRepository + 'static,
{
    let criteria = portal.criteria();
    if criteria.is_active() {
        let mut active = Vec::new();
        if let Some(category) = &criteria.category {
            active.push(format!("category={category}"));
        }
        if let Some(location) = &criteria.location {
            active.push(format!("location~{location}"));
        }
        if let Some(work_type) = &criteria.work_type {
            active.push(format!("type={work_type}"));
        }
        if let Some(search) = &criteria.search {
            active.push(format!("search~{search}"));
        }
        println!("Filters: {}", active.join(", "));
    }

    println!("{}", portal.view().summary_label());

    let cards = portal.cards();
    if cards.is_empty() {
        println!("No internships found. Try adjusting your search criteria or filters.");
        return;
    }

    for card in &cards {
        print_card(card);
    }
}

fn print_card(card: &ListingCard) {
    println!("\n[{}] {} | {}", card.id, card.title, card.company);
    println!(
        "    {} | {} | {} | {} | {}",
        card.location, card.work_type, card.category, card.duration, card.stipend
    );
    let mut skills = card.requirement_preview.join(", ");
    if card.more_requirements > 0 {
        skills.push_str(&format!(" +{} more", card.more_requirements));
    }
    println!("    Skills: {skills}");
}

pub(crate) fn detail(view: &InternshipDetailView) {
    println!("{} at {}", view.title, view.company);
    println!(
        "{} | {} | {} | {} | {}",
        view.location, view.work_type, view.category, view.duration, view.stipend
    );
    println!("\n{}", view.description);
    println!("\nRequirements");
    for requirement in &view.requirements {
        println!("- {requirement}");
    }
    println!("\nImportant dates");
    println!("- Posted: {}", view.posted);
    println!("- Deadline: {}", view.deadline);
    if !view.accepting_applications {
        println!("\nThe application deadline has passed.");
    }
}

pub(crate) fn not_found(id: InternshipId) {
    eprintln!("Internship {id} was not found. Run `list` to browse available internships.");
}

pub(crate) fn validation_errors(errors: &ValidationErrors) {
    eprintln!("Please fix the following before submitting:");
    for (key, message) in errors.messages() {
        eprintln!("- {key}: {message}");
    }
}

pub(crate) fn submitted(record: &ApplicationRecord, listing: &InternshipRecord) {
    println!("Application Submitted Successfully!");
    println!(
        "Thank you for applying to the {} position at {}. We'll review your application and get back to you soon.",
        listing.title, listing.company
    );
    println!(
        "Reference {} | submitted {} | status {}",
        record.id,
        record.submitted_at.format("%Y-%m-%d %H:%M UTC"),
        record.status.label()
    );
}
