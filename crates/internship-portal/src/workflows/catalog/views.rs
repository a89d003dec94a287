use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{InternshipId, InternshipRecord};

const CARD_REQUIREMENT_PREVIEW: usize = 3;

/// Condensed listing entry: the first few requirements plus an overflow count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingCard {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub work_type: &'static str,
    pub category: String,
    pub duration: String,
    pub stipend: String,
    pub requirement_preview: Vec<String>,
    pub more_requirements: usize,
}

impl ListingCard {
    pub fn from_record(record: &InternshipRecord) -> Self {
        let requirement_preview: Vec<String> = record
            .requirements
            .iter()
            .take(CARD_REQUIREMENT_PREVIEW)
            .cloned()
            .collect();
        let more_requirements = record.requirements.len() - requirement_preview.len();

        Self {
            id: record.id,
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            work_type: record.work_type.label(),
            category: record.category.clone(),
            duration: record.duration.clone(),
            stipend: record.stipend.clone(),
            requirement_preview,
            more_requirements,
        }
    }
}

/// Everything the detail page shows for one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternshipDetailView {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub work_type: &'static str,
    pub category: String,
    pub duration: String,
    pub stipend: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted: NaiveDate,
    pub deadline: NaiveDate,
    pub accepting_applications: bool,
}

impl InternshipDetailView {
    pub fn new(record: &InternshipRecord, today: NaiveDate) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            company: record.company.clone(),
            location: record.location.clone(),
            work_type: record.work_type.label(),
            category: record.category.clone(),
            duration: record.duration.clone(),
            stipend: record.stipend.clone(),
            description: record.description.clone(),
            requirements: record.requirements.clone(),
            posted: record.posted,
            deadline: record.deadline,
            accepting_applications: today <= record.deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::catalog::Catalog;

    #[test]
    fn card_previews_first_three_requirements() {
        let catalog = Catalog::seeded();
        let record = catalog.find(InternshipId(1)).expect("seeded listing");
        let card = ListingCard::from_record(record);

        assert_eq!(card.requirement_preview, vec!["React.js", "JavaScript", "HTML/CSS"]);
        assert_eq!(card.more_requirements, 1);
        assert_eq!(card.work_type, "Remote");
    }

    #[test]
    fn detail_marks_closed_listings() {
        let catalog = Catalog::seeded();
        let record = catalog.find(InternshipId(2)).expect("seeded listing");

        let open = InternshipDetailView::new(record, record.deadline);
        assert!(open.accepting_applications);

        let late = record.deadline.succ_opt().expect("valid date");
        assert!(!InternshipDetailView::new(record, late).accepting_applications);
    }
}
