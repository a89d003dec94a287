use chrono::NaiveDate;

use super::domain::{InternshipId, InternshipRecord, WorkType};

struct SeedListing {
    id: u32,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    work_type: WorkType,
    category: &'static str,
    duration: &'static str,
    stipend: &'static str,
    description: &'static str,
    requirements: &'static [&'static str],
    posted: (i32, u32, u32),
    deadline: (i32, u32, u32),
}

const STANDARD_LISTINGS: &[SeedListing] = &[
    SeedListing {
        id: 1,
        title: "Frontend Developer Intern",
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        work_type: WorkType::Remote,
        category: "Technology",
        duration: "3 months",
        stipend: "$1500/month",
        description: "Join our frontend team to work on cutting-edge web applications using React and modern JavaScript frameworks.",
        requirements: &["React.js", "JavaScript", "HTML/CSS", "Git"],
        posted: (2024, 1, 15),
        deadline: (2024, 2, 15),
    },
    SeedListing {
        id: 2,
        title: "Marketing Intern",
        company: "Creative Agency",
        location: "New York, NY",
        work_type: WorkType::OnSite,
        category: "Marketing",
        duration: "6 months",
        stipend: "$1200/month",
        description: "Help develop and execute marketing campaigns for our diverse client portfolio.",
        requirements: &["Social Media", "Content Creation", "Analytics", "Communication"],
        posted: (2024, 1, 10),
        deadline: (2024, 2, 10),
    },
    SeedListing {
        id: 3,
        title: "Data Science Intern",
        company: "DataTech Solutions",
        location: "Austin, TX",
        work_type: WorkType::Hybrid,
        category: "Technology",
        duration: "4 months",
        stipend: "$1800/month",
        description: "Work with our data science team to analyze large datasets and build predictive models.",
        requirements: &["Python", "SQL", "Machine Learning", "Statistics"],
        posted: (2024, 1, 12),
        deadline: (2024, 2, 20),
    },
    SeedListing {
        id: 4,
        title: "UX Design Intern",
        company: "Design Studio",
        location: "Los Angeles, CA",
        work_type: WorkType::Remote,
        category: "Design",
        duration: "3 months",
        stipend: "$1400/month",
        description: "Create user-centered designs and prototypes for mobile and web applications.",
        requirements: &["Figma", "User Research", "Prototyping", "Design Thinking"],
        posted: (2024, 1, 8),
        deadline: (2024, 2, 8),
    },
    SeedListing {
        id: 5,
        title: "Finance Intern",
        company: "Investment Group",
        location: "Chicago, IL",
        work_type: WorkType::OnSite,
        category: "Finance",
        duration: "6 months",
        stipend: "$2000/month",
        description: "Support financial analysis and investment research for our portfolio companies.",
        requirements: &["Excel", "Financial Modeling", "Analysis", "Bloomberg Terminal"],
        posted: (2024, 1, 14),
        deadline: (2024, 2, 25),
    },
    SeedListing {
        id: 6,
        title: "Content Writer Intern",
        company: "Media Company",
        location: "Seattle, WA",
        work_type: WorkType::Remote,
        category: "Marketing",
        duration: "4 months",
        stipend: "$1100/month",
        description: "Create engaging content for blogs, social media, and marketing materials.",
        requirements: &["Writing", "SEO", "Content Strategy", "WordPress"],
        posted: (2024, 1, 11),
        deadline: (2024, 2, 18),
    },
];

pub(crate) fn standard_listings() -> Vec<InternshipRecord> {
    STANDARD_LISTINGS.iter().map(SeedListing::to_record).collect()
}

impl SeedListing {
    fn to_record(&self) -> InternshipRecord {
        InternshipRecord {
            id: InternshipId(self.id),
            title: self.title.to_string(),
            company: self.company.to_string(),
            location: self.location.to_string(),
            work_type: self.work_type,
            category: self.category.to_string(),
            duration: self.duration.to_string(),
            stipend: self.stipend.to_string(),
            description: self.description.to_string(),
            requirements: self.requirements.iter().map(|req| req.to_string()).collect(),
            posted: seed_date(self.posted),
            deadline: seed_date(self.deadline),
        }
    }
}

// Seed dates are literals above; an invalid one would surface as NaiveDate::MIN in tests.
fn seed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_listings_have_unique_ids_and_valid_dates() {
        let listings = standard_listings();
        assert_eq!(listings.len(), 6);

        let ids: HashSet<_> = listings.iter().map(|record| record.id).collect();
        assert_eq!(ids.len(), listings.len());

        for record in &listings {
            assert_ne!(record.posted, NaiveDate::MIN, "{} posted date", record.title);
            assert!(record.deadline > record.posted, "{} deadline", record.title);
        }
    }
}
