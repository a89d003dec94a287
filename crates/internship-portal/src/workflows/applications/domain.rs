use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::catalog::InternshipId;

/// Identifier assigned to an accepted application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app-{}", self.0)
    }
}

/// Notice period the applicant can start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "immediately")]
    Immediately,
    #[serde(rename = "2-weeks")]
    TwoWeeks,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "flexible")]
    Flexible,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::Immediately,
        Availability::TwoWeeks,
        Availability::OneMonth,
        Availability::Flexible,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Availability::Immediately => "immediately",
            Availability::TwoWeeks => "2-weeks",
            Availability::OneMonth => "1-month",
            Availability::Flexible => "flexible",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Availability::Immediately => "Immediately",
            Availability::TwoWeeks => "2 weeks notice",
            Availability::OneMonth => "1 month notice",
            Availability::Flexible => "Flexible",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown availability '{0}' (expected immediately, 2-weeks, 1-month or flexible)")]
pub struct UnknownAvailability(pub String);

impl FromStr for Availability {
    type Err = UnknownAvailability;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Availability::ALL
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownAvailability(trimmed.to_string()))
    }
}

/// Reference to an uploaded resume. Only the file name is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAttachment {
    pub file_name: String,
}

impl ResumeAttachment {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.trim().rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Education section. Year and GPA stay as entered until validation parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDetails {
    pub university: String,
    pub major: String,
    pub graduation_year: String,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryDetails {
    pub cover_letter: String,
    #[serde(default)]
    pub resume: Option<ResumeAttachment>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub availability: Option<Availability>,
    #[serde(default)]
    pub experience: Option<String>,
}

/// In-progress application for one internship, as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub personal: PersonalDetails,
    pub education: EducationDetails,
    pub supplementary: SupplementaryDetails,
}

impl ApplicationDraft {
    /// Apply a raw form edit. Blank text clears optional fields; an unrecognized
    /// availability label clears the selection.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::FirstName => self.personal.first_name = value,
            DraftField::LastName => self.personal.last_name = value,
            DraftField::Email => self.personal.email = value,
            DraftField::Phone => self.personal.phone = value,
            DraftField::University => self.education.university = value,
            DraftField::Major => self.education.major = value,
            DraftField::GraduationYear => self.education.graduation_year = value,
            DraftField::Gpa => self.education.gpa = optional(value),
            DraftField::CoverLetter => self.supplementary.cover_letter = value,
            DraftField::Resume => {
                self.supplementary.resume = optional(value).map(ResumeAttachment::new)
            }
            DraftField::LinkedinUrl => self.supplementary.linkedin_url = optional(value),
            DraftField::PortfolioUrl => self.supplementary.portfolio_url = optional(value),
            DraftField::Availability => {
                self.supplementary.availability = value.parse::<Availability>().ok()
            }
            DraftField::Experience => self.supplementary.experience = optional(value),
        }
    }
}

fn optional(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Form field names, used as keys of the validation error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
    Phone,
    University,
    Major,
    GraduationYear,
    Gpa,
    CoverLetter,
    Resume,
    LinkedinUrl,
    PortfolioUrl,
    Availability,
    Experience,
}

impl DraftField {
    pub const REQUIRED: [DraftField; 8] = [
        DraftField::FirstName,
        DraftField::LastName,
        DraftField::Email,
        DraftField::Phone,
        DraftField::University,
        DraftField::Major,
        DraftField::GraduationYear,
        DraftField::CoverLetter,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            DraftField::FirstName => "firstName",
            DraftField::LastName => "lastName",
            DraftField::Email => "email",
            DraftField::Phone => "phone",
            DraftField::University => "university",
            DraftField::Major => "major",
            DraftField::GraduationYear => "graduationYear",
            DraftField::Gpa => "gpa",
            DraftField::CoverLetter => "coverLetter",
            DraftField::Resume => "resume",
            DraftField::LinkedinUrl => "linkedinUrl",
            DraftField::PortfolioUrl => "portfolioUrl",
            DraftField::Availability => "availability",
            DraftField::Experience => "experience",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Draft fields after validation: trimmed, with year and GPA parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub university: String,
    pub major: String,
    pub graduation_year: i32,
    pub gpa: Option<f64>,
    pub cover_letter: String,
    pub resume: Option<ResumeAttachment>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub availability: Option<Availability>,
    pub experience: Option<String>,
}

impl ValidatedFields {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
        }
    }
}

/// Accepted application. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub internship_id: InternshipId,
    #[serde(flatten)]
    pub fields: ValidatedFields,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_round_trips_labels() {
        for option in Availability::ALL {
            assert_eq!(option.label().parse::<Availability>(), Ok(option));
        }
        assert!("next year".parse::<Availability>().is_err());
    }

    #[test]
    fn resume_extension_is_lowercased() {
        assert_eq!(
            ResumeAttachment::new("CV.Final.DOCX").extension().as_deref(),
            Some("docx")
        );
        assert_eq!(ResumeAttachment::new("resume").extension(), None);
        assert_eq!(ResumeAttachment::new(".pdf").extension(), None);
    }

    #[test]
    fn set_routes_edits_to_sections() {
        let mut draft = ApplicationDraft::default();
        draft.set(DraftField::FirstName, "Ada");
        draft.set(DraftField::Gpa, "3.7");
        draft.set(DraftField::Resume, "ada.pdf");
        draft.set(DraftField::Availability, "2-weeks");
        draft.set(DraftField::LinkedinUrl, "   ");

        assert_eq!(draft.personal.first_name, "Ada");
        assert_eq!(draft.education.gpa.as_deref(), Some("3.7"));
        assert_eq!(
            draft.supplementary.resume,
            Some(ResumeAttachment::new("ada.pdf"))
        );
        assert_eq!(draft.supplementary.availability, Some(Availability::TwoWeeks));
        assert_eq!(draft.supplementary.linkedin_url, None);
    }

    #[test]
    fn field_keys_match_serialized_names() {
        for field in DraftField::REQUIRED {
            let json = serde_json::to_value(field).expect("serializes");
            assert_eq!(json, serde_json::Value::String(field.key().to_string()));
        }
    }
}
