use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Datelike, Local};
use regex::Regex;
use serde::Serialize;

use super::domain::{ApplicationDraft, DraftField, ResumeAttachment, ValidatedFields};

/// Furthest graduation year accepted, relative to the current year.
pub const GRADUATION_WINDOW_YEARS: i32 = 10;
pub const GPA_MAX: f64 = 4.0;
pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

// Deliberately loose: ASCII digits, whitespace, hyphens and parentheses with an optional leading +.
fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("phone pattern compiles"))
}

/// Problem with a single form field. The message is shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("GPA must be a number between 0 and 4")]
    InvalidGpa,
    #[error("Please enter a valid graduation year")]
    InvalidGraduationYear,
    #[error("Resume must be a .pdf, .doc or .docx file")]
    UnsupportedResume,
    #[error("Please enter a full URL starting with http:// or https://")]
    InvalidUrl,
}

impl FieldError {
    /// Short machine-facing classification of the failure.
    pub const fn kind(self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidEmail | FieldError::InvalidPhone | FieldError::InvalidUrl => {
                "invalid format"
            }
            FieldError::InvalidGpa | FieldError::InvalidGraduationYear => "out of range",
            FieldError::UnsupportedResume => "unsupported file type",
        }
    }
}

/// Every failing field of a draft, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(BTreeMap<DraftField, FieldError>);

impl ValidationErrors {
    pub fn get(&self, field: DraftField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Field key to display message, the shape the form renders.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, error)| (field.key(), error.to_string()))
            .collect()
    }

    pub(crate) fn clear(&mut self, field: DraftField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    fn insert(&mut self, field: DraftField, error: FieldError) {
        self.0.insert(field, error);
    }
}

/// Validate against the current calendar year.
pub fn validate_now(draft: &ApplicationDraft) -> Result<ValidatedFields, ValidationErrors> {
    validate(draft, Local::now().year())
}

/// Check every rule and report all failures together. Nothing in `draft` is modified.
pub fn validate(
    draft: &ApplicationDraft,
    current_year: i32,
) -> Result<ValidatedFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let personal = &draft.personal;
    let education = &draft.education;
    let supplementary = &draft.supplementary;

    let first_name = required(&personal.first_name, DraftField::FirstName, &mut errors);
    let last_name = required(&personal.last_name, DraftField::LastName, &mut errors);
    let email = required(&personal.email, DraftField::Email, &mut errors);
    let phone = required(&personal.phone, DraftField::Phone, &mut errors);
    let university = required(&education.university, DraftField::University, &mut errors);
    let major = required(&education.major, DraftField::Major, &mut errors);
    let year_text = required(
        &education.graduation_year,
        DraftField::GraduationYear,
        &mut errors,
    );
    let cover_letter = required(&supplementary.cover_letter, DraftField::CoverLetter, &mut errors);

    if !email.is_empty() && !email_pattern().is_match(&email) {
        errors.insert(DraftField::Email, FieldError::InvalidEmail);
    }

    if !phone.is_empty() && !phone_pattern().is_match(&phone) {
        errors.insert(DraftField::Phone, FieldError::InvalidPhone);
    }

    let graduation_year = if year_text.is_empty() {
        None
    } else {
        let parsed = parse_graduation_year(&year_text, current_year);
        if parsed.is_none() {
            errors.insert(DraftField::GraduationYear, FieldError::InvalidGraduationYear);
        }
        parsed
    };

    let gpa = match trimmed(education.gpa.as_deref()) {
        Some(raw) => {
            let parsed = parse_gpa(&raw);
            if parsed.is_none() {
                errors.insert(DraftField::Gpa, FieldError::InvalidGpa);
            }
            parsed
        }
        None => None,
    };

    if let Some(resume) = &supplementary.resume {
        if !resume_supported(resume) {
            errors.insert(DraftField::Resume, FieldError::UnsupportedResume);
        }
    }

    let linkedin_url = trimmed(supplementary.linkedin_url.as_deref());
    if linkedin_url.as_deref().is_some_and(|url| !looks_like_url(url)) {
        errors.insert(DraftField::LinkedinUrl, FieldError::InvalidUrl);
    }
    let portfolio_url = trimmed(supplementary.portfolio_url.as_deref());
    if portfolio_url.as_deref().is_some_and(|url| !looks_like_url(url)) {
        errors.insert(DraftField::PortfolioUrl, FieldError::InvalidUrl);
    }

    match graduation_year {
        Some(graduation_year) if errors.is_empty() => Ok(ValidatedFields {
            first_name,
            last_name,
            email,
            phone,
            university,
            major,
            graduation_year,
            gpa,
            cover_letter,
            resume: supplementary.resume.clone(),
            linkedin_url,
            portfolio_url,
            availability: supplementary.availability,
            experience: trimmed(supplementary.experience.as_deref()),
        }),
        _ => Err(errors),
    }
}

fn required(value: &str, field: DraftField, errors: &mut ValidationErrors) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(field, FieldError::Required);
    }
    value.to_string()
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_graduation_year(raw: &str, current_year: i32) -> Option<i32> {
    let year = raw.parse::<i32>().ok()?;
    (current_year..=current_year + GRADUATION_WINDOW_YEARS)
        .contains(&year)
        .then_some(year)
}

fn parse_gpa(raw: &str) -> Option<f64> {
    let gpa = raw.parse::<f64>().ok()?;
    (gpa.is_finite() && (0.0..=GPA_MAX).contains(&gpa)).then_some(gpa)
}

fn resume_supported(resume: &ResumeAttachment) -> bool {
    resume
        .extension()
        .is_some_and(|ext| RESUME_EXTENSIONS.contains(&ext.as_str()))
}

fn looks_like_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    ["http://", "https://"]
        .into_iter()
        .filter_map(|scheme| lower.strip_prefix(scheme))
        .any(|rest| !rest.is_empty() && !rest.contains(char::is_whitespace))
}
