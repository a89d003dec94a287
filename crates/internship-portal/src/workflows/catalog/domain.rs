use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category values offered as filter suggestions.
pub const CATEGORY_SUGGESTIONS: [&str; 4] = ["Technology", "Marketing", "Design", "Finance"];

/// Identifier shared between listings, detail views and applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InternshipId(pub u32);

impl fmt::Display for InternshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InternshipId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<u32>().map(Self)
    }
}

/// Where the intern is expected to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkType {
    #[serde(rename = "Remote")]
    Remote,
    #[serde(rename = "On-site")]
    OnSite,
    #[serde(rename = "Hybrid")]
    Hybrid,
}

impl WorkType {
    pub const ALL: [WorkType; 3] = [WorkType::Remote, WorkType::OnSite, WorkType::Hybrid];

    pub const fn label(self) -> &'static str {
        match self {
            WorkType::Remote => "Remote",
            WorkType::OnSite => "On-site",
            WorkType::Hybrid => "Hybrid",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown work type '{0}' (expected Remote, On-site or Hybrid)")]
pub struct UnknownWorkType(pub String);

impl FromStr for WorkType {
    type Err = UnknownWorkType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        WorkType::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownWorkType(trimmed.to_string()))
    }
}

/// A single advertised internship. Never mutated once the catalog is seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipRecord {
    pub id: InternshipId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub work_type: WorkType,
    pub category: String,
    pub duration: String,
    pub stipend: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted: NaiveDate,
    pub deadline: NaiveDate,
}

/// Errors raised by catalog lookups and construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("internship {0} not found")]
    NotFound(InternshipId),
    #[error("internship id {0} appears more than once")]
    DuplicateId(InternshipId),
}

/// Ordered, read-only collection of listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<InternshipRecord>,
}

impl Catalog {
    pub fn new(records: Vec<InternshipRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CatalogError::DuplicateId(record.id));
            }
        }
        Ok(Self { records })
    }

    /// The built-in listings the portal ships with.
    pub fn seeded() -> Self {
        Self {
            records: super::seed::standard_listings(),
        }
    }

    pub fn records(&self) -> &[InternshipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: InternshipId) -> Result<&InternshipRecord, CatalogError> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}
