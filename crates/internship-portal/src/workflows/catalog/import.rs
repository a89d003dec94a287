use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::domain::{
    Catalog, CatalogError, InternshipId, InternshipRecord, UnknownWorkType, WorkType,
};

/// Failure to build a catalog from a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    WorkType {
        row: usize,
        #[source]
        source: UnknownWorkType,
    },
    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    Date { row: usize, value: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Builds a [`Catalog`] from a CSV export with one listing per row.
///
/// Expected headers: `id,title,company,location,type,category,duration,stipend,description,
/// requirements,posted,deadline`. Requirements are separated by `;`.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Catalog, CatalogImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), listings = catalog.len(), "catalog imported");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (index, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            // Header is line 1.
            records.push(row?.into_record(index + 2)?);
        }

        Ok(Catalog::new(records)?)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: u32,
    title: String,
    company: String,
    location: String,
    #[serde(rename = "type")]
    work_type: String,
    category: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    stipend: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    requirements: String,
    posted: String,
    deadline: String,
}

impl CatalogRow {
    fn into_record(self, row: usize) -> Result<InternshipRecord, CatalogImportError> {
        let work_type = self
            .work_type
            .parse::<WorkType>()
            .map_err(|source| CatalogImportError::WorkType { row, source })?;
        let posted = parse_date(&self.posted, row)?;
        let deadline = parse_date(&self.deadline, row)?;
        let requirements = self
            .requirements
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        Ok(InternshipRecord {
            id: InternshipId(self.id),
            title: self.title,
            company: self.company,
            location: self.location,
            work_type,
            category: self.category,
            duration: self.duration,
            stipend: self.stipend,
            description: self.description,
            requirements,
            posted,
            deadline,
        })
    }
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, CatalogImportError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| CatalogImportError::Date {
        row,
        value: value.to_string(),
    })
}
