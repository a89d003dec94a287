//! Internship catalog and the filter engine that derives the visible listing.

pub mod domain;
mod filter;
mod import;
mod seed;
mod state;
pub mod views;

pub use domain::{
    Catalog, CatalogError, InternshipId, InternshipRecord, WorkType, CATEGORY_SUGGESTIONS,
};
pub use filter::{apply_filters, FilterCriteria, FilterUpdate, FilteredView};
pub use import::{CatalogImportError, CatalogImporter};
pub use state::{CatalogAction, CatalogState};
pub use views::{InternshipDetailView, ListingCard};
