//! Catalog filtering and application intake for the internship portal.
//!
//! All state lives in memory for the lifetime of the process. The `workflows` module holds
//! the two cooperating components: the catalog filter engine and the application
//! validator with its submission flow. They share nothing but [`InternshipId`].
//!
//! [`InternshipId`]: workflows::catalog::InternshipId

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
