use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::config::{AppConfig, SubmissionConfig};
use crate::workflows::applications::{
    ApplicationRecord, ApplicationRepository, ApplicationService, ApplicationServiceError,
    FormSession, InMemoryApplicationRepository,
};
use crate::workflows::catalog::{
    Catalog, CatalogAction, CatalogError, CatalogImportError, CatalogImporter, CatalogState,
    FilterCriteria, FilteredView, InternshipDetailView, InternshipId, ListingCard,
};

/// State container handed to each view: listing state plus the application service.
///
/// Views hold a `&mut Portal` instead of reaching for
/// process-wide state.
pub struct Portal<R> {
    listing: CatalogState,
    applications: Arc<ApplicationService<R>>,
    submission: SubmissionConfig,
}

impl Portal<InMemoryApplicationRepository> {
    /// Build an in-memory portal from configuration, importing the catalog when a CSV
    /// path is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogImportError> {
        let catalog = match &config.catalog.csv_path {
            Some(path) => CatalogImporter::from_path(path)?,
            None => Catalog::seeded(),
        };
        info!(listings = catalog.len(), "catalog ready");

        Ok(Self::new(
            catalog,
            Arc::new(InMemoryApplicationRepository::default()),
            config.submission,
        ))
    }
}

impl<R> Portal<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(catalog: Catalog, repository: Arc<R>, submission: SubmissionConfig) -> Self {
        let catalog = Arc::new(catalog);
        let applications = Arc::new(ApplicationService::new(Arc::clone(&catalog), repository));
        Self {
            listing: CatalogState::new(catalog),
            applications,
            submission,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.listing.catalog()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.listing.criteria()
    }

    pub fn view(&self) -> &FilteredView {
        self.listing.view()
    }

    pub fn cards(&self) -> Vec<ListingCard> {
        self.view()
            .records()
            .iter()
            .map(ListingCard::from_record)
            .collect()
    }

    pub fn dispatch(&mut self, action: CatalogAction) -> &FilteredView {
        self.listing.apply(action);
        self.listing.view()
    }

    pub fn detail(
        &self,
        id: InternshipId,
        today: NaiveDate,
    ) -> Result<InternshipDetailView, CatalogError> {
        let record = self.catalog().find(id)?;
        Ok(InternshipDetailView::new(record, today))
    }

    pub fn open_application(&self, id: InternshipId) -> Result<FormSession<R>, CatalogError> {
        FormSession::open(Arc::clone(&self.applications), id, self.submission.notice_ttl)
    }

    pub fn submission(&self) -> SubmissionConfig {
        self.submission
    }

    pub fn applications(&self) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        self.applications.applications()
    }
}
