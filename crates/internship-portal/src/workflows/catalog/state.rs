use std::sync::Arc;

use tracing::debug;

use super::domain::Catalog;
use super::filter::{apply_filters, FilterCriteria, FilterUpdate, FilteredView};

/// Intents the listing view pushes into the catalog state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    SetFilters(FilterUpdate),
    ClearFilters,
}

/// Catalog plus the criteria in effect and the view derived from them.
///
/// Transitions go through [`CatalogState::reduce`], which consumes the old state and
/// returns the next one. The catalog itself is shared and never copied.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
    criteria: FilterCriteria,
    view: FilteredView,
}

impl CatalogState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let view = FilteredView::full(&catalog);
        Self {
            catalog,
            criteria: FilterCriteria::default(),
            view,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn reduce(mut self, action: CatalogAction) -> Self {
        self.apply(action);
        self
    }

    /// In-place form of [`CatalogState::reduce`].
    pub fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::SetFilters(update) => {
                self.criteria.merge(update);
                self.view = apply_filters(&self.catalog, &self.criteria);
                debug!(visible = self.view.len(), criteria = ?self.criteria, "filters applied");
            }
            CatalogAction::ClearFilters => {
                debug!("filters cleared");
                self.criteria = FilterCriteria::default();
                self.view = FilteredView::full(&self.catalog);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CatalogState {
        CatalogState::new(Arc::new(Catalog::seeded()))
    }

    #[test]
    fn starts_with_full_catalog() {
        let state = state();
        assert_eq!(state.view().len(), 6);
        assert!(!state.criteria().is_active());
    }

    #[test]
    fn set_filters_merges_and_recomputes() {
        let state = state()
            .reduce(CatalogAction::SetFilters(FilterUpdate::category("Technology")))
            .reduce(CatalogAction::SetFilters(FilterUpdate::work_type("Hybrid")));

        assert_eq!(state.criteria().category.as_deref(), Some("Technology"));
        assert_eq!(state.view().len(), 1);
        assert_eq!(state.view().records()[0].title, "Data Science Intern");
    }

    #[test]
    fn reapplying_identical_criteria_is_idempotent() {
        let update = FilterUpdate::search("intern");
        let once = state().reduce(CatalogAction::SetFilters(update.clone()));
        let first = once.view().clone();
        let twice = once.reduce(CatalogAction::SetFilters(update));
        assert_eq!(twice.view(), &first);
    }

    #[test]
    fn clear_filters_restores_everything() {
        let state = state()
            .reduce(CatalogAction::SetFilters(FilterUpdate::location("nowhere")))
            .reduce(CatalogAction::SetFilters(FilterUpdate::search("zzz")));
        assert!(state.view().is_empty());

        let cleared = state.reduce(CatalogAction::ClearFilters);
        assert_eq!(cleared.criteria(), &FilterCriteria::default());
        assert_eq!(cleared.view().records(), cleared.catalog().records());
    }

    #[test]
    fn apply_in_place_tracks_reduce() {
        let actions = [
            CatalogAction::SetFilters(FilterUpdate::category("technology")),
            CatalogAction::SetFilters(FilterUpdate::location("san")),
            CatalogAction::ClearFilters,
            CatalogAction::SetFilters(FilterUpdate::search("design")),
        ];

        let mut in_place = state();
        let mut by_value = state();
        for action in actions {
            in_place.apply(action.clone());
            by_value = by_value.reduce(action);
            assert_eq!(in_place.criteria(), by_value.criteria());
            assert_eq!(in_place.view(), by_value.view());
        }
        assert_eq!(in_place.criteria().search.as_deref(), Some("design"));
        assert!(in_place.criteria().category.is_none());
    }
}
