use serde::{Deserialize, Serialize};

use super::domain::{Catalog, InternshipId, InternshipRecord};

/// Constraints currently in effect. `None` (or blank text) imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub work_type: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterCriteria {
    /// True when at least one criterion constrains the view.
    pub fn is_active(&self) -> bool {
        [&self.category, &self.location, &self.work_type, &self.search]
            .into_iter()
            .any(|value| active(value).is_some())
    }

    /// Overlay the keys present in `update`; absent keys keep their value.
    pub fn merge(&mut self, update: FilterUpdate) {
        let FilterUpdate {
            category,
            location,
            work_type,
            search,
        } = update;

        if let Some(value) = category {
            self.category = normalize(value);
        }
        if let Some(value) = location {
            self.location = normalize(value);
        }
        if let Some(value) = work_type {
            self.work_type = normalize(value);
        }
        if let Some(value) = search {
            self.search = normalize(value);
        }
    }

    fn matches(&self, record: &InternshipRecord) -> bool {
        if let Some(category) = active(&self.category) {
            if !record.category.to_lowercase().eq(&category) {
                return false;
            }
        }

        if let Some(location) = active(&self.location) {
            if !record.location.to_lowercase().contains(&location) {
                return false;
            }
        }

        if let Some(work_type) = active(&self.work_type) {
            if !record.work_type.label().to_lowercase().eq(&work_type) {
                return false;
            }
        }

        if let Some(search) = active(&self.search) {
            let in_title = record.title.to_lowercase().contains(&search);
            let in_company = record.company.to_lowercase().contains(&search);
            if !(in_title || in_company) {
                return false;
            }
        }

        true
    }
}

/// Partial criteria pushed by the view layer. A present key replaces the current value,
/// an empty string clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "type")]
    pub work_type: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterUpdate {
    pub fn category(value: impl Into<String>) -> Self {
        Self {
            category: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn location(value: impl Into<String>) -> Self {
        Self {
            location: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn work_type(value: impl Into<String>) -> Self {
        Self {
            work_type: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }
}

fn normalize(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// Lowercased needle for a non-blank criterion. Surrounding whitespace is kept so a
// search for "intern " behaves like the text box it came from.
fn active(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::to_lowercase)
}

/// Order-preserving subset of the catalog satisfying every active criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredView {
    records: Vec<InternshipRecord>,
}

impl FilteredView {
    pub fn records(&self) -> &[InternshipRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<InternshipId> {
        self.records.iter().map(|record| record.id).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// "Showing 1 internship" / "Showing 4 internships".
    pub fn summary_label(&self) -> String {
        let count = self.records.len();
        let suffix = if count == 1 { "" } else { "s" };
        format!("Showing {count} internship{suffix}")
    }

    pub(crate) fn full(catalog: &Catalog) -> Self {
        Self {
            records: catalog.records().to_vec(),
        }
    }
}

/// Recompute the visible listing. Pure; never fails.
pub fn apply_filters(catalog: &Catalog, criteria: &FilterCriteria) -> FilteredView {
    let records = catalog
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    FilteredView { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::catalog::InternshipId;

    fn ids(view: &FilteredView) -> Vec<u32> {
        view.ids().into_iter().map(|InternshipId(id)| id).collect()
    }

    fn criteria(update: FilterUpdate) -> FilterCriteria {
        let mut criteria = FilterCriteria::default();
        criteria.merge(update);
        criteria
    }

    #[test]
    fn empty_criteria_returns_full_catalog() {
        let catalog = Catalog::seeded();
        let view = apply_filters(&catalog, &FilterCriteria::default());
        assert_eq!(view.records(), catalog.records());
    }

    #[test]
    fn category_is_exact_and_case_insensitive() {
        let catalog = Catalog::seeded();
        let view = apply_filters(&catalog, &criteria(FilterUpdate::category("technology")));
        assert_eq!(ids(&view), vec![1, 3]);

        let partial = apply_filters(&catalog, &criteria(FilterUpdate::category("Tech")));
        assert!(partial.is_empty());
    }

    #[test]
    fn location_matches_substrings() {
        let catalog = Catalog::seeded();
        let view = apply_filters(&catalog, &criteria(FilterUpdate::location(", ca")));
        assert_eq!(ids(&view), vec![1, 4]);
    }

    #[test]
    fn type_matches_label() {
        let catalog = Catalog::seeded();
        let view = apply_filters(&catalog, &criteria(FilterUpdate::work_type("ON-SITE")));
        assert_eq!(ids(&view), vec![2, 5]);

        let unknown = apply_filters(&catalog, &criteria(FilterUpdate::work_type("Underwater")));
        assert!(unknown.is_empty());
    }

    #[test]
    fn search_checks_title_or_company() {
        let catalog = Catalog::seeded();
        let by_company = apply_filters(&catalog, &criteria(FilterUpdate::search("studio")));
        assert_eq!(ids(&by_company), vec![4]);

        let by_title = apply_filters(&catalog, &criteria(FilterUpdate::search("DATA")));
        assert_eq!(ids(&by_title), vec![3]);
    }

    #[test]
    fn active_criteria_are_anded() {
        let catalog = Catalog::seeded();
        let mut combined = criteria(FilterUpdate::category("Marketing"));
        combined.merge(FilterUpdate::work_type("Remote"));
        let view = apply_filters(&catalog, &combined);
        assert_eq!(ids(&view), vec![6]);
    }

    #[test]
    fn blank_values_impose_no_constraint() {
        let catalog = Catalog::seeded();
        let blank = criteria(FilterUpdate::search("   "));
        assert!(!blank.is_active());
        assert_eq!(apply_filters(&catalog, &blank).len(), catalog.len());
    }

    #[test]
    fn merge_keeps_unmentioned_keys() {
        let mut current = criteria(FilterUpdate::category("Design"));
        current.merge(FilterUpdate::search("ux"));
        assert_eq!(current.category.as_deref(), Some("Design"));
        assert_eq!(current.search.as_deref(), Some("ux"));

        current.merge(FilterUpdate::category(""));
        assert_eq!(current.category, None);
        assert!(current.is_active());
    }

    #[test]
    fn summary_label_pluralizes() {
        let catalog = Catalog::seeded();
        let one = apply_filters(&catalog, &criteria(FilterUpdate::category("Finance")));
        assert_eq!(one.summary_label(), "Showing 1 internship");
        assert_eq!(FilteredView::full(&catalog).summary_label(), "Showing 6 internships");
    }
}
