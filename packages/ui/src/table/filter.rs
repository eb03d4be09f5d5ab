//! Client-side filtering over a cached record list.
//!
//! A [`FilterSet`] holds exact-match dropdown filters and one free-text term.
//! [`FilterSet::apply`] always starts from the list it is given, so callers
//! pass the full cached list and never a previous result.

use std::collections::BTreeMap;

use store::{field, value_to_string, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    exact: BTreeMap<String, String>,
    search: String,
    search_fields: Vec<String>,
}

impl FilterSet {
    /// A filter set searching the given (dotted) field paths.
    pub fn new<F: Into<String>>(search_fields: impl IntoIterator<Item = F>) -> Self {
        Self {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Require `field == value`. An empty value clears the filter ("All").
    pub fn set_exact(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.exact.remove(&field);
        } else {
            self.exact.insert(field, value);
        }
    }

    pub fn with_exact(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_exact(field, value);
        self
    }

    pub fn exact(&self, field: &str) -> Option<&str> {
        self.exact.get(field).map(String::as_str)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into().trim().to_lowercase();
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    pub fn is_active(&self) -> bool {
        !self.exact.is_empty() || !self.search.is_empty()
    }

    /// Drop every filter, keeping the searchable fields.
    pub fn clear(&mut self) {
        self.exact.clear();
        self.search.clear();
    }

    /// All exact filters hold, and the term (if any) occurs in a search field.
    pub fn matches(&self, record: &Record) -> bool {
        let exact_ok = self
            .exact
            .iter()
            .all(|(path, wanted)| value_to_string(field(record, path)) == *wanted);
        exact_ok && self.matches_search(record)
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|path| {
            field(record, path)
                .filter(|value| !value.is_null())
                .is_some_and(|value| {
                    value_to_string(Some(value))
                        .to_lowercase()
                        .contains(&self.search)
                })
        })
    }

    /// Matching records, in input order.
    pub fn apply(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vehicles() -> Vec<Record> {
        vec![
            json!({ "id": 1, "reg_no": "KA-01-AB", "model": "Tata Ace", "status": "active", "fuel_type": "diesel" }),
            json!({ "id": 2, "reg_no": "KA-02-CD", "model": "Ashok Leyland", "status": "maintenance", "fuel_type": "diesel" }),
            json!({ "id": 3, "reg_no": "MH-12-EF", "model": "Tata Nexon EV", "status": "active", "fuel_type": "electric" }),
            json!({ "id": 4, "reg_no": null, "model": "Unregistered", "status": "inactive", "fuel_type": "petrol" }),
        ]
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records.iter().filter_map(|r| r["id"].as_i64()).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let filters = FilterSet::new(["reg_no", "model"]);
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&vehicles()), vehicles());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let data = vehicles();
        let lower = FilterSet::new(["reg_no", "model"]).with_search("tata");
        let upper = FilterSet::new(["reg_no", "model"]).with_search("TATA");
        assert_eq!(ids(&lower.apply(&data)), vec![1, 3]);
        assert_eq!(lower.apply(&data), upper.apply(&data));
    }

    #[test]
    fn test_search_skips_null_fields() {
        let filters = FilterSet::new(["reg_no"]).with_search("null");
        assert!(filters.apply(&vehicles()).is_empty());
    }

    #[test]
    fn test_search_nested_fields() {
        let trips = vec![
            json!({ "id": 1, "vehicle": { "reg_no": "KA-01" }, "description": "Oil change" }),
            json!({ "id": 2, "vehicle": null, "description": "Brake pads" }),
        ];
        let filters = FilterSet::new(["vehicle.reg_no", "description"]);
        assert_eq!(ids(&filters.clone().with_search("ka-01").apply(&trips)), vec![1]);
        assert_eq!(ids(&filters.with_search("brake").apply(&trips)), vec![2]);
    }

    #[test]
    fn test_exact_filters_and_combine() {
        let data = vehicles();
        let filters = FilterSet::new(["reg_no", "model"])
            .with_exact("status", "active")
            .with_exact("fuel_type", "diesel");
        assert_eq!(ids(&filters.apply(&data)), vec![1]);

        let filters = filters.with_search("nexon");
        assert!(filters.apply(&data).is_empty());
    }

    #[test]
    fn test_empty_exact_value_clears() {
        let mut filters = FilterSet::new(["model"]).with_exact("status", "active");
        filters.set_exact("status", "");
        assert!(filters.exact("status").is_none());
        assert_eq!(filters.apply(&vehicles()).len(), 4);
    }

    #[test]
    fn test_subset_of_filters_yields_superset() {
        let data = vehicles();
        let full = FilterSet::new(["reg_no", "model"])
            .with_exact("status", "active")
            .with_exact("fuel_type", "electric")
            .with_search("ev");
        let full_ids = ids(&full.apply(&data));

        let subsets = [
            FilterSet::new(["reg_no", "model"]),
            FilterSet::new(["reg_no", "model"]).with_exact("status", "active"),
            FilterSet::new(["reg_no", "model"]).with_exact("fuel_type", "electric"),
            FilterSet::new(["reg_no", "model"]).with_search("ev"),
            FilterSet::new(["reg_no", "model"])
                .with_exact("status", "active")
                .with_search("ev"),
        ];
        for subset in subsets {
            let subset_ids = ids(&subset.apply(&data));
            assert!(full_ids.iter().all(|id| subset_ids.contains(id)));
        }
    }

    #[test]
    fn test_clearing_refilters_full_list() {
        let data = vehicles();
        let mut filters = FilterSet::new(["reg_no", "model"]).with_exact("status", "active");
        let narrowed = filters.apply(&data);
        assert_eq!(narrowed.len(), 2);

        filters.clear();
        assert_eq!(filters.apply(&data), data);
    }
}
