use serde::{Deserialize, Serialize};

use super::domain::ScholarshipRecord;

/// Record shape understood by the list query engine.
pub trait Queryable {
    /// Fields matched by the free-text search.
    fn search_fields(&self) -> Vec<&str>;
    fn category(&self) -> Option<&str>;
    fn kind(&self) -> Option<&str>;
    fn status(&self) -> Option<&str> {
        None
    }
}

impl Queryable for ScholarshipRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.provider.as_str(),
            self.description.as_str(),
        ]
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn kind(&self) -> Option<&str> {
        Some(&self.kind)
    }
}

/// Single-field predicate: either unconstrained or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    #[default]
    Any,
    Exactly(String),
}

impl FieldFilter {
    pub fn exactly(value: impl Into<String>) -> Self {
        Self::Exactly(value.into())
    }

    /// `all`, `any` and blank input mean no constraint; anything else is matched verbatim.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("any")
        {
            Self::Any
        } else {
            Self::Exactly(trimmed.to_string())
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// A record without the field never satisfies an exact filter.
    pub fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => value == Some(expected.as_str()),
        }
    }
}

/// Per-view search and filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: FieldFilter,
    #[serde(default, rename = "type")]
    pub kind: FieldFilter,
    #[serde(default)]
    pub status: FieldFilter,
}

impl QueryParams {
    pub fn is_identity(&self) -> bool {
        self.search.is_empty()
            && self.category.is_any()
            && self.kind.is_any()
            && self.status.is_any()
    }

    pub fn matches<T: Queryable>(&self, record: &T) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_with_needle(record, &needle)
    }

    fn matches_with_needle<T: Queryable>(&self, record: &T, needle: &str) -> bool {
        let text_match = needle.is_empty()
            || record
                .search_fields()
                .into_iter()
                .any(|field| field.to_lowercase().contains(needle));

        text_match
            && self.category.admits(record.category())
            && self.kind.admits(record.kind())
            && self.status.admits(record.status())
    }
}

/// Records satisfying every predicate in `params`, in their original order.
pub fn filter<'a, T: Queryable>(records: &'a [T], params: &QueryParams) -> Vec<&'a T> {
    let needle = params.search.to_lowercase();
    records
        .iter()
        .filter(|record| params.matches_with_needle(*record, &needle))
        .collect()
}

/// Holds the query state for one list view and recomputes results on demand.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    params: QueryParams,
}

impl ListQuery {
    pub fn new(params: QueryParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn set_search(&mut self, search: impl Into<String>) -> &mut Self {
        self.params.search = search.into();
        self
    }

    pub fn set_category(&mut self, category: FieldFilter) -> &mut Self {
        self.params.category = category;
        self
    }

    pub fn set_kind(&mut self, kind: FieldFilter) -> &mut Self {
        self.params.kind = kind;
        self
    }

    pub fn set_status(&mut self, status: FieldFilter) -> &mut Self {
        self.params.status = status;
        self
    }

    pub fn clear(&mut self) {
        self.params = QueryParams::default();
    }

    pub fn apply<'a, T: Queryable>(&self, records: &'a [T]) -> Vec<&'a T> {
        filter(records, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::domain::ScholarshipId;
    use chrono::NaiveDate;

    fn scholarship(id: &str, title: &str, category: &str, kind: &str) -> ScholarshipRecord {
        ScholarshipRecord {
            id: ScholarshipId(id.to_string()),
            title: title.to_string(),
            provider: format!("{title} Foundation"),
            amount: "$1,000".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date"),
            description: "Support for students".to_string(),
            requirements: Vec::new(),
            featured: false,
            category: category.to_string(),
            location: "Global".to_string(),
            kind: kind.to_string(),
        }
    }

    fn sample() -> Vec<ScholarshipRecord> {
        vec![
            scholarship("1", "Robotics Award", "Technology", "Merit-based"),
            scholarship("2", "Bridge Builders Grant", "Engineering", "Need-based"),
            scholarship("3", "Open Source Fellowship", "Technology", "Research-based"),
        ]
    }

    fn ids(records: &[&ScholarshipRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.0.clone()).collect()
    }

    #[test]
    fn identity_params_return_everything_in_order() {
        let records = sample();
        let result = filter(&records, &QueryParams::default());
        assert_eq!(ids(&result), vec!["1", "2", "3"]);
    }

    #[test]
    fn empty_collection_yields_empty_result() {
        let records: Vec<ScholarshipRecord> = Vec::new();
        let params = QueryParams {
            search: "robot".to_string(),
            ..QueryParams::default()
        };
        assert!(filter(&records, &params).is_empty());
    }

    #[test]
    fn category_filter_keeps_relative_order() {
        let records = sample();
        let params = QueryParams {
            category: FieldFilter::exactly("Technology"),
            ..QueryParams::default()
        };
        assert_eq!(ids(&filter(&records, &params)), vec!["1", "3"]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let records = sample();
        let params = QueryParams {
            search: "builders grant FOUNDATION".to_string(),
            ..QueryParams::default()
        };
        assert_eq!(ids(&filter(&records, &params)), vec!["2"]);

        let params = QueryParams {
            search: "STUDENTS".to_string(),
            ..QueryParams::default()
        };
        assert_eq!(filter(&records, &params).len(), 3);
    }

    #[test]
    fn record_failing_one_of_four_predicates_is_excluded() {
        let records = sample();
        let mut params = QueryParams {
            search: "robotics".to_string(),
            category: FieldFilter::exactly("Technology"),
            kind: FieldFilter::exactly("Merit-based"),
            status: FieldFilter::Any,
        };
        assert_eq!(ids(&filter(&records, &params)), vec!["1"]);

        params.kind = FieldFilter::exactly("Need-based");
        assert!(filter(&records, &params).is_empty());

        params.kind = FieldFilter::exactly("Merit-based");
        params.search = "bridge".to_string();
        assert!(filter(&records, &params).is_empty());

        params.search = "robotics".to_string();
        params.category = FieldFilter::exactly("Engineering");
        assert!(filter(&records, &params).is_empty());
    }

    #[test]
    fn status_filter_excludes_records_without_status() {
        let records = sample();
        let params = QueryParams {
            status: FieldFilter::exactly("pending"),
            ..QueryParams::default()
        };
        assert!(filter(&records, &params).is_empty());
    }

    #[test]
    fn unknown_category_is_an_exact_match_value() {
        let mut records = sample();
        records.push(scholarship("4", "Mural Prize", "Arts & Crafts", "Merit-based"));
        let params = QueryParams {
            category: FieldFilter::parse("Arts & Crafts"),
            ..QueryParams::default()
        };
        assert_eq!(ids(&filter(&records, &params)), vec!["4"]);
    }

    #[test]
    fn parse_treats_all_and_blank_as_any() {
        assert_eq!(FieldFilter::parse("all"), FieldFilter::Any);
        assert_eq!(FieldFilter::parse(" ANY "), FieldFilter::Any);
        assert_eq!(FieldFilter::parse(""), FieldFilter::Any);
        assert_eq!(
            FieldFilter::parse("Need-based"),
            FieldFilter::exactly("Need-based")
        );
    }

    #[test]
    fn list_query_clear_restores_identity() {
        let records = sample();
        let mut query = ListQuery::default();
        query
            .set_search("fellowship")
            .set_category(FieldFilter::exactly("Technology"));
        assert_eq!(ids(&query.apply(&records)), vec!["3"]);

        query.clear();
        assert!(query.params().is_identity());
        assert_eq!(query.apply(&records).len(), 3);
    }
}
