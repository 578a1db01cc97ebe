use std::collections::HashSet;

use crate::sheet::coerce::Record;
use crate::sheet::fields::keys;

/// Dropdown sentinel meaning "no filtering on this dimension".
pub const ALL: &str = "All";

/// Live filter inputs. The search term matches `name` case-insensitively;
/// category and status match exactly and case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub category: String,
    pub status: String,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            search: String::new(),
            category: ALL.to_string(),
            status: ALL.to_string(),
        }
    }
}

/// Apply all three filter dimensions, preserving batch order. Recomputed
/// from scratch on every interaction; O(N) over tens-to-hundreds of rows.
pub fn apply<'a>(records: &'a [Record], filters: &Filters) -> Vec<&'a Record> {
    let needle = filters.search.to_lowercase();
    records
        .iter()
        .filter(|r| needle.is_empty() || r.text(keys::NAME).to_lowercase().contains(&needle))
        .filter(|r| filters.category == ALL || r.text(keys::CATEGORY) == filters.category)
        .filter(|r| filters.status == ALL || r.text(keys::STATUS) == filters.status)
        .collect()
}

/// Distinct non-empty values observed for one field, in first-seen order.
/// Feeds the filter dropdowns, so it always runs over the full batch rather
/// than the filtered one.
pub fn distinct_values(records: &[Record], key: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = record.text(key);
        if !value.is_empty() && seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::sheet::fields::Variant;

    const SHEET: &str = "\
name,category,status
Boxy Tee,Tops,In Production
Crop Hoodie,Tops,Sampling
Wide Pant,Bottoms,In Production
Slim Tee,Tops,
";

    fn records() -> Vec<Record> {
        ingest(Variant::Client, SHEET).unwrap().records
    }

    #[test]
    fn empty_filters_match_everything_in_order() {
        let records = records();
        let filtered = apply(&records, &Filters::default());
        let ids: Vec<_> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_substring_on_name() {
        let records = records();
        let filters = Filters {
            search: "tee".into(),
            ..Filters::default()
        };
        let names: Vec<_> = apply(&records, &filters).iter().map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["Boxy Tee", "Slim Tee"]);
    }

    #[test]
    fn category_and_status_match_exactly() {
        let records = records();
        let filters = Filters {
            category: "Tops".into(),
            status: "In Production".into(),
            ..Filters::default()
        };
        let names: Vec<_> = apply(&records, &filters).iter().map(|r| r.text("name")).collect();
        assert_eq!(names, vec!["Boxy Tee"]);

        // Case matters on the categorical dimensions.
        let filters = Filters {
            category: "tops".into(),
            ..Filters::default()
        };
        assert!(apply(&records, &filters).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = records();
        let filters = Filters {
            search: "e".into(),
            category: "Tops".into(),
            ..Filters::default()
        };
        let once: Vec<_> = apply(&records, &filters).iter().map(|r| r.id).collect();
        let twice: Vec<_> = apply(&records, &filters).iter().map(|r| r.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn distinct_values_keep_first_seen_order_and_skip_empties() {
        let records = records();
        assert_eq!(distinct_values(&records, "category"), vec!["Tops", "Bottoms"]);
        assert_eq!(
            distinct_values(&records, "status"),
            vec!["In Production", "Sampling"]
        );
        assert!(distinct_values(&[], "category").is_empty());
    }
}
