//! Response filtering and sorting
//!
//! A [`FilterState`] is conjunctive: a record survives only when every set
//! criterion holds. Filtering always yields an order-preserving subset of
//! its input, and an empty filter yields the input unchanged.

use chrono::NaiveDate;

use crate::api::models::ResponseRecord;

use super::Columns;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Exact match on the group column.
    pub group: Option<String>,
    /// Earliest day to keep, inclusive.
    pub date_start: Option<NaiveDate>,
    /// Latest day to keep, inclusive of the whole day.
    pub date_end: Option<NaiveDate>,
    /// Keep only records where this column is answered.
    pub question: Option<String>,
    /// Case-insensitive substring over all column values.
    pub search: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn retains(&self, record: &ResponseRecord, columns: &Columns) -> bool {
        if let Some(group) = &self.group {
            if record.get(&columns.group) != group {
                return false;
            }
        }

        if self.date_start.is_some() || self.date_end.is_some() {
            // Date filters need a parseable timestamp.
            let Some(timestamp) = record.timestamp(&columns.timestamp) else {
                return false;
            };
            let day = timestamp.date_naive();
            if let Some(start) = self.date_start {
                if day < start {
                    return false;
                }
            }
            if let Some(end) = self.date_end {
                if day > end {
                    return false;
                }
            }
        }

        if let Some(question) = &self.question {
            if record.get(question).is_empty() {
                return false;
            }
        }

        if let Some(term) = &self.search {
            if !term.is_empty() {
                let haystack = record.values().collect::<Vec<_>>().join(" ").to_lowercase();
                if !haystack.contains(&term.to_lowercase()) {
                    return false;
                }
            }
        }

        true
    }
}

/// Derive the filtered view. The result is a subsequence of `records`.
pub fn apply_filters(
    records: &[ResponseRecord],
    filter: &FilterState,
    columns: &Columns,
) -> Vec<ResponseRecord> {
    records
        .iter()
        .filter(|record| filter.retains(record, columns))
        .cloned()
        .collect()
}

/// Stable ascending sort by one column: chronological for the timestamp
/// column (unparseable timestamps first), lexical otherwise. There is no
/// descending mode; re-sorting by the same column is idempotent.
pub fn sort_by_column(records: &mut [ResponseRecord], column: &str, timestamp_column: &str) {
    if column == timestamp_column {
        records.sort_by_key(|record| record.timestamp(column));
    } else {
        records.sort_by(|a, b| a.get(column).cmp(b.get(column)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Columns {
        Columns {
            group: "P1".to_string(),
            timestamp: "Timestamp".to_string(),
        }
    }

    fn record(timestamp: &str, group: &str, comment: &str) -> ResponseRecord {
        ResponseRecord::from_pairs([
            ("Timestamp", timestamp),
            ("P1", group),
            ("P4", comment),
        ])
    }

    fn sample() -> Vec<ResponseRecord> {
        vec![
            record("2024-03-01T08:00:00Z", "Group A", "first"),
            record("2024-03-02T09:00:00Z", "Group B", "second"),
            record("2024-03-03T10:00:00Z", "Group A", ""),
            record("2024-03-04T11:00:00Z", "Group C", "Loud Comment"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let all = sample();
        let filter = FilterState::default();
        assert!(filter.is_empty());
        assert_eq!(apply_filters(&all, &filter, &columns()), all);
    }

    #[test]
    fn test_filtered_set_is_a_subsequence() {
        let all = sample();
        let filter = FilterState {
            group: Some("Group A".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&all, &filter, &columns());
        assert_eq!(filtered.len(), 2);
        let mut remaining = all.iter();
        for kept in &filtered {
            assert!(remaining.any(|r| r == kept));
        }
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let all = sample();
        let filter = FilterState {
            date_start: Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
            date_end: Some(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()),
            ..Default::default()
        };
        let filtered = apply_filters(&all, &filter, &columns());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].get("P4"), "second");
    }

    #[test]
    fn test_date_filter_drops_unparseable_timestamps() {
        let all = vec![record("not a date", "Group A", "x")];
        let filter = FilterState {
            date_start: Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ..Default::default()
        };
        assert!(apply_filters(&all, &filter, &columns()).is_empty());
        // Without a date filter the record stays.
        assert_eq!(apply_filters(&all, &FilterState::default(), &columns()).len(), 1);
    }

    #[test]
    fn test_question_filter_requires_answer() {
        let all = sample();
        let filter = FilterState {
            question: Some("P4".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&all, &filter, &columns()).len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_across_columns() {
        let all = sample();
        let filter = FilterState {
            search: Some("loud comment".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&all, &filter, &columns());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("P1"), "Group C");

        let by_group = FilterState {
            search: Some("group b".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filters(&all, &by_group, &columns()).len(), 1);
    }

    #[test]
    fn test_sort_by_timestamp_is_chronological() {
        let mut records = vec![
            record("2024-03-04T11:00:00Z", "C", ""),
            record("2024-03-01T08:00:00Z", "A", ""),
            record("bad", "Z", ""),
            record("2024-03-02T09:00:00Z", "B", ""),
        ];
        sort_by_column(&mut records, "Timestamp", "Timestamp");
        let groups: Vec<&str> = records.iter().map(|r| r.get("P1")).collect();
        assert_eq!(groups, vec!["Z", "A", "B", "C"]);

        // Sorting again changes nothing.
        sort_by_column(&mut records, "Timestamp", "Timestamp");
        let again: Vec<&str> = records.iter().map(|r| r.get("P1")).collect();
        assert_eq!(again, vec!["Z", "A", "B", "C"]);
    }

    #[test]
    fn test_sort_by_other_column_is_lexical() {
        let mut records = sample();
        sort_by_column(&mut records, "P1", "Timestamp");
        let groups: Vec<&str> = records.iter().map(|r| r.get("P1")).collect();
        assert_eq!(groups, vec!["Group A", "Group A", "Group B", "Group C"]);
    }
}
