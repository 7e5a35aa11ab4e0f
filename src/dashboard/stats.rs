use std::collections::HashSet;

use chrono::NaiveDate;

use crate::api::models::ResponseRecord;

use super::Columns;

/// Summary statistics over the full response set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStats {
    pub total: usize,
    /// Responses whose timestamp falls on the reference day.
    pub today: usize,
    /// Distinct non-empty values of the group column.
    pub groups: usize,
    /// Responses per distinct day with activity, rounded to nearest.
    pub per_day_average: usize,
}

impl ResponseStats {
    /// Compute the dashboard headline numbers. `today` is passed in rather
    /// than read from the clock so callers and tests agree on the day.
    pub fn compute(records: &[ResponseRecord], columns: &Columns, today: NaiveDate) -> Self {
        let mut today_count = 0;
        let mut days = HashSet::new();
        let mut groups = HashSet::new();

        for record in records {
            if let Some(timestamp) = record.timestamp(&columns.timestamp) {
                let day = timestamp.date_naive();
                days.insert(day);
                if day == today {
                    today_count += 1;
                }
            }
            let group = record.get(&columns.group);
            if !group.is_empty() {
                groups.insert(group.to_string());
            }
        }

        let per_day_average = if days.is_empty() {
            0
        } else {
            (records.len() as f64 / days.len() as f64).round() as usize
        };

        Self {
            total: records.len(),
            today: today_count,
            groups: groups.len(),
            per_day_average,
        }
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

    fn record(timestamp: &str, group: &str) -> ResponseRecord {
        ResponseRecord::from_pairs([("Timestamp", timestamp), ("P1", group)])
    }

    #[test]
    fn test_average_rounds_to_nearest() {
        // 7 responses over exactly 2 distinct days -> round(7/2) = 4.
        let records = vec![
            record("2024-03-01T08:00:00Z", "A"),
            record("2024-03-01T09:00:00Z", "A"),
            record("2024-03-01T10:00:00Z", "B"),
            record("2024-03-01T11:00:00Z", "B"),
            record("2024-03-02T08:00:00Z", "A"),
            record("2024-03-02T09:00:00Z", "C"),
            record("2024-03-02T10:00:00Z", "C"),
        ];
        let stats = ResponseStats::compute(
            &records,
            &columns(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        assert_eq!(stats.total, 7);
        assert_eq!(stats.today, 3);
        assert_eq!(stats.groups, 3);
        assert_eq!(stats.per_day_average, 4);
    }

    #[test]
    fn test_empty_set_has_zero_average() {
        let stats = ResponseStats::compute(
            &[],
            &columns(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
        );
        assert_eq!(stats.total, 0);
        assert_eq!(stats.per_day_average, 0);
    }

    #[test]
    fn test_unparseable_timestamps_do_not_create_days() {
        let records = vec![record("garbage", "A"), record("2024-03-01T08:00:00Z", "")];
        let stats = ResponseStats::compute(
            &records,
            &columns(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert_eq!(stats.today, 1);
        assert_eq!(stats.groups, 1);
        // 2 records on 1 parseable day.
        assert_eq!(stats.per_day_average, 2);
    }
}
