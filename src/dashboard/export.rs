//! CSV export of the filtered record set
//!
//! The header row follows the first record's column order; later records
//! are rendered against that header, with "" for columns they lack. Fields
//! are quoted only when they contain a comma, quote, or newline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::api::models::ResponseRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no rows to export")]
    NoRows,
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("exported CSV was not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Serialize the records to a CSV document.
pub fn to_csv(records: &[ResponseRecord]) -> Result<String, ExportError> {
    let Some(first) = records.first() else {
        return Err(ExportError::NoRows);
    };

    let header: Vec<&str> = first.column_names().collect();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|column| record.get(column)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Default export file name, stamped with the given date.
pub fn default_file_name(date: NaiveDate) -> String {
    format!("form_responses_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let records = vec![ResponseRecord::from_pairs([
            ("Timestamp", "2024-03-01T10:00:00Z"),
            ("P4", r#"He said, "hi""#),
        ])];
        let csv = to_csv(&records).unwrap();
        assert_eq!(
            csv,
            "Timestamp,P4\n2024-03-01T10:00:00Z,\"He said, \"\"hi\"\"\"\n"
        );
    }

    #[test]
    fn test_header_follows_first_record_order() {
        let records = vec![
            ResponseRecord::from_pairs([("B", "1"), ("A", "2")]),
            // Missing column B, extra column C (ignored).
            ResponseRecord::from_pairs([("A", "3"), ("C", "4")]),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "B,A\n1,2\n,3\n");
    }

    #[test]
    fn test_io_failures_surface_as_csv_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: ExportError = csv::Error::from(io).into();
        assert!(matches!(err, ExportError::Csv(_)));
    }

    #[test]
    fn test_empty_set_is_an_error() {
        assert!(matches!(to_csv(&[]), Err(ExportError::NoRows)));
    }

    #[test]
    fn test_file_name_embeds_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(default_file_name(date), "form_responses_2024-03-01.csv");
    }
}
