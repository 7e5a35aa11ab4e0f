//! Wire types for the form script endpoint
//!
//! The backend is a spreadsheet-backed script that answers three read
//! actions and one write. Everything arrives as JSON; sheet-origin data is
//! loosely typed, so deserialization is deliberately lenient.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One form field definition, immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Type")]
    pub kind: QuestionType,
    #[serde(rename = "Required", default)]
    pub required: bool,
    #[serde(rename = "Options", default, deserialize_with = "option_list")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuestionType {
    FreeText,
    Dropdown,
    SingleChoice,
    MultiChoice,
}

impl QuestionType {
    pub fn has_options(self) -> bool {
        !matches!(self, QuestionType::FreeText)
    }
}

/// A configuration rule: either a Restriction (hides a question for a
/// group) or a Limit (marks an option exhausted).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigRule {
    #[serde(rename = "Kind")]
    pub kind: RuleKind,
    /// Group key for Restriction rules.
    #[serde(rename = "Identifier", default)]
    pub identifier: String,
    /// Target question text. Rules naming no existing question are ignored.
    #[serde(rename = "Question", default)]
    pub question: String,
    /// Target option for Limit rules.
    #[serde(rename = "Option", default)]
    pub option: String,
    #[serde(rename = "Status")]
    pub status: RuleStatus,
    /// Configured capacity for Limit rules. Carried for display; exhaustion
    /// is decided by `status` alone.
    #[serde(rename = "Value", default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleKind {
    Restriction,
    Limit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleStatus {
    Active,
    Exhausted,
    /// Anything the sheet holds that we don't recognize. Such rules never
    /// hide a question and never exhaust an option.
    #[serde(other)]
    Inactive,
}

/// One submitted form, as the backend returns it: an ordered mapping from
/// column name to cell value. Column order is the sheet's column order and
/// drives table and CSV output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseRecord {
    columns: Vec<(String, String)>,
}

impl ResponseRecord {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    /// Value of a column, or "" when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Parsed timestamp of the given column, `None` when absent or
    /// unparseable.
    pub fn timestamp(&self, column: &str) -> Option<DateTime<Utc>> {
        parse_timestamp(self.get(column))
    }
}

impl<'de> Deserialize<'de> for ResponseRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json's preserve_order feature keeps the object's key order.
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            columns: map
                .into_iter()
                .map(|(name, value)| (name, cell_to_string(value)))
                .collect(),
        })
    }
}

impl Serialize for ResponseRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.columns.iter().map(|(k, v)| (k, v)))
    }
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Parse a response timestamp. The form submits RFC 3339; rows entered
/// directly into the sheet tend to be naive datetimes, which are assumed
/// to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Payload for the write endpoint. `answers` is keyed by question ID in
/// the questions' definition order; serde_json's preserve_order feature
/// carries that order through serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub timestamp: String,
    pub answers: serde_json::Map<String, Value>,
}

impl Submission {
    pub fn new(answers: serde_json::Map<String, Value>) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            answers,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurationsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub configurations: Vec<ConfigRule>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub responses: Vec<ResponseRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Options arrive either as a JSON array or as one comma-joined cell.
fn option_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(joined) => Ok(joined
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()),
        Value::Array(entries) => entries
            .into_iter()
            .map(|entry| match entry {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(D::Error::custom(format!(
                    "expected option string, got {other}"
                ))),
            })
            .collect(),
        other => Err(D::Error::custom(format!(
            "expected option list or string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_question_with_joined_options() {
        let question: Question = serde_json::from_str(
            r#"{"ID": "P2", "Text": "Favourite colour", "Type": "Dropdown",
                "Required": true, "Options": "Red, Green ,Blue"}"#,
        )
        .unwrap();
        assert_eq!(question.options, vec!["Red", "Green", "Blue"]);
        assert!(question.required);
    }

    #[test]
    fn test_question_with_option_array() {
        let question: Question = serde_json::from_str(
            r#"{"ID": "P3", "Text": "Pick some", "Type": "MultiChoice",
                "Options": ["A", "B"]}"#,
        )
        .unwrap();
        assert_eq!(question.kind, QuestionType::MultiChoice);
        assert_eq!(question.options, vec!["A", "B"]);
        assert!(!question.required);
    }

    #[test]
    fn test_unknown_rule_status_is_inactive() {
        let rule: ConfigRule = serde_json::from_str(
            r#"{"Kind": "Limit", "Question": "Workshop", "Option": "Pottery",
                "Status": "Paused", "Value": "3"}"#,
        )
        .unwrap();
        assert_eq!(rule.status, RuleStatus::Inactive);
    }

    #[test]
    fn test_record_preserves_column_order() {
        let record: ResponseRecord = serde_json::from_str(
            r#"{"Timestamp": "2024-03-01T10:00:00Z", "P1": "Group A", "P2": 7, "P3": null}"#,
        )
        .unwrap();
        let names: Vec<&str> = record.column_names().collect();
        assert_eq!(names, vec!["Timestamp", "P1", "P2", "P3"]);
        assert_eq!(record.get("P2"), "7");
        assert_eq!(record.get("P3"), "");
        assert_eq!(record.get("missing"), "");
    }

    #[test]
    fn test_submission_keeps_answer_order() {
        let mut answers = serde_json::Map::new();
        answers.insert("P1".to_string(), Value::from("Group A"));
        answers.insert("P10".to_string(), Value::from("late addition"));
        answers.insert("P2".to_string(), Value::from("Pottery"));
        let json = serde_json::to_string(&Submission::new(answers)).unwrap();

        let p1 = json.find("\"P1\"").unwrap();
        let p10 = json.find("\"P10\"").unwrap();
        let p2 = json.find("\"P2\"").unwrap();
        assert!(p1 < p10 && p10 < p2, "answer keys reordered in {json}");
    }

    #[test]
    fn test_timestamp_parsing() {
        assert_eq!(
            parse_timestamp("2024-03-01T10:00:00.000Z").unwrap().day(),
            1
        );
        assert!(parse_timestamp("2024-03-01 10:00:00").is_some());
        assert!(parse_timestamp("01/03/2024 10:00:00").is_some());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }
}
