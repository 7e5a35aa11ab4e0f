//! Form script endpoint API
//!
//! Client and wire types for the spreadsheet-backed script endpoint: three
//! read actions (questions, configurations, responses) and one write
//! (submit).

pub mod client;
pub mod error;
pub mod models;

pub use client::ScriptClient;
pub use error::ApiError;
pub use models::{
    ConfigRule, Question, QuestionType, ResponseRecord, RuleKind, RuleStatus, Submission,
    parse_timestamp,
};
