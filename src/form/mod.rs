//! Dynamic form logic
//!
//! Everything between the fetched definitions and a validated submission:
//! see [`engine::FormEngine`].

pub mod engine;
pub mod rules;

pub use engine::{AnswerError, FieldValue, FormEngine, ValidationError};
