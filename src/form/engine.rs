//! Form state engine
//!
//! Holds the fetched questions and rules plus the in-progress answers, and
//! applies the cross-field logic: group restrictions hide questions (and
//! clear their answers), Limit rules make options uncollectible, and
//! validation enforces `required` on visible questions only. The rendering
//! layer (prompts or `form show`) is a pure projection of this state.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::models::{ConfigRule, Question, QuestionType};

use super::rules;

/// The value held by one form field, shaped after the control kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// FreeText input.
    Text(String),
    /// Dropdown or SingleChoice selection; `None` means left blank.
    Choice(Option<String>),
    /// MultiChoice selections.
    Multi(Vec<String>),
}

#[derive(Debug, Error, PartialEq)]
pub enum AnswerError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("'{option}' is not an option of '{question}'")]
    UnknownOption { question: String, option: String },
    #[error("'{option}' is exhausted for '{question}'")]
    ExhaustedOption { question: String, option: String },
    #[error("'{question}' does not take this kind of value")]
    WrongKind { question: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing required field: {question}")]
    MissingRequired { question: String },
}

pub struct FormEngine {
    questions: Vec<Question>,
    rules: Vec<ConfigRule>,
    group_selector: Option<String>,
    selected_group: Option<String>,
    hidden: HashSet<String>,
    answers: HashMap<String, FieldValue>,
}

impl FormEngine {
    /// Build an engine from fetched data.
    ///
    /// The group selector is the question named by `selector_override` when
    /// that ID exists, otherwise the first Dropdown question. An override
    /// that names no question is logged and ignored.
    pub fn new(
        questions: Vec<Question>,
        rules: Vec<ConfigRule>,
        selector_override: Option<String>,
    ) -> Self {
        let group_selector = selector_override
            .filter(|id| {
                let known = questions.iter().any(|q| &q.id == id);
                if !known {
                    warn!("Configured group selector question '{id}' does not exist, falling back");
                }
                known
            })
            .or_else(|| {
                questions
                    .iter()
                    .find(|q| q.kind == QuestionType::Dropdown)
                    .map(|q| q.id.clone())
            });
        debug!("Group selector question: {group_selector:?}");

        Self {
            questions,
            rules,
            group_selector,
            selected_group: None,
            hidden: HashSet::new(),
            answers: HashMap::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn is_group_selector(&self, id: &str) -> bool {
        self.group_selector.as_deref() == Some(id)
    }

    pub fn selected_group(&self) -> Option<&str> {
        self.selected_group.as_deref()
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn visible_questions(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| !self.hidden.contains(&q.id))
    }

    /// Whether a Limit rule exhausts `option`. Exhaustion applies to choice
    /// questions only; Dropdown options carry no capacity limits.
    pub fn is_exhausted(&self, question: &Question, option: &str) -> bool {
        matches!(
            question.kind,
            QuestionType::SingleChoice | QuestionType::MultiChoice
        ) && rules::is_exhausted(&self.rules, &question.text, option)
    }

    /// Select the group and recompute visibility from scratch.
    ///
    /// Questions hidden by the new group have their answers cleared, so a
    /// later group change reveals them empty and with `required` back in
    /// force. Restriction rules naming no existing question are ignored.
    pub fn select_group(&mut self, group: &str) {
        self.selected_group = Some(group.to_string());

        let hidden_texts = rules::restricted_questions(&self.rules, group);
        self.hidden = self
            .questions
            .iter()
            .filter(|q| hidden_texts.contains(&q.text.as_str()))
            .map(|q| q.id.clone())
            .collect();
        debug!("Group '{group}' hides {} question(s)", self.hidden.len());

        for id in &self.hidden {
            self.answers.remove(id);
        }
    }

    /// Record an answer, enforcing option membership and exhaustion.
    pub fn answer(&mut self, id: &str, value: FieldValue) -> Result<(), AnswerError> {
        let question = self
            .question(id)
            .ok_or_else(|| AnswerError::UnknownQuestion(id.to_string()))?
            .clone();

        match (&question.kind, &value) {
            (QuestionType::FreeText, FieldValue::Text(_)) => {}
            (QuestionType::Dropdown, FieldValue::Choice(choice)) => {
                if let Some(option) = choice {
                    Self::check_membership(&question, option)?;
                }
            }
            (QuestionType::SingleChoice, FieldValue::Choice(choice)) => {
                if let Some(option) = choice {
                    Self::check_membership(&question, option)?;
                    self.check_not_exhausted(&question, option)?;
                }
            }
            (QuestionType::MultiChoice, FieldValue::Multi(options)) => {
                for option in options {
                    Self::check_membership(&question, option)?;
                    self.check_not_exhausted(&question, option)?;
                }
            }
            _ => {
                return Err(AnswerError::WrongKind {
                    question: question.text,
                });
            }
        }

        self.answers.insert(id.to_string(), value);
        Ok(())
    }

    /// Validate every visible required question, stopping at the first
    /// missing value. Hidden questions are exempt while hidden.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for question in &self.questions {
            if !question.required || self.hidden.contains(&question.id) {
                continue;
            }
            if self.collected_value(question).trim().is_empty() {
                return Err(ValidationError::MissingRequired {
                    question: question.text.clone(),
                });
            }
        }
        Ok(())
    }

    /// Collected answers, one entry per question in definition order. The
    /// map is serde_json's, whose preserve_order feature keeps insertion
    /// order through serialization.
    ///
    /// MultiChoice selections are joined with ", "; hidden questions always
    /// contribute the empty string.
    pub fn collect(&self) -> Map<String, Value> {
        self.questions
            .iter()
            .map(|question| {
                (
                    question.id.clone(),
                    Value::String(self.collected_value(question)),
                )
            })
            .collect()
    }

    fn collected_value(&self, question: &Question) -> String {
        if self.hidden.contains(&question.id) {
            return String::new();
        }
        match self.answers.get(&question.id) {
            Some(FieldValue::Text(text)) => text.clone(),
            Some(FieldValue::Choice(choice)) => choice.clone().unwrap_or_default(),
            Some(FieldValue::Multi(options)) => options.join(", "),
            None => String::new(),
        }
    }

    fn check_membership(question: &Question, option: &str) -> Result<(), AnswerError> {
        if question.options.iter().any(|o| o == option) {
            Ok(())
        } else {
            Err(AnswerError::UnknownOption {
                question: question.text.clone(),
                option: option.to_string(),
            })
        }
    }

    fn check_not_exhausted(&self, question: &Question, option: &str) -> Result<(), AnswerError> {
        if self.is_exhausted(question, option) {
            Err(AnswerError::ExhaustedOption {
                question: question.text.clone(),
                option: option.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
