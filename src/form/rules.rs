//! Restriction and limit rule matching
//!
//! Pure lookups over the fetched [`ConfigRule`] list. Rules are matched by
//! question *text*, mirroring how they are authored in the sheet.

use crate::api::models::{ConfigRule, RuleKind, RuleStatus};

/// Question texts hidden for the given group: every Active Restriction rule
/// whose identifier equals the group key.
pub fn restricted_questions<'a>(rules: &'a [ConfigRule], group: &str) -> Vec<&'a str> {
    rules
        .iter()
        .filter(|rule| {
            rule.kind == RuleKind::Restriction
                && rule.status == RuleStatus::Active
                && rule.identifier == group
        })
        .map(|rule| rule.question.as_str())
        .collect()
}

/// Whether a Limit rule marks this question/option pair as exhausted.
///
/// Exhaustion is decided by the rule status alone; the configured capacity
/// value is not consulted.
pub fn is_exhausted(rules: &[ConfigRule], question: &str, option: &str) -> bool {
    rules.iter().any(|rule| {
        rule.kind == RuleKind::Limit
            && rule.status == RuleStatus::Exhausted
            && rule.question == question
            && rule.option == option
    })
}
