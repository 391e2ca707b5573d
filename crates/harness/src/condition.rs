// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! The execution condition engine.
//!
//! Conditions gate each case before any hook or body runs. They compose
//! with AND-disable semantics: the first condition that disables a case
//! short-circuits evaluation and its reason becomes the skip reason.

use crate::case::{CaseInfo, Tag};
use crate::suite::SuiteInfo;

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;

/// The verdict of one condition for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionEvaluation {
    Enabled { reason: String },
    Disabled { reason: String },
}

impl ConditionEvaluation {
    pub fn enabled(reason: impl Into<String>) -> Self {
        ConditionEvaluation::Enabled { reason: reason.into() }
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        ConditionEvaluation::Disabled { reason: reason.into() }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, ConditionEvaluation::Disabled { .. })
    }

    pub fn reason(&self) -> &str {
        match self {
            ConditionEvaluation::Enabled { reason } | ConditionEvaluation::Disabled { reason } => {
                reason
            }
        }
    }
}

/// A pluggable run/skip decision over case and suite metadata.
///
/// Conditions must be pure functions of the metadata they are given; they
/// run before the fixture exists.
pub trait ExecutionCondition: Send + Sync {
    fn evaluate(&self, case: &CaseInfo<'_>, suite: &SuiteInfo<'_>) -> ConditionEvaluation;
}

/// Evaluates conditions in registration order, short-circuiting on the
/// first disable.
pub fn evaluate_all(
    case: &CaseInfo<'_>,
    suite: &SuiteInfo<'_>,
    conditions: &[Box<dyn ExecutionCondition>],
) -> ConditionEvaluation {
    for condition in conditions {
        let evaluation = condition.evaluate(case, suite);
        if evaluation.is_disabled() {
            return evaluation;
        }
    }
    ConditionEvaluation::enabled("no registered condition disabled this case")
}

/// Built-in conditions evaluated before any registered ones.
pub(crate) fn builtin_conditions() -> Vec<Box<dyn ExecutionCondition>> {
    vec![Box::new(DisabledCondition), Box::new(SkipIfTagPresent::skip_marker())]
}

/// Honors [`Tag::Disabled`] on the case or the suite, carrying its reason.
pub struct DisabledCondition;

impl ExecutionCondition for DisabledCondition {
    fn evaluate(&self, case: &CaseInfo<'_>, suite: &SuiteInfo<'_>) -> ConditionEvaluation {
        let disabled_reason = |tag: &Tag| match tag {
            Tag::Disabled(reason) => {
                Some(reason.clone().unwrap_or_else(|| "disabled".to_string()))
            }
            _ => None,
        };

        if let Some(reason) = case.tags.iter().find_map(disabled_reason) {
            return ConditionEvaluation::disabled(reason);
        }
        if let Some(reason) = suite.tags.iter().find_map(disabled_reason) {
            return ConditionEvaluation::disabled(format!("suite disabled: {reason}"));
        }
        ConditionEvaluation::enabled("not disabled")
    }
}

/// The canonical built-in provider: skips a case when a given tag key is
/// present on the case or its suite.
pub struct SkipIfTagPresent {
    key: String,
}

impl SkipIfTagPresent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Bound to the canonical [`Tag::Skip`] marker.
    pub fn skip_marker() -> Self {
        Self::new(Tag::Skip.key())
    }
}

impl ExecutionCondition for SkipIfTagPresent {
    fn evaluate(&self, case: &CaseInfo<'_>, suite: &SuiteInfo<'_>) -> ConditionEvaluation {
        let on_suite = suite.tags.iter().any(|tag| tag.key() == self.key);
        if case.has_tag(&self.key) || on_suite {
            ConditionEvaluation::disabled(format!(
                "disabled due to the presence of tag `{}`",
                self.key
            ))
        } else {
            ConditionEvaluation::enabled(format!("tag `{}` not present", self.key))
        }
    }
}
