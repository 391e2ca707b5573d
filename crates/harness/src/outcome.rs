// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Run results: the terminal status of every registered case.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::check::AssertionFailure;

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;

/// Terminal status of one case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed { failures: Vec<AssertionFailure> },
    Skipped { reason: String },
    Errored { message: String },
}

impl CaseStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    /// Short label for summaries and shape comparisons.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "pass",
            CaseStatus::Failed { .. } => "fail",
            CaseStatus::Skipped { .. } => "skip",
            CaseStatus::Errored { .. } => "error",
        }
    }
}

/// One case's recorded result.
#[derive(Debug, Clone, Serialize)]
pub struct CaseRecord {
    pub name: String,
    pub display_name: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    pub duration: Duration,
    /// The case completed but breached its cooperative time budget.
    pub slow: bool,
}

/// The result of one suite run. Every registered case appears exactly
/// once, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub cases: Vec<CaseRecord>,
}

impl SuiteReport {
    /// Looks a case up by its registration name.
    pub fn status_of(&self, name: &str) -> Option<&CaseStatus> {
        self.cases.iter().find(|record| record.name == name).map(|record| &record.status)
    }

    pub fn passed(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Skipped { .. }))
    }

    pub fn errored(&self) -> usize {
        self.count(|status| matches!(status, CaseStatus::Errored { .. }))
    }

    /// Whether the run had no failed or errored case.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.errored() == 0
    }

    /// The pass/fail/skip/error pattern, in execution order. Two runs of
    /// the same suite against no shared external state produce the same
    /// shape.
    pub fn shape(&self) -> Vec<(String, &'static str)> {
        self.cases
            .iter()
            .map(|record| (record.name.clone(), record.status.label()))
            .collect()
    }

    fn count(&self, predicate: impl Fn(&CaseStatus) -> bool) -> usize {
        self.cases.iter().filter(|record| predicate(&record.status)).count()
    }
}
