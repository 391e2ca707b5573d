// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! The assertion group aggregator.
//!
//! A [`Group`] runs every registered check exactly once, in order,
//! catching both failed assertions and panics raised inside a check, and
//! reports all collected failures together. This is the contract that
//! distinguishes grouped assertions from naive sequential `?` checks,
//! which would abort at the first failure and hide the rest.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::check::{AssertionFailure, CheckResult};
use crate::error::panic_message;

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;

type GroupCheck = Box<dyn FnOnce() -> CheckResult>;

/// The failed form of a group run: every failure collected, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFailure {
    /// Group name, echoed into each collected failure.
    pub name: String,

    /// How many checks the group ran in total.
    pub total: usize,

    /// The collected failures, tagged with their check index.
    pub failures: Vec<AssertionFailure>,
}

impl fmt::Display for GroupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "group `{}`: {} of {} checks failed",
            self.name,
            self.failures.len(),
            self.total
        )
    }
}

impl std::error::Error for GroupFailure {}

/// An ordered set of checks evaluated as one unit.
///
/// ```
/// use verdict::check::{self, Group};
///
/// let result = Group::named("numbers")
///     .check(|| check::eq(&4, &(2 * 2), "4 is 2 times 2"))
///     .check(|| check::that(5 > 4, "5 is greater than 4"))
///     .run();
/// assert!(result.is_ok());
/// ```
pub struct Group {
    name: String,
    checks: Vec<GroupCheck>,
}

impl Group {
    /// Starts an empty group with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), checks: Vec::new() }
    }

    /// Appends a check. Checks run in append order.
    pub fn check(mut self, check: impl FnOnce() -> CheckResult + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs every check, never stopping early.
    ///
    /// A check that panics (for example an out-of-range index inside it)
    /// is recorded as a failure at its position; the remaining checks
    /// still run.
    pub fn run(self) -> Result<(), GroupFailure> {
        let total = self.checks.len();
        let mut failures = Vec::new();

        for (index, check) in self.checks.into_iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(check));
            let failure = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(failure)) => failure,
                Err(payload) => AssertionFailure::new(format!(
                    "check panicked: {}",
                    panic_message(payload)
                )),
            };
            let mut failure = failure;
            failure.index = Some(index);
            failure.group = Some(self.name.clone());
            failures.push(failure);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(GroupFailure { name: self.name, total, failures })
        }
    }
}
