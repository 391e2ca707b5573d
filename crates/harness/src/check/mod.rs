// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! The assertion engine: single predicate-style checks.
//!
//! Every operation returns a [`CheckResult`] so test bodies can either
//! propagate the first failure with `?` or feed checks into a
//! [`Group`](crate::check::Group) to collect all of them.
//!
//! Equality checks ([`eq`], [`ne`]) compare by value via `PartialEq`;
//! identity checks ([`same`], [`not_same`]) compare addresses via
//! `std::ptr::eq` and are deliberately a distinct operation.

pub mod group;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;

use serde::Serialize;

pub use group::{Group, GroupFailure};

/// The result of one check.
pub type CheckResult = Result<(), AssertionFailure>;

/// A single recorded assertion failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssertionFailure {
    /// Human-readable description of what did not hold.
    pub message: String,

    /// Rendered expected value, when the check had one.
    pub expected: Option<String>,

    /// Rendered actual value, when the check had one.
    pub actual: Option<String>,

    /// Position of the originating check within its group, if any.
    pub index: Option<usize>,

    /// Name of the group this failure was collected under, if any.
    pub group: Option<String>,
}

impl AssertionFailure {
    /// A plain failure with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), expected: None, actual: None, index: None, group: None }
    }

    fn with_values(message: impl Into<String>, expected: String, actual: String) -> Self {
        Self {
            message: message.into(),
            expected: Some(expected),
            actual: Some(actual),
            index: None,
            group: None,
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected {expected}, got {actual})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionFailure {}

/// Checks that `condition` holds.
pub fn that(condition: bool, message: &str) -> CheckResult {
    if condition { Ok(()) } else { Err(AssertionFailure::new(message)) }
}

/// Checks that `condition` holds, building the message lazily.
///
/// The closure is only invoked on the failing path, so an expensive
/// message costs nothing when the check passes.
pub fn that_with<F>(condition: bool, message: F) -> CheckResult
where
    F: FnOnce() -> String,
{
    if condition { Ok(()) } else { Err(AssertionFailure::new(message())) }
}

/// Checks that `condition` does not hold.
pub fn is_false(condition: bool, message: &str) -> CheckResult {
    that(!condition, message)
}

/// Checks structural equality of two values.
pub fn eq<T>(expected: &T, actual: &T, message: &str) -> CheckResult
where
    T: fmt::Debug + PartialEq + ?Sized,
{
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::with_values(message, format!("{expected:?}"), format!("{actual:?}")))
    }
}

/// Checks that two values are structurally unequal.
pub fn ne<T>(unexpected: &T, actual: &T, message: &str) -> CheckResult
where
    T: fmt::Debug + PartialEq + ?Sized,
{
    if unexpected != actual {
        Ok(())
    } else {
        Err(AssertionFailure::with_values(
            message,
            format!("anything but {unexpected:?}"),
            format!("{actual:?}"),
        ))
    }
}

/// Checks that two references point at the same value (identity, not
/// structural equality).
pub fn same<T: ?Sized>(expected: &T, actual: &T, message: &str) -> CheckResult {
    that(std::ptr::eq(expected, actual), message)
}

/// Checks that two references point at different values.
pub fn not_same<T: ?Sized>(unexpected: &T, actual: &T, message: &str) -> CheckResult {
    that(!std::ptr::eq(unexpected, actual), message)
}

/// Checks that an option is `None`.
pub fn is_none<T: fmt::Debug>(value: Option<&T>, message: &str) -> CheckResult {
    match value {
        None => Ok(()),
        Some(inner) => Err(AssertionFailure::with_values(
            message,
            "None".to_string(),
            format!("Some({inner:?})"),
        )),
    }
}

/// Unconditionally fails. Useful for marking unfinished work.
pub fn fail(message: &str) -> CheckResult {
    Err(AssertionFailure::new(message))
}

/// Checks that `result` is an error and yields it for further checks.
pub fn err<T: fmt::Debug, E>(result: Result<T, E>, message: &str) -> Result<E, AssertionFailure> {
    match result {
        Err(error) => Ok(error),
        Ok(value) => Err(AssertionFailure::with_values(
            message,
            "an error".to_string(),
            format!("Ok({value:?})"),
        )),
    }
}

/// Checks that `result` is not an error and yields the value.
pub fn ok<T, E: fmt::Display>(result: Result<T, E>, message: &str) -> Result<T, AssertionFailure> {
    match result {
        Ok(value) => Ok(value),
        Err(error) => Err(AssertionFailure::with_values(
            message,
            "no error".to_string(),
            error.to_string(),
        )),
    }
}

/// Checks element-wise equality of two sequences.
///
/// The first mismatching position (or the length difference) is named in
/// the failure message.
pub fn iter_eq<T, I, J>(expected: I, actual: J, message: &str) -> CheckResult
where
    T: fmt::Debug + PartialEq,
    I: IntoIterator<Item = T>,
    J: IntoIterator<Item = T>,
{
    let expected: Vec<T> = expected.into_iter().collect();
    let actual: Vec<T> = actual.into_iter().collect();

    for (position, (want, got)) in expected.iter().zip(actual.iter()).enumerate() {
        if want != got {
            return Err(AssertionFailure::with_values(
                format!("{message}: mismatch at position {position}"),
                format!("{want:?}"),
                format!("{got:?}"),
            ));
        }
    }
    if expected.len() != actual.len() {
        return Err(AssertionFailure::with_values(
            format!("{message}: sequence lengths differ"),
            format!("{} elements", expected.len()),
            format!("{} elements", actual.len()),
        ));
    }
    Ok(())
}
