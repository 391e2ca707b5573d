// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Error taxonomy for the harness.
//!
//! Assertion failures live in [`crate::check`]; everything here is either
//! a configuration problem or a fault that terminates more than a single
//! check.

use std::any::Any;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::check::{AssertionFailure, GroupFailure};

/// Invalid harness configuration. Fatal to the single operation that
/// carries it; sibling test cases keep running.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("timeout duration must be positive, got {0:?}")]
    ZeroTimeout(Duration),

    #[error("invalid case filter `{pattern}`: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate test case `{0}`")]
    DuplicateCase(String),

    #[error("preemptive timeout on `{0}` requires a detached case body")]
    PreemptiveLocalBody(String),

    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors raised by the timeout executor before or instead of an outcome.
#[derive(Debug, Error)]
pub enum TimeoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn timeout worker: {0}")]
    Spawn(#[from] io::Error),
}

/// Fatal suite-level failures. Case-level failures never surface here;
/// they are recorded in the report and the run continues.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The before-all hook failed. No fixture guarantee holds, so no
    /// case was executed.
    #[error("before-all hook failed for suite `{suite}`: {message}")]
    SetupFailed { suite: String, message: String },

    /// The after-all hook failed after the cases ran. Teardown is not
    /// guaranteed, so the run as a whole is reported as failed.
    #[error("after-all hook failed for suite `{suite}`: {message}")]
    TeardownFailed { suite: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A reason a test case body (or hook) did not succeed of its own accord.
#[derive(Debug, Error)]
pub enum CaseFailure {
    #[error(transparent)]
    Check(#[from] AssertionFailure),

    #[error(transparent)]
    Group(#[from] GroupFailure),
}

impl CaseFailure {
    /// All individual assertion failures carried by this failure.
    pub fn into_failures(self) -> Vec<AssertionFailure> {
        match self {
            CaseFailure::Check(failure) => vec![failure],
            CaseFailure::Group(group) => group.failures,
        }
    }
}

/// Renders a panic payload into a human-readable message.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
