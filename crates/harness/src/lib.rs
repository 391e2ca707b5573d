// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! verdict: a pluggable test harness.
//!
//! The harness decides, per registered test case, whether to run, skip,
//! or time-box it, and aggregates multiple independent assertions into
//! one reported failure set. Registration is explicit; there is no
//! discovery step.
//!
//! ```
//! use verdict::check;
//! use verdict::suite::SuiteBuilder;
//!
//! let mut suite = SuiteBuilder::<()>::new("demo")
//!     .case("arithmetic", |_| check::eq(&4, &(2 * 2), "4 is 2 times 2").map_err(Into::into))
//!     .build()?;
//! let report = suite.run()?;
//! assert!(report.is_success());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod case;
pub mod check;
pub mod cli;
pub mod condition;
pub mod config;
pub mod driver;
pub mod error;
pub mod outcome;
pub mod report;
pub mod suite;
pub mod timeout;

#[cfg(test)]
mod test_utils;

pub use case::{CaseResult, Tag, TestCase};
pub use check::{AssertionFailure, Group, GroupFailure};
pub use condition::{ConditionEvaluation, ExecutionCondition, SkipIfTagPresent};
pub use driver::RunOptions;
pub use error::{CaseFailure, ConfigError, SuiteError, TimeoutError};
pub use outcome::{CaseRecord, CaseStatus, SuiteReport};
pub use suite::{Suite, SuiteBuilder};
pub use timeout::{CancelToken, TimeoutMode, TimeoutOutcome, run_with_timeout};
