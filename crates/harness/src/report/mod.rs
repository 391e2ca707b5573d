// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Thin reporting sinks for suite reports.
//!
//! Deliberately minimal: the harness's boundary is the programmatic API,
//! and these formatters exist so embedding binaries have somewhere to
//! send `(case, terminal status, failures)` without writing their own.

mod json;
mod text;

use std::io;

use termcolor::WriteColor;

use crate::outcome::SuiteReport;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Writes one suite report to a sink.
pub trait ReportFormatter {
    fn write(&self, report: &SuiteReport, out: &mut dyn WriteColor) -> io::Result<()>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
