// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! JSON format report output.

use std::io::{self, Write};

use termcolor::WriteColor;

use crate::outcome::SuiteReport;

use super::ReportFormatter;

/// Machine-oriented JSON formatter (one pretty-printed document per
/// report).
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn write(&self, report: &SuiteReport, out: &mut dyn WriteColor) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        writeln!(out, "{rendered}")
    }
}
