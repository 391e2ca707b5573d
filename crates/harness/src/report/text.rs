// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Text format report output.

use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

use crate::outcome::{CaseStatus, SuiteReport};

use super::ReportFormatter;

/// Human-oriented text formatter with per-status coloring.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn write(&self, report: &SuiteReport, out: &mut dyn WriteColor) -> io::Result<()> {
        writeln!(
            out,
            "suite {}: {} passed, {} failed, {} skipped, {} errored (in {:?})",
            report.suite,
            report.passed(),
            report.failed(),
            report.skipped(),
            report.errored(),
            report.duration,
        )?;

        for record in &report.cases {
            let (color, label) = match &record.status {
                CaseStatus::Passed => (Color::Green, "PASS"),
                CaseStatus::Failed { .. } => (Color::Red, "FAIL"),
                CaseStatus::Skipped { .. } => (Color::Yellow, "SKIP"),
                CaseStatus::Errored { .. } => (Color::Red, "ERROR"),
            };
            out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(out, "  {label:>5}")?;
            out.reset()?;
            write!(out, " {}", record.display_name)?;
            if record.slow {
                write!(out, " (slow)")?;
            }
            writeln!(out)?;

            match &record.status {
                CaseStatus::Failed { failures } => {
                    for failure in failures {
                        match (&failure.group, failure.index) {
                            (Some(group), Some(index)) => {
                                writeln!(out, "        [{group}#{index}] {failure}")?
                            }
                            _ => writeln!(out, "        {failure}")?,
                        }
                    }
                }
                CaseStatus::Skipped { reason } => writeln!(out, "        {reason}")?,
                CaseStatus::Errored { message } => writeln!(out, "        {message}")?,
                CaseStatus::Passed => {}
            }
        }
        Ok(())
    }
}
