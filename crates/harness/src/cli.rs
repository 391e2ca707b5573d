// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Embedding surface for binaries hosting verdict suites.
//!
//! A hosting binary parses [`RunnerArgs`], registers its suites as
//! [`RegisteredSuite`] trait objects, and hands both to [`run_main`],
//! which wires up logging, config, filtering, and report output.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use crate::config::HarnessConfig;
use crate::driver::RunOptions;
use crate::error::{ConfigError, SuiteError};
use crate::outcome::SuiteReport;
use crate::report::{JsonFormatter, ReportFormatter, TextFormatter};
use crate::suite::Suite;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Standard arguments for a suite-hosting binary.
#[derive(Debug, Parser)]
#[command(name = "verdict")]
#[command(version, about = "Run registered verdict test suites", long_about = None)]
pub struct RunnerArgs {
    /// Only run cases whose name matches this regular expression
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// List registered cases without running them
    #[arg(long)]
    pub list: bool,

    /// Use specific config file
    #[arg(short = 'C', long = "config", env = "VERDICT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose lifecycle logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Object-safe view of a suite, so one binary can host suites with
/// different fixture types.
pub trait RegisteredSuite {
    fn name(&self) -> &str;
    fn case_names(&self) -> Vec<String>;
    fn run_with(&mut self, options: &RunOptions) -> Result<SuiteReport, SuiteError>;
}

impl<C> RegisteredSuite for Suite<C> {
    fn name(&self) -> &str {
        Suite::name(self)
    }

    fn case_names(&self) -> Vec<String> {
        Suite::case_names(self)
    }

    fn run_with(&mut self, options: &RunOptions) -> Result<SuiteReport, SuiteError> {
        Suite::run_with(self, options)
    }
}

/// Initializes tracing to stderr. `RUST_LOG` wins over the verbose flag.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "verdict=debug" } else { "verdict=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // A second init (tests, multiple suites binaries) is not an error
    // worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds run options by layering CLI args over the config file.
pub fn build_run_options(
    args: &RunnerArgs,
    config: &HarnessConfig,
) -> Result<RunOptions, ConfigError> {
    let pattern = args.filter.clone().or_else(|| config.runner.filter.clone());
    let filter = match pattern {
        Some(pattern) => Some(regex::Regex::new(&pattern).map_err(|source| {
            ConfigError::InvalidFilter { pattern, source }
        })?),
        None => None,
    };
    Ok(RunOptions { filter, default_timeout: config.default_timeout() })
}

/// Runs every registered suite and returns the process exit code:
/// 0 when all runs succeeded, 1 when any case failed or errored, 2 when
/// a suite-level failure aborted a run.
pub fn run_main(
    args: &RunnerArgs,
    suites: &mut [Box<dyn RegisteredSuite>],
) -> anyhow::Result<i32> {
    init_tracing(args.verbose);

    let config_path = args.config.clone().unwrap_or_else(|| PathBuf::from("verdict.toml"));
    let config = HarnessConfig::load(&config_path)?;
    let options = build_run_options(args, &config)?;

    if args.list {
        let mut out = StandardStream::stdout(args.color.choice());
        for suite in suites.iter() {
            for case in suite.case_names() {
                writeln!(out, "{}::{case}", suite.name())?;
            }
        }
        return Ok(0);
    }

    let formatter: Box<dyn ReportFormatter> = match args.output {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    let mut exit = 0;
    let mut out = StandardStream::stdout(args.color.choice());
    for suite in suites.iter_mut() {
        match suite.run_with(&options) {
            Ok(report) => {
                formatter.write(&report, &mut out)?;
                if !report.is_success() {
                    exit = exit.max(1);
                }
            }
            Err(error) => {
                tracing::error!("suite `{}` aborted: {error}", suite.name());
                exit = 2;
            }
        }
    }
    Ok(exit)
}
