// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! The test lifecycle driver.
//!
//! Runs cases sequentially, isolating faults so one case (or hook)
//! failing never prevents its siblings from running. The only spawned
//! concurrency is the preemptive timeout worker inside
//! [`crate::timeout`].
//!
//! Per case: conditions gate first; skipped cases run no hooks and no
//! body. Otherwise before-each, body (through the timeout executor when
//! tagged), then after-each, which runs even when the body or the
//! before-each hook failed.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use regex::Regex;

use crate::case::{Body, CaseResult, TestCase};
use crate::check::AssertionFailure;
use crate::condition::{self, builtin_conditions};
use crate::error::{ConfigError, SuiteError, panic_message};
use crate::outcome::{CaseRecord, CaseStatus, SuiteReport};
use crate::suite::{Hook, Suite, SuiteInfo};
use crate::timeout::{CancelToken, TimeoutMode, TimeoutOutcome, run_with_timeout};

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;

/// Per-run options, merged from config and the embedding CLI.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Only cases whose registration name matches run; the rest are
    /// recorded as skipped so the report still covers every case.
    pub filter: Option<Regex>,

    /// Time budget applied to cases without a timeout tag.
    pub default_timeout: Option<(Duration, TimeoutMode)>,
}

/// Runs all cases of a suite and returns a fresh report.
pub(crate) fn run_suite<C>(
    suite: &mut Suite<C>,
    options: &RunOptions,
) -> Result<SuiteReport, SuiteError> {
    let started_at = Utc::now();
    let run_start = Instant::now();

    let Suite {
        name,
        tags,
        fixture: make_fixture,
        before_all,
        after_all,
        before_each,
        after_each,
        conditions,
        cases,
    } = suite;

    let span = tracing::info_span!("suite", name = %name);
    let _guard = span.enter();

    let suite_name = name.clone();
    let suite_info = SuiteInfo { name: name.as_str(), tags: tags.as_slice() };
    let builtins = builtin_conditions();
    let order = execution_order(cases);

    let mut fixture = match catch_unwind(AssertUnwindSafe(|| make_fixture())) {
        Ok(fixture) => fixture,
        Err(payload) => {
            return Err(SuiteError::SetupFailed {
                suite: suite_name,
                message: format!("fixture construction panicked: {}", panic_message(payload)),
            });
        }
    };

    if let Err(message) = run_hook(before_all, &mut fixture, "before-all") {
        return Err(SuiteError::SetupFailed { suite: suite_name, message });
    }

    let mut records = Vec::with_capacity(cases.len());
    for index in order {
        let case_name = cases[index].name().to_string();
        let display_name = cases[index].display_name().to_string();
        let case_span = tracing::info_span!("case", name = %case_name);
        let _case_guard = case_span.enter();

        if let Some(filter) = &options.filter
            && !filter.is_match(&case_name)
        {
            let reason = format!("did not match filter `{filter}`");
            tracing::debug!("skipped: {reason}");
            records.push(CaseRecord {
                name: case_name,
                display_name,
                status: CaseStatus::Skipped { reason },
                duration: Duration::ZERO,
                slow: false,
            });
            continue;
        }

        let evaluation = {
            let info = cases[index].info();
            let builtin = condition::evaluate_all(&info, &suite_info, &builtins);
            if builtin.is_disabled() {
                builtin
            } else {
                condition::evaluate_all(&info, &suite_info, conditions)
            }
        };
        if evaluation.is_disabled() {
            tracing::info!("skipped: {}", evaluation.reason());
            records.push(CaseRecord {
                name: case_name,
                display_name,
                status: CaseStatus::Skipped { reason: evaluation.reason().to_string() },
                duration: Duration::ZERO,
                slow: false,
            });
            continue;
        }

        let case_start = Instant::now();
        let (mut status, slow) = match run_hook(before_each, &mut fixture, "before-each") {
            Ok(()) => execute_case(&mut cases[index], &mut fixture, options),
            Err(message) => (CaseStatus::Errored { message }, false),
        };
        let duration = case_start.elapsed();

        if let Err(message) = run_hook(after_each, &mut fixture, "after-each") {
            if status.is_passed() {
                status = CaseStatus::Errored { message };
            } else {
                tracing::warn!("{message}");
            }
        }

        match &status {
            CaseStatus::Passed => tracing::info!(?duration, "passed"),
            CaseStatus::Failed { failures } => {
                tracing::info!(count = failures.len(), "failed")
            }
            CaseStatus::Errored { message } => tracing::warn!("errored: {message}"),
            CaseStatus::Skipped { .. } => {}
        }

        records.push(CaseRecord { name: case_name, display_name, status, duration, slow });
    }

    if let Err(message) = run_hook(after_all, &mut fixture, "after-all") {
        return Err(SuiteError::TeardownFailed { suite: suite_name, message });
    }

    Ok(SuiteReport {
        suite: suite_name,
        started_at,
        duration: run_start.elapsed(),
        cases: records,
    })
}

/// Execution order: explicit order keys first, ascending, ties broken by
/// registration order; unkeyed cases follow in registration order.
pub(crate) fn execution_order<C>(cases: &[TestCase<C>]) -> Vec<usize> {
    let mut keyed: Vec<usize> =
        (0..cases.len()).filter(|&index| cases[index].order().is_some()).collect();
    keyed.sort_by_key(|&index| (cases[index].order(), index));
    keyed.extend((0..cases.len()).filter(|&index| cases[index].order().is_none()));
    keyed
}

/// Runs a hook, treating an error return or a panic as an unexpected
/// fault described by the returned message.
fn run_hook<C>(hook: &mut Option<Hook<C>>, fixture: &mut C, label: &str) -> Result<(), String> {
    let Some(hook) = hook.as_mut() else {
        return Ok(());
    };
    match catch_unwind(AssertUnwindSafe(|| hook(fixture))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(failure)) => Err(format!("{label} hook failed: {failure}")),
        Err(payload) => Err(format!("{label} hook panicked: {}", panic_message(payload))),
    }
}

fn execute_case<C>(
    case: &mut TestCase<C>,
    fixture: &mut C,
    options: &RunOptions,
) -> (CaseStatus, bool) {
    match case.timeout().or(options.default_timeout) {
        None => (run_untimed(case, fixture), false),
        Some((limit, TimeoutMode::Cooperative)) => run_cooperative_case(case, fixture, limit),
        Some((limit, TimeoutMode::Preemptive)) => (run_preemptive_case(case, limit), false),
    }
}

fn run_untimed<C>(case: &mut TestCase<C>, fixture: &mut C) -> CaseStatus {
    let outcome = match &mut case.body {
        Body::Local(body) => catch_unwind(AssertUnwindSafe(|| body(fixture))),
        Body::Detached(body) => {
            let token = CancelToken::new();
            let body = Arc::clone(body);
            catch_unwind(AssertUnwindSafe(|| (*body)(&token)))
        }
    };
    body_status(outcome)
}

/// Cooperative budget: the body always runs to completion on this
/// thread; a breach converts a pass into a failure and flags the record
/// as slow, but never interrupts the work.
fn run_cooperative_case<C>(
    case: &mut TestCase<C>,
    fixture: &mut C,
    limit: Duration,
) -> (CaseStatus, bool) {
    if limit.is_zero() {
        let message = ConfigError::ZeroTimeout(limit).to_string();
        return (CaseStatus::Errored { message }, false);
    }

    let start = Instant::now();
    let status = run_untimed(case, fixture);
    let elapsed = start.elapsed();
    if elapsed <= limit {
        return (status, false);
    }

    let breach = AssertionFailure::new(format!(
        "completed in {elapsed:?} but exceeded cooperative timeout of {limit:?}"
    ));
    let status = match status {
        CaseStatus::Passed => CaseStatus::Failed { failures: vec![breach] },
        CaseStatus::Failed { mut failures } => {
            failures.push(breach);
            CaseStatus::Failed { failures }
        }
        other => other,
    };
    (status, true)
}

fn run_preemptive_case<C>(case: &mut TestCase<C>, limit: Duration) -> CaseStatus {
    let Body::Detached(body) = &case.body else {
        let message = ConfigError::PreemptiveLocalBody(case.name().to_string()).to_string();
        return CaseStatus::Errored { message };
    };

    let body = Arc::clone(body);
    match run_with_timeout(limit, TimeoutMode::Preemptive, move |token| (*body)(token)) {
        Ok(TimeoutOutcome::Completed { value: Ok(()), .. }) => CaseStatus::Passed,
        Ok(TimeoutOutcome::Completed { value: Err(failure), .. }) => {
            CaseStatus::Failed { failures: failure.into_failures() }
        }
        Ok(TimeoutOutcome::Panicked { message, .. }) => {
            CaseStatus::Errored { message: format!("case body panicked: {message}") }
        }
        Ok(TimeoutOutcome::TimedOut { limit }) => CaseStatus::Failed {
            failures: vec![AssertionFailure::new(format!(
                "timed out after {limit:?}; work abandoned"
            ))],
        },
        Err(error) => CaseStatus::Errored { message: error.to_string() },
    }
}

fn body_status(outcome: Result<CaseResult, Box<dyn std::any::Any + Send>>) -> CaseStatus {
    match outcome {
        Ok(Ok(())) => CaseStatus::Passed,
        Ok(Err(failure)) => CaseStatus::Failed { failures: failure.into_failures() },
        Err(payload) => CaseStatus::Errored {
            message: format!("case body panicked: {}", panic_message(payload)),
        },
    }
}
