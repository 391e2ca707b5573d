// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Suites: explicit registration of fixtures, hooks, conditions, and
//! cases.
//!
//! `C` is the suite fixture type. A fresh fixture is constructed for
//! every run, so repeated runs of the same suite are independent.

use std::fmt;
use std::sync::Arc;

use crate::case::{CaseResult, Tag, TestCase};
use crate::condition::ExecutionCondition;
use crate::driver::{self, RunOptions};
use crate::error::{ConfigError, SuiteError};
use crate::outcome::SuiteReport;
use crate::timeout::CancelToken;

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;

/// A lifecycle hook. Returning an error, like panicking, is an
/// unexpected fault, not an assertion failure.
pub type Hook<C> = Box<dyn FnMut(&mut C) -> CaseResult + Send>;

/// A registered, immutable suite. Obtained from [`SuiteBuilder::build`].
pub struct Suite<C> {
    pub(crate) name: String,
    pub(crate) tags: Vec<Tag>,
    pub(crate) fixture: Box<dyn FnMut() -> C + Send>,
    pub(crate) before_all: Option<Hook<C>>,
    pub(crate) after_all: Option<Hook<C>>,
    pub(crate) before_each: Option<Hook<C>>,
    pub(crate) after_each: Option<Hook<C>>,
    pub(crate) conditions: Vec<Box<dyn ExecutionCondition>>,
    pub(crate) cases: Vec<TestCase<C>>,
}

impl<C> Suite<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Registered case names, in registration order.
    pub fn case_names(&self) -> Vec<String> {
        self.cases.iter().map(|case| case.name().to_string()).collect()
    }

    pub(crate) fn info(&self) -> SuiteInfo<'_> {
        SuiteInfo { name: &self.name, tags: &self.tags }
    }

    /// Runs every case with default options and returns a fresh report.
    pub fn run(&mut self) -> Result<SuiteReport, SuiteError> {
        self.run_with(&RunOptions::default())
    }

    /// Runs every case with the given options.
    pub fn run_with(&mut self, options: &RunOptions) -> Result<SuiteReport, SuiteError> {
        driver::run_suite(self, options)
    }
}

impl<C> fmt::Debug for Suite<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("cases", &self.case_names())
            .finish_non_exhaustive()
    }
}

/// Borrowed metadata view of a suite, as seen by execution conditions.
#[derive(Debug, Clone, Copy)]
pub struct SuiteInfo<'a> {
    pub name: &'a str,
    pub tags: &'a [Tag],
}

/// Builder for a [`Suite`]. All registration is explicit; there is no
/// discovery or reflection step.
pub struct SuiteBuilder<C> {
    name: String,
    tags: Vec<Tag>,
    fixture: Box<dyn FnMut() -> C + Send>,
    before_all: Option<Hook<C>>,
    after_all: Option<Hook<C>>,
    before_each: Option<Hook<C>>,
    after_each: Option<Hook<C>>,
    conditions: Vec<Box<dyn ExecutionCondition>>,
    cases: Vec<TestCase<C>>,
}

impl<C: Default + 'static> SuiteBuilder<C> {
    /// Starts a suite whose fixture is `C::default()` per run. Override
    /// with [`fixture`](Self::fixture) when construction needs more.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            fixture: Box::new(C::default),
            before_all: None,
            after_all: None,
            before_each: None,
            after_each: None,
            conditions: Vec::new(),
            cases: Vec::new(),
        }
    }
}

impl<C> SuiteBuilder<C> {
    /// Replaces the fixture constructor. Called once per run, before the
    /// before-all hook.
    pub fn fixture(mut self, fixture: impl FnMut() -> C + Send + 'static) -> Self {
        self.fixture = Box::new(fixture);
        self
    }

    /// Attaches a suite-level tag, visible to conditions for every case.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Registers an execution condition. Conditions run in registration
    /// order after the built-in ones.
    pub fn condition(mut self, condition: impl ExecutionCondition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Hook run exactly once before any case. A failure here aborts the
    /// whole run.
    pub fn before_all(mut self, hook: impl FnMut(&mut C) -> CaseResult + Send + 'static) -> Self {
        self.before_all = Some(Box::new(hook));
        self
    }

    /// Hook run exactly once after all cases reached a terminal state.
    /// A failure here fails the whole run.
    pub fn after_all(mut self, hook: impl FnMut(&mut C) -> CaseResult + Send + 'static) -> Self {
        self.after_all = Some(Box::new(hook));
        self
    }

    /// Hook run before each non-skipped case.
    pub fn before_each(mut self, hook: impl FnMut(&mut C) -> CaseResult + Send + 'static) -> Self {
        self.before_each = Some(Box::new(hook));
        self
    }

    /// Hook run after each non-skipped case, even when the body or the
    /// before-each hook failed.
    pub fn after_each(mut self, hook: impl FnMut(&mut C) -> CaseResult + Send + 'static) -> Self {
        self.after_each = Some(Box::new(hook));
        self
    }

    /// Registers a fully built case.
    pub fn register(mut self, case: TestCase<C>) -> Self {
        self.cases.push(case);
        self
    }

    /// Registers a case with a local body.
    pub fn case(
        self,
        name: impl Into<String>,
        body: impl FnMut(&mut C) -> CaseResult + Send + 'static,
    ) -> Self {
        self.register(TestCase::new(name, body))
    }

    /// Registers a case with a detached body, eligible for preemptive
    /// timeouts.
    pub fn detached_case(
        self,
        name: impl Into<String>,
        body: impl Fn(&CancelToken) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        self.register(TestCase::detached(name, body))
    }

    /// Registers one case per value, named `name[i]` and displayed with
    /// the value rendered in.
    pub fn case_each<V>(
        mut self,
        name: &str,
        values: Vec<V>,
        body: impl Fn(&mut C, &V) -> CaseResult + Send + Sync + 'static,
    ) -> Self
    where
        V: fmt::Debug + Send + 'static,
    {
        let body = Arc::new(body);
        for (index, value) in values.into_iter().enumerate() {
            let display = format!("{name} [{index}] value={value:?}");
            let body = Arc::clone(&body);
            self.cases.push(
                TestCase::new(format!("{name}[{index}]"), move |fixture| (*body)(fixture, &value))
                    .with_tag(Tag::DisplayName(display)),
            );
        }
        self
    }

    /// Validates registration and seals the suite.
    pub fn build(self) -> Result<Suite<C>, ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for case in &self.cases {
            if !seen.insert(case.name().to_string()) {
                return Err(ConfigError::DuplicateCase(case.name().to_string()));
            }
        }
        Ok(Suite {
            name: self.name,
            tags: self.tags,
            fixture: self.fixture,
            before_all: self.before_all,
            after_all: self.after_all,
            before_each: self.before_each,
            after_each: self.after_each,
            conditions: self.conditions,
            cases: self.cases,
        })
    }
}
