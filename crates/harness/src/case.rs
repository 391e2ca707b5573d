// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Test case data model: names, metadata tags, and bodies.
//!
//! Cases are registered explicitly through the suite builder; there is no
//! discovery step. A case is immutable once its suite is built.

use std::sync::Arc;
use std::time::Duration;

use crate::error::CaseFailure;
use crate::timeout::{CancelToken, TimeoutMode};

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;

/// What a test body reports back.
pub type CaseResult = Result<(), CaseFailure>;

/// A body that borrows the suite fixture and runs on the driver's thread.
pub type LocalBody<C> = Box<dyn FnMut(&mut C) -> CaseResult + Send>;

/// A body that owns its captures and may be abandoned on a worker thread.
/// Required for preemptive timeouts, which cannot keep borrowing the
/// fixture once the work is detached.
pub type DetachedBody = Arc<dyn Fn(&CancelToken) -> CaseResult + Send + Sync>;

/// A metadata tag attached to a case or a suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    /// Canonical skip marker, honored by the built-in skip condition.
    Skip,

    /// Disables the case with an optional author-supplied reason.
    Disabled(Option<String>),

    /// Presentation name, reported instead of the registration name.
    DisplayName(String),

    /// Time budget for the body.
    Timeout { limit: Duration, mode: TimeoutMode },

    /// Free-form marker with an optional payload, for custom conditions.
    Custom { key: String, payload: Option<String> },
}

impl Tag {
    /// A custom tag with no payload.
    pub fn custom(key: impl Into<String>) -> Self {
        Tag::Custom { key: key.into(), payload: None }
    }

    /// A custom tag carrying a payload.
    pub fn custom_with(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Tag::Custom { key: key.into(), payload: Some(payload.into()) }
    }

    /// The tag's key, as matched by tag-presence conditions.
    pub fn key(&self) -> &str {
        match self {
            Tag::Skip => "skip",
            Tag::Disabled(_) => "disabled",
            Tag::DisplayName(_) => "display-name",
            Tag::Timeout { .. } => "timeout",
            Tag::Custom { key, .. } => key,
        }
    }
}

pub(crate) enum Body<C> {
    Local(LocalBody<C>),
    Detached(DetachedBody),
}

/// A registered test case.
pub struct TestCase<C> {
    name: String,
    order: Option<u32>,
    tags: Vec<Tag>,
    pub(crate) body: Body<C>,
}

impl<C> TestCase<C> {
    /// A case with a local body borrowing the suite fixture.
    pub fn new(
        name: impl Into<String>,
        body: impl FnMut(&mut C) -> CaseResult + Send + 'static,
    ) -> Self {
        Self { name: name.into(), order: None, tags: Vec::new(), body: Body::Local(Box::new(body)) }
    }

    /// A case with a detached body, eligible for preemptive timeouts.
    pub fn detached(
        name: impl Into<String>,
        body: impl Fn(&CancelToken) -> CaseResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            order: None,
            tags: Vec::new(),
            body: Body::Detached(Arc::new(body)),
        }
    }

    /// Assigns an explicit order key. Keyed cases run before unkeyed
    /// ones, ascending.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Attaches a metadata tag.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The presentation name: the `DisplayName` tag if present, else the
    /// registration name.
    pub fn display_name(&self) -> &str {
        self.tags
            .iter()
            .find_map(|tag| match tag {
                Tag::DisplayName(name) => Some(name.as_str()),
                _ => None,
            })
            .unwrap_or(&self.name)
    }

    /// The case's timeout tag, if any.
    pub fn timeout(&self) -> Option<(Duration, TimeoutMode)> {
        self.tags.iter().find_map(|tag| match tag {
            Tag::Timeout { limit, mode } => Some((*limit, *mode)),
            _ => None,
        })
    }

    pub(crate) fn info(&self) -> CaseInfo<'_> {
        CaseInfo { name: &self.name, order: self.order, tags: &self.tags }
    }
}

/// Borrowed metadata view of a case, as seen by execution conditions.
/// Conditions never see the body or the fixture.
#[derive(Debug, Clone, Copy)]
pub struct CaseInfo<'a> {
    pub name: &'a str,
    pub order: Option<u32>,
    pub tags: &'a [Tag],
}

impl CaseInfo<'_> {
    /// Whether any tag with the given key is attached.
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.iter().any(|tag| tag.key() == key)
    }

    /// The first tag with the given key.
    pub fn tag(&self, key: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.key() == key)
    }
}
