// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Verdict Authors

//! Runner configuration loaded from an optional `verdict.toml`.
//!
//! CLI arguments override config values; config values override the
//! built-in defaults documented on each field.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::timeout::TimeoutMode;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Top-level config file shape.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub runner: RunnerSection,
    pub timeout: TimeoutSection,
}

/// `[runner]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerSection {
    /// Default case-name filter (regular expression).
    pub filter: Option<String>,

    /// Default output format: "text" | "json".
    pub output: Option<String>,

    /// Default color mode: "auto" | "always" | "never".
    pub color: Option<String>,
}

/// `[timeout]` section.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutSection {
    /// Budget in milliseconds applied to cases without a timeout tag.
    /// Absent or zero means no default budget.
    pub default_ms: Option<u64>,

    /// Enforcement for the default budget: "cooperative" (default) or
    /// "preemptive".
    pub mode: Option<String>,
}

impl HarnessConfig {
    /// Loads from a file. A missing file is not an error; it yields the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::load_from_str(&raw)
    }

    pub fn load_from_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// The configured default timeout, if any.
    pub fn default_timeout(&self) -> Option<(Duration, TimeoutMode)> {
        let ms = self.timeout.default_ms.filter(|&ms| ms > 0)?;
        let mode = match self.timeout.mode.as_deref() {
            Some("preemptive") => TimeoutMode::Preemptive,
            _ => TimeoutMode::Cooperative,
        };
        Some((Duration::from_millis(ms), mode))
    }
}
