// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 the corral authors

//! Service descriptor (§3, §4.A).

use crate::color::Color;
use crate::error::ModelError;
use regex::RegexBuilder;
use std::path::PathBuf;

/// Signal identifiers a `stop` clause may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Sigint,
    Sigterm,
    Sighup,
    Sigkill,
    Sigquit,
}

impl SignalKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SIGINT" => Some(SignalKind::Sigint),
            "SIGTERM" => Some(SignalKind::Sigterm),
            "SIGHUP" => Some(SignalKind::Sighup),
            "SIGKILL" => Some(SignalKind::Sigkill),
            "SIGQUIT" => Some(SignalKind::Sigquit),
            _ => None,
        }
    }
}

/// How a service should be asked to stop.
#[derive(Debug, Clone)]
pub enum StopSpec {
    Signal(SignalKind),
    Command(String),
}

impl Default for StopSpec {
    fn default() -> Self {
        StopSpec::Signal(SignalKind::Sigterm)
    }
}

/// A compiled, case-insensitive observation pattern plus its source text
/// (kept for diagnostics and for re-serializing a loaded configuration).
#[derive(Debug, Clone)]
pub struct Pattern {
    pub source: String,
    pub regex: regex::Regex,
}

impl Pattern {
    fn compile(source: &str) -> Result<Self, ModelError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| ModelError::InvalidPattern {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.find(line).is_some()
    }
}

/// Immutable, validated description of one long-running command.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub start_command: String,
    pub work_dir: Option<PathBuf>,
    pub stdin_file: Option<PathBuf>,
    pub stop_spec: StopSpec,
    pub stop_timeout_secs: u64,
    pub stop_stdin_file: Option<PathBuf>,
    pub started_patterns: Vec<Pattern>,
    pub error_patterns: Vec<Pattern>,
    pub color: Color,
}

/// Builder-style inputs to [`ServiceDescriptor::build`], mirroring the wire
/// schema of §6 before any validation has run.
#[derive(Debug, Clone, Default)]
pub struct ServiceSpec {
    pub name: String,
    pub aliases: Vec<String>,
    pub start_command: String,
    pub work_dir: Option<PathBuf>,
    pub stdin_file: Option<PathBuf>,
    pub stop: Option<String>,
    pub stop_timeout_secs: Option<u64>,
    pub stop_stdin_file: Option<PathBuf>,
    pub started_patterns: Vec<String>,
    pub error_patterns: Vec<String>,
    pub color: Option<String>,
}

impl ServiceDescriptor {
    pub fn build(spec: ServiceSpec) -> Result<Self, ModelError> {
        validate_identifier(&spec.name)?;
        for alias in &spec.aliases {
            validate_identifier(alias)?;
        }

        let stop_timeout_secs = spec.stop_timeout_secs.unwrap_or(crate::DEFAULT_STOP_TIMEOUT_SECS);
        if stop_timeout_secs < 1 {
            return Err(ModelError::InvalidStopTimeout(stop_timeout_secs));
        }

        let stop_spec = match spec.stop {
            None => StopSpec::default(),
            Some(raw) => match SignalKind::parse(&raw) {
                Some(sig) => StopSpec::Signal(sig),
                None => StopSpec::Command(raw),
            },
        };

        let started_patterns = spec
            .started_patterns
            .iter()
            .map(|p| Pattern::compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        let error_patterns = spec
            .error_patterns
            .iter()
            .map(|p| Pattern::compile(p))
            .collect::<Result<Vec<_>, _>>()?;

        let color = match spec.color {
            None => Color::default(),
            Some(raw) => Color::parse(&raw)?,
        };

        Ok(ServiceDescriptor {
            name: spec.name,
            aliases: spec.aliases,
            start_command: spec.start_command,
            work_dir: spec.work_dir,
            stdin_file: spec.stdin_file,
            stop_spec,
            stop_timeout_secs,
            stop_stdin_file: spec.stop_stdin_file,
            started_patterns,
            error_patterns,
            color,
        })
    }

    /// All identifiers (name plus aliases) this service is addressable by.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

pub(crate) fn validate_identifier(name: &str) -> Result<(), ModelError> {
    static IDENTIFIER_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    // Allow expect here as the pattern is a compile-time constant known to be valid.
    #[allow(clippy::expect_used)]
    let re = IDENTIFIER_RE
        .get_or_init(|| regex::Regex::new(crate::IDENTIFIER_PATTERN).expect("static identifier pattern"));
    if name.is_empty() || !re.is_match(name) {
        return Err(ModelError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
