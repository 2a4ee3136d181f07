// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for motor pipeline lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Building a motor's pipeline from its binding.
///
/// # Log Level
/// `debug!` - Opens the span the stage and pipeline events are recorded in
pub struct PipelineBuildStarted<'a> {
    pub motor: &'a str,
    pub stage_count: usize,
}

impl Display for PipelineBuildStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Building pipeline for motor '{}' ({} stage(s))",
            self.motor, self.stage_count
        )
    }
}

impl StructuredLog for PipelineBuildStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            motor = self.motor,
            stage_count = self.stage_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "pipeline_build",
            name = name,
            motor = self.motor,
            stage_count = self.stage_count,
        )
    }
}

/// A motor's pipeline is ready for evaluation.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineBuilt<'a> {
    pub motor: &'a str,
    pub mapper: &'a str,
    pub input_shape: &'a str,
}

impl Display for PipelineBuilt<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Motor '{}' pipeline built: mapper={}, input={}",
            self.motor, self.mapper, self.input_shape
        )
    }
}

impl StructuredLog for PipelineBuilt<'_> {
    fn log(&self) {
        tracing::info!(
            motor = self.motor,
            mapper = self.mapper,
            input_shape = self.input_shape,
            "{}", self
        );
    }
}

/// A motor's pipeline could not be built.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PipelineBuildFailed<'a> {
    pub motor: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineBuildFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Motor '{}' pipeline build failed: {}", self.motor, self.error)
    }
}

impl StructuredLog for PipelineBuildFailed<'_> {
    fn log(&self) {
        tracing::error!(
            motor = self.motor,
            error = %self.error,
            "{}", self
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_started_opens_span() {
        let started = PipelineBuildStarted {
            motor: "jaw",
            stage_count: 2,
        };
        assert_eq!(started.to_string(), "Building pipeline for motor 'jaw' (2 stage(s))");

        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            let span = started.span("motor_pipeline");
            assert_eq!(span.metadata().map(|m| m.name()), Some("pipeline_build"));
        });
    }

    #[test]
    fn test_outcome_messages_have_no_span() {
        let built = PipelineBuilt {
            motor: "jaw",
            mapper: "linear",
            input_shape: "scalar",
        };
        tracing::subscriber::with_default(tracing_subscriber::registry(), || {
            assert!(built.span("motor_pipeline").is_none());
        });
    }
}
