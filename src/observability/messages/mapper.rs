// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for mapper construction and evaluation.

use crate::observability::messages::StructuredLog;
use crate::signal::Shape;
use std::fmt::{Display, Formatter};

/// One stage built from its description.
///
/// # Log Level
/// `debug!` - Detail useful when tracing a configuration
pub struct StageBuilt {
    pub stage: &'static str,
    pub input_shape: Shape,
}

impl Display for StageBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built stage '{}' accepting {} input",
            self.stage, self.input_shape
        )
    }
}

impl StructuredLog for StageBuilt {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            input_shape = %self.input_shape,
            "{}", self
        );
    }
}

/// The `asin` argument of a quaternion stage left `[-1, 1]` and was clamped.
///
/// # Log Level
/// `trace!` - Expected floating-point noise, per sample
pub struct AsinArgumentClamped {
    pub argument: f64,
}

impl Display for AsinArgumentClamped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Clamped asin argument {} to [-1, 1]", self.argument)
    }
}

impl StructuredLog for AsinArgumentClamped {
    fn log(&self) {
        tracing::trace!(argument = self.argument, "{}", self);
    }
}
