// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::signal::Shape;
use thiserror::Error;

/// Evaluation-time failures. Mapping itself is infallible once the input has
/// the shape the pipeline was built for.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Mapper '{stage}' expects {expected} input, got {actual}")]
    ShapeMismatch {
        stage: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("Motor '{motor}' pipeline produced a {actual} instead of a scalar")]
    NonScalarOutput { motor: String, actual: Shape },
}
