// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::Debug;

use crate::errors::MappingError;
use crate::signal::{Shape, Signal};

/// A built transform stage: a pure function from an input sample to a motor value.
///
/// Implementations resolve all of their coefficients at construction time and
/// hold no mutable state, so one instance may be shared across threads and
/// evaluated any number of times.
pub trait Mapper: Send + Sync + Debug {
    /// Evaluate the stage. Fails only when `input` does not match [`Mapper::input_shape`].
    fn map(&self, input: &Signal) -> Result<Signal, MappingError>;

    /// Registry name of the stage, e.g. `"linear"`.
    fn name(&self) -> &'static str;

    /// The input this stage accepts; checked when stages are chained.
    fn input_shape(&self) -> Shape;
}

/// The error for `input` reaching a `mapper` that does not accept its shape.
pub fn shape_mismatch(mapper: &dyn Mapper, input: &Signal) -> MappingError {
    MappingError::ShapeMismatch {
        stage: mapper.name(),
        expected: mapper.input_shape(),
        actual: input.shape(),
    }
}
