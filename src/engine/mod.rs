// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod pipeline;

pub use pipeline::{MotorPipeline, MotorPipelines};
