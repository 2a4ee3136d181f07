// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Log messages are structs implementing `Display` plus [`messages::StructuredLog`],
//! so each event carries its fields as structured `tracing` data.
//!
//! # Usage
//!
//! ```rust
//! use motor_mapper::observability::messages::pipeline::PipelineBuilt;
//! use motor_mapper::observability::messages::StructuredLog;
//!
//! let msg = PipelineBuilt {
//!     motor: "jaw",
//!     mapper: "linear",
//!     input_shape: "scalar",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
