// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! * `config` - configuration loading and validation
//! * `mapper` - stage construction and evaluation events
//! * `pipeline` - per-motor pipeline lifecycle

use tracing::Span;

pub mod config;
pub mod mapper;
pub mod pipeline;

/// A log message that knows its level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with its fields attached.
    fn log(&self);

    /// A span carrying the message's fields, for scoping nested events.
    ///
    /// Only messages that open a unit of work override this; the rest have no span.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
