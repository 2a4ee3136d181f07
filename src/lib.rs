// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // config loading + validation
pub mod engine;     // per-motor pipelines
pub mod errors;     // error handling
pub mod mappers;    // transform stages + factory
pub mod observability;
pub mod signal;     // values flowing through pipelines
pub mod traits;     // mapper capability contract
