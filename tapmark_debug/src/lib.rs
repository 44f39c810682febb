// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON Lines export for tapmark session traces.
//!
//! This crate provides [`TraceSink`](tapmark_core::trace::TraceSink)
//! implementations for development and offline analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: collects events as JSON objects and writes them
//!   as JSON Lines.

pub mod json;
pub mod pretty;
