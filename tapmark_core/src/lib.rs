// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target-size audit engine for interactive controls.
//!
//! `tapmark_core` holds everything an on-page target-size audit needs except
//! the document itself. It is `no_std` compatible (with `alloc`); all document
//! access goes through the [`host`] traits, so the same logic runs against a
//! live browser document and against in-memory doubles.
//!
//! # Architecture
//!
//! ```text
//!   Document ──► discover() ──► Discovery (elements + center snapshot)
//!                                   │
//!                 ┌─────────────────┼──────────────────────┐
//!                 ▼                 ▼                      ▼
//!         MarkerSurface::create   detect_overlaps()   InstallReport
//!                                   │
//!                                   ▼
//!                         aria-description="overlap"
//!
//!   scroll / resize / orientationchange
//!       │
//!       ▼
//!   Session::request_update() ──► PendingUpdate ──► Timers::schedule
//!                                                        │
//!                 ┌──────────────────────────────────────┘
//!                 ▼
//!   Session::timer_fired() ──► re-measure ──► MarkerSurface::place / set_shown
//! ```
//!
//! **[`session`]**: The lifecycle state machine (install, synchronize,
//! tear down) tying everything together.
//!
//! **[`discovery`]**: Candidate query, visibility filter, and label-wrapped
//! exclusion; takes the install-time layout snapshot.
//!
//! **[`visibility`]**: Ancestor walk over computed `display`/`visibility`.
//!
//! **[`geometry`]**: Document-space centers and size classification.
//!
//! **[`marker`]**: Marker specs, tints, and collision-free clip ids.
//!
//! **[`overlap`]**: Pairwise center-distance check over the snapshot.
//!
//! **[`pending`]**: The single replace-not-stack debounce slot.
//!
//! **[`host`]**: Traits that browser (or test) backends implement.
//!
//! **[`config`]**: Thresholds, delays, and fixed selector/attribute strings.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! session instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod config;
pub mod discovery;
pub mod geometry;
pub mod host;
pub mod marker;
pub mod overlap;
pub mod pending;
pub mod session;
pub mod trace;
pub mod visibility;

#[cfg(test)]
mod testing;
