// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the overlay session.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! session calls at each stage of its lifecycle. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use core::time::Duration;

use kurbo::Point;

use crate::geometry::SizeClass;
use crate::pending::UpdateTrigger;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once discovery has filtered the candidate set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiscoveryEvent {
    /// Elements matched by the interactive selector.
    pub candidates: usize,
    /// Candidates dropped because they (or an ancestor) do not render.
    pub hidden: usize,
    /// Candidates dropped because a `<label>` ancestor already covers them.
    pub label_wrapped: usize,
    /// Elements kept for tracking.
    pub tracked: usize,
}

/// Emitted for every marker created at install.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerEvent {
    /// Position in the tracked list.
    pub index: usize,
    /// Size classification of the underlying element.
    pub class: SizeClass,
    /// Initial top-left corner in document coordinates.
    pub origin: Point,
}

/// Emitted after overlap detection and annotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlapEvent {
    /// Close pairs found.
    pub pairs: usize,
    /// Distinct elements flagged.
    pub flagged: usize,
    /// Flagged elements that accepted the annotation.
    pub annotated: usize,
}

/// Emitted whenever a trigger (re)schedules the pending update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleEvent {
    /// What asked for the update.
    pub trigger: UpdateTrigger,
    /// Delay until the update runs.
    pub delay: Duration,
    /// Whether an earlier pending update was cancelled.
    pub replaced: bool,
}

/// Outcome of one synchronization pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Monotonic pass counter, starting at 1.
    pub pass: u64,
    /// Trigger that scheduled this pass, if it came from the pending slot.
    pub trigger: Option<UpdateTrigger>,
    /// Markers visible after the pass.
    pub shown: usize,
    /// Markers hidden after the pass.
    pub hidden: usize,
    /// Markers whose position changed.
    pub moved: usize,
}

/// Outcome of a teardown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    /// Listeners unregistered.
    pub listeners_detached: usize,
    /// Marker nodes removed.
    pub markers_removed: usize,
    /// Marker nodes that could not be removed (e.g. already gone).
    pub marker_failures: usize,
    /// `overlap` annotations removed.
    pub annotations_cleared: usize,
    /// Annotations left alone because something else changed them.
    pub annotations_skipped: usize,
    /// Whether a pending update was cancelled.
    pub timer_cancelled: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the session.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after discovery.
    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        _ = e;
    }

    /// Called for each marker created.
    fn on_marker(&mut self, e: &MarkerEvent) {
        _ = e;
    }

    /// Called after overlap detection.
    fn on_overlap(&mut self, e: &OverlapEvent) {
        _ = e;
    }

    /// Called when an update is scheduled.
    fn on_schedule(&mut self, e: &ScheduleEvent) {
        _ = e;
    }

    /// Called after each synchronization pass.
    fn on_sync(&mut self, s: &SyncSummary) {
        _ = s;
    }

    /// Called once, after teardown.
    fn on_teardown(&mut self, r: &TeardownReport) {
        _ = r;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`DiscoveryEvent`].
    #[inline]
    pub fn discovery(&mut self, e: &DiscoveryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_discovery(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MarkerEvent`].
    #[inline]
    pub fn marker(&mut self, e: &MarkerEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_marker(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`OverlapEvent`].
    #[inline]
    pub fn overlap(&mut self, e: &OverlapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_overlap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScheduleEvent`].
    #[inline]
    pub fn schedule(&mut self, e: &ScheduleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_schedule(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SyncSummary`].
    #[inline]
    pub fn sync(&mut self, summary: &SyncSummary) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_sync(summary);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = summary;
        }
    }

    /// Emits a [`TeardownReport`].
    #[inline]
    pub fn teardown(&mut self, r: &TeardownReport) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_teardown(r);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = r;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_discovery(&DiscoveryEvent::default());
        sink.on_overlap(&OverlapEvent::default());
        sink.on_sync(&SyncSummary::default());
        sink.on_teardown(&TeardownReport::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.discovery(&DiscoveryEvent::default());
        tracer.sync(&SyncSummary::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            passes: Vec<u64>,
        }
        impl TraceSink for RecordingSink {
            fn on_sync(&mut self, s: &SyncSummary) {
                self.passes.push(s.pass);
            }
        }

        let mut sink = RecordingSink { passes: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.sync(&SyncSummary {
            pass: 3,
            ..SyncSummary::default()
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.passes, &[3]);
    }
}
