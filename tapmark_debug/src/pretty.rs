// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tapmark_core::geometry::SizeClass;
use tapmark_core::trace::{
    DiscoveryEvent, MarkerEvent, OverlapEvent, ScheduleEvent, SyncSummary, TeardownReport,
    TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn class_name(class: SizeClass) -> &'static str {
    match class {
        SizeClass::Small => "small",
        SizeClass::Adequate => "ok",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        let _ = writeln!(
            self.writer,
            "[discover] candidates={} hidden={} label_wrapped={} tracked={}",
            e.candidates, e.hidden, e.label_wrapped, e.tracked,
        );
    }

    fn on_marker(&mut self, e: &MarkerEvent) {
        let _ = writeln!(
            self.writer,
            "[marker] #{} {} at ({:.1}, {:.1})",
            e.index,
            class_name(e.class),
            e.origin.x,
            e.origin.y,
        );
    }

    fn on_overlap(&mut self, e: &OverlapEvent) {
        let _ = writeln!(
            self.writer,
            "[overlap] pairs={} flagged={} annotated={}",
            e.pairs, e.flagged, e.annotated,
        );
    }

    fn on_schedule(&mut self, e: &ScheduleEvent) {
        let _ = writeln!(
            self.writer,
            "[schedule] {} in {}ms{}",
            e.trigger.event_type(),
            e.delay.as_millis(),
            if e.replaced { " (replaced pending)" } else { "" },
        );
    }

    fn on_sync(&mut self, s: &SyncSummary) {
        let trigger = s.trigger.map_or("manual", |t| t.event_type());
        let _ = writeln!(
            self.writer,
            "[sync] pass={} trigger={trigger} shown={} hidden={} moved={}",
            s.pass, s.shown, s.hidden, s.moved,
        );
    }

    fn on_teardown(&mut self, r: &TeardownReport) {
        let timer = if r.timer_cancelled { "cancelled" } else { "none" };
        let _ = writeln!(
            self.writer,
            "[teardown] listeners={} markers={} marker_failures={} \
             annotations={} annotations_skipped={} timer={timer}",
            r.listeners_detached,
            r.markers_removed,
            r.marker_failures,
            r.annotations_cleared,
            r.annotations_skipped,
        );
    }
}
