// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON Lines trace export.
//!
//! [`JsonLinesSink`] records every event as a `serde_json` object tagged with
//! an `"event"` field and a running sequence number. [`write_to`] renders the
//! collected events one object per line, suitable for `jq` or a notebook.
//!
//! [`write_to`]: JsonLinesSink::write_to

use std::io::{self, Write};

use serde_json::{Value, json};

use tapmark_core::geometry::SizeClass;
use tapmark_core::trace::{
    DiscoveryEvent, MarkerEvent, OverlapEvent, ScheduleEvent, SyncSummary, TeardownReport,
    TraceSink,
};

/// Collects trace events as JSON objects.
#[derive(Debug, Default)]
pub struct JsonLinesSink {
    events: Vec<Value>,
}

impl JsonLinesSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Removes and returns every recorded event.
    pub fn take(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.events)
    }

    /// Writes each recorded event as one line of compact JSON.
    pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut *writer, event)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn push(&mut self, name: &str, mut body: Value) {
        if let Value::Object(map) = &mut body {
            map.insert("event".into(), Value::from(name));
            map.insert("seq".into(), Value::from(self.events.len()));
        }
        self.events.push(body);
    }
}

fn class_name(class: SizeClass) -> &'static str {
    match class {
        SizeClass::Small => "small",
        SizeClass::Adequate => "adequate",
    }
}

impl TraceSink for JsonLinesSink {
    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        self.push(
            "discovery",
            json!({
                "candidates": e.candidates,
                "hidden": e.hidden,
                "label_wrapped": e.label_wrapped,
                "tracked": e.tracked,
            }),
        );
    }

    fn on_marker(&mut self, e: &MarkerEvent) {
        self.push(
            "marker",
            json!({
                "index": e.index,
                "class": class_name(e.class),
                "left": e.origin.x,
                "top": e.origin.y,
            }),
        );
    }

    fn on_overlap(&mut self, e: &OverlapEvent) {
        self.push(
            "overlap",
            json!({
                "pairs": e.pairs,
                "flagged": e.flagged,
                "annotated": e.annotated,
            }),
        );
    }

    fn on_schedule(&mut self, e: &ScheduleEvent) {
        self.push(
            "schedule",
            json!({
                "trigger": e.trigger.event_type(),
                "delay_ms": u64::try_from(e.delay.as_millis()).unwrap_or(u64::MAX),
                "replaced": e.replaced,
            }),
        );
    }

    fn on_sync(&mut self, s: &SyncSummary) {
        self.push(
            "sync",
            json!({
                "pass": s.pass,
                "trigger": s.trigger.map(|t| t.event_type()),
                "shown": s.shown,
                "hidden": s.hidden,
                "moved": s.moved,
            }),
        );
    }

    fn on_teardown(&mut self, r: &TeardownReport) {
        self.push(
            "teardown",
            json!({
                "listeners_detached": r.listeners_detached,
                "markers_removed": r.markers_removed,
                "marker_failures": r.marker_failures,
                "annotations_cleared": r.annotations_cleared,
                "annotations_skipped": r.annotations_skipped,
                "timer_cancelled": r.timer_cancelled,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use tapmark_core::pending::UpdateTrigger;

    #[test]
    fn events_are_tagged_and_sequenced() {
        let mut sink = JsonLinesSink::new();
        sink.on_discovery(&DiscoveryEvent {
            candidates: 4,
            hidden: 1,
            label_wrapped: 0,
            tracked: 3,
        });
        sink.on_schedule(&ScheduleEvent {
            trigger: UpdateTrigger::Resize,
            delay: Duration::from_millis(10),
            replaced: false,
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["event"], "discovery");
        assert_eq!(events[0]["seq"], 0);
        assert_eq!(events[0]["tracked"], 3);
        assert_eq!(events[1]["event"], "schedule");
        assert_eq!(events[1]["seq"], 1);
        assert_eq!(events[1]["trigger"], "resize");
        assert_eq!(events[1]["delay_ms"], 10);
    }

    #[test]
    fn manual_sync_has_null_trigger() {
        let mut sink = JsonLinesSink::new();
        sink.on_sync(&SyncSummary {
            pass: 1,
            trigger: None,
            shown: 2,
            hidden: 0,
            moved: 0,
        });
        assert!(sink.events()[0]["trigger"].is_null());
    }

    #[test]
    fn write_to_emits_one_object_per_line() {
        let mut sink = JsonLinesSink::new();
        sink.on_overlap(&OverlapEvent {
            pairs: 1,
            flagged: 2,
            annotated: 2,
        });
        sink.on_teardown(&TeardownReport {
            listeners_detached: 5,
            markers_removed: 3,
            marker_failures: 0,
            annotations_cleared: 2,
            annotations_skipped: 0,
            timer_cancelled: false,
        });

        let mut out = Vec::new();
        sink.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "overlap");
        assert_eq!(lines[1]["markers_removed"], 3);
        assert_eq!(lines[1]["timer_cancelled"], false);
    }

    #[test]
    fn take_drains_events() {
        let mut sink = JsonLinesSink::new();
        sink.on_overlap(&OverlapEvent::default());
        assert_eq!(sink.take().len(), 1);
        assert!(sink.events().is_empty());
    }
}
