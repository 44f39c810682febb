// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use wasm_bindgen::JsValue;

use tapmark_core::trace::{
    DiscoveryEvent, MarkerEvent, OverlapEvent, ScheduleEvent, SyncSummary, TeardownReport,
    TraceSink,
};

/// Writes session events to `console.debug`.
///
/// Per-marker events are skipped unless `verbose` is set; a page with a few
/// hundred controls would otherwise flood the console on install.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    /// Also log one line per created marker.
    pub verbose: bool,
}

impl ConsoleSink {
    /// A sink that logs summaries only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn emit(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

fn discovery_line(e: &DiscoveryEvent) -> String {
    format!(
        "[tapmark] discovered {} of {} candidates ({} hidden, {} inside labels)",
        e.tracked, e.candidates, e.hidden, e.label_wrapped
    )
}

fn marker_line(e: &MarkerEvent) -> String {
    format!(
        "[tapmark] marker {} {:?} at ({}, {})",
        e.index, e.class, e.origin.x, e.origin.y
    )
}

fn overlap_line(e: &OverlapEvent) -> String {
    format!(
        "[tapmark] {} overlapping pairs, {} controls flagged, {} annotated",
        e.pairs, e.flagged, e.annotated
    )
}

fn sync_line(s: &SyncSummary) -> String {
    let trigger = s.trigger.map_or("manual", |t| t.event_type());
    format!(
        "[tapmark] sync #{} ({trigger}): {} shown, {} hidden, {} moved",
        s.pass, s.shown, s.hidden, s.moved
    )
}

fn teardown_line(r: &TeardownReport) -> String {
    format!(
        "[tapmark] teardown: {} listeners, {} markers ({} already gone), {} annotations cleared ({} left alone){}",
        r.listeners_detached,
        r.markers_removed,
        r.marker_failures,
        r.annotations_cleared,
        r.annotations_skipped,
        if r.timer_cancelled {
            ", pending update cancelled"
        } else {
            ""
        }
    )
}

impl TraceSink for ConsoleSink {
    fn on_discovery(&mut self, e: &DiscoveryEvent) {
        emit(&discovery_line(e));
    }

    fn on_marker(&mut self, e: &MarkerEvent) {
        if self.verbose {
            emit(&marker_line(e));
        }
    }

    fn on_overlap(&mut self, e: &OverlapEvent) {
        emit(&overlap_line(e));
    }

    // Scheduling is too chatty for the console; the sync line carries the trigger.
    fn on_schedule(&mut self, _e: &ScheduleEvent) {}

    fn on_sync(&mut self, s: &SyncSummary) {
        emit(&sync_line(s));
    }

    fn on_teardown(&mut self, r: &TeardownReport) {
        emit(&teardown_line(r));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapmark_core::pending::UpdateTrigger;

    #[test]
    fn sync_line_names_the_trigger() {
        let s = SyncSummary {
            pass: 3,
            trigger: Some(UpdateTrigger::OrientationChange),
            shown: 4,
            hidden: 1,
            moved: 2,
        };
        assert_eq!(
            sync_line(&s),
            "[tapmark] sync #3 (orientationchange): 4 shown, 1 hidden, 2 moved"
        );
        let manual = SyncSummary { trigger: None, ..s };
        assert!(sync_line(&manual).contains("(manual)"));
    }

    #[test]
    fn teardown_line_mentions_cancelled_timer_only_when_cancelled() {
        let mut r = TeardownReport {
            listeners_detached: 5,
            markers_removed: 3,
            marker_failures: 0,
            annotations_cleared: 2,
            annotations_skipped: 0,
            timer_cancelled: false,
        };
        assert!(!teardown_line(&r).contains("cancelled"));
        r.timer_cancelled = true;
        assert!(teardown_line(&r).ends_with(", pending update cancelled"));
    }

    #[test]
    fn discovery_line_counts() {
        let e = DiscoveryEvent {
            candidates: 10,
            hidden: 3,
            label_wrapped: 1,
            tracked: 6,
        };
        assert_eq!(
            discovery_line(&e),
            "[tapmark] discovered 6 of 10 candidates (3 hidden, 1 inside labels)"
        );
    }
}
