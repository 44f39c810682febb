// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The overlay session: install, synchronize, tear down.
//!
//! A [`Session`] moves through three states:
//!
//! ```text
//!   Uninstalled ──install()──► Active ──teardown()──► TornDown
//! ```
//!
//! `TornDown` is terminal. Host state is never owned by the session; every
//! operation borrows the document, marker surface, timers, and event bindings
//! it needs, so the same session logic drives a real browser and the test
//! doubles alike.
//!
//! # Frame of a session
//!
//! ```rust,ignore
//! let report = session.install(&mut doc, &mut surface, &mut tracer)?;
//! alert(&report.to_string());
//!
//! // on scroll / resize / orientationchange:
//! session.request_update(UpdateTrigger::Scroll, &mut timers, &mut tracer);
//!
//! // when the host's timer fires:
//! session.timer_fired(&doc, &mut surface, &mut tracer);
//!
//! // on `q` or the global handle:
//! session.teardown(&mut doc, &mut surface, &mut timers, &mut bindings, &mut tracer);
//! ```

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::config::{OVERLAP_ATTRIBUTE, OVERLAP_VALUE, OverlayConfig};
use crate::discovery::discover;
use crate::geometry::{Center, SizeClass, center_of, marker_origin};
use crate::host::{Document, EventBindings, HostError, MarkerSurface, Timers};
use crate::marker::{ClipIdGenerator, MarkerSpec, MarkerStyle};
use crate::overlap::{OverlapSet, detect_overlaps};
use crate::pending::{PendingUpdate, UpdateTrigger};
use crate::trace::{MarkerEvent, OverlapEvent, ScheduleEvent, SyncSummary, TeardownReport, Tracer};
use crate::visibility::is_rendered;

/// Lifecycle state of a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Created, nothing attached to the document yet.
    Uninstalled,
    /// Markers and annotations are live.
    Active,
    /// Everything has been removed. Terminal.
    TornDown,
}

/// Why an install could not proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleError {
    /// The session is already active.
    AlreadyInstalled,
    /// The session has been torn down; a fresh session is required.
    TornDown,
    /// The host failed; everything created so far was rolled back.
    Host(HostError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInstalled => f.write_str("overlay is already installed"),
            Self::TornDown => f.write_str("overlay session has been torn down"),
            Self::Host(err) => write!(f, "overlay install failed: {err}"),
        }
    }
}

impl core::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HostError> for LifecycleError {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

/// What the user is told after install.
///
/// Displays as the literal `There are N overlapping controls.`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Elements tracked (one marker each).
    pub tracked: usize,
    /// Markers drawn with the warning tint.
    pub small: usize,
    /// Markers drawn with the pass tint.
    pub adequate: usize,
    /// Distinct controls flagged as overlapping.
    pub overlapping: usize,
}

impl fmt::Display for InstallReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There are {} overlapping controls.", self.overlapping)
    }
}

/// One discovered control, held weakly.
#[derive(Debug)]
pub struct TrackedElement<H> {
    handle: H,
    center: Center,
    visible: bool,
}

impl<H> TrackedElement<H> {
    /// Weak handle to the element.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Center from the most recent measurement.
    #[must_use]
    pub fn center(&self) -> Center {
        self.center
    }

    /// Visibility from the most recent measurement.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The overlay node paired with a [`TrackedElement`].
#[derive(Debug)]
pub struct Marker<M> {
    node: M,
    origin: Point,
    shown: bool,
    class: SizeClass,
}

impl<M> Marker<M> {
    /// The surface's node.
    #[must_use]
    pub fn node(&self) -> &M {
        &self.node
    }

    /// Current top-left corner in document coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Whether the marker is currently shown.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Size classification fixed at creation.
    #[must_use]
    pub fn class(&self) -> SizeClass {
        self.class
    }
}

/// A tracked element and its marker.
#[derive(Debug)]
pub struct Entry<H, M> {
    /// The element side.
    pub element: TrackedElement<H>,
    /// The marker side.
    pub marker: Marker<M>,
}

/// One overlay session over one document.
///
/// Generic over the host so that browser glue and test doubles share the same
/// lifecycle logic.
pub struct Session<D: Document, S: MarkerSurface, T: Timers> {
    config: OverlayConfig,
    state: SessionState,
    entries: Vec<Entry<D::Handle, S::Marker>>,
    overlaps: OverlapSet,
    annotated: Vec<usize>,
    pending: PendingUpdate<T::Handle>,
    clip_ids: ClipIdGenerator,
    passes: u64,
}

impl<D: Document, S: MarkerSurface, T: Timers> fmt::Debug for Session<D, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("entries_len", &self.entries.len())
            .field("overlaps", &self.overlaps)
            .field("annotated", &self.annotated)
            .field("pending", &self.pending.trigger())
            .field("clip_ids", &self.clip_ids)
            .field("passes", &self.passes)
            .finish()
    }
}

impl<D: Document, S: MarkerSurface, T: Timers> Session<D, S, T> {
    /// Creates an uninstalled session.
    ///
    /// `tag` distinguishes this session's clip-path ids from any other
    /// session's on the same page.
    #[must_use]
    pub fn new(config: OverlayConfig, tag: u32) -> Self {
        Self {
            config,
            state: SessionState::Uninstalled,
            entries: Vec::new(),
            overlaps: OverlapSet::default(),
            annotated: Vec::new(),
            pending: PendingUpdate::new(),
            clip_ids: ClipIdGenerator::new(tag),
            passes: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Tracked elements and their markers, in discovery order.
    #[must_use]
    pub fn entries(&self) -> &[Entry<D::Handle, S::Marker>] {
        &self.entries
    }

    /// Elements flagged as overlapping at install time.
    #[must_use]
    pub fn overlaps(&self) -> &OverlapSet {
        &self.overlaps
    }

    /// Returns `true` if a debounced update is waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Synchronization passes run so far.
    #[must_use]
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Discovers controls, creates markers, flags overlaps.
    ///
    /// On failure everything created so far is removed again and the session
    /// stays [`Uninstalled`](SessionState::Uninstalled).
    pub fn install(
        &mut self,
        doc: &mut D,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> Result<InstallReport, LifecycleError> {
        match self.state {
            SessionState::Uninstalled => {}
            SessionState::Active => return Err(LifecycleError::AlreadyInstalled),
            SessionState::TornDown => return Err(LifecycleError::TornDown),
        }

        let discovery = discover(doc)?;
        tracer.discovery(&discovery.stats);

        let radius = self.config.marker_radius();
        let mut entries: Vec<Entry<D::Handle, S::Marker>> =
            Vec::with_capacity(discovery.found.len());
        let mut report = InstallReport::default();

        for (index, found) in discovery.found.iter().enumerate() {
            let class = SizeClass::classify(found.rect, self.config.min_target_size);
            let origin = marker_origin(found.center, radius);
            let spec = MarkerSpec {
                clip_id: self.clip_ids.next_id(),
                origin,
                diameter: self.config.marker_diameter,
                z_index: self.config.marker_z_index,
                class,
                style: MarkerStyle::for_class(class),
            };
            let node = match surface.create(&spec) {
                Ok(node) => node,
                Err(err) => {
                    for entry in entries {
                        let _ = surface.remove(entry.marker.node);
                    }
                    return Err(err.into());
                }
            };
            match class {
                SizeClass::Small => report.small += 1,
                SizeClass::Adequate => report.adequate += 1,
            }
            tracer.marker(&MarkerEvent {
                index,
                class,
                origin,
            });
            entries.push(Entry {
                element: TrackedElement {
                    handle: doc.downgrade(&found.element),
                    center: found.center,
                    visible: true,
                },
                marker: Marker {
                    node,
                    origin,
                    shown: true,
                    class,
                },
            });
        }

        let overlaps = detect_overlaps(&discovery.centers(), self.config.overlap_distance);
        let mut annotated = Vec::with_capacity(overlaps.len());
        for &index in overlaps.members() {
            let element = &discovery.found[index].element;
            if doc
                .set_attribute(element, OVERLAP_ATTRIBUTE, OVERLAP_VALUE)
                .is_ok()
            {
                annotated.push(index);
            }
        }
        tracer.overlap(&OverlapEvent {
            pairs: overlaps.pairs(),
            flagged: overlaps.len(),
            annotated: annotated.len(),
        });

        report.tracked = entries.len();
        report.overlapping = overlaps.len();
        self.entries = entries;
        self.overlaps = overlaps;
        self.annotated = annotated;
        self.state = SessionState::Active;
        Ok(report)
    }

    /// Debounces a synchronization pass.
    ///
    /// Any pending update is cancelled and replaced, so a burst of triggers
    /// collapses into one pass at the trailing edge. A pending orientation
    /// change keeps its trigger and settle delay when a scroll or resize
    /// replaces it. Returns `false` (and schedules nothing) unless the session
    /// is active.
    pub fn request_update(
        &mut self,
        trigger: UpdateTrigger,
        timers: &mut T,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        let settling = self.pending.trigger() == Some(UpdateTrigger::OrientationChange);
        let trigger = if settling {
            UpdateTrigger::OrientationChange
        } else {
            trigger
        };
        let replaced = match self.pending.take() {
            Some(previous) => {
                timers.cancel(previous);
                true
            }
            None => false,
        };
        let delay = self.config.delay_for(trigger);
        let handle = timers.schedule(delay);
        self.pending.replace(handle, trigger);
        tracer.schedule(&ScheduleEvent {
            trigger,
            delay,
            replaced,
        });
        true
    }

    /// Runs the pending update, if there is one.
    ///
    /// The host calls this when the timer it scheduled fires. A stale firing
    /// (nothing pending) or a firing after teardown does nothing.
    pub fn timer_fired(
        &mut self,
        doc: &D,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> Option<SyncSummary> {
        let trigger = self.pending.trigger();
        self.pending.take()?;
        if self.state != SessionState::Active {
            return None;
        }
        Some(self.sync(doc, surface, trigger, tracer))
    }

    /// Re-measures every tracked element and moves, shows, or hides its
    /// marker. Runs immediately; returns `None` unless the session is active.
    pub fn update_all(
        &mut self,
        doc: &D,
        surface: &mut S,
        tracer: &mut Tracer<'_>,
    ) -> Option<SyncSummary> {
        if self.state != SessionState::Active {
            return None;
        }
        Some(self.sync(doc, surface, None, tracer))
    }

    fn sync(
        &mut self,
        doc: &D,
        surface: &mut S,
        trigger: Option<UpdateTrigger>,
        tracer: &mut Tracer<'_>,
    ) -> SyncSummary {
        self.passes += 1;
        let scroll = doc.scroll_offset();
        let radius = self.config.marker_radius();
        let mut summary = SyncSummary {
            pass: self.passes,
            trigger,
            ..SyncSummary::default()
        };

        for Entry { element, marker } in &mut self.entries {
            let center = doc
                .upgrade(&element.handle)
                .filter(|el| is_rendered(doc, el))
                .and_then(|el| doc.bounding_rect(&el).ok())
                .map(|rect| center_of(rect, scroll));

            let Some(center) = center else {
                element.visible = false;
                if marker.shown {
                    surface.set_shown(&marker.node, false);
                    marker.shown = false;
                }
                summary.hidden += 1;
                continue;
            };

            element.visible = true;
            element.center = center;
            if !marker.shown {
                surface.set_shown(&marker.node, true);
                marker.shown = true;
            }
            let origin = marker_origin(center, radius);
            if origin != marker.origin {
                surface.place(&marker.node, origin);
                marker.origin = origin;
                summary.moved += 1;
            }
            summary.shown += 1;
        }

        tracer.sync(&summary);
        summary
    }

    /// Removes every listener, marker, annotation, and pending update.
    ///
    /// Each step runs regardless of failures in the others. Returns `None`
    /// if the session was already torn down.
    pub fn teardown(
        &mut self,
        doc: &mut D,
        surface: &mut S,
        timers: &mut T,
        bindings: &mut dyn EventBindings,
        tracer: &mut Tracer<'_>,
    ) -> Option<TeardownReport> {
        if self.state == SessionState::TornDown {
            return None;
        }
        self.state = SessionState::TornDown;

        let mut report = TeardownReport {
            listeners_detached: bindings.detach_all(),
            ..TeardownReport::default()
        };

        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
            report.timer_cancelled = true;
        }

        for &index in &self.annotated {
            let element = self
                .entries
                .get(index)
                .and_then(|entry| doc.upgrade(&entry.element.handle));
            let Some(element) = element else {
                report.annotations_skipped += 1;
                continue;
            };
            let ours = doc.attribute(&element, OVERLAP_ATTRIBUTE).as_deref() == Some(OVERLAP_VALUE);
            if ours && doc.remove_attribute(&element, OVERLAP_ATTRIBUTE).is_ok() {
                report.annotations_cleared += 1;
            } else {
                report.annotations_skipped += 1;
            }
        }

        for Entry { marker, .. } in self.entries.drain(..) {
            match surface.remove(marker.node) {
                Ok(()) => report.markers_removed += 1,
                Err(_) => report.marker_failures += 1,
            }
        }

        self.annotated.clear();
        self.overlaps = OverlapSet::default();
        tracer.teardown(&report);
        Some(report)
    }
}
