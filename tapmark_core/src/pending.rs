// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single pending-update slot behind debounced synchronization.
//!
//! Every trigger *replaces* the slot's timer rather than stacking a new one:
//! the previous handle is handed back so the caller can cancel it. At most one
//! update is ever pending, and it runs against whatever state the session has
//! when it fires.

/// Viewport events that request a synchronization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpdateTrigger {
    /// The window scrolled.
    Scroll,
    /// The window was resized.
    Resize,
    /// The device orientation changed.
    OrientationChange,
}

impl UpdateTrigger {
    /// DOM event type that produces this trigger.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::OrientationChange => "orientationchange",
        }
    }
}

/// Holds at most one cancellable timer handle.
#[derive(Debug)]
pub struct PendingUpdate<H> {
    slot: Option<(H, UpdateTrigger)>,
}

impl<H> Default for PendingUpdate<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> PendingUpdate<H> {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    /// Stores `handle`, returning the handle it displaced (to be cancelled).
    pub fn replace(&mut self, handle: H, trigger: UpdateTrigger) -> Option<H> {
        self.slot.replace((handle, trigger)).map(|(h, _)| h)
    }

    /// Empties the slot.
    pub fn take(&mut self) -> Option<H> {
        self.slot.take().map(|(h, _)| h)
    }

    /// Returns `true` if an update is pending.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// The trigger that scheduled the pending update.
    #[must_use]
    pub fn trigger(&self) -> Option<UpdateTrigger> {
        self.slot.as_ref().map(|(_, t)| *t)
    }
}
