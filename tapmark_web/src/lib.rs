// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for tapmark.
//!
//! This crate binds the `tapmark_core` session to a live page:
//!
//! - [`DomDocument`]: computed style, layout, and attribute access
//! - [`SvgSurface`]: one absolutely positioned SVG circle per control
//! - [`TimeoutTimers`]: `setTimeout` debounce timers
//! - [`ListenerSet`]: scroll, resize, orientation, and keyboard listeners
//! - [`Overlay`]: the installed overlay tying these together
//! - [`ConsoleSink`]: session trace output on `console.debug`
//!
//! Most callers want [`install_global`], which keeps at most one overlay
//! alive per page.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Routes session events to [`ConsoleSink`].

use std::cell::RefCell;

use wasm_bindgen::JsValue;

mod console;
mod document;
mod listeners;
mod overlay;
mod surface;
mod timers;

pub use console::ConsoleSink;
pub use document::{DomDocument, WeakElement};
pub use listeners::ListenerSet;
pub use overlay::{GLOBAL_HANDLE_NAME, Overlay};
pub use surface::SvgSurface;
pub use timers::TimeoutTimers;

use tapmark_core::config::OverlayConfig;
use tapmark_core::session::InstallReport;
use tapmark_core::trace::TeardownReport;

thread_local! {
    static ACTIVE: RefCell<Option<Overlay>> = const { RefCell::new(None) };
}

/// Installs an overlay and keeps it alive for the rest of the page.
///
/// An overlay installed by an earlier call is torn down first, so running the
/// audit twice never leaves two sets of markers behind.
pub fn install_global(config: OverlayConfig) -> Result<InstallReport, JsValue> {
    if let Some(previous) = ACTIVE.with(|slot| slot.borrow_mut().take()) {
        previous.teardown();
    }
    let (overlay, report) = Overlay::install(config)?;
    ACTIVE.with(|slot| *slot.borrow_mut() = Some(overlay));
    Ok(report)
}

/// Tears down the overlay installed by [`install_global`], if any.
pub fn teardown_global() -> Option<TeardownReport> {
    ACTIVE
        .with(|slot| slot.borrow_mut().take())
        .and_then(|overlay| overlay.teardown())
}
