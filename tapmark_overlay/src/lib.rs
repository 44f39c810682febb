// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target-size audit overlay, packaged for the browser.
//!
//! Loading the module audits the page once: every visible interactive
//! control gets a 24px marker (tinted when the control is smaller than
//! 24×24), controls whose centers are closer than 24px are annotated with
//! `aria-description="overlap"`, and an alert reports how many overlap.
//! Markers follow the page through scrolling, resizing, and orientation
//! changes.
//!
//! Press `q` or call `wcagTargetSizeCleanup()` (or this module's
//! [`teardown`] export) to remove everything again.
//!
//! Build with: `wasm-pack build --target web tapmark_overlay`

#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;

use tapmark_core::config::OverlayConfig;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    tapmark_web::install_global(OverlayConfig::wcag_2_5_8())?;
    Ok(())
}

/// Removes the overlay. Calling it again does nothing.
#[wasm_bindgen]
pub fn teardown() {
    tapmark_web::teardown_global();
}
