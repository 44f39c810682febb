// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compile-time audit parameters.
//!
//! There is no runtime configuration surface. [`OverlayConfig`] gathers the
//! thresholds and delays in one place so that backends and tests read the same
//! values; [`OverlayConfig::wcag_2_5_8`] is the only preset.

use core::time::Duration;

use crate::pending::UpdateTrigger;

/// CSS selector matching every candidate interactive control.
///
/// Native controls first, then ARIA roles that behave like them. Hidden-type
/// inputs are never tap targets.
pub const INTERACTIVE_SELECTOR: &str = "a, label, button, input:not([type=hidden]), select, \
     textarea, [tabindex], [role=button], [role=checkbox], [role=link], [role=menuitem], \
     [role=option], [role=radio], [role=switch], [role=tab]";

/// Attribute used to flag overlapping controls.
pub const OVERLAP_ATTRIBUTE: &str = "aria-description";

/// Value written to [`OVERLAP_ATTRIBUTE`] on flagged controls.
pub const OVERLAP_VALUE: &str = "overlap";

/// Audit thresholds and scheduling delays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Minimum width and height, in CSS pixels, for a target to pass.
    pub min_target_size: f64,
    /// Marker diameter in CSS pixels.
    pub marker_diameter: f64,
    /// Centers closer than this (strictly) are flagged as overlapping.
    pub overlap_distance: f64,
    /// Trailing-edge debounce for scroll and resize.
    pub scroll_debounce: Duration,
    /// Settle delay after an orientation change.
    pub orientation_settle: Duration,
    /// Key that tears the overlay down (matched case-insensitively).
    pub teardown_key: char,
    /// Stacking order for marker nodes.
    pub marker_z_index: i32,
}

impl OverlayConfig {
    /// WCAG 2.5.8 "Target Size (Minimum)": 24×24 CSS pixels.
    #[must_use]
    pub const fn wcag_2_5_8() -> Self {
        Self {
            min_target_size: 24.0,
            marker_diameter: 24.0,
            overlap_distance: 24.0,
            scroll_debounce: Duration::from_millis(10),
            orientation_settle: Duration::from_millis(100),
            teardown_key: 'q',
            marker_z_index: 9999,
        }
    }

    /// Marker radius (half the diameter).
    #[inline]
    #[must_use]
    pub fn marker_radius(&self) -> f64 {
        self.marker_diameter / 2.0
    }

    /// Delay before a pending update runs for the given trigger.
    #[must_use]
    pub const fn delay_for(&self, trigger: UpdateTrigger) -> Duration {
        match trigger {
            UpdateTrigger::Scroll | UpdateTrigger::Resize => self.scroll_debounce,
            UpdateTrigger::OrientationChange => self.orientation_settle,
        }
    }

    /// Returns `true` if a `KeyboardEvent.key` value is the teardown key.
    #[must_use]
    pub fn is_teardown_key(&self, key: &str) -> bool {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.eq_ignore_ascii_case(&self.teardown_key),
            _ => false,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::wcag_2_5_8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teardown_key_is_case_insensitive() {
        let config = OverlayConfig::default();
        assert!(config.is_teardown_key("q"));
        assert!(config.is_teardown_key("Q"));
        assert!(!config.is_teardown_key("w"));
        assert!(!config.is_teardown_key("qq"));
        assert!(!config.is_teardown_key(""));
    }

    #[test]
    fn orientation_waits_longer_than_scroll() {
        let config = OverlayConfig::wcag_2_5_8();
        assert_eq!(
            config.delay_for(UpdateTrigger::Scroll),
            Duration::from_millis(10)
        );
        assert_eq!(
            config.delay_for(UpdateTrigger::Resize),
            Duration::from_millis(10)
        );
        assert_eq!(
            config.delay_for(UpdateTrigger::OrientationChange),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn selector_excludes_hidden_inputs() {
        assert!(INTERACTIVE_SELECTOR.contains("input:not([type=hidden])"));
        assert!(INTERACTIVE_SELECTOR.contains("[role=switch]"));
    }
}
