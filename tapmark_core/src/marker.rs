// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marker descriptions handed to a [`MarkerSurface`].
//!
//! A marker is a square overlay region with a circle inscribed in it, clipped
//! to its own outline. The core decides *what* a marker looks like and *where*
//! it sits; the surface decides how to build it natively.
//!
//! [`MarkerSurface`]: crate::host::MarkerSurface

use alloc::format;
use alloc::string::String;

use kurbo::Point;

use crate::geometry::SizeClass;

/// Fill for targets below the minimum size.
pub const WARNING_FILL: &str = "rgba(0, 0, 255, 0.3)";

/// Fill for targets that meet the minimum size.
pub const PASS_FILL: &str = "rgba(0, 200, 0, 0.3)";

/// Ring drawn around passing targets.
pub const PASS_STROKE: &str = "rgba(0, 200, 0, 0.8)";

/// Ring width for passing targets.
pub const PASS_STROKE_WIDTH: f64 = 4.0;

/// Paint applied to a marker's circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// CSS fill color.
    pub fill: &'static str,
    /// CSS stroke color and width, if the marker has a ring.
    pub stroke: Option<(&'static str, f64)>,
}

impl MarkerStyle {
    /// Translucent blue, no border.
    pub const WARNING: Self = Self {
        fill: WARNING_FILL,
        stroke: None,
    };

    /// Translucent green with a solid green ring.
    pub const PASS: Self = Self {
        fill: PASS_FILL,
        stroke: Some((PASS_STROKE, PASS_STROKE_WIDTH)),
    };

    /// Returns the style for a size classification.
    #[must_use]
    pub const fn for_class(class: SizeClass) -> Self {
        match class {
            SizeClass::Small => Self::WARNING,
            SizeClass::Adequate => Self::PASS,
        }
    }
}

/// Everything a surface needs to build one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    /// Document id for the marker's clip path; unique per marker.
    pub clip_id: String,
    /// Top-left corner in document coordinates.
    pub origin: Point,
    /// Side length of the square region (the circle's diameter).
    pub diameter: f64,
    /// Stacking order.
    pub z_index: i32,
    /// Size classification, fixed at creation.
    pub class: SizeClass,
    /// Paint derived from `class`.
    pub style: MarkerStyle,
}

impl MarkerSpec {
    /// Circle radius.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Hands out clip-path ids that cannot collide with each other.
///
/// Ids look like `tapmark-clip-{session:08x}-{n}`. The counter keeps them
/// unique within a session; the session tag keeps concurrent sessions apart.
#[derive(Clone, Debug)]
pub struct ClipIdGenerator {
    session: u32,
    next: u32,
}

impl ClipIdGenerator {
    /// Creates a generator for the given session tag.
    #[must_use]
    pub const fn new(session: u32) -> Self {
        Self { session, next: 0 }
    }

    /// Returns the next unused id.
    pub fn next_id(&mut self) -> String {
        let n = self.next;
        self.next = self.next.wrapping_add(1);
        format!("tapmark-clip-{:08x}-{n}", self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn style_follows_class() {
        assert_eq!(MarkerStyle::for_class(SizeClass::Small), MarkerStyle::WARNING);
        assert_eq!(MarkerStyle::for_class(SizeClass::Adequate), MarkerStyle::PASS);
        assert!(MarkerStyle::WARNING.stroke.is_none());
        assert_eq!(MarkerStyle::PASS.stroke, Some((PASS_STROKE, 4.0)));
    }

    #[test]
    fn clip_ids_are_unique_and_tagged() {
        let mut ids = ClipIdGenerator::new(0xbeef);
        let all: Vec<String> = (0..100).map(|_| ids.next_id()).collect();
        assert_eq!(all[0], "tapmark-clip-0000beef-0");
        assert_eq!(all[99], "tapmark-clip-0000beef-99");
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| b != a), "duplicate id {a}");
        }
    }

    #[test]
    fn sessions_do_not_share_ids() {
        let mut a = ClipIdGenerator::new(1);
        let mut b = ClipIdGenerator::new(2);
        assert_ne!(a.next_id(), b.next_id());
    }
}
