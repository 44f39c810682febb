// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-space geometry for tracked elements.
//!
//! Hosts report element boxes in viewport coordinates (what
//! `getBoundingClientRect` returns). [`center_of`] shifts the box midpoint by
//! the current scroll offset, producing a [`Center`] in document coordinates,
//! which is the space absolutely positioned markers live in.

use core::fmt;

use kurbo::{Point, Rect, Vec2};

/// A point in document coordinates (scroll offset already applied).
///
/// Recomputed on demand; never cached beyond a single synchronization pass.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Center {
    /// Distance from the top of the document, in CSS pixels.
    pub top: f64,
    /// Distance from the left of the document, in CSS pixels.
    pub left: f64,
}

impl Center {
    /// Creates a center from its document-space coordinates.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }

    /// Returns this center as a `kurbo` point (`x` = left, `y` = top).
    #[inline]
    #[must_use]
    pub const fn to_point(self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Euclidean distance between two centers.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.to_point().distance(other.to_point())
    }
}

impl fmt::Debug for Center {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Center(top={}, left={})", self.top, self.left)
    }
}

/// Computes the document-space center of a viewport-relative box.
#[must_use]
pub fn center_of(rect: Rect, scroll: Vec2) -> Center {
    let mid = rect.center() + scroll;
    Center::new(mid.y, mid.x)
}

/// Returns the top-left corner of a square marker of `radius` centered on
/// `center`.
#[must_use]
pub fn marker_origin(center: Center, radius: f64) -> Point {
    Point::new(center.left - radius, center.top - radius)
}

/// Whether an element's hit area meets the minimum target size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
    /// Width or height is strictly below the minimum.
    Small,
    /// Both dimensions meet the minimum.
    Adequate,
}

impl SizeClass {
    /// Classifies a rendered box against `min_size`.
    ///
    /// A box is [`Small`](Self::Small) if *either* dimension is strictly less
    /// than `min_size`.
    #[must_use]
    pub fn classify(rect: Rect, min_size: f64) -> Self {
        if rect.width() < min_size || rect.height() < min_size {
            Self::Small
        } else {
            Self::Adequate
        }
    }

    /// Returns `true` for [`Small`](Self::Small).
    #[inline]
    #[must_use]
    pub const fn is_small(self) -> bool {
        matches!(self, Self::Small)
    }
}
