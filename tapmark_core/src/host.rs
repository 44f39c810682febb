// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for document integrations.
//!
//! The core never touches a real document. A *host* crate provides the
//! following pieces:
//!
//! - **Document**: Implements [`Document`] for candidate queries, tree
//!   walking, computed style, layout boxes, scroll offset, and attributes. Tracked
//!   elements are stored as weak [`Handle`](Document::Handle)s so the overlay
//!   never extends an element's lifetime.
//!
//! - **Marker surface**: Implements [`MarkerSurface`] to materialize a
//!   [`MarkerSpec`] as a native overlay node and move, show, hide, or remove it.
//!
//! - **Timers**: Implements [`Timers`]. The host routes the firing of a
//!   scheduled timer back to [`Session::timer_fired`].
//!
//! - **Event bindings**: Implements [`EventBindings`] so that teardown can
//!   unregister everything the host attached for the session.
//!
//! [`Session::timer_fired`]: crate::session::Session::timer_fired

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::marker::MarkerSpec;

/// Failure reported by a host operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostError {
    /// The element is no longer attached to the document.
    Detached,
    /// Computed style could not be read.
    StyleUnavailable,
    /// Layout (bounding box or scroll offset) could not be read.
    LayoutUnavailable,
    /// The candidate selector query failed.
    QueryFailed,
    /// Marker nodes could not be created or attached.
    SurfaceUnavailable,
    /// The document refused an attribute mutation.
    AttributeRejected,
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Detached => "element is detached from the document",
            Self::StyleUnavailable => "computed style is unavailable",
            Self::LayoutUnavailable => "layout is unavailable",
            Self::QueryFailed => "candidate query failed",
            Self::SurfaceUnavailable => "marker surface is unavailable",
            Self::AttributeRejected => "attribute mutation was rejected",
        })
    }
}

impl core::error::Error for HostError {}

/// The two computed style properties that decide whether an element renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleVisibility {
    /// Computed `display` is `none`.
    pub display_none: bool,
    /// Computed `visibility` is `hidden`.
    pub visibility_hidden: bool,
}

impl StyleVisibility {
    /// Builds flags from raw computed property values.
    #[must_use]
    pub fn from_computed(display: &str, visibility: &str) -> Self {
        Self {
            display_none: display == "none",
            visibility_hidden: visibility == "hidden",
        }
    }

    /// Returns `true` if either property hides the element.
    #[inline]
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        self.display_none || self.visibility_hidden
    }
}

/// Read and annotate access to a live document.
pub trait Document {
    /// A strong, short-lived reference to an element.
    type Element: Clone;

    /// A weak reference retained across synchronization passes.
    type Handle;

    /// Returns every element matching `selector`, in document order.
    fn interactive_elements(&self, selector: &str) -> Result<Vec<Self::Element>, HostError>;

    /// Returns the parent element, or `None` at the root.
    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Returns `true` if the element is attached to the document.
    fn is_connected(&self, element: &Self::Element) -> bool;

    /// Returns `true` if the element is a `<label>`.
    fn is_label(&self, element: &Self::Element) -> bool;

    /// Reads computed `display` and `visibility`.
    fn style_visibility(&self, element: &Self::Element) -> Result<StyleVisibility, HostError>;

    /// Reads the viewport-relative border box.
    fn bounding_rect(&self, element: &Self::Element) -> Result<Rect, HostError>;

    /// Reads the current document scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Reads an attribute value.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Sets an attribute value.
    fn set_attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), HostError>;

    /// Removes an attribute.
    fn remove_attribute(&mut self, element: &Self::Element, name: &str) -> Result<(), HostError>;

    /// Creates a weak handle to an element.
    fn downgrade(&self, element: &Self::Element) -> Self::Handle;

    /// Resolves a weak handle, or `None` if the element was collected.
    fn upgrade(&self, handle: &Self::Handle) -> Option<Self::Element>;
}

/// Materializes markers as native overlay nodes.
///
/// Both DOM-backed surfaces and test doubles implement this trait.
pub trait MarkerSurface {
    /// The native node owned by one marker.
    type Marker;

    /// Creates and attaches a marker for `spec`.
    fn create(&mut self, spec: &MarkerSpec) -> Result<Self::Marker, HostError>;

    /// Moves a marker so its top-left corner sits at `origin`.
    fn place(&mut self, marker: &Self::Marker, origin: Point);

    /// Shows or hides a marker.
    fn set_shown(&mut self, marker: &Self::Marker, shown: bool);

    /// Detaches and destroys a marker.
    fn remove(&mut self, marker: Self::Marker) -> Result<(), HostError>;
}

/// One-shot cancellable timers.
pub trait Timers {
    /// Identifies a scheduled timer. Dropping it must not fire it.
    type Handle;

    /// Schedules the host's update callback after `delay`.
    fn schedule(&mut self, delay: Duration) -> Self::Handle;

    /// Cancels a timer that has not fired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Listener registrations made by the host on behalf of a session.
pub trait EventBindings {
    /// Unregisters every listener and returns how many were removed.
    fn detach_all(&mut self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_visibility_from_computed() {
        assert!(StyleVisibility::from_computed("none", "visible").is_hidden());
        assert!(StyleVisibility::from_computed("block", "hidden").is_hidden());
        assert!(!StyleVisibility::from_computed("inline", "visible").is_hidden());
        // `collapse` is not treated as hidden.
        assert!(!StyleVisibility::from_computed("block", "collapse").is_hidden());
    }
}
