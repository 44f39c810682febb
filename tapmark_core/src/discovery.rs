// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate discovery and filtering.
//!
//! Discovery runs once per session. It queries every interactive control,
//! drops the ones that do not render, drops controls wrapped in a `<label>`
//! (the label already stands for the combined hit target), and takes the one
//! layout snapshot that marker creation and overlap detection share.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::config::INTERACTIVE_SELECTOR;
use crate::geometry::{Center, center_of};
use crate::host::{Document, HostError};
use crate::trace::DiscoveryEvent;
use crate::visibility::{has_label_ancestor, is_rendered};

/// One discovered control and its install-time layout.
#[derive(Clone, Debug)]
pub struct Discovered<E> {
    /// The element.
    pub element: E,
    /// Viewport-relative border box at discovery time.
    pub rect: Rect,
    /// Document-space center at discovery time.
    pub center: Center,
}

/// Result of a discovery pass.
#[derive(Clone, Debug)]
pub struct Discovery<E> {
    /// Surviving controls in document order.
    pub found: Vec<Discovered<E>>,
    /// Filter counts.
    pub stats: DiscoveryEvent,
}

impl<E> Discovery<E> {
    /// The center snapshot, in the same order as [`found`](Self::found).
    #[must_use]
    pub fn centers(&self) -> Vec<Center> {
        self.found.iter().map(|d| d.center).collect()
    }
}

/// Queries the document and filters candidates.
pub fn discover<D: Document>(doc: &D) -> Result<Discovery<D::Element>, HostError> {
    let candidates = doc.interactive_elements(INTERACTIVE_SELECTOR)?;
    let scroll = doc.scroll_offset();
    let mut stats = DiscoveryEvent {
        candidates: candidates.len(),
        ..DiscoveryEvent::default()
    };
    let mut found = Vec::with_capacity(candidates.len());

    for element in candidates {
        if !is_rendered(doc, &element) {
            stats.hidden += 1;
            continue;
        }
        if !doc.is_label(&element) && has_label_ancestor(doc, &element) {
            stats.label_wrapped += 1;
            continue;
        }
        let Ok(rect) = doc.bounding_rect(&element) else {
            stats.hidden += 1;
            continue;
        };
        found.push(Discovered {
            center: center_of(rect, scroll),
            element,
            rect,
        });
    }

    stats.tracked = found.len();
    Ok(Discovery { found, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;
    use kurbo::Vec2;

    #[test]
    fn filters_hidden_and_label_wrapped() {
        let mut doc = FakeDocument::new();
        let body = doc.container(None);
        let visible = doc.control(Some(body), (0.0, 0.0, 30.0, 30.0));
        let drawer = doc.container(Some(body));
        doc.node_mut(drawer).display_none = true;
        let _hidden = doc.control(Some(drawer), (0.0, 0.0, 30.0, 30.0));
        let label = doc.label(Some(body), (100.0, 0.0, 80.0, 30.0));
        let _wrapped = doc.control(Some(label), (100.0, 0.0, 16.0, 16.0));

        let discovery = discover(&doc).unwrap();
        let elements: Vec<usize> = discovery.found.iter().map(|d| d.element).collect();
        assert_eq!(elements, [visible, label]);
        assert_eq!(discovery.stats.candidates, 4);
        assert_eq!(discovery.stats.hidden, 1);
        assert_eq!(discovery.stats.label_wrapped, 1);
        assert_eq!(discovery.stats.tracked, 2);
    }

    #[test]
    fn nested_labels_are_kept() {
        let mut doc = FakeDocument::new();
        let outer = doc.label(None, (0.0, 0.0, 200.0, 40.0));
        let inner = doc.label(Some(outer), (0.0, 0.0, 100.0, 40.0));
        let discovery = discover(&doc).unwrap();
        let elements: Vec<usize> = discovery.found.iter().map(|d| d.element).collect();
        assert_eq!(elements, [outer, inner]);
    }

    #[test]
    fn snapshot_includes_scroll() {
        let mut doc = FakeDocument::new();
        doc.control(None, (10.0, 10.0, 20.0, 20.0));
        doc.scroll = Vec2::new(0.0, 300.0);
        let discovery = discover(&doc).unwrap();
        assert_eq!(discovery.centers(), [Center::new(320.0, 20.0)]);
    }

    #[test]
    fn unreadable_layout_is_skipped() {
        let mut doc = FakeDocument::new();
        let a = doc.control(None, (10.0, 10.0, 20.0, 20.0));
        doc.node_mut(a).layout_error = true;
        let discovery = discover(&doc).unwrap();
        assert!(discovery.found.is_empty());
        assert_eq!(discovery.stats.hidden, 1);
    }

    #[test]
    fn query_failure_propagates() {
        let mut doc = FakeDocument::new();
        doc.query_error = true;
        assert_eq!(discover(&doc).unwrap_err(), HostError::QueryFailed);
    }
}
