// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rendered-ness checks.

use crate::host::Document;

/// Returns `true` if `element` and every ancestor up to the root render.
///
/// Walks upward with an early exit on the first `display: none` or
/// `visibility: hidden`. A detached element, or one whose style cannot be
/// read, counts as not rendered.
pub fn is_rendered<D: Document>(doc: &D, element: &D::Element) -> bool {
    if !doc.is_connected(element) {
        return false;
    }
    let mut current = Some(element.clone());
    while let Some(node) = current {
        match doc.style_visibility(&node) {
            Ok(style) if !style.is_hidden() => {}
            _ => return false,
        }
        current = doc.parent_element(&node);
    }
    true
}

/// Returns `true` if a strict ancestor of `element` is a `<label>`.
pub fn has_label_ancestor<D: Document>(doc: &D, element: &D::Element) -> bool {
    let mut current = doc.parent_element(element);
    while let Some(node) = current {
        if doc.is_label(&node) {
            return true;
        }
        current = doc.parent_element(&node);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDocument;

    #[test]
    fn hidden_ancestor_hides_descendant() {
        let mut doc = FakeDocument::new();
        let body = doc.container(None);
        let menu = doc.container(Some(body));
        let button = doc.control(Some(menu), (0.0, 0.0, 30.0, 30.0));
        assert!(is_rendered(&doc, &button));

        doc.node_mut(menu).display_none = true;
        assert!(!is_rendered(&doc, &button));

        doc.node_mut(menu).display_none = false;
        doc.node_mut(body).visibility_hidden = true;
        assert!(!is_rendered(&doc, &button));
    }

    #[test]
    fn detached_and_unreadable_count_as_hidden() {
        let mut doc = FakeDocument::new();
        let a = doc.control(None, (0.0, 0.0, 30.0, 30.0));
        let b = doc.control(None, (0.0, 0.0, 30.0, 30.0));
        doc.node_mut(a).connected = false;
        doc.node_mut(b).style_error = true;
        assert!(!is_rendered(&doc, &a));
        assert!(!is_rendered(&doc, &b));
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let mut doc = FakeDocument::new();
        let mut parent = doc.container(None);
        for _ in 0..10_000 {
            parent = doc.container(Some(parent));
        }
        let leaf = doc.control(Some(parent), (0.0, 0.0, 30.0, 30.0));
        assert!(is_rendered(&doc, &leaf));
    }

    #[test]
    fn label_ancestor_is_strict() {
        let mut doc = FakeDocument::new();
        let label = doc.label(None, (0.0, 0.0, 100.0, 30.0));
        let span = doc.container(Some(label));
        let input = doc.control(Some(span), (0.0, 0.0, 16.0, 16.0));
        assert!(has_label_ancestor(&doc, &input));
        assert!(!has_label_ancestor(&doc, &label));
    }
}
