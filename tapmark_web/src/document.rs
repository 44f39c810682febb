// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live DOM access.
//!
//! [`DomDocument`] implements the core [`Document`] contract over a
//! `web_sys::Window`. Tracked elements are held through the ECMAScript
//! `WeakRef` so the overlay never keeps a removed control alive.

use kurbo::{Rect, Vec2};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use tapmark_core::host::{Document, HostError, StyleVisibility};

// `WeakRef` is not covered by js-sys; bind the two members we need directly.
#[wasm_bindgen]
extern "C" {
    /// A weak reference to a DOM element (`WeakRef<Element>`).
    #[wasm_bindgen(js_name = WeakRef)]
    #[derive(Clone, Debug)]
    pub type WeakElement;

    #[wasm_bindgen(constructor, js_class = "WeakRef")]
    fn new(target: &Element) -> WeakElement;

    #[wasm_bindgen(method, js_class = "WeakRef", js_name = deref)]
    fn target(this: &WeakElement) -> JsValue;
}

/// The page's document, read through its window.
pub struct DomDocument {
    window: Window,
    document: web_sys::Document,
}

impl core::fmt::Debug for DomDocument {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomDocument").finish_non_exhaustive()
    }
}

impl DomDocument {
    /// Wraps the document owned by `window`.
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    /// The underlying `web_sys::Document`.
    #[must_use]
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for DomDocument {
    type Element = Element;
    type Handle = WeakElement;

    fn interactive_elements(&self, selector: &str) -> Result<Vec<Element>, HostError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|_| HostError::QueryFailed)?;
        Ok((0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn parent_element(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn is_connected(&self, element: &Element) -> bool {
        element.is_connected()
    }

    fn is_label(&self, element: &Element) -> bool {
        element.matches("label").unwrap_or(false)
    }

    fn style_visibility(&self, element: &Element) -> Result<StyleVisibility, HostError> {
        let style = self
            .window
            .get_computed_style(element)
            .ok()
            .flatten()
            .ok_or(HostError::StyleUnavailable)?;
        let display = style
            .get_property_value("display")
            .map_err(|_| HostError::StyleUnavailable)?;
        let visibility = style
            .get_property_value("visibility")
            .map_err(|_| HostError::StyleUnavailable)?;
        Ok(StyleVisibility::from_computed(&display, &visibility))
    }

    fn bounding_rect(&self, element: &Element) -> Result<Rect, HostError> {
        let r = element.get_bounding_client_rect();
        let rect = Rect::from_origin_size((r.x(), r.y()), (r.width(), r.height()));
        if rect.is_finite() {
            Ok(rect)
        } else {
            Err(HostError::LayoutUnavailable)
        }
    }

    fn scroll_offset(&self) -> Vec2 {
        Vec2::new(
            self.window.scroll_x().unwrap_or(0.0),
            self.window.scroll_y().unwrap_or(0.0),
        )
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) -> Result<(), HostError> {
        element
            .set_attribute(name, value)
            .map_err(|_| HostError::AttributeRejected)
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) -> Result<(), HostError> {
        element
            .remove_attribute(name)
            .map_err(|_| HostError::AttributeRejected)
    }

    fn downgrade(&self, element: &Element) -> WeakElement {
        WeakElement::new(element)
    }

    fn upgrade(&self, handle: &WeakElement) -> Option<Element> {
        handle.target().dyn_into::<Element>().ok()
    }
}
