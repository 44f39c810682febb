// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG marker management.
//!
//! Each [`MarkerSpec`] becomes one absolutely positioned `<svg>` appended to
//! the document body:
//!
//! ```text
//! <svg aria-hidden="true" style="position:absolute; pointer-events:none; …">
//!   <clipPath id="{clip_id}"><circle cx cy r/></clipPath>
//!   <circle cx cy r clip-path="url(#{clip_id})" fill=… [stroke=… stroke-width=…]/>
//! </svg>
//! ```
//!
//! Clipping the circle to its own outline keeps the ring inside the marker's
//! square, so passing and warning markers have the same footprint.

use kurbo::Point;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, SvgElement};

use tapmark_core::host::{HostError, MarkerSurface};
use tapmark_core::marker::MarkerSpec;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Builds SVG markers under a parent element (normally `<body>`).
pub struct SvgSurface {
    document: web_sys::Document,
    parent: HtmlElement,
}

impl core::fmt::Debug for SvgSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SvgSurface").finish_non_exhaustive()
    }
}

impl SvgSurface {
    /// Creates a surface that appends markers to the document body.
    pub fn new(document: &web_sys::Document) -> Result<Self, JsValue> {
        let parent = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        Ok(Self {
            document: document.clone(),
            parent,
        })
    }

    fn svg_element(&self, name: &str) -> Result<Element, HostError> {
        self.document
            .create_element_ns(Some(SVG_NS), name)
            .map_err(|_| HostError::SurfaceUnavailable)
    }

    fn circle(&self, radius: &str) -> Result<Element, HostError> {
        let circle = self.svg_element("circle")?;
        let _ = circle.set_attribute("cx", radius);
        let _ = circle.set_attribute("cy", radius);
        let _ = circle.set_attribute("r", radius);
        Ok(circle)
    }
}

impl MarkerSurface for SvgSurface {
    type Marker = SvgElement;

    fn create(&mut self, spec: &MarkerSpec) -> Result<SvgElement, HostError> {
        let svg: SvgElement = self
            .svg_element("svg")?
            .dyn_into()
            .map_err(|_| HostError::SurfaceUnavailable)?;
        let size = css_px(spec.diameter);
        let s = svg.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("top", &css_px(spec.origin.y));
        let _ = s.set_property("left", &css_px(spec.origin.x));
        let _ = s.set_property("width", &size);
        let _ = s.set_property("height", &size);
        let _ = s.set_property("z-index", &spec.z_index.to_string());
        let _ = s.set_property("margin", "0");
        let _ = s.set_property("pointer-events", "none");
        let _ = svg.set_attribute("aria-hidden", "true");

        let radius = spec.radius().to_string();
        let clip = self.svg_element("clipPath")?;
        let _ = clip.set_attribute("id", &spec.clip_id);
        let outline = self.circle(&radius)?;
        clip.append_child(&outline)
            .map_err(|_| HostError::SurfaceUnavailable)?;
        svg.append_child(&clip)
            .map_err(|_| HostError::SurfaceUnavailable)?;

        let circle = self.circle(&radius)?;
        let _ = circle.set_attribute("clip-path", &clip_url(&spec.clip_id));
        let _ = circle.set_attribute("fill", spec.style.fill);
        if let Some((stroke, width)) = spec.style.stroke {
            let _ = circle.set_attribute("stroke", stroke);
            let _ = circle.set_attribute("stroke-width", &width.to_string());
        }
        svg.append_child(&circle)
            .map_err(|_| HostError::SurfaceUnavailable)?;

        self.parent
            .append_child(&svg)
            .map_err(|_| HostError::SurfaceUnavailable)?;
        Ok(svg)
    }

    fn place(&mut self, marker: &SvgElement, origin: Point) {
        let s = marker.style();
        let _ = s.set_property("top", &css_px(origin.y));
        let _ = s.set_property("left", &css_px(origin.x));
    }

    fn set_shown(&mut self, marker: &SvgElement, shown: bool) {
        let _ = marker
            .style()
            .set_property("display", if shown { "block" } else { "none" });
    }

    fn remove(&mut self, marker: SvgElement) -> Result<(), HostError> {
        if marker.parent_node().is_none() {
            return Err(HostError::Detached);
        }
        marker.remove();
        Ok(())
    }
}

/// Formats a length as a CSS pixel value.
fn css_px(v: f64) -> String {
    format!("{v}px")
}

/// Formats a fragment reference to a clip path.
fn clip_url(id: &str) -> String {
    format!("url(#{id})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_px_formats_without_trailing_zeros() {
        assert_eq!(css_px(18.0), "18px");
        assert_eq!(css_px(-3.5), "-3.5px");
        assert_eq!(css_px(0.0), "0px");
    }

    #[test]
    fn clip_url_is_a_fragment_reference() {
        assert_eq!(
            clip_url("tapmark-clip-0000beef-3"),
            "url(#tapmark-clip-0000beef-3)"
        );
    }
}
