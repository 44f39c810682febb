// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host doubles for unit tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use kurbo::{Point, Rect, Vec2};

use crate::host::{
    Document, EventBindings, HostError, MarkerSurface, StyleVisibility, Timers,
};
use crate::marker::MarkerSpec;

#[derive(Clone, Debug, Default)]
pub(crate) struct FakeNode {
    pub(crate) parent: Option<usize>,
    pub(crate) interactive: bool,
    pub(crate) label: bool,
    pub(crate) rect: Rect,
    pub(crate) display_none: bool,
    pub(crate) visibility_hidden: bool,
    pub(crate) connected: bool,
    pub(crate) collected: bool,
    pub(crate) style_error: bool,
    pub(crate) layout_error: bool,
    pub(crate) attributes: Vec<(String, String)>,
}

/// A flat node arena standing in for a live document.
#[derive(Debug, Default)]
pub(crate) struct FakeDocument {
    pub(crate) nodes: Vec<FakeNode>,
    pub(crate) scroll: Vec2,
    pub(crate) query_error: bool,
    pub(crate) reject_attributes: bool,
}

impl FakeDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: FakeNode) -> usize {
        self.nodes.push(FakeNode {
            connected: true,
            ..node
        });
        self.nodes.len() - 1
    }

    /// A non-interactive wrapper element.
    pub(crate) fn container(&mut self, parent: Option<usize>) -> usize {
        self.push(FakeNode {
            parent,
            ..FakeNode::default()
        })
    }

    /// An interactive control with an `(x, y, width, height)` viewport box.
    pub(crate) fn control(&mut self, parent: Option<usize>, b: (f64, f64, f64, f64)) -> usize {
        self.push(FakeNode {
            parent,
            interactive: true,
            rect: Rect::from_origin_size((b.0, b.1), (b.2, b.3)),
            ..FakeNode::default()
        })
    }

    /// A `<label>` with an `(x, y, width, height)` viewport box.
    pub(crate) fn label(&mut self, parent: Option<usize>, b: (f64, f64, f64, f64)) -> usize {
        let id = self.control(parent, b);
        self.nodes[id].label = true;
        id
    }

    pub(crate) fn node_mut(&mut self, id: usize) -> &mut FakeNode {
        &mut self.nodes[id]
    }

    pub(crate) fn attr(&self, id: usize, name: &str) -> Option<&str> {
        self.nodes[id]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Document for FakeDocument {
    type Element = usize;
    type Handle = usize;

    fn interactive_elements(&self, _selector: &str) -> Result<Vec<usize>, HostError> {
        if self.query_error {
            return Err(HostError::QueryFailed);
        }
        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.interactive)
            .map(|(i, _)| i)
            .collect())
    }

    fn parent_element(&self, element: &usize) -> Option<usize> {
        self.nodes[*element].parent
    }

    fn is_connected(&self, element: &usize) -> bool {
        self.nodes[*element].connected
    }

    fn is_label(&self, element: &usize) -> bool {
        self.nodes[*element].label
    }

    fn style_visibility(&self, element: &usize) -> Result<StyleVisibility, HostError> {
        let node = &self.nodes[*element];
        if node.style_error {
            return Err(HostError::StyleUnavailable);
        }
        Ok(StyleVisibility {
            display_none: node.display_none,
            visibility_hidden: node.visibility_hidden,
        })
    }

    fn bounding_rect(&self, element: &usize) -> Result<Rect, HostError> {
        let node = &self.nodes[*element];
        if node.layout_error {
            return Err(HostError::LayoutUnavailable);
        }
        Ok(node.rect)
    }

    fn scroll_offset(&self) -> Vec2 {
        self.scroll
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.attr(*element, name).map(ToString::to_string)
    }

    fn set_attribute(&mut self, element: &usize, name: &str, value: &str) -> Result<(), HostError> {
        if self.reject_attributes {
            return Err(HostError::AttributeRejected);
        }
        let attrs = &mut self.nodes[*element].attributes;
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn remove_attribute(&mut self, element: &usize, name: &str) -> Result<(), HostError> {
        self.nodes[*element].attributes.retain(|(k, _)| k != name);
        Ok(())
    }

    fn downgrade(&self, element: &usize) -> usize {
        *element
    }

    fn upgrade(&self, handle: &usize) -> Option<usize> {
        (!self.nodes[*handle].collected).then_some(*handle)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FakeMarker {
    pub(crate) spec: MarkerSpec,
    pub(crate) origin: Point,
    pub(crate) shown: bool,
    pub(crate) attached: bool,
    pub(crate) placements: usize,
}

/// Records marker operations instead of building nodes.
#[derive(Debug, Default)]
pub(crate) struct FakeSurface {
    pub(crate) markers: Vec<FakeMarker>,
    /// Fail the create call made when this many markers exist.
    pub(crate) fail_create_at: Option<usize>,
}

impl FakeSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attached(&self) -> usize {
        self.markers.iter().filter(|m| m.attached).count()
    }
}

impl MarkerSurface for FakeSurface {
    type Marker = usize;

    fn create(&mut self, spec: &MarkerSpec) -> Result<usize, HostError> {
        if self.fail_create_at == Some(self.markers.len()) {
            return Err(HostError::SurfaceUnavailable);
        }
        self.markers.push(FakeMarker {
            spec: spec.clone(),
            origin: spec.origin,
            shown: true,
            attached: true,
            placements: 0,
        });
        Ok(self.markers.len() - 1)
    }

    fn place(&mut self, marker: &usize, origin: Point) {
        let m = &mut self.markers[*marker];
        m.origin = origin;
        m.placements += 1;
    }

    fn set_shown(&mut self, marker: &usize, shown: bool) {
        self.markers[*marker].shown = shown;
    }

    fn remove(&mut self, marker: usize) -> Result<(), HostError> {
        let m = &mut self.markers[marker];
        if !m.attached {
            return Err(HostError::Detached);
        }
        m.attached = false;
        Ok(())
    }
}

/// Hands out sequential ids and remembers what was scheduled and cancelled.
#[derive(Debug, Default)]
pub(crate) struct FakeTimers {
    pub(crate) scheduled: Vec<(u32, Duration)>,
    pub(crate) cancelled: Vec<u32>,
}

impl FakeTimers {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scheduled and not cancelled.
    pub(crate) fn live(&self) -> usize {
        self.scheduled.len() - self.cancelled.len()
    }
}

impl Timers for FakeTimers {
    type Handle = u32;

    fn schedule(&mut self, delay: Duration) -> u32 {
        let id = u32::try_from(self.scheduled.len()).unwrap_or(u32::MAX);
        self.scheduled.push((id, delay));
        id
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }
}

#[derive(Debug)]
pub(crate) struct FakeBindings {
    pub(crate) attached: usize,
    pub(crate) detach_calls: usize,
}

impl FakeBindings {
    /// Scroll, resize, orientation change, keyboard.
    pub(crate) fn new() -> Self {
        Self {
            attached: 4,
            detach_calls: 0,
        }
    }
}

impl EventBindings for FakeBindings {
    fn detach_all(&mut self) -> usize {
        self.detach_calls += 1;
        core::mem::take(&mut self.attached)
    }
}
