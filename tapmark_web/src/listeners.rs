// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event listener and global handle registration.

use std::rc::Weak;

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use gloo_events::EventListener;

use tapmark_core::host::EventBindings;

/// Exposes `f` as a callable property of `window`.
///
/// The closure is never freed. Page script may keep a reference to it after
/// teardown, or after a later install replaced the property, so `f` has to
/// stay callable for the rest of the page. Wrap it with [`upgrade_then`] so
/// those late calls do nothing.
pub(crate) fn expose_global(
    window: &Window,
    name: &str,
    f: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
    Reflect::set(window, &JsValue::from_str(name), closure.as_ref())?;
    closure.forget();
    Ok(())
}

/// Returns a callback that runs `f` only while `weak` still upgrades.
pub(crate) fn upgrade_then<T: ?Sized>(weak: Weak<T>, f: impl Fn(&T)) -> impl Fn() {
    move || {
        if let Some(target) = weak.upgrade() {
            f(&target);
        }
    }
}

/// The event listeners the overlay has attached to the page.
///
/// Detaching drops each [`EventListener`], which unregisters it. The global
/// handle from [`expose_global`] is not part of the set; it outlives the
/// overlay and turns into a no-op.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<EventListener>,
}

impl core::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ListenerSet {
    pub(crate) fn push(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    /// Number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl EventBindings for ListenerSet {
    fn detach_all(&mut self) -> usize {
        let count = self.listeners.len();
        self.listeners.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn late_calls_after_the_target_is_dropped_do_nothing() {
        let teardowns = Rc::new(Cell::new(0_u32));
        let handle = upgrade_then(Rc::downgrade(&teardowns), |n: &Cell<u32>| {
            n.set(n.get() + 1);
        });
        handle();
        handle();
        assert_eq!(teardowns.get(), 2);

        drop(teardowns);
        handle();
        handle();
    }

    #[test]
    fn detaching_twice_reports_nothing_the_second_time() {
        let mut set = ListenerSet::default();
        assert_eq!(set.detach_all(), 0);
        assert!(set.is_empty());
        assert_eq!(set.detach_all(), 0);
    }
}
