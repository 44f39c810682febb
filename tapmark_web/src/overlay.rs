// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The running overlay: session, host objects, and page listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, KeyboardEvent, Window};

use tapmark_core::config::OverlayConfig;
use tapmark_core::pending::UpdateTrigger;
use tapmark_core::session::{InstallReport, Session, SessionState};
use tapmark_core::trace::{TeardownReport, Tracer};

use crate::console::ConsoleSink;
use crate::document::DomDocument;
use crate::listeners::{ListenerSet, expose_global, upgrade_then};
use crate::surface::SvgSurface;
use crate::timers::TimeoutTimers;

/// Name of the `window` property that tears the overlay down when called.
pub const GLOBAL_HANDLE_NAME: &str = "wcagTargetSizeCleanup";

type WebSession = Session<DomDocument, SvgSurface, TimeoutTimers>;

/// An installed overlay.
///
/// Cloning yields another handle to the same overlay. The page listeners only
/// hold weak references; when the last handle is dropped the overlay tears
/// itself down.
#[derive(Clone)]
pub struct Overlay {
    inner: Rc<OverlayInner>,
}

impl core::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Overlay")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

// Each piece sits in its own cell: a timer firing borrows the document,
// surface, and session but never the timers or listeners.
struct OverlayInner {
    window: Window,
    document: RefCell<DomDocument>,
    surface: RefCell<SvgSurface>,
    timers: RefCell<TimeoutTimers>,
    bindings: RefCell<ListenerSet>,
    session: RefCell<WebSession>,
    sink: RefCell<ConsoleSink>,
}

impl Overlay {
    /// Audits the current page and attaches the overlay.
    ///
    /// Creates one marker per visible control, annotates overlapping ones,
    /// starts listening for scroll, resize, orientation changes, and the
    /// teardown key, exposes [`GLOBAL_HANDLE_NAME`] on `window`, and finally
    /// alerts the overlap count.
    pub fn install(config: OverlayConfig) -> Result<(Self, InstallReport), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = DomDocument::new(window.clone())?;
        let surface = SvgSurface::new(document.document())?;
        let session = WebSession::new(config, session_tag());

        let inner = Rc::new_cyclic(|weak: &Weak<OverlayInner>| {
            OverlayInner {
                window,
                document: RefCell::new(document),
                surface: RefCell::new(surface),
                timers: RefCell::new(TimeoutTimers::new(upgrade_then(
                    weak.clone(),
                    OverlayInner::run_pending,
                ))),
                bindings: RefCell::new(ListenerSet::default()),
                session: RefCell::new(session),
                sink: RefCell::new(ConsoleSink::new()),
            }
        });

        let report = inner.install_session()?;
        if let Err(err) = inner.attach() {
            inner.teardown();
            return Err(err);
        }

        // All cells are released here; `alert` blocks and may let other
        // callbacks run.
        let _ = inner.window.alert_with_message(&report.to_string());
        Ok((Self { inner }, report))
    }

    /// Removes markers, annotations, listeners, and any pending update.
    ///
    /// Returns `None` if the overlay was already torn down.
    pub fn teardown(&self) -> Option<TeardownReport> {
        self.inner.teardown()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.session.borrow().state()
    }

    /// Whether the overlay is installed and not yet torn down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }
}

impl OverlayInner {
    fn install_session(&self) -> Result<InstallReport, JsValue> {
        let mut sink = self.sink.borrow_mut();
        let mut tracer = Tracer::new(&mut *sink);
        self.session
            .borrow_mut()
            .install(
                &mut self.document.borrow_mut(),
                &mut self.surface.borrow_mut(),
                &mut tracer,
            )
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        let window: &EventTarget = self.window.as_ref();
        let mut bindings = self.bindings.borrow_mut();

        for trigger in [
            UpdateTrigger::Scroll,
            UpdateTrigger::Resize,
            UpdateTrigger::OrientationChange,
        ] {
            let weak = Rc::downgrade(self);
            bindings.push(EventListener::new(window, trigger.event_type(), move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.request_update(trigger);
                }
            }));
        }

        let document: EventTarget = self.document.borrow().document().clone().into();
        let weak = Rc::downgrade(self);
        bindings.push(EventListener::new(&document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if let Some(inner) = weak.upgrade()
                && inner.is_teardown_key(&key)
            {
                inner.teardown();
            }
        }));

        drop(bindings);

        // Stays on `window` after teardown; later calls find nothing to do.
        expose_global(
            &self.window,
            GLOBAL_HANDLE_NAME,
            upgrade_then(Rc::downgrade(self), |inner: &Self| {
                inner.teardown();
            }),
        )
    }

    fn is_teardown_key(&self, key: &str) -> bool {
        self.session.borrow().config().is_teardown_key(key)
    }

    fn request_update(&self, trigger: UpdateTrigger) {
        let mut sink = self.sink.borrow_mut();
        let mut tracer = Tracer::new(&mut *sink);
        self.session
            .borrow_mut()
            .request_update(trigger, &mut self.timers.borrow_mut(), &mut tracer);
    }

    fn run_pending(&self) {
        let mut sink = self.sink.borrow_mut();
        let mut tracer = Tracer::new(&mut *sink);
        self.session.borrow_mut().timer_fired(
            &self.document.borrow(),
            &mut self.surface.borrow_mut(),
            &mut tracer,
        );
    }

    fn teardown(&self) -> Option<TeardownReport> {
        let mut sink = self.sink.borrow_mut();
        let mut tracer = Tracer::new(&mut *sink);
        self.session.borrow_mut().teardown(
            &mut self.document.borrow_mut(),
            &mut self.surface.borrow_mut(),
            &mut self.timers.borrow_mut(),
            &mut *self.bindings.borrow_mut(),
            &mut tracer,
        )
    }
}

impl Drop for OverlayInner {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// A random tag that keeps clip ids distinct across overlays on one page.
fn session_tag() -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Math.random() is in [0, 1); the product fits in u32"
    )]
    let tag = (js_sys::Math::random() * f64::from(u32::MAX)) as u32;
    tag
}
