/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! In-memory collaborators for exercising links without a browser.

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::{Receiver, unbounded};
use url::Url;

use crate::diagnostics::{self, DiagnosticEvent};
use crate::services::viewport::{
    IntersectionCallback, IntersectionEntry, ObserverUnavailable, ViewportObservation,
    ViewportObserver,
};
use crate::services::{Loader, NavigateOptions, Router};

/// Stand-in for a DOM element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestElement(pub u32);

#[derive(Debug, Default)]
pub struct RecordingLoader {
    enqueued: RefCell<Vec<String>>,
    hovered: RefCell<Vec<String>>,
}

impl RecordingLoader {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn enqueued(&self) -> Vec<String> {
        self.enqueued.borrow().clone()
    }

    pub fn hovered(&self) -> Vec<String> {
        self.hovered.borrow().clone()
    }
}

impl Loader for RecordingLoader {
    fn enqueue(&self, pathname: &str) {
        self.enqueued.borrow_mut().push(pathname.to_string());
    }

    fn hovering(&self, pathname: &str) {
        self.hovered.borrow_mut().push(pathname.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouterCall {
    Navigate {
        path: String,
        options: NavigateOptions,
    },
    Push(String),
    Replace(String),
}

#[derive(Debug)]
pub struct RecordingRouter {
    location: Option<Url>,
    calls: RefCell<Vec<RouterCall>>,
}

impl RecordingRouter {
    /// Router whose current location is `https://example.com/`.
    pub fn new() -> Rc<Self> {
        Self::at(Url::parse("https://example.com/").ok())
    }

    pub fn at(location: Option<Url>) -> Rc<Self> {
        Rc::new(Self {
            location,
            calls: RefCell::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RouterCall> {
        self.calls.borrow().clone()
    }
}

impl Router for RecordingRouter {
    fn location(&self) -> Option<Url> {
        self.location.clone()
    }

    fn navigate(&self, path: &str, options: &NavigateOptions) {
        self.calls.borrow_mut().push(RouterCall::Navigate {
            path: path.to_string(),
            options: options.clone(),
        });
    }

    fn push(&self, path: &str) {
        self.calls.borrow_mut().push(RouterCall::Push(path.to_string()));
    }

    fn replace(&self, path: &str) {
        self.calls
            .borrow_mut()
            .push(RouterCall::Replace(path.to_string()));
    }
}

struct FakeObserverSlot {
    callback: Rc<RefCell<IntersectionCallback<TestElement>>>,
    observed: Vec<TestElement>,
    connected: bool,
}

#[derive(Default)]
struct FakeViewportState {
    slots: Vec<FakeObserverSlot>,
    refusal: Option<String>,
}

/// Viewport whose intersections are driven by the test.
#[derive(Clone, Default)]
pub struct FakeViewport {
    state: Rc<RefCell<FakeViewportState>>,
}

impl FakeViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport that fails every observer construction with `reason`.
    pub fn refusing(reason: &str) -> Self {
        let viewport = Self::default();
        viewport.state.borrow_mut().refusal = Some(reason.to_string());
        viewport
    }

    pub fn is_observing(&self, element: &TestElement) -> bool {
        self.state
            .borrow()
            .slots
            .iter()
            .any(|slot| slot.connected && slot.observed.contains(element))
    }

    /// Observers created and not yet disconnected.
    pub fn live_observers(&self) -> usize {
        self.state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.connected)
            .count()
    }

    pub fn created_observers(&self) -> usize {
        self.state.borrow().slots.len()
    }

    /// Report one intersection for `target` to every observer watching it.
    pub fn intersect(&self, target: TestElement, is_intersecting: bool, intersection_ratio: f64) {
        let entry = IntersectionEntry {
            target,
            is_intersecting,
            intersection_ratio,
        };
        let callbacks: Vec<_> = self
            .state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.connected && slot.observed.contains(&target))
            .map(|slot| Rc::clone(&slot.callback))
            .collect();
        for slot_callback in callbacks {
            let mut callback = slot_callback.borrow_mut();
            (*callback)(std::slice::from_ref(&entry));
        }
    }

    /// Deliver `entries` to every connected observer, whatever it observes.
    pub fn deliver_to_all(&self, entries: &[IntersectionEntry<TestElement>]) {
        let callbacks: Vec<_> = self
            .state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.connected)
            .map(|slot| Rc::clone(&slot.callback))
            .collect();
        for slot_callback in callbacks {
            let mut callback = slot_callback.borrow_mut();
            (*callback)(entries);
        }
    }
}

impl ViewportObservation<TestElement> for FakeViewport {
    fn create(
        &self,
        callback: IntersectionCallback<TestElement>,
    ) -> Result<Box<dyn ViewportObserver<TestElement>>, ObserverUnavailable> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = &state.refusal {
            return Err(ObserverUnavailable::new(reason.clone()));
        }
        state.slots.push(FakeObserverSlot {
            callback: Rc::new(RefCell::new(callback)),
            observed: Vec::new(),
            connected: true,
        });
        Ok(Box::new(FakeObserver {
            index: state.slots.len() - 1,
            state: Rc::clone(&self.state),
        }))
    }
}

struct FakeObserver {
    index: usize,
    state: Rc<RefCell<FakeViewportState>>,
}

impl ViewportObserver<TestElement> for FakeObserver {
    fn observe(&self, element: &TestElement) {
        if let Some(slot) = self.state.borrow_mut().slots.get_mut(self.index)
            && slot.connected
        {
            slot.observed.push(*element);
        }
    }

    fn unobserve(&self, element: &TestElement) {
        if let Some(slot) = self.state.borrow_mut().slots.get_mut(self.index) {
            slot.observed.retain(|observed| observed != element);
        }
    }

    fn disconnect(&self) {
        if let Some(slot) = self.state.borrow_mut().slots.get_mut(self.index) {
            slot.observed.clear();
            slot.connected = false;
        }
    }
}

/// Capture diagnostics emitted on the current thread. Drop the guard to stop.
pub fn capture_diagnostics() -> DiagnosticsCapture {
    let (tx, rx) = unbounded();
    diagnostics::install_thread_sender(tx);
    DiagnosticsCapture { rx }
}

pub struct DiagnosticsCapture {
    rx: Receiver<DiagnosticEvent>,
}

impl DiagnosticsCapture {
    pub fn drain(&self) -> Vec<DiagnosticEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for DiagnosticsCapture {
    fn drop(&mut self) {
        diagnostics::clear_thread_sender();
    }
}
