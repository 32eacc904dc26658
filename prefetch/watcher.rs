/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Single-shot visibility watcher.
//!
//! [`watch_visibility`] binds one element to one observer and returns the
//! [`ObservationHandle`] that owns it. The first report that the element is
//! visible tears the observer down and then runs the callback; nothing after
//! that can fire it again. Dropping the handle before that point releases the
//! observer without firing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::services::viewport::{
    IntersectionEntry, ObserverUnavailable, ViewportObservation, ViewportObserver,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationState {
    Armed,
    Fired,
    Released,
}

enum WatchState<E> {
    Armed(Rc<dyn ViewportObserver<E>>),
    Fired,
    Released,
}

struct WatchInner<E> {
    element: E,
    state: RefCell<WatchState<E>>,
    on_visible: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Owned observation of one element. Exactly one per mounted link element.
pub struct ObservationHandle<E> {
    inner: Rc<WatchInner<E>>,
}

pub fn watch_visibility<E, F>(
    observation: &dyn ViewportObservation<E>,
    element: E,
    on_visible: F,
) -> Result<ObservationHandle<E>, ObserverUnavailable>
where
    E: PartialEq + 'static,
    F: FnOnce() + 'static,
{
    let inner = Rc::new(WatchInner {
        element,
        state: RefCell::new(WatchState::Released),
        on_visible: RefCell::new(Some(Box::new(on_visible))),
    });

    // The observer owns this callback and the handle owns the observer, so the
    // callback only holds a weak reference back.
    let weak: Weak<WatchInner<E>> = Rc::downgrade(&inner);
    let observer: Rc<dyn ViewportObserver<E>> = Rc::from(observation.create(Box::new(
        move |entries: &[IntersectionEntry<E>]| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_entries(entries);
            }
        },
    ))?);

    *inner.state.borrow_mut() = WatchState::Armed(Rc::clone(&observer));
    observer.observe(&inner.element);

    Ok(ObservationHandle { inner })
}

impl<E: PartialEq> WatchInner<E> {
    fn handle_entries(&self, entries: &[IntersectionEntry<E>]) {
        let visible = entries
            .iter()
            .any(|entry| entry.target == self.element && entry.is_visible());
        if !visible {
            return;
        }

        let previous = std::mem::replace(&mut *self.state.borrow_mut(), WatchState::Fired);
        let observer = match previous {
            WatchState::Armed(observer) => observer,
            other => {
                *self.state.borrow_mut() = other;
                return;
            },
        };

        // Teardown must finish before the callback runs: the callback may
        // unmount the link that owns this handle.
        observer.unobserve(&self.element);
        observer.disconnect();
        drop(observer);

        let on_visible = self.on_visible.borrow_mut().take();
        if let Some(on_visible) = on_visible {
            on_visible();
        }
    }

    fn release(&self) {
        let previous = std::mem::replace(&mut *self.state.borrow_mut(), WatchState::Released);
        match previous {
            WatchState::Armed(observer) => {
                observer.unobserve(&self.element);
                observer.disconnect();
            },
            WatchState::Fired => {
                *self.state.borrow_mut() = WatchState::Fired;
            },
            WatchState::Released => {},
        }
        self.on_visible.borrow_mut().take();
    }
}

impl<E: PartialEq> ObservationHandle<E> {
    pub fn element(&self) -> &E {
        &self.inner.element
    }

    pub fn state(&self) -> ObservationState {
        match &*self.inner.state.borrow() {
            WatchState::Armed(_) => ObservationState::Armed,
            WatchState::Fired => ObservationState::Fired,
            WatchState::Released => ObservationState::Released,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.state() == ObservationState::Armed
    }

    /// Stop observing without firing. No-op once fired or released.
    pub fn release(&self) {
        self.inner.release();
    }
}

impl<E> Drop for ObservationHandle<E> {
    fn drop(&mut self) {
        let previous = std::mem::replace(&mut *self.inner.state.borrow_mut(), WatchState::Released);
        if let WatchState::Armed(observer) = previous {
            observer.unobserve(&self.inner.element);
            observer.disconnect();
        }
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for ObservationHandle<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &*self.inner.state.borrow() {
            WatchState::Armed(_) => "Armed",
            WatchState::Fired => "Fired",
            WatchState::Released => "Released",
        };
        f.debug_struct("ObservationHandle")
            .field("element", &self.inner.element)
            .field("state", &state)
            .finish()
    }
}
