/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! When to ask the loader for a link's destination.
//!
//! A [`Prefetcher`] picks its [`PrefetchStrategy`] once, at construction:
//! with viewport observation available it waits for the element to become
//! visible, otherwise it falls back to eager requests on lifecycle events.

pub mod fallback;
pub mod watcher;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::diagnostics::{DiagnosticEvent, PrefetchTrigger, emit_event};
use crate::path::parse_path;
use crate::services::{Loader, ViewportObservation};

pub use fallback::FallbackScheduler;
pub use watcher::{ObservationHandle, ObservationState, watch_visibility};

/// Whether the runtime can observe element visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherCapability {
    Supported,
    Unsupported,
}

pub enum PrefetchStrategy<E> {
    Observe(Rc<dyn ViewportObservation<E>>),
    Eager(FallbackScheduler),
}

impl<E> PrefetchStrategy<E> {
    pub fn select(observation: Option<Rc<dyn ViewportObservation<E>>>) -> Self {
        match observation {
            Some(observation) => Self::Observe(observation),
            None => Self::Eager(FallbackScheduler),
        }
    }

    pub fn capability(&self) -> WatcherCapability {
        match self {
            Self::Observe(_) => WatcherCapability::Supported,
            Self::Eager(_) => WatcherCapability::Unsupported,
        }
    }
}

/// Request `parse_path(to).pathname` from the loader.
pub(crate) fn request_prefetch(loader: &dyn Loader, to: &str, trigger: PrefetchTrigger) {
    let pathname = parse_path(to).pathname;
    debug!("Prefetching {pathname} ({trigger:?})");
    emit_event(DiagnosticEvent::PrefetchRequested {
        pathname: pathname.clone(),
        trigger,
    });
    loader.enqueue(&pathname);
}

pub struct Prefetcher<E> {
    strategy: PrefetchStrategy<E>,
    loader: Rc<dyn Loader>,
    // Shared with the armed watcher so a late intersection prefetches the
    // destination current at fire time.
    destination: Rc<RefCell<String>>,
    observation: Option<ObservationHandle<E>>,
}

impl<E: PartialEq + 'static> Prefetcher<E> {
    pub fn new(strategy: PrefetchStrategy<E>, loader: Rc<dyn Loader>, to: &str) -> Self {
        Self {
            strategy,
            loader,
            destination: Rc::new(RefCell::new(to.to_string())),
            observation: None,
        }
    }

    pub fn capability(&self) -> WatcherCapability {
        self.strategy.capability()
    }

    pub fn observation(&self) -> Option<&ObservationHandle<E>> {
        self.observation.as_ref()
    }

    pub fn mount(&self) {
        if let PrefetchStrategy::Eager(scheduler) = &self.strategy
            && let Some(trigger) = scheduler.on_mount()
        {
            let to = self.destination.borrow().clone();
            request_prefetch(&*self.loader, &to, trigger);
        }
    }

    pub fn destination_changed(&self, next_to: &str) {
        let previous_to = self.destination.replace(next_to.to_string());
        if let PrefetchStrategy::Eager(scheduler) = &self.strategy
            && let Some(trigger) = scheduler.on_update(&previous_to, next_to)
        {
            request_prefetch(&*self.loader, next_to, trigger);
        }
    }

    /// Element ref callback. `Some` arms a watcher for a new element, `None`
    /// releases the current one.
    pub fn attach(&mut self, element: Option<E>) {
        let Some(element) = element else {
            self.release();
            return;
        };
        let PrefetchStrategy::Observe(observation) = &self.strategy else {
            return;
        };
        let observation = Rc::clone(observation);
        if self
            .observation
            .as_ref()
            .is_some_and(|handle| *handle.element() == element)
        {
            return;
        }
        self.release();

        let loader = Rc::clone(&self.loader);
        let destination = Rc::clone(&self.destination);
        let on_visible = move || {
            let to = destination.borrow().clone();
            request_prefetch(&*loader, &to, PrefetchTrigger::Visible);
        };
        match watch_visibility(&*observation, element, on_visible) {
            Ok(handle) => self.observation = Some(handle),
            Err(error) => {
                warn!("{error}; prefetching link destination eagerly");
                let to = self.destination.borrow().clone();
                request_prefetch(&*self.loader, &to, PrefetchTrigger::ObserverUnavailable);
            },
        }
    }

    pub fn release(&mut self) {
        if let Some(handle) = self.observation.take() {
            handle.release();
        }
    }
}
