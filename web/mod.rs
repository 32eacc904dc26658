/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Browser bindings: viewport observation over `IntersectionObserver` and
//! access to the window location.

use std::rc::Rc;

use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use crate::prefetch::WatcherCapability;
use crate::services::viewport::{
    IntersectionCallback, IntersectionEntry, ObserverUnavailable, ViewportObservation,
    ViewportObserver,
};

/// Checked once per environment; links then pick their strategy from the
/// presence of [`observation`] in their context.
pub fn detect_capability() -> WatcherCapability {
    let Some(window) = web_sys::window() else {
        return WatcherCapability::Unsupported;
    };
    match Reflect::has(&window, &JsValue::from_str("IntersectionObserver")) {
        Ok(true) => WatcherCapability::Supported,
        _ => WatcherCapability::Unsupported,
    }
}

/// Observation service for [`crate::LinkContext::observation`], or `None`
/// when the browser has no `IntersectionObserver`.
pub fn observation() -> Option<Rc<dyn ViewportObservation<Element>>> {
    match detect_capability() {
        WatcherCapability::Supported => Some(Rc::new(WebViewport)),
        WatcherCapability::Unsupported => None,
    }
}

pub fn current_location() -> Option<url::Url> {
    let href = web_sys::window()?.location().href().ok()?;
    url::Url::parse(&href).ok()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebViewport;

impl ViewportObservation<Element> for WebViewport {
    fn create(
        &self,
        mut callback: IntersectionCallback<Element>,
    ) -> Result<Box<dyn ViewportObserver<Element>>, ObserverUnavailable> {
        let closure = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let entries: Vec<IntersectionEntry<Element>> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                    intersection_ratio: entry.intersection_ratio(),
                })
                .collect();
            callback(&entries);
        });
        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|error| ObserverUnavailable::new(format!("{error:?}")))?;
        Ok(Box::new(WebObserver {
            observer,
            _callback: closure,
        }))
    }
}

struct WebObserver {
    observer: IntersectionObserver,
    // Must outlive the JS observer that calls into it.
    _callback: Closure<dyn FnMut(Array)>,
}

impl ViewportObserver<Element> for WebObserver {
    fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }

    fn unobserve(&self, element: &Element) {
        self.observer.unobserve(element);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}
