/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Structured events describing prefetch, hover and navigation decisions.
//!
//! Hosts install a sender once with [`install_global_sender`]; events are
//! dropped when none is installed. A thread-local sender takes precedence so
//! tests on separate threads observe only their own events.

use std::cell::RefCell;
use std::sync::OnceLock;

use crossbeam_channel::Sender;

static GLOBAL_DIAGNOSTICS_TX: OnceLock<Sender<DiagnosticEvent>> = OnceLock::new();

thread_local! {
    static THREAD_DIAGNOSTICS_TX: RefCell<Option<Sender<DiagnosticEvent>>> =
        const { RefCell::new(None) };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchTrigger {
    /// Element entered the viewport.
    Visible,
    /// Eager request on mount, no observation capability.
    Mount,
    /// Eager request after the destination changed, no observation capability.
    DestinationChanged,
    /// Observation capability reported but the observer could not be created.
    ObserverUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEntry {
    Navigate,
    Push,
    Replace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    PrefetchRequested {
        pathname: String,
        trigger: PrefetchTrigger,
    },
    HoverSignaled {
        pathname: String,
    },
    ClickDecided {
        to: String,
        intercepted: bool,
    },
    NavigationDispatched {
        path: String,
        entry: NavigationEntry,
    },
    ExternalLinkDetected {
        to: String,
    },
    DeprecatedEntryPoint {
        name: &'static str,
    },
}

pub fn install_global_sender(sender: Sender<DiagnosticEvent>) -> bool {
    GLOBAL_DIAGNOSTICS_TX.set(sender).is_ok()
}

/// Route events emitted on this thread to `sender` until [`clear_thread_sender`].
pub fn install_thread_sender(sender: Sender<DiagnosticEvent>) {
    THREAD_DIAGNOSTICS_TX.with(|slot| {
        *slot.borrow_mut() = Some(sender);
    });
}

pub fn clear_thread_sender() {
    THREAD_DIAGNOSTICS_TX.with(|slot| {
        slot.borrow_mut().take();
    });
}

#[cfg(feature = "diagnostics")]
pub fn emit_event(event: DiagnosticEvent) {
    let mut event = Some(event);
    THREAD_DIAGNOSTICS_TX.with(|slot| {
        if let Some(tx) = slot.borrow().as_ref()
            && let Some(payload) = event.take()
        {
            let _ = tx.send(payload);
        }
    });
    if let Some(payload) = event
        && let Some(tx) = GLOBAL_DIAGNOSTICS_TX.get()
    {
        let _ = tx.send(payload);
    }
}

#[cfg(not(feature = "diagnostics"))]
pub fn emit_event(_event: DiagnosticEvent) {}
