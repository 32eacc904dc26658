/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Host-provided collaborators. Links reference these through `Rc<dyn _>`
//! handles injected via [`crate::link::LinkContext`]; they never own them.

pub mod loader;
pub mod router;
pub mod viewport;

pub use loader::{Loader, LoaderSignal};
pub use router::{NavigateOptions, Router};
pub use viewport::{
    IntersectionCallback, IntersectionEntry, ObserverUnavailable, ViewportObservation,
    ViewportObserver,
};
