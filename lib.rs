/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Prefetching navigation links for client-side-routed applications.
//!
//! A [`Link`] asks the host's [`Loader`] for its destination as soon as the
//! link scrolls into view (or eagerly, where the runtime cannot observe
//! visibility) and turns plain primary-button clicks into client-side
//! navigations through the host's [`Router`].

pub mod config;
pub mod diagnostics;
pub mod link;
pub mod navigation;
pub mod path;
pub mod prefetch;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use config::{ConfigError, LinkConfig};
pub use link::{
    ActiveProps, Anchor, ClickEvent, ClickOutcome, Link, LinkContext, LinkDescriptor, LinkProps,
    MatchInfo, MouseEvent,
};
pub use navigation::Navigator;
pub use path::{ParsedPath, normalize_path, parse_path, with_prefix};
pub use prefetch::{ObservationHandle, WatcherCapability};
pub use services::{
    Loader, LoaderSignal, NavigateOptions, Router, ViewportObservation, ViewportObserver,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
