/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Resource loader for route destinations.
///
/// Links may request the same pathname repeatedly; deduplication and
/// scheduling of the actual fetches belong to the implementation.
pub trait Loader {
    /// Request that everything needed to render `pathname` be fetched.
    fn enqueue(&self, pathname: &str);

    /// Signal hover intent on `pathname`. Separate from [`Loader::enqueue`]
    /// so implementations can warm it up ahead of queued prefetches.
    fn hovering(&self, pathname: &str);
}

impl<F> Loader for F
where
    F: Fn(LoaderSignal<'_>),
{
    fn enqueue(&self, pathname: &str) {
        self(LoaderSignal::Enqueue(pathname))
    }

    fn hovering(&self, pathname: &str) {
        self(LoaderSignal::Hovering(pathname))
    }
}

/// Signal delivered to closure-based loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderSignal<'a> {
    Enqueue(&'a str),
    Hovering(&'a str),
}
