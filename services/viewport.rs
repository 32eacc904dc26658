/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Viewport observation, shaped after the browser `IntersectionObserver`.

/// One intersection report for an observed element.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<E> {
    pub target: E,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl<E> IntersectionEntry<E> {
    /// Some runtimes never set `is_intersecting`; a nonzero ratio counts too.
    pub fn is_visible(&self) -> bool {
        self.is_intersecting || self.intersection_ratio > 0.0
    }
}

pub type IntersectionCallback<E> = Box<dyn FnMut(&[IntersectionEntry<E>])>;

/// Observer created by a [`ViewportObservation`] service.
pub trait ViewportObserver<E> {
    fn observe(&self, element: &E);
    fn unobserve(&self, element: &E);
    /// Stop observing everything and release the observer's resources.
    fn disconnect(&self);
}

/// Runtime facility that creates viewport observers. Its presence in a
/// [`crate::link::LinkContext`] is what makes visibility-triggered prefetch
/// available.
pub trait ViewportObservation<E> {
    fn create(
        &self,
        callback: IntersectionCallback<E>,
    ) -> Result<Box<dyn ViewportObserver<E>>, ObserverUnavailable>;
}

/// The runtime advertised observation support but refused to build an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverUnavailable {
    pub reason: String,
}

impl ObserverUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ObserverUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "viewport observer unavailable: {}", self.reason)
    }
}

impl std::error::Error for ObserverUnavailable {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, 0.0, true)]
    #[case(false, 0.25, true)]
    #[case(true, 1.0, true)]
    #[case(false, 0.0, false)]
    fn entry_visibility_accepts_flag_or_ratio(
        #[case] is_intersecting: bool,
        #[case] intersection_ratio: f64,
        #[case] expected: bool,
    ) {
        let entry = IntersectionEntry {
            target: 1_u32,
            is_intersecting,
            intersection_ratio,
        };
        assert_eq!(entry.is_visible(), expected);
    }
}
