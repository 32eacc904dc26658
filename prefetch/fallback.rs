/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Eager prefetch for runtimes without viewport observation.
//!
//! Requests are driven purely by lifecycle: once on mount, then again whenever
//! the destination string changes. Nothing is observed, so the same pathname
//! can be requested more than once; the loader is expected to deduplicate.

use crate::diagnostics::PrefetchTrigger;

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackScheduler;

impl FallbackScheduler {
    pub fn on_mount(&self) -> Option<PrefetchTrigger> {
        Some(PrefetchTrigger::Mount)
    }

    /// Compares destinations by string inequality only.
    pub fn on_update(&self, previous_to: &str, next_to: &str) -> Option<PrefetchTrigger> {
        (previous_to != next_to).then_some(PrefetchTrigger::DestinationChanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_always_requests() {
        assert_eq!(FallbackScheduler.on_mount(), Some(PrefetchTrigger::Mount));
    }

    #[test]
    fn update_requests_only_when_destination_changes() {
        let scheduler = FallbackScheduler;
        assert_eq!(scheduler.on_update("/a", "/a"), None);
        assert_eq!(
            scheduler.on_update("/a", "/b"),
            Some(PrefetchTrigger::DestinationChanged)
        );
        assert_eq!(
            scheduler.on_update("/a", "/a?tab=2"),
            Some(PrefetchTrigger::DestinationChanged)
        );
    }
}
