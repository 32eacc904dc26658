/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use serde::{Deserialize, Serialize};
use url::Url;

/// History options for a client-side navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigateOptions {
    /// Opaque payload stored with the history entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
    /// Replace the current history entry instead of pushing a new one.
    #[serde(default)]
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self {
            state: None,
            replace: true,
        }
    }

    pub fn with_state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }
}

/// Client-side router. Paths handed to it are already prefixed.
pub trait Router {
    /// Current location, used to tell internal destinations from external ones.
    /// `None` when the host cannot provide an absolute location.
    fn location(&self) -> Option<Url>;

    fn navigate(&self, path: &str, options: &NavigateOptions);

    /// Legacy push entry point.
    fn push(&self, path: &str);

    /// Legacy replace entry point.
    fn replace(&self, path: &str);
}
