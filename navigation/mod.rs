/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Imperative navigation.
//!
//! [`Navigator::navigate`] is the one entry point; `push`, `replace` and
//! `navigate_to` remain for older call sites and warn on every call.

use std::rc::Rc;

use log::{debug, warn};

use crate::config::LinkConfig;
use crate::diagnostics::{DiagnosticEvent, NavigationEntry, emit_event};
use crate::path::with_prefix;
use crate::services::{NavigateOptions, Router};

#[derive(Clone)]
pub struct Navigator {
    router: Rc<dyn Router>,
    path_prefix: String,
    deprecation_warnings: bool,
}

impl Navigator {
    pub fn new(router: Rc<dyn Router>, config: &LinkConfig) -> Self {
        Self {
            router,
            path_prefix: config.path_prefix.clone(),
            deprecation_warnings: config.deprecation_warnings,
        }
    }

    pub fn with_prefix(&self, path: &str) -> String {
        with_prefix(&self.path_prefix, path)
    }

    pub fn navigate(&self, to: &str, options: &NavigateOptions) {
        let path = self.with_prefix(to);
        debug!("Navigating to {path} (replace: {})", options.replace);
        emit_event(DiagnosticEvent::NavigationDispatched {
            path: path.clone(),
            entry: NavigationEntry::Navigate,
        });
        self.router.navigate(&path, options);
    }

    #[deprecated(note = "use `Navigator::navigate`")]
    pub fn push(&self, to: &str) {
        self.warn_deprecated("push");
        let path = self.with_prefix(to);
        emit_event(DiagnosticEvent::NavigationDispatched {
            path: path.clone(),
            entry: NavigationEntry::Push,
        });
        self.router.push(&path);
    }

    #[deprecated(note = "use `Navigator::navigate` with `NavigateOptions::replace()`")]
    pub fn replace(&self, to: &str) {
        self.warn_deprecated("replace");
        let path = self.with_prefix(to);
        emit_event(DiagnosticEvent::NavigationDispatched {
            path: path.clone(),
            entry: NavigationEntry::Replace,
        });
        self.router.replace(&path);
    }

    /// Alias of the already deprecated [`Navigator::push`]; warns for both.
    #[deprecated(note = "use `Navigator::navigate`")]
    pub fn navigate_to(&self, to: &str) {
        self.warn_deprecated("navigate_to");
        #[allow(deprecated)]
        self.push(to);
    }

    fn warn_deprecated(&self, name: &'static str) {
        if !self.deprecation_warnings {
            return;
        }
        warn!(
            "The \"{name}\" method is deprecated and will be removed. Please use \"navigate\" instead."
        );
        emit_event(DiagnosticEvent::DeprecatedEntryPoint { name });
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("path_prefix", &self.path_prefix)
            .field("deprecation_warnings", &self.deprecation_warnings)
            .finish_non_exhaustive()
    }
}
