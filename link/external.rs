/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Development-time check that link destinations stay on the current host.
//! Purely advisory: the result is logged, never acted on.

use log::warn;
use url::Url;

use crate::diagnostics::{DiagnosticEvent, emit_event};
use crate::path::is_local_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Internal,
    External,
}

fn host_with_port(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Resolve `to` against `location`; compare hosts when that works, otherwise
/// fall back to the syntactic local-path test.
pub fn classify_link_target(to: &str, location: Option<&Url>) -> LinkTarget {
    let resolved = location.and_then(|location| location.join(to).ok().map(|link| (location, link)));
    let internal = match resolved {
        Some((location, link)) => host_with_port(location) == host_with_port(&link),
        None => is_local_path(to),
    };
    if internal {
        LinkTarget::Internal
    } else {
        LinkTarget::External
    }
}

/// Classify `to` and warn when it leaves the current host. Advisory only.
pub fn warn_if_external(to: &str, location: Option<&Url>) -> LinkTarget {
    let target = classify_link_target(to, location);
    if target == LinkTarget::External {
        warn!(
            "External link {to} was detected in a Link component. Use the Link component only for internal links."
        );
        emit_event(DiagnosticEvent::ExternalLinkDetected { to: to.to_string() });
    }
    target
}
