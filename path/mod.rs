/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Path helpers shared by rendering, prefetching and navigation.
//!
//! Sites deployed under a sub-path (for example `/blog`) configure a path
//! prefix once; every href and navigation target goes through [`with_prefix`]
//! so call sites can keep writing root-relative paths.

/// Components of a link destination. Prefetch and hover signals only ever
/// carry `pathname`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

/// Join `prefix` and `path`, then collapse every run of `/` into one.
pub fn with_prefix(prefix: &str, path: &str) -> String {
    normalize_path(&format!("{prefix}/{path}"))
}

pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_was_separator {
                continue;
            }
            previous_was_separator = true;
        } else {
            previous_was_separator = false;
        }
        normalized.push(ch);
    }
    normalized
}

/// Split a destination into pathname, search and hash.
///
/// The hash is split off at the first `#` before the search is split at the
/// first `?`, so a `?` inside a fragment stays in the fragment. A bare `?` or
/// `#` yields an empty component, and an empty destination is `/`.
pub fn parse_path(path: &str) -> ParsedPath {
    let mut pathname = if path.is_empty() { "/" } else { path };
    let mut search = "";
    let mut hash = "";

    if let Some(index) = pathname.find('#') {
        hash = &pathname[index..];
        pathname = &pathname[..index];
    }
    if let Some(index) = pathname.find('?') {
        search = &pathname[index..];
        pathname = &pathname[..index];
    }

    ParsedPath {
        pathname: pathname.to_string(),
        search: if search == "?" { String::new() } else { search.to_string() },
        hash: if hash == "#" { String::new() } else { hash.to_string() },
    }
}

/// True for root-relative paths: a single leading `/`, not a protocol-relative `//`.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//")
}
