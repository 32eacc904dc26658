/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Application-wide link settings.
//!
//! ```toml
//! path_prefix = "/blog"
//! external_link_warnings = true
//! deprecation_warnings = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Base path the application is served from; empty for the site root.
    pub path_prefix: String,
    /// Warn when a link destination resolves to another host. Advisory only.
    pub external_link_warnings: bool,
    /// Warn on every call to a deprecated navigation entry point.
    pub deprecation_warnings: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            // Release builds skip the external-link check entirely.
            external_link_warnings: cfg!(debug_assertions),
            deprecation_warnings: true,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read link config {}: {source}", path.display())
            },
            Self::Parse(error) => write!(f, "invalid link config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(error) => Some(error),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(error: toml::de::Error) -> Self {
        Self::Parse(error)
    }
}

impl LinkConfig {
    pub fn with_path_prefix(prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Join the configured prefix with `path`, collapsing duplicate separators.
    pub fn with_prefix(&self, path: &str) -> String {
        path::with_prefix(&self.path_prefix, path)
    }
}
