/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Active-state styling for links that point at the current location.

use std::collections::BTreeMap;

/// Inline style declarations keyed by CSS property.
pub type Style = BTreeMap<String, String>;

/// Pass-through DOM and accessibility attributes.
pub type Attributes = BTreeMap<String, String>;

/// How a link's href relates to the current location, as computed by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInfo {
    pub is_current: bool,
    pub is_partially_current: bool,
    pub href: String,
    pub location: String,
}

impl MatchInfo {
    pub fn resolve(href: &str, location_pathname: &str) -> Self {
        Self {
            is_current: location_pathname == href,
            is_partially_current: location_pathname.starts_with(href),
            href: href.to_string(),
            location: location_pathname.to_string(),
        }
    }
}

/// Attributes applied on top of the base props while the link is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveProps {
    pub class_name: Option<String>,
    pub style: Style,
    pub attributes: Attributes,
}

pub(crate) fn default_active_props(
    info: &MatchInfo,
    class_name: Option<&str>,
    active_class_name: Option<&str>,
    style: &Style,
    active_style: &Style,
) -> Option<ActiveProps> {
    if !info.is_current {
        return None;
    }
    let classes: Vec<&str> = [class_name, active_class_name]
        .into_iter()
        .flatten()
        .filter(|class| !class.is_empty())
        .collect();
    let mut merged_style = style.clone();
    merged_style.extend(
        active_style
            .iter()
            .map(|(property, value)| (property.clone(), value.clone())),
    );
    Some(ActiveProps {
        class_name: (!classes.is_empty()).then(|| classes.join(" ")),
        style: merged_style,
        attributes: Attributes::new(),
    })
}

/// Final attributes for the rendered anchor element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub class_name: Option<String>,
    pub style: Style,
    pub target: Option<String>,
    pub attributes: Attributes,
}

impl Anchor {
    /// Resolved active props replace the base class and style, and their
    /// attributes override same-named base attributes.
    pub(crate) fn apply(&mut self, active: ActiveProps) {
        if active.class_name.is_some() {
            self.class_name = active.class_name;
        }
        if !active.style.is_empty() {
            self.style = active.style;
        }
        self.attributes.extend(active.attributes);
    }
}
