/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Pointer events delivered to a link and the intercept decision for clicks.

/// Primary (usually left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub button: i16,
    pub meta_key: bool,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    default_prevented: bool,
}

impl ClickEvent {
    /// Unmodified primary-button click.
    pub fn primary() -> Self {
        Self::default()
    }

    pub fn with_button(mut self, button: i16) -> Self {
        self.button = button;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    fn has_modifier(&self) -> bool {
        self.meta_key || self.alt_key || self.ctrl_key || self.shift_key
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseEvent {
    pub client_x: f64,
    pub client_y: f64,
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeReason {
    SecondaryButton,
    ExplicitTarget,
    DefaultPrevented,
    ModifierKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Default prevented and navigation dispatched to the router.
    Intercepted { path: String },
    Native(NativeReason),
}

impl ClickOutcome {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercepted { .. })
    }
}

/// Must run after the caller's own click handler so that handler can veto
/// interception with `prevent_default`.
pub fn classify_click(event: &ClickEvent, target: Option<&str>) -> Result<(), NativeReason> {
    if event.button != PRIMARY_BUTTON {
        return Err(NativeReason::SecondaryButton);
    }
    if target.is_some_and(|target| !target.is_empty()) {
        return Err(NativeReason::ExplicitTarget);
    }
    if event.default_prevented() {
        return Err(NativeReason::DefaultPrevented);
    }
    if event.has_modifier() {
        return Err(NativeReason::ModifierKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prevented() -> ClickEvent {
        let mut event = ClickEvent::primary();
        event.prevent_default();
        event
    }

    #[rstest]
    #[case(ClickEvent::primary(), None, Ok(()))]
    #[case(ClickEvent::primary().with_button(1), None, Err(NativeReason::SecondaryButton))]
    #[case(ClickEvent::primary().with_button(2), None, Err(NativeReason::SecondaryButton))]
    #[case(ClickEvent::primary(), Some("_blank"), Err(NativeReason::ExplicitTarget))]
    #[case(ClickEvent::primary(), Some(""), Ok(()))]
    #[case(prevented(), None, Err(NativeReason::DefaultPrevented))]
    #[case(ClickEvent::primary().with_meta(), None, Err(NativeReason::ModifierKey))]
    #[case(ClickEvent::primary().with_alt(), None, Err(NativeReason::ModifierKey))]
    #[case(ClickEvent::primary().with_ctrl(), None, Err(NativeReason::ModifierKey))]
    #[case(ClickEvent::primary().with_shift(), None, Err(NativeReason::ModifierKey))]
    fn classify_click_matrix(
        #[case] event: ClickEvent,
        #[case] target: Option<&str>,
        #[case] expected: Result<(), NativeReason>,
    ) {
        assert_eq!(classify_click(&event, target), expected);
    }
}
