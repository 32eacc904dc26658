/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The link component.
//!
//! A [`Link`] wraps one anchor element. Hosts drive it through the usual
//! component lifecycle:
//!
//! - [`Link::render`] yields the props for the router's link primitive,
//! - [`Link::handle_ref`] receives the mounted element (or `None` on detach),
//! - [`Link::mount`] / [`Link::update`] / [`Link::unmount`] follow the
//!   component's lifetime,
//! - [`Link::on_click`] / [`Link::on_mouse_enter`] forward pointer events.
//!
//! Prefetching is delegated to a [`Prefetcher`] whose strategy is fixed when
//! the link is created.

pub mod active;
pub mod click;
pub mod external;

use std::rc::Rc;

use log::debug;

use crate::config::LinkConfig;
use crate::diagnostics::{DiagnosticEvent, emit_event};
use crate::navigation::Navigator;
use crate::path::parse_path;
use crate::prefetch::{ObservationHandle, PrefetchStrategy, Prefetcher, WatcherCapability};
use crate::services::{Loader, NavigateOptions, Router, ViewportObservation};

pub use active::{ActiveProps, Anchor, Attributes, MatchInfo, Style};
pub use click::{ClickEvent, ClickOutcome, MouseEvent, NativeReason, classify_click};
pub use external::{LinkTarget, classify_link_target, warn_if_external};

pub type RefCallback<E> = Rc<dyn Fn(Option<&E>)>;
pub type ClickHandler = Rc<dyn Fn(&mut ClickEvent)>;
pub type MouseEnterHandler = Rc<dyn Fn(&MouseEvent)>;
pub type ActivePropsResolver = Rc<dyn Fn(&MatchInfo) -> Option<ActiveProps>>;

/// Collaborators shared by every link in an application.
pub struct LinkContext<E> {
    pub router: Rc<dyn Router>,
    pub loader: Rc<dyn Loader>,
    /// `None` when the runtime cannot observe element visibility.
    pub observation: Option<Rc<dyn ViewportObservation<E>>>,
    pub config: LinkConfig,
}

impl<E> LinkContext<E> {
    pub fn new(router: Rc<dyn Router>, loader: Rc<dyn Loader>, config: LinkConfig) -> Self {
        Self {
            router,
            loader,
            observation: None,
            config,
        }
    }

    pub fn with_observation(mut self, observation: Rc<dyn ViewportObservation<E>>) -> Self {
        self.observation = Some(observation);
        self
    }
}

impl<E> Clone for LinkContext<E> {
    fn clone(&self) -> Self {
        Self {
            router: Rc::clone(&self.router),
            loader: Rc::clone(&self.loader),
            observation: self.observation.clone(),
            config: self.config.clone(),
        }
    }
}

/// Configuration of one link instance.
pub struct LinkDescriptor<E> {
    pub to: String,
    pub state: Option<serde_json::Value>,
    pub replace: bool,
    pub class_name: Option<String>,
    pub style: Style,
    pub active_class_name: Option<String>,
    pub active_style: Style,
    pub target: Option<String>,
    pub attributes: Attributes,
    pub inner_ref: Option<RefCallback<E>>,
    pub on_click: Option<ClickHandler>,
    pub on_mouse_enter: Option<MouseEnterHandler>,
    pub get_props: Option<ActivePropsResolver>,
}

impl<E> LinkDescriptor<E> {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            state: None,
            replace: false,
            class_name: None,
            style: Style::new(),
            active_class_name: None,
            active_style: Style::new(),
            target: None,
            attributes: Attributes::new(),
            inner_ref: None,
            on_click: None,
            on_mouse_enter: None,
            get_props: None,
        }
    }

    pub fn state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn active_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.active_class_name = Some(class_name.into());
        self
    }

    pub fn active_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.active_style.insert(property.into(), value.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn inner_ref(mut self, callback: impl Fn(Option<&E>) + 'static) -> Self {
        self.inner_ref = Some(Rc::new(callback));
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&mut ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn on_mouse_enter(mut self, handler: impl Fn(&MouseEvent) + 'static) -> Self {
        self.on_mouse_enter = Some(Rc::new(handler));
        self
    }

    pub fn get_props(
        mut self,
        resolver: impl Fn(&MatchInfo) -> Option<ActiveProps> + 'static,
    ) -> Self {
        self.get_props = Some(Rc::new(resolver));
        self
    }

    /// The `target` the anchor ends up with, whether set directly or through
    /// the pass-through attributes.
    fn rendered_target(&self) -> Option<&str> {
        self.target
            .as_deref()
            .or_else(|| self.attributes.get("target").map(String::as_str))
    }

    fn navigate_options(&self) -> NavigateOptions {
        NavigateOptions {
            state: self.state.clone(),
            replace: self.replace,
        }
    }
}

impl<E> Clone for LinkDescriptor<E> {
    fn clone(&self) -> Self {
        Self {
            to: self.to.clone(),
            state: self.state.clone(),
            replace: self.replace,
            class_name: self.class_name.clone(),
            style: self.style.clone(),
            active_class_name: self.active_class_name.clone(),
            active_style: self.active_style.clone(),
            target: self.target.clone(),
            attributes: self.attributes.clone(),
            inner_ref: self.inner_ref.clone(),
            on_click: self.on_click.clone(),
            on_mouse_enter: self.on_mouse_enter.clone(),
            get_props: self.get_props.clone(),
        }
    }
}

/// Props handed to the router's link-rendering primitive. Active-state
/// attributes are resolved separately through [`Link::get_props`].
#[derive(Debug, Clone, PartialEq)]
pub struct LinkProps {
    /// Destination with the path prefix applied.
    pub to: String,
    pub state: Option<serde_json::Value>,
    pub class_name: Option<String>,
    pub style: Style,
    pub target: Option<String>,
    pub attributes: Attributes,
}

pub struct Link<E> {
    descriptor: LinkDescriptor<E>,
    navigator: Navigator,
    loader: Rc<dyn Loader>,
    router: Rc<dyn Router>,
    prefetcher: Prefetcher<E>,
    external_link_warnings: bool,
}

impl<E: PartialEq + 'static> Link<E> {
    pub fn new(descriptor: LinkDescriptor<E>, context: &LinkContext<E>) -> Self {
        let strategy = PrefetchStrategy::select(context.observation.clone());
        let prefetcher = Prefetcher::new(strategy, Rc::clone(&context.loader), &descriptor.to);
        Self {
            navigator: Navigator::new(Rc::clone(&context.router), &context.config),
            loader: Rc::clone(&context.loader),
            router: Rc::clone(&context.router),
            prefetcher,
            external_link_warnings: context.config.external_link_warnings,
            descriptor,
        }
    }

    pub fn capability(&self) -> WatcherCapability {
        self.prefetcher.capability()
    }

    pub fn observation(&self) -> Option<&ObservationHandle<E>> {
        self.prefetcher.observation()
    }

    pub fn mount(&mut self) {
        self.prefetcher.mount();
    }

    /// Replace the descriptor. Only a change of destination can trigger a
    /// prefetch, and only without viewport observation.
    pub fn update(&mut self, descriptor: LinkDescriptor<E>) {
        self.descriptor = descriptor;
        self.prefetcher.destination_changed(&self.descriptor.to);
    }

    /// Element ref callback; forwards to the caller's ref first.
    pub fn handle_ref(&mut self, element: Option<E>) {
        if let Some(inner_ref) = &self.descriptor.inner_ref {
            inner_ref(element.as_ref());
        }
        self.prefetcher.attach(element);
    }

    pub fn unmount(&mut self) {
        self.prefetcher.release();
    }

    pub fn render(&self) -> LinkProps {
        if self.external_link_warnings {
            external::warn_if_external(&self.descriptor.to, self.router.location().as_ref());
        }
        LinkProps {
            to: self.navigator.with_prefix(&self.descriptor.to),
            state: self.descriptor.state.clone(),
            class_name: self.descriptor.class_name.clone(),
            style: self.descriptor.style.clone(),
            target: self.descriptor.target.clone(),
            attributes: self.descriptor.attributes.clone(),
        }
    }

    /// Active-props resolver: the caller's `get_props` if given, otherwise
    /// class and style merging for the current location.
    pub fn get_props(&self, info: &MatchInfo) -> Option<ActiveProps> {
        match &self.descriptor.get_props {
            Some(resolver) => resolver(info),
            None => active::default_active_props(
                info,
                self.descriptor.class_name.as_deref(),
                self.descriptor.active_class_name.as_deref(),
                &self.descriptor.style,
                &self.descriptor.active_style,
            ),
        }
    }

    /// Render and resolve active props against `location_pathname` in one step.
    pub fn anchor(&self, location_pathname: &str) -> Anchor {
        let props = self.render();
        let info = MatchInfo::resolve(&props.to, location_pathname);
        let mut anchor = Anchor {
            href: props.to,
            class_name: props.class_name,
            style: props.style,
            target: props.target,
            attributes: props.attributes,
        };
        if let Some(active) = self.get_props(&info) {
            anchor.apply(active);
        }
        anchor
    }

    pub fn on_click(&self, event: &mut ClickEvent) -> ClickOutcome {
        if let Some(on_click) = &self.descriptor.on_click {
            on_click(event);
        }

        let outcome = match classify_click(event, self.descriptor.rendered_target()) {
            Ok(()) => {
                event.prevent_default();
                self.navigator
                    .navigate(&self.descriptor.to, &self.descriptor.navigate_options());
                ClickOutcome::Intercepted {
                    path: self.navigator.with_prefix(&self.descriptor.to),
                }
            },
            Err(reason) => {
                debug!("Leaving click on {} to the browser: {reason:?}", self.descriptor.to);
                ClickOutcome::Native(reason)
            },
        };
        emit_event(DiagnosticEvent::ClickDecided {
            to: self.descriptor.to.clone(),
            intercepted: outcome.is_intercepted(),
        });
        outcome
    }

    pub fn on_mouse_enter(&self, event: &MouseEvent) {
        if let Some(on_mouse_enter) = &self.descriptor.on_mouse_enter {
            on_mouse_enter(event);
        }
        let pathname = parse_path(&self.descriptor.to).pathname;
        emit_event(DiagnosticEvent::HoverSignaled {
            pathname: pathname.clone(),
        });
        self.loader.hovering(&pathname);
    }
}
