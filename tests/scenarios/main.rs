use std::cell::RefCell;
use std::rc::Rc;

use prefetch_link::VERSION;
use prefetch_link::link::NativeReason;
use prefetch_link::test_utils::{
    FakeViewport, RecordingLoader, RecordingRouter, RouterCall, TestElement,
};
use prefetch_link::{
    ClickEvent, ClickOutcome, Link, LinkConfig, LinkContext, LinkDescriptor, Loader, LoaderSignal,
    MouseEvent, NavigateOptions, Navigator, WatcherCapability,
};

struct Scenario {
    router: Rc<RecordingRouter>,
    loader: Rc<RecordingLoader>,
    viewport: FakeViewport,
    context: LinkContext<TestElement>,
}

impl Scenario {
    fn new(prefix: &str, observe: bool) -> Self {
        let router = RecordingRouter::new();
        let loader = RecordingLoader::new();
        let viewport = FakeViewport::new();
        let mut context: LinkContext<TestElement> = LinkContext::new(
            router.clone(),
            loader.clone(),
            LinkConfig::with_path_prefix(prefix),
        );
        if observe {
            context = context.with_observation(Rc::new(viewport.clone()));
        }
        Self {
            router,
            loader,
            viewport,
            context,
        }
    }

    fn mounted(&self, descriptor: LinkDescriptor<TestElement>, element: u32) -> Link<TestElement> {
        let mut link = Link::new(descriptor, &self.context);
        link.render();
        link.handle_ref(Some(TestElement(element)));
        link.mount();
        link
    }
}

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}

#[test]
fn list_of_links_prefetches_only_what_scrolls_into_view() {
    let scenario = Scenario::new("/blog", true);
    let links: Vec<_> = (0..4)
        .map(|i| scenario.mounted(LinkDescriptor::new(format!("/post/{i}")), i))
        .collect();
    assert!(links.iter().all(|link| link.capability() == WatcherCapability::Supported));
    assert!(scenario.loader.enqueued().is_empty());

    scenario.viewport.intersect(TestElement(1), true, 0.6);
    scenario.viewport.intersect(TestElement(3), false, 0.01);
    scenario.viewport.intersect(TestElement(2), false, 0.0);
    scenario.viewport.intersect(TestElement(1), true, 1.0);

    assert_eq!(
        scenario.loader.enqueued(),
        vec!["/post/1".to_string(), "/post/3".to_string()]
    );
    assert_eq!(scenario.viewport.live_observers(), 2);
}

#[test]
fn unmounting_after_prefetch_leaves_no_observers() {
    let scenario = Scenario::new("", true);
    let mut link = scenario.mounted(LinkDescriptor::new("/a"), 1);

    scenario.viewport.intersect(TestElement(1), true, 1.0);
    link.unmount();
    drop(link);

    assert_eq!(scenario.loader.enqueued(), vec!["/a".to_string()]);
    assert_eq!(scenario.viewport.live_observers(), 0);
}

#[test]
fn runtime_without_observation_prefetches_eagerly() {
    let scenario = Scenario::new("", false);
    let mut link = scenario.mounted(LinkDescriptor::new("/a"), 1);

    link.update(LinkDescriptor::new("/b"));
    link.update(LinkDescriptor::new("/b").attribute("title", "B"));

    assert_eq!(link.capability(), WatcherCapability::Unsupported);
    assert_eq!(
        scenario.loader.enqueued(),
        vec!["/a".to_string(), "/b".to_string()]
    );
}

#[test]
fn click_then_hover_round_trip() {
    let scenario = Scenario::new("/docs/", true);
    let link = scenario.mounted(LinkDescriptor::new("/guide?step=2"), 1);

    link.on_mouse_enter(&MouseEvent::default());
    let native = link.on_click(&mut ClickEvent::primary().with_shift());
    let intercepted = link.on_click(&mut ClickEvent::primary());

    assert_eq!(scenario.loader.hovered(), vec!["/guide".to_string()]);
    assert_eq!(native, ClickOutcome::Native(NativeReason::ModifierKey));
    assert_eq!(
        intercepted,
        ClickOutcome::Intercepted {
            path: "/docs/guide?step=2".to_string()
        }
    );
    assert_eq!(
        scenario.router.calls(),
        vec![RouterCall::Navigate {
            path: "/docs/guide?step=2".to_string(),
            options: NavigateOptions::default(),
        }]
    );
}

fn closure_loader(loader: impl Fn(LoaderSignal<'_>) + 'static) -> Rc<dyn Loader> {
    Rc::new(loader)
}

#[test]
fn closure_loader_hears_prefetch_and_hover_from_one_link() {
    let signals = Rc::new(RefCell::new(Vec::new()));
    let loader = closure_loader({
        let signals = Rc::clone(&signals);
        move |signal| {
            let line = match signal {
                LoaderSignal::Enqueue(pathname) => format!("enqueue {pathname}"),
                LoaderSignal::Hovering(pathname) => format!("hover {pathname}"),
            };
            signals.borrow_mut().push(line);
        }
    });
    let viewport = FakeViewport::new();
    let context: LinkContext<TestElement> =
        LinkContext::new(RecordingRouter::new(), loader, LinkConfig::with_path_prefix("/shop"))
            .with_observation(Rc::new(viewport.clone()));
    let mut link = Link::new(LinkDescriptor::new("/cart?step=1"), &context);

    link.handle_ref(Some(TestElement(5)));
    link.mount();
    viewport.intersect(TestElement(5), true, 1.0);
    link.on_mouse_enter(&MouseEvent::default());

    assert_eq!(
        *signals.borrow(),
        vec!["enqueue /cart".to_string(), "hover /cart".to_string()]
    );
}

#[test]
#[allow(deprecated)]
fn deprecated_helpers_share_prefix_handling_with_navigate() {
    let scenario = Scenario::new("/app", false);
    let navigator = Navigator::new(scenario.router.clone(), &scenario.context.config);

    navigator.navigate("/x", &NavigateOptions::replace());
    navigator.replace("/x");
    navigator.push("/y");
    navigator.navigate_to("/y");

    assert_eq!(
        scenario.router.calls(),
        vec![
            RouterCall::Navigate {
                path: "/app/x".to_string(),
                options: NavigateOptions::replace(),
            },
            RouterCall::Replace("/app/x".to_string()),
            RouterCall::Push("/app/y".to_string()),
            RouterCall::Push("/app/y".to_string()),
        ]
    );
}
