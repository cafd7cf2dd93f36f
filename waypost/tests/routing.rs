mod common;

use common::{
    HOME, MAIN_STACK, ProfileScreen, Session, display_with_stack, login_factory, profile_router,
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use waypost::{
    ErrorKind, Outcome, PresentationMode, RouteRequest, RouteResult, Router, ScreenId,
    testing::{DisplayEvent, RecordingDisplay, RecordingErrorHook, TestScreen},
};

#[test]
fn test_profile_is_pushed_with_id() {
    let display = display_with_stack();
    let router = profile_router(display.clone());

    let outcome = router.route("myapp://profile?id=42", None, None).unwrap();
    assert_eq!(outcome, Outcome::Pushed { stack: MAIN_STACK });

    let events = display.take_events();
    assert_eq!(events.len(), 1);
    match &events[0] {
        DisplayEvent::Pushed {
            stack,
            component,
            animated,
        } => {
            assert_eq!(*stack, MAIN_STACK);
            assert!(*animated);
            let profile = component.downcast_ref::<ProfileScreen>().unwrap();
            assert_eq!(profile.id.as_deref(), Some("42"));
        }
        other => panic!("expected a push, got {other:?}"),
    }
}

#[test]
fn test_bare_url_gets_scheme() {
    let display = display_with_stack();
    let router = profile_router(display.clone());

    router.route("profile?id=7", None, None).unwrap();
    let events = display.take_events();
    let profile = events[0].component().downcast_ref::<ProfileScreen>().unwrap();
    assert_eq!(profile.id.as_deref(), Some("7"));
}

#[test]
fn test_no_back_stack_is_reported_once() {
    let display = Arc::new(RecordingDisplay::new().with_active(HOME));
    let errors = RecordingErrorHook::new();
    let router = profile_router(display.clone());
    router.configure_global_error_handler(errors.clone());

    let err = router.route("myapp://profile?id=42", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPushBase);
    assert_eq!(err.url(), "myapp://profile?id=42");
    assert_eq!(
        errors.errors(),
        vec![(ErrorKind::NoPushBase, "myapp://profile?id=42".to_string())]
    );
    assert_eq!(display.event_count(), 0);
}

#[test]
fn test_unknown_url_is_reported_once() {
    let errors = RecordingErrorHook::new();
    let router = profile_router(display_with_stack());
    router.configure_global_error_handler(errors.clone());

    let err = router.route("myapp://unknown", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatchPattern);
    assert_eq!(errors.count(), 1);
    assert_eq!(errors.errors()[0].1, "myapp://unknown");
    assert_eq!(err.to_string(), "no route registered for url: myapp://unknown");
}

#[test]
fn test_no_active_screen_for_present() {
    let errors = RecordingErrorHook::new();
    let router = Router::builder(Arc::new(RecordingDisplay::new()))
        .scheme("myapp")
        .error_handler(errors.clone())
        .build();
    router.register_shared("login", login_factory());

    let err = router.route("login", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPresentBase);
    assert_eq!(errors.count(), 1);
}

#[test]
fn test_action_runs_in_place() {
    let display = display_with_stack();
    let router = profile_router(display.clone());
    let signed_out = Arc::new(AtomicBool::new(false));
    let flag = signed_out.clone();
    router.register_fn("logout", move |_, _| {
        let flag = flag.clone();
        RouteResult::action(move || flag.store(true, Ordering::SeqCst))
    });

    let outcome = router.route("myapp://logout", None, None).unwrap();
    assert_eq!(outcome, Outcome::Performed);
    assert!(signed_out.load(Ordering::SeqCst));
    assert_eq!(display.event_count(), 0);
}

#[test]
fn test_context_reaches_factory() {
    let display = display_with_stack();
    let router = profile_router(display.clone());

    let request = RouteRequest::new("profile?id=1").context(Session::signed_in("ada"));
    router.route_request(request).unwrap();

    let events = display.take_events();
    let profile = events[0].component().downcast_ref::<ProfileScreen>().unwrap();
    assert_eq!(profile.viewer.as_deref(), Some("ada"));
}

#[test]
fn test_caller_mode_overrides_preference() {
    let display = display_with_stack();
    let router = profile_router(display.clone());
    router.register_shared("login", login_factory());

    let outcome = router.push("login", None, None, false).unwrap();
    assert_eq!(outcome, Outcome::Pushed { stack: MAIN_STACK });

    let outcome = router
        .route("profile", None, Some(PresentationMode::present()))
        .unwrap();
    assert_eq!(outcome, Outcome::Presented { from: HOME });

    let events = display.take_events();
    assert!(matches!(events[0], DisplayEvent::Pushed { animated: false, .. }));
    assert!(events[0].component().is::<TestScreen>());
    assert!(matches!(events[1], DisplayEvent::Presented { from: ScreenId(1), .. }));
}

#[test]
fn test_resolve_does_not_dispatch() {
    let display = display_with_stack();
    let router = profile_router(display.clone());

    let resolution = router.resolve("profile?id=3&tab=posts", None).unwrap();
    assert_eq!(resolution.url, "myapp://profile?id=3&tab=posts");
    assert_eq!(resolution.pattern.as_str(), "myapp://profile");
    let params = resolution.params.unwrap();
    assert_eq!(params.get("tab"), Some("posts"));
    assert!(!resolution.result.is_action());
    assert_eq!(display.event_count(), 0);
}

#[test]
fn test_factory_rejection_surfaces_source() {
    let errors = RecordingErrorHook::new();
    let router = profile_router(display_with_stack());
    router.configure_global_error_handler(errors.clone());
    router.register(
        "order",
        waypost::TryFnFactory::new("order", |params, _| match params.and_then(|p| p.get("id")) {
            Some(_) => Ok(RouteResult::action(|| {})),
            None => Err("order id is required".into()),
        }),
    );

    let err = router.route("order", None, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Rejected);
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("order id is required"));
    assert_eq!(errors.count(), 1);
}
