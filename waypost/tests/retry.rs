mod common;

use common::{ProfileFactory, tabbed_app};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use waypost::{
    Display, Outcome, Router, ScreenTree,
    schedule::ThreadScheduler,
    testing::{ManualScheduler, RecordingErrorHook},
};

#[test]
fn test_dismissing_modal_defers_push() {
    let app = tabbed_app();
    let scheduler = Arc::new(ManualScheduler::new());
    let errors = RecordingErrorHook::new();
    let router = Router::builder(app.tree.clone())
        .scheme("myapp")
        .scheduler(scheduler.clone())
        .error_handler(errors.clone())
        .build();
    router.register("profile", ProfileFactory);
    router.register_shared("login", common::login_factory());

    // Present a modal, then start dismissing it.
    router.route("login", None, None).unwrap();
    let modal = app.tree.active_screen().unwrap();
    assert_ne!(modal, app.feed);
    app.tree.set_dismissing(modal, true);

    let outcome = router.route("profile?id=9", None, None).unwrap();
    assert_eq!(outcome, Outcome::Deferred);
    assert_eq!(scheduler.delays(), vec![waypost::DEFAULT_RETRY_DELAY]);

    // The dismissal finishes before the retry fires.
    app.tree.dismiss(app.feed);
    assert_eq!(scheduler.run_pending(), 1);

    let stack = ScreenTree::stack(app.feed_nav);
    assert_eq!(app.tree.stack_len(stack), 2);
    assert_eq!(errors.count(), 0);
}

#[test]
fn test_retry_failure_is_not_reported() {
    let app = tabbed_app();
    let scheduler = Arc::new(ManualScheduler::new());
    let errors = RecordingErrorHook::new();
    let router = Router::builder(app.tree.clone())
        .scheduler(scheduler.clone())
        .error_handler(errors.clone())
        .build();
    router.register("profile", ProfileFactory);

    app.tree.set_dismissing(app.feed_nav, true);
    assert_eq!(router.route("profile", None, None).unwrap(), Outcome::Deferred);

    // By retry time the settings tab (no back-stack) is active.
    app.tree.select_tab(app.tabs, 1);
    scheduler.run_pending();

    assert_eq!(app.tree.active_screen(), Some(app.settings));
    assert_eq!(app.tree.stack_len(ScreenTree::stack(app.feed_nav)), 1);
    assert_eq!(errors.count(), 0);
}

#[test]
fn test_thread_scheduler_retries_later() {
    let app = tabbed_app();
    let router = Router::builder(app.tree.clone())
        .scheduler(ThreadScheduler)
        .retry_delay(Duration::from_millis(20))
        .build();
    router.register("profile", ProfileFactory);

    app.tree.set_dismissing(app.feed_nav, true);
    assert_eq!(router.route("profile", None, None).unwrap(), Outcome::Deferred);
    app.tree.set_dismissing(app.feed_nav, false);

    let stack = ScreenTree::stack(app.feed_nav);
    let deadline = Instant::now() + Duration::from_secs(5);
    while app.tree.stack_len(stack) < 2 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(app.tree.stack_len(stack), 2);
}

#[cfg(feature = "tokio")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_scheduler_retries_later() {
    use waypost::schedule::TokioScheduler;

    let app = tabbed_app();
    let router = Router::builder(app.tree.clone())
        .scheduler(TokioScheduler::current().unwrap())
        .retry_delay(Duration::from_millis(20))
        .build();
    router.register("profile", ProfileFactory);

    app.tree.set_dismissing(app.feed_nav, true);
    assert_eq!(router.route("profile", None, None).unwrap(), Outcome::Deferred);
    app.tree.set_dismissing(app.feed_nav, false);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(app.tree.stack_len(ScreenTree::stack(app.feed_nav)), 2);
}
