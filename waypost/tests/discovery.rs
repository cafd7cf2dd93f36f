mod common;

use common::{ProfileFactory, display_with_stack};
use std::sync::Arc;
use waypost::{
    Router,
    discovery::{Discovery, MemoryStore, PersistentStore, StaticSource, TYPES_KEY, VERSION_KEY},
    testing::CountingFactory,
};

fn router() -> Router {
    Router::builder(display_with_stack()).scheme("myapp").build()
}

fn source() -> StaticSource {
    StaticSource::new()
        .with("app::ProfileFactory", "profile", Arc::new(ProfileFactory))
        .with("app::Home", "home", Arc::new(CountingFactory::new("Home")))
}

#[test]
fn test_second_launch_uses_cache() {
    let store = Arc::new(MemoryStore::new());

    let first = Discovery::new(source(), store.clone());
    let report = first.auto_register_all(&router(), "2.3.0");
    assert!(!report.from_cache);
    assert_eq!(store.get_string(VERSION_KEY).as_deref(), Some("2.3.0"));

    // A fresh process with the same persisted store.
    let second = Discovery::new(source(), store.clone());
    let router = router();
    let report = second.auto_register_all(&router, "2.3.0");
    assert!(report.from_cache);
    assert_eq!(report.registered, 2);
    assert_eq!(second.source().scans(), 0);
    assert!(router.route("profile?id=1", None, None).is_ok());
}

#[test]
fn test_upgrade_rescans_and_rewrites() {
    let store = Arc::new(MemoryStore::new());
    store.set_string(VERSION_KEY, "1.0.0");
    store.set_list(TYPES_KEY, &["app::Removed".to_string()]);

    let discovery = Discovery::new(source(), store.clone());
    let router = router();
    let report = discovery.auto_register_all(&router, "1.1.0");

    assert!(!report.from_cache);
    assert!(router.contains("home"));
    assert_eq!(
        store.get_list(TYPES_KEY),
        Some(vec!["app::ProfileFactory".to_string(), "app::Home".to_string()])
    );
}

#[test]
fn test_empty_cached_list_rescans() {
    let store = Arc::new(MemoryStore::new());
    store.set_string(VERSION_KEY, "1.0.0");
    store.set_list(TYPES_KEY, &[]);

    let discovery = Discovery::new(source(), store);
    let report = discovery.auto_register_all(&router(), "1.0.0");
    assert!(!report.from_cache);
    assert_eq!(discovery.source().scans(), 1);
}

#[cfg(all(feature = "macros", feature = "inventory"))]
mod collected {
    use super::router;
    use waypost::{
        BoxError, ComponentFactory, Context, Parameters, RouteResult,
        discovery::{Discovery, InventorySource, MemoryStore},
        testing::TestScreen,
    };

    #[waypost::routable("settings")]
    #[derive(Default)]
    struct SettingsFactory;

    impl ComponentFactory for SettingsFactory {
        fn build(
            &self,
            _params: Option<&Parameters>,
            _ctx: Option<&Context>,
        ) -> Result<RouteResult, BoxError> {
            Ok(RouteResult::component(TestScreen::new("Settings")))
        }
    }

    #[waypost::routable(pattern = "help/faq")]
    #[derive(Default)]
    struct FaqFactory;

    impl ComponentFactory for FaqFactory {
        fn build(
            &self,
            _params: Option<&Parameters>,
            _ctx: Option<&Context>,
        ) -> Result<RouteResult, BoxError> {
            Ok(RouteResult::action(|| {}))
        }
    }

    #[test]
    fn test_routable_types_are_discovered() {
        assert_eq!(SettingsFactory::ROUTE_PATTERN, "settings");
        assert_eq!(FaqFactory::ROUTE_PATTERN, "help/faq");

        let discovery = Discovery::new(InventorySource, MemoryStore::new());
        let first = router();
        let report = discovery.auto_register_all(&first, "1.0.0");
        assert!(!report.from_cache);
        assert!(first.contains("settings"));
        assert!(first.contains("help/faq"));
        assert!(first.route("help/faq", None, None).is_ok());

        let again = router();
        let report = discovery.auto_register_all(&again, "1.0.0");
        assert!(report.from_cache);
        assert!(again.contains("settings"));
    }
}
