#![allow(dead_code)]

use std::sync::Arc;
use waypost::{
    BoxError, Component, ComponentFactory, Context, Parameters, PresentationMode, RouteResult,
    Router, ScreenId, ScreenTree, StackId, testing::RecordingDisplay,
};

// ============================================================================
// Test Screens
// ============================================================================

#[derive(Debug, Default)]
pub struct ProfileScreen {
    pub id: Option<String>,
    pub viewer: Option<String>,
}

impl Component for ProfileScreen {
    fn name(&self) -> &str {
        "ProfileScreen"
    }
}

#[derive(Debug)]
pub struct NotFoundScreen {
    pub url: String,
}

impl Component for NotFoundScreen {
    fn name(&self) -> &str {
        "NotFoundScreen"
    }
}

// ============================================================================
// Test Factories
// ============================================================================

/// Builds a [`ProfileScreen`] from `id` and an optional `Session` context.
#[derive(Default)]
pub struct ProfileFactory;

impl ComponentFactory for ProfileFactory {
    fn build(
        &self,
        params: Option<&Parameters>,
        ctx: Option<&Context>,
    ) -> Result<RouteResult, BoxError> {
        Ok(RouteResult::component(ProfileScreen {
            id: params.and_then(|p| p.get("id")).map(str::to_string),
            viewer: ctx
                .and_then(|c| c.downcast_ref::<Session>())
                .map(|s| s.user.clone()),
        }))
    }

    fn name(&self) -> &str {
        "ProfileFactory"
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub signed_in: bool,
}

impl Session {
    pub fn signed_in(user: &str) -> Context {
        Context::new(Session {
            user: user.to_string(),
            signed_in: true,
        })
    }

    pub fn guest() -> Context {
        Context::new(Session {
            user: "guest".to_string(),
            signed_in: false,
        })
    }
}

pub fn login_factory() -> Arc<dyn ComponentFactory> {
    waypost::factory_fn(|_, _| {
        RouteResult::component_with(
            waypost::testing::TestScreen::new("Login"),
            PresentationMode::present(),
        )
    })
}

// ============================================================================
// Fixtures
// ============================================================================

pub const HOME: ScreenId = ScreenId(1);
pub const MAIN_STACK: StackId = StackId(100);

/// A recording display whose active screen sits in a back-stack.
pub fn display_with_stack() -> Arc<RecordingDisplay> {
    Arc::new(
        RecordingDisplay::new()
            .with_active(HOME)
            .with_stack(HOME, MAIN_STACK),
    )
}

/// A router with the `myapp` scheme and `profile` registered.
pub fn profile_router(display: Arc<dyn waypost::Display>) -> Router {
    let router = Router::builder(display).scheme("myapp").build();
    router.register("profile", ProfileFactory);
    router
}

pub struct TabbedApp {
    pub tree: Arc<ScreenTree>,
    pub feed: ScreenId,
    pub feed_nav: ScreenId,
    pub settings: ScreenId,
    pub tabs: ScreenId,
}

/// Tabs → [navigation(Feed), Settings], feed tab selected.
pub fn tabbed_app() -> TabbedApp {
    let tree = Arc::new(ScreenTree::new());
    let feed = tree.screen("Feed");
    let feed_nav = tree.navigation("FeedNav", &[feed]);
    let settings = tree.screen("Settings");
    let tabs = tree.tabs("Tabs", &[feed_nav, settings], 0);
    tree.set_root(tabs);
    TabbedApp {
        tree,
        feed,
        feed_nav,
        settings,
        tabs,
    }
}
