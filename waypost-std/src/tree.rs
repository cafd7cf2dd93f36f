//! An in-memory [`Display`] modelled on a container-based navigation host.
//!
//! Screens form a tree of plain screens and three kinds of container:
//! navigation stacks, split views and tab bars. Any node may additionally
//! present one node modally. The active screen is found by walking from the
//! root:
//!
//! 1. a node presenting something defers to what it presents
//! 2. a split view defers to its last child
//! 3. a navigation stack defers to its top child
//! 4. a tab bar defers to its selected child
//! 5. otherwise (or when a container is empty) the node itself is active
//!
//! A navigation node doubles as the back-stack: its [`StackId`] carries the
//! same number as its [`ScreenId`].

use parking_lot::Mutex;
use std::{any::Any, collections::HashMap};
use tracing::{debug, warn};
use waypost_core::{Action, BoxComponent, Component, Display, ScreenId, StackId, Wrapper};

/// A component that asks to be shown inside a new navigation stack.
///
/// Presenting one through a [`ScreenTree`] creates a navigation node with the
/// content as its only child.
#[derive(Debug)]
pub struct NavigationContainer {
    content: Option<BoxComponent>,
}

impl NavigationContainer {
    /// Embed `content`.
    pub fn new(content: BoxComponent) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// A [`Wrapper`] that embeds presented components in a navigation stack.
    pub fn wrapper() -> Wrapper {
        Wrapper::new(|content| -> BoxComponent { Box::new(NavigationContainer::new(content)) })
    }

    /// The embedded component.
    pub fn content(&self) -> Option<&dyn Component> {
        self.content.as_deref()
    }
}

impl Component for NavigationContainer {
    fn name(&self) -> &str {
        "NavigationContainer"
    }
}

#[derive(Debug)]
enum Kind {
    Screen,
    Navigation(Vec<ScreenId>),
    Split(Vec<ScreenId>),
    Tabs { children: Vec<ScreenId>, selected: usize },
}

#[derive(Debug)]
struct Node {
    name: String,
    kind: Kind,
    parent: Option<ScreenId>,
    presented: Option<ScreenId>,
    component: Option<BoxComponent>,
    dismissing: bool,
}

impl Node {
    fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: None,
            presented: None,
            component: None,
            dismissing: false,
        }
    }
}

#[derive(Debug, Default)]
struct Tree {
    nodes: HashMap<ScreenId, Node>,
    root: Option<ScreenId>,
    next_id: u64,
}

impl Tree {
    fn insert(&mut self, node: Node) -> ScreenId {
        self.next_id += 1;
        let id = ScreenId(self.next_id);
        self.nodes.insert(id, node);
        id
    }

    /// Insert a container over the existing nodes among `children`.
    ///
    /// Unknown ids are dropped, so a container only ever points at older
    /// nodes and the tree stays acyclic.
    fn insert_container(
        &mut self,
        name: &str,
        children: &[ScreenId],
        kind: impl FnOnce(Vec<ScreenId>) -> Kind,
    ) -> ScreenId {
        let (known, unknown): (Vec<ScreenId>, Vec<ScreenId>) = children
            .iter()
            .copied()
            .partition(|child| self.nodes.contains_key(child));
        if !unknown.is_empty() {
            warn!(container = name, ?unknown, "ignoring unknown children");
        }
        let id = self.insert(Node::new(name, kind(known.clone())));
        for child in &known {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = Some(id);
            }
        }
        id
    }

    fn top(&self, id: ScreenId) -> ScreenId {
        let Some(node) = self.nodes.get(&id) else {
            return id;
        };
        if let Some(presented) = node.presented {
            return self.top(presented);
        }
        let next = match &node.kind {
            Kind::Split(children) | Kind::Navigation(children) => children.last(),
            Kind::Tabs { children, selected } => children.get(*selected),
            Kind::Screen => None,
        };
        next.map_or(id, |child| self.top(*child))
    }

    fn navigation_of(&self, screen: ScreenId) -> Option<ScreenId> {
        let mut current = Some(screen);
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if matches!(node.kind, Kind::Navigation(_)) {
                return Some(id);
            }
            current = node.parent;
        }
        None
    }

    fn adopt(&mut self, mut component: BoxComponent) -> ScreenId {
        let content = component
            .downcast_mut::<NavigationContainer>()
            .and_then(|container| container.content.take());
        if let Some(content) = content {
            let child = self.adopt(content);
            return self.insert_container("NavigationContainer", &[child], Kind::Navigation);
        }
        let mut node = Node::new(component.name(), Kind::Screen);
        node.component = Some(component);
        self.insert(node)
    }

    fn remove_subtree(&mut self, id: ScreenId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(presented) = node.presented {
            self.remove_subtree(presented);
        }
        let children = match node.kind {
            Kind::Screen => Vec::new(),
            Kind::Navigation(children) | Kind::Split(children) => children,
            Kind::Tabs { children, .. } => children,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }
}

/// An in-memory screen hierarchy implementing [`Display`].
///
/// # Example
///
/// ```rust,ignore
/// let tree = Arc::new(ScreenTree::new());
/// let home = tree.screen("Home");
/// let nav = tree.navigation("Main", &[home]);
/// tree.set_root(nav);
///
/// let router = Router::new(tree.clone());
/// router.push("profile", None, None, true)?;
/// assert_eq!(tree.stack_len(ScreenTree::stack(nav)), 2);
/// ```
#[derive(Debug, Default)]
pub struct ScreenTree {
    tree: Mutex<Tree>,
}

impl ScreenTree {
    /// Create an empty tree. Without a root there is no active screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached plain screen.
    pub fn screen(&self, name: &str) -> ScreenId {
        self.tree.lock().insert(Node::new(name, Kind::Screen))
    }

    /// Add a navigation stack over `children`, bottom first.
    ///
    /// Here and in the other container constructors, ids that do not name an
    /// existing node are ignored.
    pub fn navigation(&self, name: &str, children: &[ScreenId]) -> ScreenId {
        self.tree
            .lock()
            .insert_container(name, children, Kind::Navigation)
    }

    /// Add a split view over `children`.
    pub fn split(&self, name: &str, children: &[ScreenId]) -> ScreenId {
        self.tree.lock().insert_container(name, children, Kind::Split)
    }

    /// Add a tab bar over `children` with `selected` chosen.
    pub fn tabs(&self, name: &str, children: &[ScreenId], selected: usize) -> ScreenId {
        self.tree
            .lock()
            .insert_container(name, children, |children| Kind::Tabs { children, selected })
    }

    /// Make `id` the root.
    pub fn set_root(&self, id: ScreenId) {
        self.tree.lock().root = Some(id);
    }

    /// Select a tab. Ignored for non-tab nodes.
    pub fn select_tab(&self, tabs: ScreenId, index: usize) {
        if let Some(Node {
            kind: Kind::Tabs { selected, .. },
            ..
        }) = self.tree.lock().nodes.get_mut(&tabs)
        {
            *selected = index;
        }
    }

    /// Mark `id` as being dismissed (or not).
    pub fn set_dismissing(&self, id: ScreenId, dismissing: bool) {
        if let Some(node) = self.tree.lock().nodes.get_mut(&id) {
            node.dismissing = dismissing;
        }
    }

    /// Dismiss whatever `presenter` presents, removing that subtree.
    pub fn dismiss(&self, presenter: ScreenId) {
        let mut tree = self.tree.lock();
        let presented = tree
            .nodes
            .get_mut(&presenter)
            .and_then(|node| node.presented.take());
        if let Some(presented) = presented {
            tree.remove_subtree(presented);
        }
    }

    /// The back-stack handle of a navigation node.
    pub fn stack(navigation: ScreenId) -> StackId {
        StackId(navigation.0)
    }

    /// Number of screens on `stack`; zero when it does not exist.
    pub fn stack_len(&self, stack: StackId) -> usize {
        match self.tree.lock().nodes.get(&ScreenId(stack.0)) {
            Some(Node {
                kind: Kind::Navigation(children),
                ..
            }) => children.len(),
            _ => 0,
        }
    }

    /// Name of a node.
    pub fn name(&self, id: ScreenId) -> Option<String> {
        self.tree.lock().nodes.get(&id).map(|node| node.name.clone())
    }

    /// What `id` presents, if anything.
    pub fn presented(&self, id: ScreenId) -> Option<ScreenId> {
        self.tree.lock().nodes.get(&id).and_then(|node| node.presented)
    }

    /// Inspect the component shown by `id` as a `T`.
    pub fn with_component<T: Any, R>(&self, id: ScreenId, f: impl FnOnce(&T) -> R) -> Option<R> {
        let tree = self.tree.lock();
        let component = tree.nodes.get(&id)?.component.as_deref()?;
        component.downcast_ref::<T>().map(f)
    }
}

impl Display for ScreenTree {
    fn active_screen(&self) -> Option<ScreenId> {
        let tree = self.tree.lock();
        tree.root.map(|root| tree.top(root))
    }

    fn back_stack(&self, screen: ScreenId) -> Option<StackId> {
        self.tree.lock().navigation_of(screen).map(ScreenTree::stack)
    }

    fn push(&self, stack: StackId, component: BoxComponent, animated: bool) {
        let mut tree = self.tree.lock();
        let navigation = ScreenId(stack.0);
        if !matches!(
            tree.nodes.get(&navigation),
            Some(Node {
                kind: Kind::Navigation(_),
                ..
            })
        ) {
            warn!(?stack, "push onto unknown back-stack; dropping component");
            return;
        }

        let child = tree.adopt(component);
        if let Some(node) = tree.nodes.get_mut(&child) {
            node.parent = Some(navigation);
        }
        if let Some(Node {
            kind: Kind::Navigation(children),
            ..
        }) = tree.nodes.get_mut(&navigation)
        {
            children.push(child);
        }
        debug!(?stack, ?child, animated, "pushed");
    }

    fn present(
        &self,
        from: ScreenId,
        component: BoxComponent,
        animated: bool,
        completion: Option<Action>,
    ) {
        {
            let mut tree = self.tree.lock();
            match tree.nodes.get(&from) {
                Some(node) if node.presented.is_none() => {}
                Some(_) => {
                    warn!(?from, "screen is already presenting; dropping component");
                    return;
                }
                None => {
                    warn!(?from, "present from unknown screen; dropping component");
                    return;
                }
            }

            let presented = tree.adopt(component);
            if let Some(node) = tree.nodes.get_mut(&from) {
                node.presented = Some(presented);
            }
            debug!(?from, ?presented, animated, "presented");
        }
        if let Some(completion) = completion {
            completion();
        }
    }

    fn is_dismissing(&self, screen: ScreenId) -> bool {
        let tree = self.tree.lock();
        let mut current = Some(screen);
        while let Some(id) = current {
            let Some(node) = tree.nodes.get(&id) else {
                return false;
            };
            if node.dismissing {
                return true;
            }
            current = node.parent;
        }
        false
    }

    fn is_stack_dismissing(&self, stack: StackId) -> bool {
        self.tree
            .lock()
            .nodes
            .get(&ScreenId(stack.0))
            .is_some_and(|node| node.dismissing)
    }
}
