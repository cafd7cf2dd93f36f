//! How a resolved component is shown.

use crate::component::BoxComponent;
use std::{fmt, sync::Arc};

/// Modal presentation style applied to a presented component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresentationStyle {
    /// Let the display backend pick.
    #[default]
    Automatic,
    /// Cover the whole screen.
    FullScreen,
    /// Partially cover the presenting screen.
    PageSheet,
    /// Centered form sheet.
    FormSheet,
    /// Full screen, keeping the presenting screen visible beneath.
    OverFullScreen,
    /// Cover only the presenting screen's context.
    OverCurrentContext,
}

/// Embeds a component inside a container (e.g. a navigation container)
/// before it is presented.
#[derive(Clone)]
pub struct Wrapper(Arc<dyn Fn(BoxComponent) -> BoxComponent + Send + Sync>);

impl Wrapper {
    /// Create a wrapper from a closure taking the target as its sole content.
    pub fn new<F>(wrap: F) -> Self
    where
        F: Fn(BoxComponent) -> BoxComponent + Send + Sync + 'static,
    {
        Self(Arc::new(wrap))
    }

    /// Wrap `component`.
    pub fn wrap(&self, component: BoxComponent) -> BoxComponent {
        (self.0)(component)
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Wrapper(..)")
    }
}

/// Presentation mode for a component.
#[derive(Debug, Clone)]
pub enum PresentationMode {
    /// Push onto the active screen's back-stack.
    Push {
        /// Animate the transition.
        animated: bool,
    },
    /// Present modally from the active screen.
    Present {
        /// Optional container to embed the component in.
        wrapper: Option<Wrapper>,
        /// Modal style applied before presenting.
        style: PresentationStyle,
        /// Animate the transition.
        animated: bool,
    },
}

impl PresentationMode {
    /// Animated push.
    pub const fn push() -> Self {
        PresentationMode::Push { animated: true }
    }

    /// Animated present with the automatic style and no wrapper.
    pub const fn present() -> Self {
        PresentationMode::Present {
            wrapper: None,
            style: PresentationStyle::Automatic,
            animated: true,
        }
    }

    /// Set the animation flag.
    pub fn animated(mut self, value: bool) -> Self {
        match &mut self {
            PresentationMode::Push { animated } | PresentationMode::Present { animated, .. } => {
                *animated = value
            }
        }
        self
    }

    /// Set the wrapper. Ignored for [`PresentationMode::Push`].
    pub fn wrapped(mut self, with: Wrapper) -> Self {
        if let PresentationMode::Present { wrapper, .. } = &mut self {
            *wrapper = Some(with);
        }
        self
    }

    /// Set the modal style. Ignored for [`PresentationMode::Push`].
    pub fn styled(mut self, value: PresentationStyle) -> Self {
        if let PresentationMode::Present { style, .. } = &mut self {
            *style = value;
        }
        self
    }

    /// Check if this is a push.
    pub fn is_push(&self) -> bool {
        matches!(self, PresentationMode::Push { .. })
    }

    /// Whether the transition is animated.
    pub fn is_animated(&self) -> bool {
        match self {
            PresentationMode::Push { animated } | PresentationMode::Present { animated, .. } => {
                *animated
            }
        }
    }
}

impl Default for PresentationMode {
    fn default() -> Self {
        Self::push()
    }
}
