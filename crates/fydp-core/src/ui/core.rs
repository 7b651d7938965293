//! Core UI traits and types

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::theme::ThemeMode;

/// Represents a 2D touch point on the display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl TouchPoint {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x as i32, self.y as i32)
    }
}

/// Touch events that can occur on the UI
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Initial touch press at a point
    Press(TouchPoint),
    /// Touch drag to a new point
    Drag(TouchPoint),
    /// Finger lifted
    Release(TouchPoint),
}

/// Result from handling a touch event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchResult {
    /// Event was handled by this element
    Handled,
    /// Event was not handled, pass to next element
    NotHandled,
    /// Event triggered an action
    Action(Action),
}

/// Actions that UI elements can trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Switch the navigator to a tab
    SelectTab(PageId),
    /// Flip the theme between light and dark
    ToggleTheme,
}

/// The three tabs of the navigator, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Dashboard,
    History,
    Settings,
}

impl PageId {
    pub const ALL: [PageId; 3] = [PageId::Dashboard, PageId::History, PageId::Settings];

    /// Title shown in the header and on the tab.
    pub const fn title(self) -> &'static str {
        match self {
            PageId::Dashboard => "Dashboard",
            PageId::History => "History",
            PageId::Settings => "Settings",
        }
    }

    /// Lowercase route name, used for snapshot file names.
    pub const fn route(self) -> &'static str {
        match self {
            PageId::Dashboard => "dashboard",
            PageId::History => "history",
            PageId::Settings => "settings",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            PageId::Dashboard => 0,
            PageId::History => 1,
            PageId::Settings => 2,
        }
    }
}

/// Trait for any UI element that can be drawn
///
/// Elements never cache colours: the mode of the current render pass is
/// passed in and each element resolves its own colour table against it.
pub trait Drawable {
    /// Draw the element to the display
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error>;

    /// Get the bounds of this drawable element
    fn bounds(&self) -> Rectangle;
}

/// Trait for UI elements that respond to touch events
pub trait Touchable {
    /// Check if a point is within this element's bounds
    fn contains_point(&self, point: TouchPoint) -> bool;

    /// Handle a touch event, returns result indicating if handled and any action
    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult;
}
