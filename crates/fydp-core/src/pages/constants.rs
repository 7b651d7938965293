//! Shared layout constants for the navigator and its screens
//!
//! The panel is split into a fixed header, a content area owned by the
//! active screen, and the tab bar along the bottom edge.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// Header strip height in pixels
pub const HEADER_HEIGHT_PX: u32 = 40;

/// Tab bar height in pixels
pub const TAB_BAR_HEIGHT_PX: u32 = 48;

/// Height left for the active screen
pub const CONTENT_HEIGHT_PX: u32 =
    DISPLAY_HEIGHT_PX as u32 - HEADER_HEIGHT_PX - TAB_BAR_HEIGHT_PX;

/// Horizontal margin between screen edges and content in pixels
pub const SCREEN_MARGIN_PX: u32 = 16;

/// Vertical gap between stacked blocks in pixels
pub const SECTION_GAP_PX: u32 = 12;

/// Header strip across the top of the panel
pub const fn header_bounds() -> Rectangle {
    Rectangle::new(
        Point::new(0, 0),
        Size::new(DISPLAY_WIDTH_PX as u32, HEADER_HEIGHT_PX),
    )
}

/// Area between the header and the tab bar
pub const fn content_bounds() -> Rectangle {
    Rectangle::new(
        Point::new(0, HEADER_HEIGHT_PX as i32),
        Size::new(DISPLAY_WIDTH_PX as u32, CONTENT_HEIGHT_PX),
    )
}

/// Tab bar strip along the bottom of the panel
pub const fn tab_bar_bounds() -> Rectangle {
    Rectangle::new(
        Point::new(0, (HEADER_HEIGHT_PX + CONTENT_HEIGHT_PX) as i32),
        Size::new(DISPLAY_WIDTH_PX as u32, TAB_BAR_HEIGHT_PX),
    )
}
