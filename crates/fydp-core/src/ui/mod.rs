//! FYDP UI system
//!
//! - Core traits for drawable and touchable elements
//! - Styling: colour constants and light/dark palette pairs
//! - Components: labels, toggle switch, line chart, metric card, scroll view,
//!   tab bar

pub mod components;
pub mod core;
pub mod styling;

/// Panel width in pixels (portrait)
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Panel height in pixels (portrait)
pub const DISPLAY_HEIGHT_PX: u16 = 480;

// Re-export commonly used items
pub use components::{
    Label, LineChart, MetricCard, Paragraph, ScrollView, TabBar, TextSize, ToggleSwitch,
};
pub use self::core::{Action, Drawable, PageId, TouchEvent, TouchPoint, TouchResult, Touchable};
pub use styling::{ColorPalette, ModePalettes, Padding};
