//! Styling system for UI elements
//!
//! - [`colors`] - Color constants, palettes and light/dark palette pairs
//! - [`layout`] - Padding
//!
//! Screens own their colour tables: each one declares a
//! [`ModePalettes`] pair and resolves it with the mode of the current render
//! pass.

pub mod colors;
pub mod layout;

pub use colors::{
    BLACK, BLUE_400, BLUE_600, ColorPalette, GRAY_200, GRAY_400, GRAY_500, GRAY_600, GRAY_700,
    GRAY_900, INK_800, INK_900, INK_950, ModePalettes, NEAR_BLACK, SILVER, SKY, SNOW, WHITE,
};
pub use layout::Padding;
