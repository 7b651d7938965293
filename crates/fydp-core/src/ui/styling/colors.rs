//! Color definitions and palette management
//!
//! All colours are RGB565, the native format of the target panels.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

use crate::theme::ThemeMode;

// ============================================================================
// Neutrals
// ============================================================================

/// App background in dark mode (#14161c)
pub const INK_950: Rgb565 = Rgb565::new(0x14 >> 3, 0x16 >> 2, 0x1c >> 3);

/// Card surface in dark mode (#1e2128)
pub const INK_900: Rgb565 = Rgb565::new(0x1e >> 3, 0x21 >> 2, 0x28 >> 3);

/// Hairline borders in dark mode (#2b2f3a)
pub const INK_800: Rgb565 = Rgb565::new(0x2b >> 3, 0x2f >> 2, 0x3a >> 3);

/// #111827
pub const GRAY_900: Rgb565 = Rgb565::new(0x11 >> 3, 0x18 >> 2, 0x27 >> 3);

/// #374151
pub const GRAY_700: Rgb565 = Rgb565::new(0x37 >> 3, 0x41 >> 2, 0x51 >> 3);

/// #4b5563
pub const GRAY_600: Rgb565 = Rgb565::new(0x4b >> 3, 0x55 >> 2, 0x63 >> 3);

/// #6b7280
pub const GRAY_500: Rgb565 = Rgb565::new(0x6b >> 3, 0x72 >> 2, 0x80 >> 3);

/// #9ca3af
pub const GRAY_400: Rgb565 = Rgb565::new(0x9c >> 3, 0xa3 >> 2, 0xaf >> 3);

/// #e5e7eb
pub const GRAY_200: Rgb565 = Rgb565::new(0xe5 >> 3, 0xe7 >> 2, 0xeb >> 3);

/// Chart labels in dark mode (#c8c8c8)
pub const SILVER: Rgb565 = Rgb565::new(0xc8 >> 3, 0xc8 >> 2, 0xc8 >> 3);

/// App background on the light dashboard (#f5f5f5)
pub const SNOW: Rgb565 = Rgb565::new(0xf5 >> 3, 0xf5 >> 2, 0xf5 >> 3);

/// #111111
pub const NEAR_BLACK: Rgb565 = Rgb565::new(0x11 >> 3, 0x11 >> 2, 0x11 >> 3);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);

// ============================================================================
// Accents
// ============================================================================

/// Dark-mode accent (#60a5fa)
pub const BLUE_400: Rgb565 = Rgb565::new(0x60 >> 3, 0xa5 >> 2, 0xfa >> 3);

/// Light-mode accent (#2563eb)
pub const BLUE_600: Rgb565 = Rgb565::new(0x25 >> 3, 0x63 >> 2, 0xeb >> 3);

/// Chart stroke in dark mode (#509cff)
pub const SKY: Rgb565 = Rgb565::new(0x50 >> 3, 0x9c >> 2, 0xff >> 3);

// ============================================================================
// Color Palette
// ============================================================================

/// The colour roles every screen maps a theme mode onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Screen background
    pub background: Rgb565,

    /// Cards, panels, and other raised surfaces
    pub surface: Rgb565,

    /// Primary text - high contrast
    pub foreground: Rgb565,

    /// Highlighted values and active controls
    pub accent: Rgb565,

    /// Secondary text - lower contrast
    pub muted_text: Rgb565,

    /// Separators and outlines
    pub border: Rgb565,
}

/// A light and a dark variant of the same colour table.
///
/// ```
/// use embedded_graphics::pixelcolor::Rgb565;
/// use fydp_core::theme::ThemeMode;
/// use fydp_core::ui::styling::{BLACK, ModePalettes, WHITE};
///
/// const TEXT: ModePalettes<Rgb565> = ModePalettes::new(BLACK, WHITE);
/// assert_eq!(TEXT.resolve(ThemeMode::Dark), WHITE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModePalettes<T> {
    pub light: T,
    pub dark: T,
}

impl<T: Copy> ModePalettes<T> {
    pub const fn new(light: T, dark: T) -> Self {
        Self { light, dark }
    }

    /// Pick the variant for `mode`.
    pub const fn resolve(&self, mode: ThemeMode) -> T {
        match mode {
            ThemeMode::Light => self.light,
            ThemeMode::Dark => self.dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn test_hex_conversion() {
        // #60a5fa -> (12, 41, 31)
        assert_eq!(BLUE_400.r(), 12);
        assert_eq!(BLUE_400.g(), 41);
        assert_eq!(BLUE_400.b(), 31);
        assert_eq!(WHITE, Rgb565::WHITE);
        assert_eq!(BLACK, Rgb565::BLACK);
    }

    #[test]
    fn test_resolve() {
        let pair = ModePalettes::new(1u8, 2u8);
        assert_eq!(pair.resolve(ThemeMode::Light), 1);
        assert_eq!(pair.resolve(ThemeMode::Dark), 2);
    }
}
