//! Light/dark theme state shared by every screen.
//!
//! The [`ThemeStore`] holds the single active [`ThemeMode`] and an explicit
//! observer list. Screens mount a [`ThemeConsumer`] to be told when the mode
//! flips so they can schedule a redraw; the render pass itself reads
//! [`ThemeStore::mode`] once and hands the value down to everything it draws.

pub mod consumer;
pub mod store;

pub use consumer::ThemeConsumer;
pub use store::{MAX_THEME_SUBSCRIBERS, Subscription, ThemeError, ThemeStore};

/// The two colour modes the UI can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    Light,
    /// Mode the store starts in on every boot.
    #[default]
    Dark,
}

impl ThemeMode {
    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// Lowercase name (`"light"` / `"dark"`), used in logs and snapshot names.
    pub const fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl core::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_toggled_is_an_involution() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(ThemeMode::Light.as_str(), "light");
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
    }
}
