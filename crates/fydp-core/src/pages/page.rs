//! Screen abstraction and the enum wrapper the shell stores screens in.
//!
//! Every screen is mounted as a theme consumer for as long as it exists.
//! The shell calls these methods in a fixed order each frame:
//!
//! 1. **`handle_touch`** when a touch lands in the content area.
//! 2. **`update`** to pick up theme changes and other state.
//! 3. **`draw_page`** while `is_dirty()` is true, with the mode read from
//!    the store for that render pass.
//!
//! `on_activate` and `on_deactivate` bracket the time a screen is visible.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::pages::dashboard::DashboardPage;
use crate::pages::history::HistoryPage;
use crate::pages::settings::SettingsPage;
use crate::theme::{ThemeConsumer, ThemeMode};
use crate::ui::core::{Action, PageId, TouchEvent};

/// Contract shared by the three screens.
pub trait Page {
    fn id(&self) -> PageId;

    fn title(&self) -> &str {
        self.id().title()
    }

    /// Called when this screen becomes the visible one.
    fn on_activate(&mut self) {
        self.mark_dirty();
    }

    fn on_deactivate(&mut self) {}

    /// Process a touch and optionally return an [`Action`] for the shell.
    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action>;

    /// Advance per-frame state. Theme notifications turn into a redraw here.
    fn update(&mut self);

    /// Render the screen into its content area.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error>;

    fn bounds(&self) -> Rectangle;

    /// Theme consumer mounted by this screen
    fn theme(&self) -> &ThemeConsumer<'_>;

    fn is_dirty(&self) -> bool;

    fn mark_clean(&mut self);

    fn mark_dirty(&mut self);
}

/// One of the concrete screens.
///
/// The shell keeps all three alive in a fixed array; an enum avoids trait
/// objects while still letting it iterate over them.
pub enum PageWrapper<'a> {
    Dashboard(DashboardPage<'a>),
    History(HistoryPage<'a>),
    Settings(SettingsPage<'a>),
}

impl<'a> Page for PageWrapper<'a> {
    fn id(&self) -> PageId {
        match self {
            PageWrapper::Dashboard(page) => page.id(),
            PageWrapper::History(page) => page.id(),
            PageWrapper::Settings(page) => page.id(),
        }
    }

    fn title(&self) -> &str {
        match self {
            PageWrapper::Dashboard(page) => page.title(),
            PageWrapper::History(page) => page.title(),
            PageWrapper::Settings(page) => page.title(),
        }
    }

    fn on_activate(&mut self) {
        match self {
            PageWrapper::Dashboard(page) => page.on_activate(),
            PageWrapper::History(page) => page.on_activate(),
            PageWrapper::Settings(page) => page.on_activate(),
        }
    }

    fn on_deactivate(&mut self) {
        match self {
            PageWrapper::Dashboard(page) => page.on_deactivate(),
            PageWrapper::History(page) => page.on_deactivate(),
            PageWrapper::Settings(page) => page.on_deactivate(),
        }
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self {
            PageWrapper::Dashboard(page) => page.handle_touch(event),
            PageWrapper::History(page) => page.handle_touch(event),
            PageWrapper::Settings(page) => page.handle_touch(event),
        }
    }

    fn update(&mut self) {
        match self {
            PageWrapper::Dashboard(page) => page.update(),
            PageWrapper::History(page) => page.update(),
            PageWrapper::Settings(page) => page.update(),
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        match self {
            PageWrapper::Dashboard(page) => page.draw_page(display, mode),
            PageWrapper::History(page) => page.draw_page(display, mode),
            PageWrapper::Settings(page) => page.draw_page(display, mode),
        }
    }

    fn bounds(&self) -> Rectangle {
        match self {
            PageWrapper::Dashboard(page) => Page::bounds(page),
            PageWrapper::History(page) => Page::bounds(page),
            PageWrapper::Settings(page) => Page::bounds(page),
        }
    }

    fn theme(&self) -> &ThemeConsumer<'_> {
        match self {
            PageWrapper::Dashboard(page) => page.theme(),
            PageWrapper::History(page) => page.theme(),
            PageWrapper::Settings(page) => page.theme(),
        }
    }

    fn is_dirty(&self) -> bool {
        match self {
            PageWrapper::Dashboard(page) => page.is_dirty(),
            PageWrapper::History(page) => page.is_dirty(),
            PageWrapper::Settings(page) => page.is_dirty(),
        }
    }

    fn mark_clean(&mut self) {
        match self {
            PageWrapper::Dashboard(page) => page.mark_clean(),
            PageWrapper::History(page) => page.mark_clean(),
            PageWrapper::Settings(page) => page.mark_clean(),
        }
    }

    fn mark_dirty(&mut self) {
        match self {
            PageWrapper::Dashboard(page) => page.mark_dirty(),
            PageWrapper::History(page) => page.mark_dirty(),
            PageWrapper::Settings(page) => page.mark_dirty(),
        }
    }
}
