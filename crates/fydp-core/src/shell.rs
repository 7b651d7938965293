//! Tab navigator: header, the three screens and the tab bar.
//!
//! The shell is the only place that writes to the theme store. It does so
//! when the Settings screen reports [`Action::ToggleTheme`]; every other
//! component only reads the mode it is handed during a render pass.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use embedded_layout::align::{Align, horizontal, vertical};
use log::{debug, info};
use thiserror_no_std::Error;

use crate::pages::constants::{content_bounds, header_bounds, tab_bar_bounds};
use crate::pages::{DashboardPage, HistoryPage, Page, PageWrapper, SettingsPage};
use crate::theme::{ThemeConsumer, ThemeError, ThemeMode, ThemeStore};
use crate::ui::components::tab_bar::ChromeColors;
use crate::ui::{Action, Drawable, PageId, TabBar, TextSize, TouchEvent, TouchResult, Touchable};

/// Error types for building the navigator
#[derive(Debug, Error)]
pub enum ShellError {
    /// A screen or the chrome could not subscribe to the theme store
    #[error("Theme subscription failed: {0}")]
    Theme(ThemeError),
}

impl From<ThemeError> for ShellError {
    fn from(error: ThemeError) -> Self {
        ShellError::Theme(error)
    }
}

pub struct NavigationShell<'a> {
    store: &'a ThemeStore,
    /// Follows the theme for the header and tab bar
    chrome: ThemeConsumer<'a>,
    /// Indexed by [`PageId::index`]
    pages: [PageWrapper<'a>; 3],
    active: PageId,
    tab_bar: TabBar,
    chrome_dirty: bool,
}

impl<'a> NavigationShell<'a> {
    /// Build all three screens on `store`. The Dashboard tab starts active.
    pub fn new(store: &'a ThemeStore) -> Result<Self, ShellError> {
        let content = content_bounds();
        let pages = [
            PageWrapper::Dashboard(DashboardPage::new(content, store)?),
            PageWrapper::History(HistoryPage::new(content, store)?),
            PageWrapper::Settings(SettingsPage::new(content, store)?),
        ];
        let chrome = ThemeConsumer::mount(store)?;
        debug!(
            "Navigation shell mounted with {} theme subscribers",
            store.subscriber_count()
        );

        let mut shell = Self {
            store,
            chrome,
            pages,
            active: PageId::Dashboard,
            tab_bar: TabBar::new(tab_bar_bounds()),
            chrome_dirty: true,
        };
        shell.active_page_mut().on_activate();
        Ok(shell)
    }

    pub fn active_page_id(&self) -> PageId {
        self.active
    }

    pub fn page(&self, id: PageId) -> &PageWrapper<'a> {
        &self.pages[id.index()]
    }

    pub fn store(&self) -> &'a ThemeStore {
        self.store
    }

    fn active_page_mut(&mut self) -> &mut PageWrapper<'a> {
        &mut self.pages[self.active.index()]
    }

    /// Switch to `page`. Returns `false` if it was already active.
    pub fn select_tab(&mut self, page: PageId) -> bool {
        if page == self.active {
            return false;
        }
        info!("Switching tab {} -> {}", self.active.title(), page.title());

        self.active_page_mut().on_deactivate();
        self.active = page;
        self.tab_bar.set_active(page);
        self.active_page_mut().on_activate();
        self.chrome_dirty = true;
        true
    }

    /// Route a touch to the tab bar, then to the active screen, and carry out
    /// the resulting action. The action is returned for logging by callers.
    pub fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        let from_tab_bar = match self.tab_bar.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            _ => None,
        };

        let (action, source) = match from_tab_bar {
            Some(action) => (Some(action), None),
            None => (self.active_page_mut().handle_touch(event), Some(self.active)),
        };
        debug!("Touch {:?} -> {:?}", event, action);

        match action? {
            Action::SelectTab(page) => {
                self.select_tab(page);
            }
            Action::ToggleTheme => {
                if source == Some(PageId::Settings) {
                    self.store.toggle();
                } else {
                    debug!("Ignoring theme toggle from {:?}", source);
                }
            }
        }
        action
    }

    /// Pick up theme notifications for the chrome and every screen.
    pub fn update(&mut self) {
        if self.chrome.take_changed() {
            self.chrome_dirty = true;
        }
        for page in self.pages.iter_mut() {
            page.update();
        }
    }

    /// Whether the next [`render`](Self::render) would draw anything.
    pub fn needs_redraw(&self) -> bool {
        self.chrome_dirty || self.pages[self.active.index()].is_dirty()
    }

    /// Force a full repaint on the next render pass.
    pub fn invalidate(&mut self) {
        self.chrome_dirty = true;
        self.active_page_mut().mark_dirty();
    }

    /// Draw whatever is dirty. The mode is read from the store once and used
    /// for every element of this pass. Returns `true` if anything was drawn.
    pub fn render<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, D::Error> {
        if !self.needs_redraw() {
            return Ok(false);
        }
        let mode = self.store.mode();

        if self.chrome_dirty {
            self.draw_header(display, mode)?;
            self.tab_bar.draw(display, mode)?;
            self.chrome_dirty = false;
        }

        let page = self.active_page_mut();
        if page.is_dirty() {
            page.draw_page(display, mode)?;
            page.mark_clean();
        }

        Ok(true)
    }

    fn draw_header<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let colors = ChromeColors::for_mode(mode);
        let header = header_bounds();

        display.fill_solid(&header, colors.background)?;

        let bottom = header.top_left.y + header.size.height as i32 - 1;
        let right = header.top_left.x + header.size.width as i32 - 1;
        Line::new(Point::new(header.top_left.x, bottom), Point::new(right, bottom))
            .into_styled(PrimitiveStyle::with_stroke(colors.border, 1))
            .draw(display)?;

        let style = MonoTextStyle::new(TextSize::Medium.font(), colors.title);
        Text::with_baseline(self.active.title(), Point::zero(), style, Baseline::Top)
            .align_to(&header, horizontal::Center, vertical::Center)
            .draw(display)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::TouchPoint;
    use crate::ui::styling::{INK_950, SNOW, WHITE};

    fn press_tab(shell: &mut NavigationShell<'_>, page: PageId) {
        let x = 53 + page.index() as u16 * 106;
        shell.handle_touch(TouchEvent::Press(TouchPoint::new(x, 456)));
    }

    fn press_switch(shell: &mut NavigationShell<'_>) -> Option<Action> {
        let PageWrapper::Settings(settings) = shell.page(PageId::Settings) else {
            unreachable!("settings lives at its own index");
        };
        let center = settings.switch_bounds().center();
        shell.handle_touch(TouchEvent::Press(TouchPoint::new(center.x as u16, center.y as u16)))
    }

    #[test]
    fn test_mounts_every_consumer() {
        let store = ThemeStore::new();
        let shell = NavigationShell::new(&store).unwrap();
        // three screens plus the chrome
        assert_eq!(store.subscriber_count(), 4);
        assert_eq!(shell.active_page_id(), PageId::Dashboard);
        drop(shell);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_tab_bar_selects_pages() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();

        press_tab(&mut shell, PageId::History);
        assert_eq!(shell.active_page_id(), PageId::History);
        press_tab(&mut shell, PageId::Settings);
        assert_eq!(shell.active_page_id(), PageId::Settings);
        assert!(!shell.select_tab(PageId::Settings));
    }

    #[test]
    fn test_settings_switch_toggles_store() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();
        shell.select_tab(PageId::Settings);

        assert_eq!(press_switch(&mut shell), Some(Action::ToggleTheme));
        assert_eq!(store.mode(), ThemeMode::Light);

        press_switch(&mut shell);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_switch_area_is_inert_on_other_tabs() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();
        shell.select_tab(PageId::History);

        press_switch(&mut shell);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_every_screen_sees_the_toggle() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();
        shell.select_tab(PageId::Settings);
        press_switch(&mut shell);

        for id in PageId::ALL {
            let theme = shell.page(id).theme();
            assert_eq!(theme.observed(), ThemeMode::Light);
            assert_eq!(theme.notifications(), 1);
        }
    }

    #[test]
    fn test_render_repaints_after_toggle() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();
        let mut fb = FrameBuffer::new();

        assert!(shell.render(&mut fb).unwrap());
        assert_eq!(fb.pixel(2, 2), Some(INK_950));
        assert_eq!(fb.pixel(2, 60), Some(INK_950));
        assert!(!shell.render(&mut fb).unwrap());

        store.toggle();
        shell.update();
        assert!(shell.render(&mut fb).unwrap());
        // Header uses the chrome palette, dashboard its own background
        assert_eq!(fb.pixel(2, 2), Some(WHITE));
        assert_eq!(fb.pixel(2, 60), Some(SNOW));
        assert_eq!(fb.pixel(2, 470), Some(WHITE));
    }

    #[test]
    fn test_hidden_screen_redraws_with_current_mode() {
        let store = ThemeStore::new();
        let mut shell = NavigationShell::new(&store).unwrap();
        let mut fb = FrameBuffer::new();
        shell.render(&mut fb).unwrap();

        store.toggle();
        shell.update();
        shell.render(&mut fb).unwrap();

        shell.select_tab(PageId::History);
        shell.render(&mut fb).unwrap();
        assert_eq!(fb.pixel(2, 60), Some(WHITE));
    }
}
