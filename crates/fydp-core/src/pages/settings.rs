//! Settings screen with the dark mode switch.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::pages::constants::SCREEN_MARGIN_PX;
use crate::pages::page::Page;
use crate::theme::{ThemeConsumer, ThemeError, ThemeMode, ThemeStore};
use crate::ui::components::toggle::SWITCH_SIZE;
use crate::ui::styling::{BLACK, GRAY_200, INK_950, NEAR_BLACK, WHITE};
use crate::ui::{
    Action, Drawable, Label, ModePalettes, PageId, TextSize, ToggleSwitch, TouchEvent,
    TouchResult, Touchable,
};

const TOP_PADDING_PX: u32 = 32;
const TITLE_GAP_PX: u32 = 16;
const ROW_PADDING_PX: u32 = 12;

const BACKGROUND: ModePalettes<Rgb565> = ModePalettes::new(WHITE, INK_950);
const TITLE: ModePalettes<Rgb565> = ModePalettes::new(BLACK, WHITE);
const LABEL: ModePalettes<Rgb565> = ModePalettes::new(NEAR_BLACK, GRAY_200);

pub struct SettingsPage<'a> {
    bounds: Rectangle,
    theme: ThemeConsumer<'a>,
    title: Label,
    dark_mode_label: Label,
    dark_mode_switch: ToggleSwitch,
    dirty: bool,
}

impl<'a> SettingsPage<'a> {
    pub fn new(bounds: Rectangle, store: &'a ThemeStore) -> Result<Self, ThemeError> {
        let inner_width = bounds.size.width.saturating_sub(2 * SCREEN_MARGIN_PX);
        let left = bounds.top_left.x + SCREEN_MARGIN_PX as i32;
        let mut y = bounds.top_left.y + TOP_PADDING_PX as i32;

        let title_height = TextSize::Large.line_height();
        let title = Label::new(
            Rectangle::new(Point::new(left, y), Size::new(inner_width, title_height)),
            "Settings",
            TextSize::Large,
            TITLE,
        );
        y += (title_height + TITLE_GAP_PX) as i32;

        // Label left, switch right, both centred on the row
        let row_height = SWITCH_SIZE.height + 2 * ROW_PADDING_PX;
        let row_center = y + row_height as i32 / 2;

        let label_height = TextSize::Medium.line_height();
        let dark_mode_label = Label::new(
            Rectangle::new(
                Point::new(left, row_center - label_height as i32 / 2),
                Size::new(inner_width - SWITCH_SIZE.width, label_height),
            ),
            "Dark mode",
            TextSize::Medium,
            LABEL,
        );

        let switch_origin = Point::new(
            left + (inner_width - SWITCH_SIZE.width) as i32,
            row_center - SWITCH_SIZE.height as i32 / 2,
        );
        let dark_mode_switch = ToggleSwitch::new(Rectangle::new(switch_origin, SWITCH_SIZE));

        Ok(Self {
            bounds,
            theme: ThemeConsumer::mount(store)?,
            title,
            dark_mode_label,
            dark_mode_switch,
            dirty: true,
        })
    }

    pub fn switch_bounds(&self) -> Rectangle {
        self.dark_mode_switch.bounds()
    }

    /// Value the switch shows: the last mode this screen was told about.
    pub fn dark_mode_enabled(&self) -> bool {
        ToggleSwitch::value(self.theme.observed())
    }
}

impl<'a> Page for SettingsPage<'a> {
    fn id(&self) -> PageId {
        PageId::Settings
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        match self.dark_mode_switch.handle_touch(event) {
            TouchResult::Action(action) => Some(action),
            _ => None,
        }
    }

    fn update(&mut self) {
        if self.theme.take_changed() {
            self.dirty = true;
        }
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, BACKGROUND.resolve(mode))?;
        self.title.draw(display, mode)?;
        self.dark_mode_label.draw(display, mode)?;
        self.dark_mode_switch.draw(display, mode)?;
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn theme(&self) -> &ThemeConsumer<'_> {
        &self.theme
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::constants::content_bounds;
    use crate::ui::TouchPoint;

    fn center_of(rect: Rectangle) -> TouchPoint {
        let center = rect.center();
        TouchPoint::new(center.x as u16, center.y as u16)
    }

    #[test]
    fn test_switch_requests_toggle() {
        let store = ThemeStore::new();
        let mut page = SettingsPage::new(content_bounds(), &store).unwrap();

        let press = TouchEvent::Press(center_of(page.switch_bounds()));
        assert_eq!(page.handle_touch(press), Some(Action::ToggleTheme));
        // The page only asks; the store is untouched until the shell acts
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_switch_value_follows_store() {
        let store = ThemeStore::new();
        let mut page = SettingsPage::new(content_bounds(), &store).unwrap();
        assert!(page.dark_mode_enabled());
        page.mark_clean();

        store.toggle();
        page.update();
        assert!(!page.dark_mode_enabled());
        assert!(page.is_dirty());
    }

    #[test]
    fn test_switch_is_right_aligned() {
        let store = ThemeStore::new();
        let page = SettingsPage::new(content_bounds(), &store).unwrap();
        let switch = page.switch_bounds();
        assert_eq!(switch.top_left.x + switch.size.width as i32, 320 - 16);
        assert!(content_bounds().contains(switch.top_left));
    }

    #[test]
    fn test_touch_elsewhere_does_nothing() {
        let store = ThemeStore::new();
        let mut page = SettingsPage::new(content_bounds(), &store).unwrap();
        let press = TouchEvent::Press(TouchPoint::new(20, 60));
        assert_eq!(page.handle_touch(press), None);
    }
}
