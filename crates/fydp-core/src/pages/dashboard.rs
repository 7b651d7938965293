//! Dashboard screen: a fixed header block above one chart card per sensor
//! series in a vertically scrolling column.

use core::array;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::pages::constants::{SCREEN_MARGIN_PX, SECTION_GAP_PX};
use crate::pages::page::Page;
use crate::sample_data::{SENSOR_SERIES, SERIES_COUNT};
use crate::theme::{ThemeConsumer, ThemeError, ThemeMode, ThemeStore};
use crate::ui::components::metric_card::{CARD_HEIGHT_PX, MetricCard};
use crate::ui::{
    Action, ColorPalette, Drawable, Label, ModePalettes, PageId, ScrollView, TextSize, TouchEvent,
    TouchResult, Touchable,
};
use crate::ui::styling::{
    BLUE_400, BLUE_600, GRAY_200, GRAY_400, GRAY_500, GRAY_900, INK_800, INK_900, INK_950, SNOW,
    WHITE,
};

const HEADER_TOP_PX: u32 = 8;
const SUBTITLE_GAP_PX: u32 = 4;
const HEADER_BOTTOM_PX: u32 = 8;
const LIST_BOTTOM_PX: u32 = 24;

const PALETTE: ModePalettes<ColorPalette> = ModePalettes::new(
    ColorPalette {
        background: SNOW,
        surface: WHITE,
        foreground: GRAY_900,
        accent: BLUE_600,
        muted_text: GRAY_500,
        border: GRAY_200,
    },
    ColorPalette {
        background: INK_950,
        surface: INK_900,
        foreground: WHITE,
        accent: BLUE_400,
        muted_text: GRAY_400,
        border: INK_800,
    },
);

pub struct DashboardPage<'a> {
    bounds: Rectangle,
    theme: ThemeConsumer<'a>,
    title: Label,
    subtitle: Label,
    /// y of the separator under the header block
    divider_y: i32,
    cards: [MetricCard; SERIES_COUNT],
    scroll: ScrollView,
    dirty: bool,
}

impl<'a> DashboardPage<'a> {
    /// Lay out the screen inside `bounds` and mount it on `store`.
    pub fn new(bounds: Rectangle, store: &'a ThemeStore) -> Result<Self, ThemeError> {
        let width = bounds.size.width;
        let inner_width = width.saturating_sub(2 * SCREEN_MARGIN_PX);
        let left = bounds.top_left.x + SCREEN_MARGIN_PX as i32;

        let mut y = bounds.top_left.y + HEADER_TOP_PX as i32;
        let title = Label::new(
            Rectangle::new(Point::new(left, y), Size::new(inner_width, TextSize::Large.line_height())),
            "FYDP Data Monitor",
            TextSize::Large,
            ModePalettes::new(PALETTE.light.foreground, PALETTE.dark.foreground),
        );
        y += (TextSize::Large.line_height() + SUBTITLE_GAP_PX) as i32;

        let subtitle = Label::new(
            Rectangle::new(Point::new(left, y), Size::new(inner_width, TextSize::Small.line_height())),
            "Live Sensor Dashboard (demo)",
            TextSize::Small,
            ModePalettes::new(PALETTE.light.muted_text, PALETTE.dark.muted_text),
        );
        y += (TextSize::Small.line_height() + HEADER_BOTTOM_PX) as i32;

        let divider_y = y;

        // The list scrolls below the divider. Cards are laid out in content
        // space, origin at the top of the list.
        let list_top = divider_y + 1;
        let bottom = bounds.top_left.y + bounds.size.height as i32;
        let viewport = Rectangle::new(
            Point::new(bounds.top_left.x, list_top),
            Size::new(width, (bottom - list_top).max(0) as u32),
        );

        let card_x = SCREEN_MARGIN_PX as i32;
        let cards = array::from_fn(|index| {
            let card_y = (SECTION_GAP_PX + index as u32 * (CARD_HEIGHT_PX + SECTION_GAP_PX)) as i32;
            MetricCard::new(Point::new(card_x, card_y), inner_width, &SENSOR_SERIES[index])
        });

        let content_height = SECTION_GAP_PX
            + SERIES_COUNT as u32 * CARD_HEIGHT_PX
            + (SERIES_COUNT as u32 - 1) * SECTION_GAP_PX
            + LIST_BOTTOM_PX;

        Ok(Self {
            bounds,
            theme: ThemeConsumer::mount(store)?,
            title,
            subtitle,
            divider_y,
            cards,
            scroll: ScrollView::new(viewport, content_height),
            dirty: true,
        })
    }

    pub fn scroll(&self) -> &ScrollView {
        &self.scroll
    }

    pub fn cards(&self) -> &[MetricCard] {
        &self.cards
    }

    fn draw_header<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        self.title.draw(target, mode)?;
        self.subtitle.draw(target, mode)?;

        let left = self.bounds.top_left.x;
        let right = left + self.bounds.size.width as i32 - 1;
        Line::new(Point::new(left, self.divider_y), Point::new(right, self.divider_y))
            .into_styled(PrimitiveStyle::with_stroke(PALETTE.resolve(mode).border, 1))
            .draw(target)?;
        Ok(())
    }

    fn draw_cards<D: DrawTarget<Color = Rgb565>>(
        &self,
        target: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        // Visible window in content space
        let window = Rectangle::new(
            Point::new(0, self.scroll.offset() as i32),
            self.scroll.bounds().size,
        );
        for card in &self.cards {
            if !card.bounds().intersection(&window).is_zero_sized() {
                card.draw(target, mode)?;
            }
        }
        Ok(())
    }
}

impl<'a> Page for DashboardPage<'a> {
    fn id(&self) -> PageId {
        PageId::Dashboard
    }

    fn handle_touch(&mut self, event: TouchEvent) -> Option<Action> {
        let before = self.scroll.offset();
        if let TouchResult::Action(action) = self.scroll.handle_touch(event) {
            return Some(action);
        }
        if self.scroll.offset() != before {
            self.dirty = true;
        }
        None
    }

    fn on_deactivate(&mut self) {
        self.scroll.cancel_drag();
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
        let palette = PALETTE.resolve(mode);

        {
            let mut page = display.clipped(&self.bounds);
            page.clear(palette.background)?;
            self.draw_header(&mut page, mode)?;
        }

        let mut list = display.clipped(&self.scroll.bounds());
        {
            let mut content = list.translated(self.scroll.content_origin());
            self.draw_cards(&mut content, mode)?;
        }
        self.scroll.draw(&mut list, mode)?;

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
    use crate::framebuffer::FrameBuffer;
    use crate::pages::constants::content_bounds;
    use crate::ui::TouchPoint;
    use alloc::vec::Vec as StdVec;

    #[test]
    fn test_mounts_one_consumer() {
        let store = ThemeStore::new();
        let page = DashboardPage::new(content_bounds(), &store).unwrap();
        assert_eq!(store.subscriber_count(), 1);
        assert_eq!(page.theme().observed(), ThemeMode::Dark);
        assert_eq!(page.cards().len(), 4);
        assert_eq!(page.cards()[3].title(), "Sensor 4 · Load (%)");
    }

    #[test]
    fn test_toggle_schedules_redraw() {
        let store = ThemeStore::new();
        let mut page = DashboardPage::new(content_bounds(), &store).unwrap();
        page.mark_clean();

        page.update();
        assert!(!page.is_dirty());

        store.toggle();
        page.update();
        assert!(page.is_dirty());
        assert_eq!(page.theme().observed(), ThemeMode::Light);
    }

    #[test]
    fn test_content_overflows_and_scrolls() {
        let store = ThemeStore::new();
        let mut page = DashboardPage::new(content_bounds(), &store).unwrap();
        assert!(page.scroll().can_scroll());
        page.mark_clean();

        page.handle_touch(TouchEvent::Press(TouchPoint::new(160, 300)));
        page.handle_touch(TouchEvent::Drag(TouchPoint::new(160, 200)));
        assert_eq!(page.scroll().offset(), 100);
        assert!(page.is_dirty());
    }

    #[test]
    fn test_background_follows_render_mode() {
        let store = ThemeStore::new();
        let mut page = DashboardPage::new(content_bounds(), &store).unwrap();
        let mut fb = FrameBuffer::new();

        page.draw_page(&mut fb, store.mode()).unwrap();
        assert_eq!(fb.pixel(2, 45), Some(INK_950));
        // Nothing outside the content area is touched
        assert_eq!(fb.pixel(2, 10), Some(Rgb565::BLACK));

        store.toggle();
        page.draw_page(&mut fb, store.mode()).unwrap();
        assert_eq!(fb.pixel(2, 45), Some(SNOW));
    }

    fn header_pixels(fb: &FrameBuffer) -> StdVec<Option<Rgb565>> {
        let bounds = content_bounds();
        (bounds.top_left.y..bounds.top_left.y + 50)
            .flat_map(|y| (0..320).map(move |x| fb.pixel(x, y)))
            .collect()
    }

    #[test]
    fn test_header_stays_put_while_cards_scroll() {
        let store = ThemeStore::new();
        let mut page = DashboardPage::new(content_bounds(), &store).unwrap();
        let mut fb = FrameBuffer::new();
        assert!(page.scroll().bounds().top_left.y > page.divider_y);

        page.draw_page(&mut fb, store.mode()).unwrap();
        let before = header_pixels(&fb);
        // Title text is drawn in the foreground colour
        assert!(before.contains(&Some(WHITE)));

        page.handle_touch(TouchEvent::Press(TouchPoint::new(160, 400)));
        page.handle_touch(TouchEvent::Drag(TouchPoint::new(160, 150)));
        assert_eq!(page.scroll().offset(), 250);
        page.draw_page(&mut fb, store.mode()).unwrap();

        assert_eq!(header_pixels(&fb), before);
    }

    #[test]
    fn test_leaving_tab_cancels_drag() {
        let store = ThemeStore::new();
        let mut page = DashboardPage::new(content_bounds(), &store).unwrap();

        page.handle_touch(TouchEvent::Press(TouchPoint::new(160, 300)));
        page.on_deactivate();
        page.on_activate();
        page.handle_touch(TouchEvent::Drag(TouchPoint::new(160, 200)));
        assert_eq!(page.scroll().offset(), 0);
    }
}
