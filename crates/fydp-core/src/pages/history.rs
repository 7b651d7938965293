//! History screen: a centred title over a placeholder paragraph.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Alignment;

use crate::pages::constants::SCREEN_MARGIN_PX;
use crate::pages::page::Page;
use crate::theme::{ThemeConsumer, ThemeError, ThemeMode, ThemeStore};
use crate::ui::styling::{BLACK, GRAY_400, GRAY_600, INK_950, WHITE};
use crate::ui::{Action, Drawable, Label, ModePalettes, PageId, Paragraph, TextSize, TouchEvent};

const BODY_TEXT: &str = "This is where you can show past sessions, saved data, etc.";

/// Space between the title and the paragraph
const TITLE_GAP_PX: u32 = 12;

const BACKGROUND: ModePalettes<Rgb565> = ModePalettes::new(WHITE, INK_950);
const TITLE: ModePalettes<Rgb565> = ModePalettes::new(BLACK, WHITE);
const BODY: ModePalettes<Rgb565> = ModePalettes::new(GRAY_600, GRAY_400);

pub struct HistoryPage<'a> {
    bounds: Rectangle,
    theme: ThemeConsumer<'a>,
    title: Label,
    body: Paragraph,
    dirty: bool,
}

impl<'a> HistoryPage<'a> {
    pub fn new(bounds: Rectangle, store: &'a ThemeStore) -> Result<Self, ThemeError> {
        let inner_width = bounds.size.width.saturating_sub(2 * SCREEN_MARGIN_PX);
        let left = bounds.top_left.x + SCREEN_MARGIN_PX as i32;

        // Wrap first so the block can be centred as a whole
        let probe = Paragraph::new(
            Rectangle::new(Point::zero(), Size::new(inner_width, bounds.size.height)),
            BODY_TEXT,
            TextSize::Medium,
            BODY,
        );
        let title_height = TextSize::Large.line_height();
        let block_height = title_height + TITLE_GAP_PX + probe.content_height();
        let top = bounds.top_left.y
            + (bounds.size.height.saturating_sub(block_height) / 2) as i32;

        let title = Label::new(
            Rectangle::new(Point::new(left, top), Size::new(inner_width, title_height)),
            "History",
            TextSize::Large,
            TITLE,
        )
        .with_alignment(Alignment::Center);

        let body_top = top + (title_height + TITLE_GAP_PX) as i32;
        let body = Paragraph::new(
            Rectangle::new(
                Point::new(left, body_top),
                Size::new(inner_width, probe.content_height()),
            ),
            BODY_TEXT,
            TextSize::Medium,
            BODY,
        );

        Ok(Self {
            bounds,
            theme: ThemeConsumer::mount(store)?,
            title,
            body,
            dirty: true,
        })
    }

    pub fn body(&self) -> &Paragraph {
        &self.body
    }
}

impl<'a> Page for HistoryPage<'a> {
    fn id(&self) -> PageId {
        PageId::History
    }

    fn handle_touch(&mut self, _event: TouchEvent) -> Option<Action> {
        None
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
        self.body.draw(display, mode)?;
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

    #[test]
    fn test_body_is_wrapped_and_centred() {
        let store = ThemeStore::new();
        let page = HistoryPage::new(content_bounds(), &store).unwrap();
        assert!(page.body().lines().count() > 1);

        let joined_len: usize = page.body().lines().map(|line| line.len() + 1).sum();
        assert_eq!(joined_len - 1, BODY_TEXT.len());

        let body = page.body().bounds();
        let above = body.top_left.y - content_bounds().top_left.y;
        assert!(above > 100);
    }

    #[test]
    fn test_background_follows_render_mode() {
        let store = ThemeStore::new();
        let mut page = HistoryPage::new(content_bounds(), &store).unwrap();
        let mut fb = FrameBuffer::new();

        page.draw_page(&mut fb, ThemeMode::Dark).unwrap();
        assert_eq!(fb.pixel(4, 50), Some(INK_950));

        page.draw_page(&mut fb, ThemeMode::Light).unwrap();
        assert_eq!(fb.pixel(4, 50), Some(WHITE));
    }

    #[test]
    fn test_dropped_page_releases_its_subscription() {
        let store = ThemeStore::new();
        let first = HistoryPage::new(content_bounds(), &store).unwrap();
        let second = HistoryPage::new(content_bounds(), &store).unwrap();
        store.toggle();
        assert_eq!(first.theme().notifications(), 1);

        drop(first);
        assert_eq!(store.subscriber_count(), 1);

        store.toggle();
        assert_eq!(second.theme().notifications(), 2);
        assert_eq!(second.theme().observed(), ThemeMode::Dark);
    }
}
