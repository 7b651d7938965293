//! Vertical scroll container for content taller than its viewport

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::theme::ThemeMode;
use crate::ui::core::{Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{GRAY_400, GRAY_500, ModePalettes};

const SCROLLBAR_WIDTH_PX: u32 = 3;
const SCROLLBAR_MIN_HEIGHT_PX: u32 = 20;

const SCROLLBAR_COLORS: ModePalettes<Rgb565> = ModePalettes::new(GRAY_400, GRAY_500);

/// Viewport over a column of content.
///
/// The view only tracks geometry. The owner draws its content shifted by
/// [`ScrollView::content_origin`] and clipped to the viewport, then calls
/// `draw` to overlay the scrollbar.
pub struct ScrollView {
    viewport: Rectangle,
    content_height: u32,
    offset: u32,
    last_touch: Option<TouchPoint>,
}

impl ScrollView {
    pub fn new(viewport: Rectangle, content_height: u32) -> Self {
        Self {
            viewport,
            content_height,
            offset: 0,
            last_touch: None,
        }
    }

    /// Current scroll distance from the top in pixels
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Largest valid offset; zero when the content fits
    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport.size.height)
    }

    pub fn can_scroll(&self) -> bool {
        self.max_offset() > 0
    }

    /// Scroll by `delta` pixels (positive moves content up), clamped to the
    /// valid range. Returns `true` if the offset changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (self.offset as i64 + delta as i64).clamp(0, self.max_offset() as i64) as u32;
        let changed = target != self.offset;
        self.offset = target;
        changed
    }

    /// Screen position of the content's top-left corner
    pub fn content_origin(&self) -> Point {
        self.viewport.top_left - Point::new(0, self.offset as i32)
    }

    /// Forget an in-progress drag. Later drags need a fresh press.
    pub fn cancel_drag(&mut self) {
        self.last_touch = None;
    }

    fn scrollbar(&self) -> Option<Rectangle> {
        if !self.can_scroll() {
            return None;
        }
        let viewport_height = self.viewport.size.height;
        let bar_height =
            (viewport_height * viewport_height / self.content_height).max(SCROLLBAR_MIN_HEIGHT_PX);
        let travel = viewport_height.saturating_sub(bar_height);
        let bar_y = self.viewport.top_left.y
            + (travel as u64 * self.offset as u64 / self.max_offset() as u64) as i32;
        let bar_x =
            self.viewport.top_left.x + self.viewport.size.width as i32 - SCROLLBAR_WIDTH_PX as i32;

        Some(Rectangle::new(
            Point::new(bar_x, bar_y),
            Size::new(SCROLLBAR_WIDTH_PX, bar_height),
        ))
    }
}

impl Drawable for ScrollView {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        if let Some(bar) = self.scrollbar() {
            bar.into_styled(PrimitiveStyle::with_fill(SCROLLBAR_COLORS.resolve(mode)))
                .draw(display)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.viewport
    }
}

impl Touchable for ScrollView {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.viewport.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) => {
                if self.contains_point(point) {
                    self.last_touch = Some(point);
                    TouchResult::Handled
                } else {
                    TouchResult::NotHandled
                }
            }
            TouchEvent::Drag(point) => {
                let Some(last) = self.last_touch else {
                    return TouchResult::NotHandled;
                };
                // Dragging down reveals content above
                self.scroll_by(last.y as i32 - point.y as i32);
                self.last_touch = Some(point);
                TouchResult::Handled
            }
            TouchEvent::Release(_) => {
                if self.last_touch.take().is_some() {
                    TouchResult::Handled
                } else {
                    TouchResult::NotHandled
                }
            }
        }
    }
}
