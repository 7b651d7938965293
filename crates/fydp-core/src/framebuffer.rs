//! Off-screen frame with change tracking.
//!
//! The shell renders into this buffer; only the bounding box of pixels that
//! actually changed is pushed to the real display on [`FrameBuffer::flush`].
//! A theme flip therefore repaints the whole panel, while a redraw that lands
//! on identical colours flushes nothing.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;
const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Bounding box of pixels changed since the last flush, inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

/// Portrait 320x480 RGB565 frame implementing `DrawTarget`.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a black frame with nothing pending.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; PIXEL_COUNT],
            dirty: None,
        }
    }

    /// Colour at `(x, y)`, or `None` off-panel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        Some(self.pixels[y as usize * WIDTH + x as usize])
    }

    /// Region changed since the last flush, clearing it.
    pub fn take_dirty(&mut self) -> Option<Rectangle> {
        self.dirty.take().map(DirtyRect::to_rectangle)
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * WIDTH + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Push the changed region to `display` and reset tracking.
    ///
    /// Returns the flushed area, or `None` when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<Option<Rectangle>, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(None);
        };

        let area = rect.to_rectangle();
        debug!(
            "Flushing {}x{} region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let width = rect.max_x - rect.min_x + 1;
        let rows = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let start = y * WIDTH + rect.min_x;
            pixels[start..start + width].iter().copied()
        });

        display.fill_contiguous(&area, rows)?;
        Ok(Some(area))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0 && coord.y >= 0 && (coord.x as usize) < WIDTH && (coord.y as usize) < HEIGHT {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Walk the unclamped area so the colour stream stays in step with
        // pixels that fall off-panel.
        let mut colors = colors.into_iter();
        for row in 0..area.size.height as i32 {
            let y = area.top_left.y + row;
            for col in 0..area.size.width as i32 {
                let x = area.top_left.x + col;
                let Some(color) = colors.next() else {
                    return Ok(());
                };
                if x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let visible = area.intersection(&self.bounding_box());
        if visible.is_zero_sized() {
            return Ok(());
        }

        let x_start = visible.top_left.x as usize;
        let y_start = visible.top_left.y as usize;
        let x_end = x_start + visible.size.width as usize;
        let y_end = y_start + visible.size.height as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::{BLUE_600, WHITE};

    #[test]
    fn test_new_frame_is_clean_and_black() {
        let mut fb = FrameBuffer::new();
        assert_eq!(fb.pixel(0, 0), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(319, 479), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(320, 0), None);
        assert_eq!(fb.pixel(-1, 0), None);
        assert_eq!(fb.take_dirty(), None);
    }

    #[test]
    fn test_dirty_box_covers_changed_pixels_only() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(&Rectangle::new(Point::new(10, 20), Size::new(5, 3)), WHITE)
            .unwrap();
        assert_eq!(
            fb.take_dirty(),
            Some(Rectangle::new(Point::new(10, 20), Size::new(5, 3)))
        );

        // Same colour again changes nothing
        fb.fill_solid(&Rectangle::new(Point::new(10, 20), Size::new(5, 3)), WHITE)
            .unwrap();
        assert_eq!(fb.take_dirty(), None);
    }

    #[test]
    fn test_fill_solid_clamps_negative_origin() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(&Rectangle::new(Point::new(-4, -4), Size::new(6, 6)), WHITE)
            .unwrap();
        assert_eq!(fb.pixel(0, 0), Some(WHITE));
        assert_eq!(fb.pixel(1, 1), Some(WHITE));
        assert_eq!(fb.pixel(2, 2), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_fill_contiguous_keeps_stream_aligned_when_clipped() {
        let mut fb = FrameBuffer::new();
        let colors = [WHITE, BLUE_600, WHITE, BLUE_600];
        fb.fill_contiguous(&Rectangle::new(Point::new(-1, 0), Size::new(2, 2)), colors)
            .unwrap();
        assert_eq!(fb.pixel(0, 0), Some(BLUE_600));
        assert_eq!(fb.pixel(0, 1), Some(BLUE_600));
    }

    #[test]
    fn test_flush_copies_dirty_region() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(2, 2)), WHITE)
            .unwrap();

        let mut target = FrameBuffer::new();
        let flushed = fb.flush(&mut target).unwrap();
        assert_eq!(flushed, Some(Rectangle::new(Point::new(2, 2), Size::new(2, 2))));
        assert_eq!(target.pixel(3, 3), Some(WHITE));
        assert_eq!(fb.flush(&mut target).unwrap(), None);
    }
}
