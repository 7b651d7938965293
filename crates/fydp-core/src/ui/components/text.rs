//! Text components for single-line labels and wrapped paragraphs

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, iso_8859_1};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::{String, Vec};
use log::warn;

use crate::theme::ThemeMode;
use crate::ui::core::Drawable;
use crate::ui::styling::ModePalettes;

/// Maximum bytes in a [`Label`]; longer text is cut at a char boundary
pub const MAX_LABEL_LEN: usize = 48;

/// Maximum characters on one wrapped paragraph line
const MAX_LINE_LEN: usize = 64;

/// Maximum wrapped lines in a [`Paragraph`]
const MAX_LINES: usize = 8;

/// Text size variants
///
/// All sizes use ISO 8859-1 fonts so `°` and `·` render.
/// - `Small`: 6x10 font
/// - `Medium`: 7x13 font
/// - `Large`: 10x20 font
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &iso_8859_1::FONT_6X10,
            TextSize::Medium => &iso_8859_1::FONT_7X13,
            TextSize::Large => &iso_8859_1::FONT_10X20,
        }
    }

    /// Line height in pixels
    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }
}

/// Single line of text anchored inside its bounds.
///
/// The anchor is the top edge of `bounds`; horizontal placement follows the
/// alignment (left edge, centre, or right edge).
pub struct Label {
    bounds: Rectangle,
    text: String<MAX_LABEL_LEN>,
    size: TextSize,
    alignment: Alignment,
    colors: ModePalettes<Rgb565>,
}

impl Label {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize, colors: ModePalettes<Rgb565>) -> Self {
        let mut text_string = String::new();
        for ch in text.chars() {
            if text_string.push(ch).is_err() {
                warn!("Label truncated to {} bytes: {}", MAX_LABEL_LEN, text);
                break;
            }
        }

        Self {
            bounds,
            text: text_string,
            size,
            alignment: Alignment::Left,
            colors,
        }
    }

    /// Set the text alignment (Left, Center, or Right).
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn anchor(&self) -> Point {
        let top = self.bounds.top_left.y;
        match self.alignment {
            Alignment::Left => Point::new(self.bounds.top_left.x, top),
            Alignment::Center => Point::new(self.bounds.center().x, top),
            Alignment::Right => Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32 - 1,
                top,
            ),
        }
    }
}

impl Drawable for Label {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.size.font(), self.colors.resolve(mode));
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(Baseline::Top)
            .build();

        Text::with_text_style(&self.text, self.anchor(), character_style, text_style)
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

/// Word-wrapped, horizontally centred block of text
pub struct Paragraph {
    bounds: Rectangle,
    lines: Vec<String<MAX_LINE_LEN>, MAX_LINES>,
    size: TextSize,
    line_spacing: u32,
    colors: ModePalettes<Rgb565>,
}

impl Paragraph {
    pub fn new(bounds: Rectangle, text: &str, size: TextSize, colors: ModePalettes<Rgb565>) -> Self {
        let mut paragraph = Self {
            bounds,
            lines: Vec::new(),
            size,
            line_spacing: 4,
            colors,
        };
        paragraph.wrap(text);
        paragraph
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Height of the wrapped block in pixels
    pub fn content_height(&self) -> u32 {
        let count = self.lines.len() as u32;
        if count == 0 {
            return 0;
        }
        count * self.size.line_height() + (count - 1) * self.line_spacing
    }

    fn wrap(&mut self, text: &str) {
        let font = self.size.font();
        let advance = (font.character_size.width + font.character_spacing).max(1);
        let max_chars = ((self.bounds.size.width / advance) as usize).min(MAX_LINE_LEN);

        let mut current = String::<MAX_LINE_LEN>::new();
        for word in text.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if needed > max_chars && !current.is_empty() {
                self.lines.push(current.clone()).ok();
                current.clear();
            }
            if !current.is_empty() {
                current.push(' ').ok();
            }
            current.push_str(word).ok();
        }
        if !current.is_empty() {
            self.lines.push(current).ok();
        }
    }
}

impl Drawable for Paragraph {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(self.size.font(), self.colors.resolve(mode));
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let line_height = (self.size.line_height() + self.line_spacing) as i32;
        let x = self.bounds.center().x;
        let bottom = self.bounds.top_left.y + self.bounds.size.height as i32;

        let mut y = self.bounds.top_left.y;
        for line in &self.lines {
            if y >= bottom {
                break;
            }
            Text::with_text_style(line, Point::new(x, y), character_style, text_style)
                .draw(display)?;
            y += line_height;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::styling::{BLACK, WHITE};
    use alloc::vec::Vec as StdVec;

    const INK: ModePalettes<Rgb565> = ModePalettes::new(BLACK, WHITE);

    #[test]
    fn test_paragraph_wraps_on_word_boundaries() {
        // 60 px wide at 6 px per glyph = 10 characters per line
        let bounds = Rectangle::new(Point::zero(), Size::new(60, 100));
        let paragraph = Paragraph::new(bounds, "past sessions, saved data", TextSize::Small, INK);

        let lines: StdVec<&str> = paragraph.lines().collect();
        assert_eq!(lines, ["past", "sessions,", "saved data"]);
        assert_eq!(paragraph.content_height(), 3 * 10 + 2 * 4);
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        let bounds = Rectangle::new(Point::zero(), Size::new(300, 20));
        let paragraph = Paragraph::new(bounds, "History", TextSize::Medium, INK);
        assert_eq!(paragraph.lines().count(), 1);
    }

    #[test]
    fn test_long_label_is_truncated_not_dropped() {
        let bounds = Rectangle::new(Point::zero(), Size::new(300, 20));
        // 30 two-byte characters: the 25th no longer fits in 48 bytes
        let text = "°".repeat(30);
        let label = Label::new(bounds, &text, TextSize::Small, INK);

        assert_eq!(label.text().len(), MAX_LABEL_LEN);
        assert_eq!(label.text().chars().count(), 24);
        assert!(text.starts_with(label.text()));
    }
}
