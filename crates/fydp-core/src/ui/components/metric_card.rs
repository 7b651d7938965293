//! Dashboard card: title, latest value, chart and footer for one series.

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, RoundedRectangle};
use embedded_graphics::text::Alignment;
use heapless::String;

use crate::sample_data::{SAMPLE_LABELS, SensorSeries};
use crate::theme::ThemeMode;
use crate::ui::components::line_chart::LineChart;
use crate::ui::components::text::{Label, TextSize};
use crate::ui::core::Drawable;
use crate::ui::styling::{
    BLUE_400, BLUE_600, GRAY_200, GRAY_400, GRAY_500, GRAY_900, INK_800, INK_900, ModePalettes,
    Padding, WHITE,
};

/// Total card height in pixels
pub const CARD_HEIGHT_PX: u32 = 176;

const CARD_PADDING: Padding = Padding::all(10);
const CORNER_RADIUS_PX: u32 = 10;
const CHART_HEIGHT_PX: u32 = 116;

/// Gap between the title row and the chart, and the chart and the footer
const SECTION_GAP_PX: u32 = 4;

/// Colours for one card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardColors {
    pub background: Rgb565,
    pub title: Rgb565,
    pub accent: Rgb565,
    pub footer: Rgb565,
    pub faint: Rgb565,
    pub border: Rgb565,
}

const CARD_COLORS: ModePalettes<CardColors> = ModePalettes::new(
    CardColors {
        background: WHITE,
        title: GRAY_900,
        accent: BLUE_600,
        footer: GRAY_500,
        faint: GRAY_400,
        border: GRAY_200,
    },
    CardColors {
        background: INK_900,
        title: GRAY_200,
        accent: BLUE_400,
        footer: GRAY_400,
        faint: GRAY_500,
        border: INK_800,
    },
);

impl CardColors {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        CARD_COLORS.resolve(mode)
    }
}

pub struct MetricCard {
    bounds: Rectangle,
    title: Label,
    latest: Label,
    chart: LineChart,
    sample_note: Label,
    source_note: Label,
}

impl MetricCard {
    /// Lay out a card of width `width` with its top-left at `origin`.
    pub fn new(origin: Point, width: u32, series: &'static SensorSeries) -> Self {
        let bounds = Rectangle::new(origin, Size::new(width, CARD_HEIGHT_PX));
        let inner_width = width.saturating_sub(CARD_PADDING.horizontal());
        let left = origin.x + CARD_PADDING.left as i32;
        let mut y = origin.y + CARD_PADDING.top as i32;

        let row_height = TextSize::Medium.line_height();
        let row = Rectangle::new(Point::new(left, y), Size::new(inner_width, row_height));
        let title = Label::new(
            row,
            series.title,
            TextSize::Medium,
            ModePalettes::new(CARD_COLORS.light.title, CARD_COLORS.dark.title),
        );

        let mut latest_text: String<24> = String::new();
        write!(latest_text, "Latest: {:.1}", series.latest()).ok();
        // Bottom-aligned with the title row
        let latest_row = Rectangle::new(
            Point::new(left, y + (row_height - TextSize::Small.line_height()) as i32),
            Size::new(inner_width, TextSize::Small.line_height()),
        );
        let latest = Label::new(
            latest_row,
            &latest_text,
            TextSize::Small,
            ModePalettes::new(CARD_COLORS.light.accent, CARD_COLORS.dark.accent),
        )
        .with_alignment(Alignment::Right);
        y += (row_height + SECTION_GAP_PX) as i32;

        let chart = LineChart::new(
            Rectangle::new(Point::new(left, y), Size::new(inner_width, CHART_HEIGHT_PX)),
            &series.samples,
            &SAMPLE_LABELS,
        );
        y += (CHART_HEIGHT_PX + SECTION_GAP_PX) as i32;

        let footer = Rectangle::new(
            Point::new(left, y),
            Size::new(inner_width, TextSize::Small.line_height()),
        );
        let sample_note = Label::new(
            footer,
            "Last 7 samples",
            TextSize::Small,
            ModePalettes::new(CARD_COLORS.light.footer, CARD_COLORS.dark.footer),
        );
        let source_note = Label::new(
            footer,
            "Demo data (hardcoded)",
            TextSize::Small,
            ModePalettes::new(CARD_COLORS.light.faint, CARD_COLORS.dark.faint),
        )
        .with_alignment(Alignment::Right);

        Self {
            bounds,
            title,
            latest,
            chart,
            sample_note,
            source_note,
        }
    }

    pub fn title(&self) -> &str {
        self.title.text()
    }

    pub fn latest_text(&self) -> &str {
        self.latest.text()
    }

    pub fn chart(&self) -> &LineChart {
        &self.chart
    }
}

impl Drawable for MetricCard {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let colors = CardColors::for_mode(mode);
        let style = PrimitiveStyleBuilder::new()
            .fill_color(colors.background)
            .stroke_color(colors.border)
            .stroke_width(1)
            .build();

        RoundedRectangle::with_equal_corners(
            self.bounds,
            Size::new(CORNER_RADIUS_PX, CORNER_RADIUS_PX),
        )
        .into_styled(style)
        .draw(display)?;

        self.title.draw(display, mode)?;
        self.latest.draw(display, mode)?;
        self.chart.draw(display, mode)?;
        self.sample_note.draw(display, mode)?;
        self.source_note.draw(display, mode)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::sample_data::SENSOR_SERIES;

    #[test]
    fn test_latest_value_formatting() {
        let card = MetricCard::new(Point::new(12, 0), 296, &SENSOR_SERIES[1]);
        assert_eq!(card.title(), "Sensor 2 · Position (mm)");
        assert_eq!(card.latest_text(), "Latest: 39.0");
    }

    #[test]
    fn test_chart_sits_inside_card() {
        let card = MetricCard::new(Point::new(12, 100), 296, &SENSOR_SERIES[0]);
        let chart = card.chart().bounds();
        let card_bounds = card.bounds();

        assert_eq!(chart.size, Size::new(276, CHART_HEIGHT_PX));
        assert!(card_bounds.contains(chart.top_left));
        assert!(card_bounds.contains(chart.bottom_right().unwrap()));
    }

    #[test]
    fn test_card_colors_follow_mode() {
        let card = MetricCard::new(Point::new(12, 0), 296, &SENSOR_SERIES[2]);
        let mut fb = FrameBuffer::new();

        card.draw(&mut fb, ThemeMode::Dark).unwrap();
        // Inside the rounded corner, left padding column
        assert_eq!(fb.pixel(16, 60), Some(INK_900));

        card.draw(&mut fb, ThemeMode::Light).unwrap();
        assert_eq!(fb.pixel(16, 60), Some(WHITE));
    }
}
