//! Static line chart for a short fixed series.
//!
//! The chart plots samples from zero up to the series maximum with dashed
//! horizontal grid lines, y-axis value labels on the left, and one x-axis
//! label under each sample. Segments are straight lines between samples.

use core::fmt::Write;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::{MonoTextStyle, iso_8859_1::FONT_5X8};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Polyline, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::{String, Vec};

use crate::theme::ThemeMode;
use crate::ui::core::Drawable;
use crate::ui::styling::{BLUE_600, GRAY_200, GRAY_700, INK_900, ModePalettes, SILVER, SKY, WHITE};

/// Width reserved left of the plot for y-axis labels
const Y_LABEL_WIDTH_PX: u32 = 30;

/// Height reserved under the plot for x-axis labels
const X_LABEL_HEIGHT_PX: u32 = 12;

const TOP_INSET_PX: u32 = 4;
const RIGHT_INSET_PX: u32 = 8;

/// Number of horizontal grid bands
const GRID_SEGMENTS: u32 = 4;

const DASH_LENGTH_PX: i32 = 3;
const DASH_GAP_PX: i32 = 6;

const SERIES_LINE_WIDTH_PX: u32 = 2;

/// Maximum samples a chart can plot
pub const MAX_CHART_POINTS: usize = 16;

type LabelStyle = MonoTextStyle<'static, Rgb565>;

/// Colours for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartColors {
    pub background: Rgb565,
    pub line: Rgb565,
    pub grid: Rgb565,
    pub label: Rgb565,
}

const CHART_COLORS: ModePalettes<ChartColors> = ModePalettes::new(
    ChartColors {
        background: WHITE,
        line: BLUE_600,
        grid: GRAY_200,
        label: GRAY_700,
    },
    ChartColors {
        background: INK_900,
        line: SKY,
        grid: GRAY_700,
        label: SILVER,
    },
);

impl ChartColors {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        CHART_COLORS.resolve(mode)
    }
}

pub struct LineChart {
    bounds: Rectangle,
    samples: &'static [f32],
    labels: &'static [&'static str],
}

impl LineChart {
    pub fn new(bounds: Rectangle, samples: &'static [f32], labels: &'static [&'static str]) -> Self {
        Self {
            bounds,
            samples: &samples[..samples.len().min(MAX_CHART_POINTS)],
            labels,
        }
    }

    /// Top of the value axis. Falls back to 1.0 for empty or non-positive
    /// series so the scale never divides by zero.
    pub fn y_max(&self) -> f32 {
        let max = self.samples.iter().copied().fold(f32::MIN, f32::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Area inside the label gutters where the series is drawn
    pub fn plot_area(&self) -> Rectangle {
        let size = self.bounds.size;
        let width = size.width.saturating_sub(Y_LABEL_WIDTH_PX + RIGHT_INSET_PX);
        let height = size.height.saturating_sub(TOP_INSET_PX + X_LABEL_HEIGHT_PX);
        Rectangle::new(
            self.bounds.top_left + Point::new(Y_LABEL_WIDTH_PX as i32, TOP_INSET_PX as i32),
            Size::new(width, height),
        )
    }

    /// Screen position of sample `index`
    pub fn point_for(&self, index: usize) -> Option<Point> {
        let value = *self.samples.get(index)?;
        let plot = self.plot_area();
        let span_x = plot.size.width.saturating_sub(1) as f32;
        let span_y = plot.size.height.saturating_sub(1) as f32;

        let x = if self.samples.len() > 1 {
            plot.top_left.x + round(span_x * index as f32 / (self.samples.len() - 1) as f32)
        } else {
            plot.center().x
        };

        let ratio = (value / self.y_max()).clamp(0.0, 1.0);
        let bottom = plot.top_left.y + span_y as i32;
        let y = bottom - round(span_y * ratio);

        Some(Point::new(x, y))
    }

    fn grid_y(&self, step: u32) -> i32 {
        let plot = self.plot_area();
        let span_y = plot.size.height.saturating_sub(1) as f32;
        plot.top_left.y + round(span_y * step as f32 / GRID_SEGMENTS as f32)
    }

    fn draw_grid<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        colors: &ChartColors,
    ) -> Result<(), D::Error> {
        let plot = self.plot_area();
        let left = plot.top_left.x;
        let right = left + plot.size.width as i32;
        let style = PrimitiveStyle::with_stroke(colors.grid, 1);

        for step in 0..=GRID_SEGMENTS {
            let y = self.grid_y(step);
            let mut x = left;
            while x < right {
                let end = (x + DASH_LENGTH_PX - 1).min(right - 1);
                Line::new(Point::new(x, y), Point::new(end, y))
                    .into_styled(style)
                    .draw(display)?;
                x += DASH_LENGTH_PX + DASH_GAP_PX;
            }
        }
        Ok(())
    }

    /// Value label for grid line `step`, right-aligned against the plot.
    ///
    /// Labels are centred on their grid line except the baseline one, which
    /// sits above it to stay clear of the first x label.
    fn y_label<'t>(
        &self,
        step: u32,
        text: &'t str,
        character_style: LabelStyle,
    ) -> Text<'t, LabelStyle> {
        let baseline = if step == GRID_SEGMENTS {
            Baseline::Bottom
        } else {
            Baseline::Middle
        };
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(baseline)
            .build();
        let anchor = Point::new(self.plot_area().top_left.x - 4, self.grid_y(step));
        Text::with_text_style(text, anchor, character_style, text_style)
    }

    /// Label under sample `index`
    fn x_label(&self, index: usize, character_style: LabelStyle) -> Option<Text<'static, LabelStyle>> {
        let label: &'static str = self.labels.get(index).copied()?;
        let point = self.point_for(index)?;
        let plot = self.plot_area();
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let anchor = Point::new(point.x, plot.top_left.y + plot.size.height as i32 + 2);
        Some(Text::with_text_style(label, anchor, character_style, text_style))
    }

    fn draw_labels<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        colors: &ChartColors,
    ) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(&FONT_5X8, colors.label);

        let y_max = self.y_max();
        for step in 0..=GRID_SEGMENTS {
            let value = y_max * (GRID_SEGMENTS - step) as f32 / GRID_SEGMENTS as f32;
            let mut text: String<16> = String::new();
            write!(text, "{:.1}", value).ok();
            self.y_label(step, &text, character_style).draw(display)?;
        }

        for index in 0..self.labels.len() {
            let Some(label) = self.x_label(index, character_style) else {
                break;
            };
            label.draw(display)?;
        }
        Ok(())
    }
}

impl Drawable for LineChart {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let colors = ChartColors::for_mode(mode);

        self.bounds
            .into_styled(PrimitiveStyle::with_fill(colors.background))
            .draw(display)?;
        self.draw_grid(display, &colors)?;
        self.draw_labels(display, &colors)?;

        let points: Vec<Point, MAX_CHART_POINTS> =
            (0..self.samples.len()).filter_map(|index| self.point_for(index)).collect();
        if points.len() > 1 {
            Polyline::new(&points)
                .into_styled(PrimitiveStyle::with_stroke(colors.line, SERIES_LINE_WIDTH_PX))
                .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

/// Round half away from zero for non-negative pixel spans
fn round(value: f32) -> i32 {
    (value + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::sample_data::{SAMPLE_LABELS, SENSOR_SERIES};

    const FLAT: [f32; 3] = [0.0, 0.0, 0.0];

    fn chart() -> LineChart {
        LineChart::new(
            Rectangle::new(Point::new(0, 0), Size::new(138, 116)),
            &SENSOR_SERIES[0].samples,
            &SAMPLE_LABELS,
        )
    }

    #[test]
    fn test_y_max_is_series_maximum() {
        assert_eq!(chart().y_max(), 22.0);
    }

    #[test]
    fn test_y_max_falls_back_for_flat_series() {
        let flat = LineChart::new(Rectangle::new(Point::zero(), Size::new(100, 60)), &FLAT, &[]);
        assert_eq!(flat.y_max(), 1.0);
        // Zero samples sit on the baseline
        let plot = flat.plot_area();
        assert_eq!(
            flat.point_for(0).map(|p| p.y),
            Some(plot.top_left.y + plot.size.height as i32 - 1)
        );
    }

    #[test]
    fn test_points_span_plot_area() {
        let chart = chart();
        let plot = chart.plot_area();
        assert_eq!(plot, Rectangle::new(Point::new(30, 4), Size::new(100, 100)));

        let first = chart.point_for(0).unwrap();
        let last = chart.point_for(6).unwrap();
        assert_eq!(first.x, 30);
        assert_eq!(last.x, 129);
        // The maximum sample touches the top of the plot
        assert_eq!(chart.point_for(5).unwrap().y, 4);
        assert!(chart.point_for(7).is_none());
    }

    #[test]
    fn test_draw_fills_background_for_mode() {
        let chart = chart();
        let mut fb = FrameBuffer::new();

        chart.draw(&mut fb, ThemeMode::Dark).unwrap();
        assert_eq!(fb.pixel(137, 0), Some(INK_900));

        chart.draw(&mut fb, ThemeMode::Light).unwrap();
        assert_eq!(fb.pixel(137, 0), Some(WHITE));
    }

    #[test]
    fn test_baseline_value_label_clears_first_x_label() {
        let chart = chart();
        let style = MonoTextStyle::new(&FONT_5X8, WHITE);

        let zero = chart.y_label(GRID_SEGMENTS, "0.0", style).bounding_box();
        let first = chart.x_label(0, style).unwrap().bounding_box();
        assert!(zero.intersection(&first).is_zero_sized());

        // Still attached to the baseline grid line
        let baseline = chart.grid_y(GRID_SEGMENTS);
        assert_eq!(zero.top_left.y + zero.size.height as i32 - 1, baseline);
    }
}
