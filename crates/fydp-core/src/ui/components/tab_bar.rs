//! Bottom tab bar and the colours shared by the navigator chrome

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_layout::align::{Align, horizontal, vertical};

use crate::theme::ThemeMode;
use crate::ui::components::text::TextSize;
use crate::ui::core::{Action, Drawable, PageId, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{
    BLUE_400, BLUE_600, GRAY_200, GRAY_400, GRAY_500, GRAY_900, INK_800, INK_950, ModePalettes,
    WHITE,
};

/// Height of the strip marking the active tab
const INDICATOR_HEIGHT_PX: u32 = 3;

/// Colours of the header and tab bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeColors {
    pub background: Rgb565,
    pub title: Rgb565,
    pub active: Rgb565,
    pub inactive: Rgb565,
    pub border: Rgb565,
}

const CHROME_COLORS: ModePalettes<ChromeColors> = ModePalettes::new(
    ChromeColors {
        background: WHITE,
        title: GRAY_900,
        active: BLUE_600,
        inactive: GRAY_500,
        border: GRAY_200,
    },
    ChromeColors {
        background: INK_950,
        title: WHITE,
        active: BLUE_400,
        inactive: GRAY_400,
        border: INK_800,
    },
);

impl ChromeColors {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        CHROME_COLORS.resolve(mode)
    }
}

/// One cell per [`PageId`], left to right in [`PageId::ALL`] order.
pub struct TabBar {
    bounds: Rectangle,
    active: PageId,
}

impl TabBar {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            active: PageId::Dashboard,
        }
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    /// Mark `page` as the active tab. Returns `true` if it changed.
    pub fn set_active(&mut self, page: PageId) -> bool {
        let changed = self.active != page;
        self.active = page;
        changed
    }

    /// Touch and draw area of one tab. The last cell absorbs any remainder.
    pub fn tab_bounds(&self, page: PageId) -> Rectangle {
        let count = PageId::ALL.len() as u32;
        let cell_width = self.bounds.size.width / count;
        let index = page.index() as u32;
        let width = if index + 1 == count {
            self.bounds.size.width - cell_width * index
        } else {
            cell_width
        };
        Rectangle::new(
            self.bounds.top_left + Point::new((cell_width * index) as i32, 0),
            Size::new(width, self.bounds.size.height),
        )
    }

    fn page_at(&self, point: TouchPoint) -> Option<PageId> {
        PageId::ALL
            .into_iter()
            .find(|page| self.tab_bounds(*page).contains(point.to_point()))
    }
}

impl Drawable for TabBar {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let colors = ChromeColors::for_mode(mode);

        self.bounds
            .into_styled(PrimitiveStyle::with_fill(colors.background))
            .draw(display)?;

        let top = self.bounds.top_left.y;
        let right = self.bounds.top_left.x + self.bounds.size.width as i32 - 1;
        Line::new(Point::new(self.bounds.top_left.x, top), Point::new(right, top))
            .into_styled(PrimitiveStyle::with_stroke(colors.border, 1))
            .draw(display)?;

        for page in PageId::ALL {
            let cell = self.tab_bounds(page);
            let is_active = page == self.active;
            let color = if is_active { colors.active } else { colors.inactive };

            if is_active {
                Rectangle::new(cell.top_left, Size::new(cell.size.width, INDICATOR_HEIGHT_PX))
                    .into_styled(PrimitiveStyle::with_fill(colors.active))
                    .draw(display)?;
            }

            let style = MonoTextStyle::new(TextSize::Small.font(), color);
            Text::with_baseline(page.title(), Point::zero(), style, Baseline::Top)
                .align_to(&cell, horizontal::Center, vertical::Center)
                .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

impl Touchable for TabBar {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) => match self.page_at(point) {
                Some(page) => TouchResult::Action(Action::SelectTab(page)),
                None => TouchResult::NotHandled,
            },
            _ => TouchResult::NotHandled,
        }
    }
}
