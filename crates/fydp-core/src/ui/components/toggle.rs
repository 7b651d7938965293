//! Two-state switch bound to the theme mode

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};

use crate::theme::ThemeMode;
use crate::ui::core::{Action, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};
use crate::ui::styling::{BLUE_400, BLUE_600, GRAY_400};

/// Default switch size in pixels
pub const SWITCH_SIZE: Size = Size::new(48, 26);

/// Gap between thumb and track edge
const THUMB_INSET_PX: u32 = 3;

const TRACK_ON: Rgb565 = BLUE_600;
const TRACK_OFF: Rgb565 = GRAY_400;
const THUMB: Rgb565 = BLUE_400;

/// Switch whose value is "dark mode on".
///
/// The switch holds no value of its own: it is drawn from the mode of the
/// render pass, and a press asks for [`Action::ToggleTheme`]. The visible
/// state only changes once the store has flipped and the page redraws.
pub struct ToggleSwitch {
    bounds: Rectangle,
}

impl ToggleSwitch {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    /// Whether the switch reads "on" for `mode`
    pub fn value(mode: ThemeMode) -> bool {
        mode.is_dark()
    }

    fn thumb_bounds(&self, on: bool) -> Rectangle {
        let diameter = self.bounds.size.height.saturating_sub(2 * THUMB_INSET_PX);
        let y = self.bounds.top_left.y + THUMB_INSET_PX as i32;
        let x = if on {
            self.bounds.top_left.x + self.bounds.size.width as i32
                - THUMB_INSET_PX as i32
                - diameter as i32
        } else {
            self.bounds.top_left.x + THUMB_INSET_PX as i32
        };
        Rectangle::new(Point::new(x, y), Size::new(diameter, diameter))
    }
}

impl Drawable for ToggleSwitch {
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        mode: ThemeMode,
    ) -> Result<(), D::Error> {
        let on = Self::value(mode);
        let radius = self.bounds.size.height / 2;
        let track = if on { TRACK_ON } else { TRACK_OFF };

        RoundedRectangle::with_equal_corners(self.bounds, Size::new(radius, radius))
            .into_styled(PrimitiveStyle::with_fill(track))
            .draw(display)?;

        let thumb = self.thumb_bounds(on);
        Circle::new(thumb.top_left, thumb.size.width)
            .into_styled(PrimitiveStyle::with_fill(THUMB))
            .draw(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }
}

impl Touchable for ToggleSwitch {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        match event {
            TouchEvent::Press(point) if self.contains_point(point) => {
                TouchResult::Action(Action::ToggleTheme)
            }
            _ => TouchResult::NotHandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn switch() -> ToggleSwitch {
        ToggleSwitch::new(Rectangle::new(Point::new(200, 100), SWITCH_SIZE))
    }

    #[test]
    fn test_value_tracks_mode() {
        assert!(ToggleSwitch::value(ThemeMode::Dark));
        assert!(!ToggleSwitch::value(ThemeMode::Light));
    }

    #[test]
    fn test_press_requests_toggle() {
        let mut toggle = switch();
        let inside = TouchEvent::Press(TouchPoint::new(210, 110));
        assert_eq!(
            toggle.handle_touch(inside),
            TouchResult::Action(Action::ToggleTheme)
        );
    }

    #[test]
    fn test_press_outside_and_drag_are_ignored() {
        let mut toggle = switch();
        assert_eq!(
            toggle.handle_touch(TouchEvent::Press(TouchPoint::new(10, 10))),
            TouchResult::NotHandled
        );
        assert_eq!(
            toggle.handle_touch(TouchEvent::Drag(TouchPoint::new(210, 110))),
            TouchResult::NotHandled
        );
    }

    #[test]
    fn test_thumb_sits_right_when_on() {
        let toggle = switch();
        let on = toggle.thumb_bounds(true);
        let off = toggle.thumb_bounds(false);
        assert!(on.top_left.x > off.top_left.x);
        assert_eq!(off.top_left.x, 203);
        assert_eq!(on.size, Size::new(20, 20));
    }
}
