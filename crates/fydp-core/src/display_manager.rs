//! Display manager: owns the draw target and the navigator.
//!
//! Input sources (touch driver, simulator window, key bindings) never touch
//! the shell directly. They post [`DisplayRequest`]s into an `embassy-sync`
//! channel; the display loop drains it and then runs one [`tick`].
//!
//! [`tick`]: DisplayManager::tick

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::debug;

use crate::shell::NavigationShell;
use crate::ui::{PageId, TouchEvent};

/// Suggested channel capacity for display requests
pub const REQUEST_CAPACITY: usize = 8;

/// Request for the display loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayRequest {
    /// Switch to a tab without a touch (key binding, test harness)
    SelectTab(PageId),
    /// Route a touch event through the navigator
    Touch(TouchEvent),
    /// Repaint everything on the next tick
    Redraw,
}

pub struct DisplayManager<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    display: D,
    shell: NavigationShell<'a>,
}

impl<'a, D> DisplayManager<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(display: D, shell: NavigationShell<'a>) -> Self {
        Self { display, shell }
    }

    /// Apply one request to the navigator. Drawing waits for the next tick.
    pub fn process(&mut self, request: DisplayRequest) {
        debug!("Processing request: {:?}", request);
        match request {
            DisplayRequest::SelectTab(page) => {
                self.shell.select_tab(page);
            }
            DisplayRequest::Touch(event) => {
                self.shell.handle_touch(event);
            }
            DisplayRequest::Redraw => self.shell.invalidate(),
        }
    }

    /// Apply every request currently queued without waiting for more.
    /// Returns how many were processed.
    pub fn drain<M: RawMutex, const N: usize>(
        &mut self,
        receiver: &Receiver<'_, M, DisplayRequest, N>,
    ) -> usize {
        let mut processed = 0;
        while let Ok(request) = receiver.try_receive() {
            self.process(request);
            processed += 1;
        }
        processed
    }

    /// Update every screen, then draw whatever became dirty.
    /// Returns `true` if the display was written to.
    pub fn tick(&mut self) -> Result<bool, D::Error> {
        self.shell.update();
        self.shell.render(&mut self.display)
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn shell(&self) -> &NavigationShell<'a> {
        &self.shell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::pages::{Page, PageWrapper};
    use crate::theme::{ThemeMode, ThemeStore};
    use crate::ui::TouchPoint;
    use crate::ui::styling::{INK_950, WHITE};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    fn manager(store: &ThemeStore) -> DisplayManager<'_, FrameBuffer> {
        let shell = NavigationShell::new(store).unwrap();
        DisplayManager::new(FrameBuffer::new(), shell)
    }

    #[test]
    fn test_first_tick_draws_everything() {
        let store = ThemeStore::new();
        let mut manager = manager(&store);

        assert!(manager.tick().unwrap());
        assert_eq!(manager.display().pixel(0, 0), Some(INK_950));
        assert!(!manager.tick().unwrap());
    }

    #[test]
    fn test_drain_applies_queued_requests_in_order() {
        let store = ThemeStore::new();
        let mut manager = manager(&store);
        let channel: Channel<NoopRawMutex, DisplayRequest, REQUEST_CAPACITY> = Channel::new();

        channel.try_send(DisplayRequest::SelectTab(PageId::History)).unwrap();
        channel.try_send(DisplayRequest::SelectTab(PageId::Settings)).unwrap();

        assert_eq!(manager.drain(&channel.receiver()), 2);
        assert_eq!(manager.shell().active_page_id(), PageId::Settings);
        assert_eq!(manager.drain(&channel.receiver()), 0);
    }

    #[test]
    fn test_touch_on_switch_flips_theme_and_repaints() {
        let store = ThemeStore::new();
        let mut manager = manager(&store);
        manager.process(DisplayRequest::SelectTab(PageId::Settings));
        manager.tick().unwrap();

        let PageWrapper::Settings(settings) = manager.shell().page(PageId::Settings) else {
            unreachable!("settings lives at its own index");
        };
        let center = settings.switch_bounds().center();
        let touch = TouchPoint::new(center.x as u16, center.y as u16);
        manager.process(DisplayRequest::Touch(TouchEvent::Press(touch)));

        assert_eq!(store.mode(), ThemeMode::Light);
        assert!(manager.tick().unwrap());
        assert_eq!(manager.display().pixel(0, 0), Some(WHITE));
        assert!(manager.shell().page(PageId::Dashboard).is_dirty());
    }

    #[test]
    fn test_redraw_request_forces_repaint() {
        let store = ThemeStore::new();
        let mut manager = manager(&store);
        manager.tick().unwrap();

        manager.process(DisplayRequest::Redraw);
        assert!(manager.tick().unwrap());
    }
}
