//! Interactive SDL2 window.
//!
//! SDL events are turned into [`DisplayRequest`]s and posted to a static
//! channel, the same way a touch driver task would feed the display loop on
//! hardware. Each frame drains the channel and runs one tick.

use std::time::{Duration, Instant};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use fydp_core::display_manager::{DisplayManager, DisplayRequest, REQUEST_CAPACITY};
use fydp_core::shell::NavigationShell;
use fydp_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PageId, TouchEvent, TouchPoint};

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Requests from the SDL event pump to the display loop
static REQUESTS: Channel<CriticalSectionRawMutex, DisplayRequest, REQUEST_CAPACITY> =
    Channel::new();

fn keycode_to_page(keycode: Keycode) -> Option<PageId> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(PageId::Dashboard),
        Keycode::Num2 | Keycode::Kp2 => Some(PageId::History),
        Keycode::Num3 | Keycode::Kp3 => Some(PageId::Settings),
        _ => None,
    }
}

fn touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}

fn post(request: DisplayRequest) {
    if REQUESTS.try_send(request).is_err() {
        warn!("Request queue full, dropping {:?}", request);
    }
}

pub fn run(shell: NavigationShell<'_>, scale: u32) {
    info!("Keys: 1=Dashboard  2=History  3=Settings  Q=Quit");

    let display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(scale).build();
    let mut window = Window::new("FYDP Simulator", &output_settings);
    let mut manager = DisplayManager::new(display, shell);
    let receiver = REQUESTS.receiver();

    // The SDL window is created lazily by the first `update()`, which has to
    // happen before `events()` is polled.
    if let Err(e) = manager.tick() {
        error!("Draw error: {:?}", e);
    }
    window.update(manager.display());

    let mut pressed = false;
    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(page) = keycode_to_page(keycode) {
                        post(DisplayRequest::SelectTab(page));
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    pressed = true;
                    post(DisplayRequest::Touch(TouchEvent::Press(touch_point(point))));
                }
                SimulatorEvent::MouseMove { point } if pressed => {
                    post(DisplayRequest::Touch(TouchEvent::Drag(touch_point(point))));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    pressed = false;
                    post(DisplayRequest::Touch(TouchEvent::Release(touch_point(point))));
                }
                _ => {}
            }
        }

        manager.drain(&receiver);
        if let Err(e) = manager.tick() {
            error!("Draw error: {:?}", e);
        }
        // Also pumps SDL events, so it runs every frame
        window.update(manager.display());

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
