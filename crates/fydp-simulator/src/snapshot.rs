//! Headless rendering of every screen to PNG files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, error};

use fydp_core::display_manager::{DisplayManager, DisplayRequest};
use fydp_core::shell::NavigationShell;
use fydp_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PageId};

/// Render each tab in the current mode, flip the theme, and render them
/// again. Files are named `{route}-{mode}.png`. Returns the count written.
pub fn write_all(shell: NavigationShell<'_>, dir: &Path, scale: u32) -> anyhow::Result<usize> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let store = shell.store();
    let display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let mut manager = DisplayManager::new(display, shell);
    let output_settings = OutputSettingsBuilder::new().scale(scale).build();

    let mut written = 0;
    for pass in 0..2 {
        if pass > 0 {
            // There is no touch input here, so flip the store directly
            store.toggle();
        }
        let mode = store.mode();

        for page in PageId::ALL {
            manager.process(DisplayRequest::SelectTab(page));
            manager.process(DisplayRequest::Redraw);
            if let Err(e) = manager.tick() {
                error!("Draw error: {:?}", e);
            }

            let path = dir.join(format!("{}-{}.png", page.route(), mode));
            manager
                .display()
                .to_rgb_output_image(&output_settings)
                .save_png(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            debug!("Wrote {}", path.display());
            written += 1;
        }
    }

    Ok(written)
}
