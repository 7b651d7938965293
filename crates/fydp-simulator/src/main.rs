//! Desktop simulator for the FYDP data monitor.
//!
//! Renders the fydp-core navigator at panel resolution (320x480) either into
//! an SDL2 window (feature `window`) or, with `--snapshot <DIR>`, into one PNG
//! per screen and theme mode.
//!
//! # Key bindings (window mode)
//!
//! | Key    | Action          |
//! |--------|-----------------|
//! | 1      | Dashboard tab   |
//! | 2      | History tab     |
//! | 3      | Settings tab    |
//! | Q, Esc | Quit            |
//!
//! Mouse press, drag and release are forwarded as touch events.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use log::info;

use fydp_core::shell::NavigationShell;
use fydp_core::theme::ThemeStore;
use fydp_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

mod snapshot;
#[cfg(feature = "window")]
mod window;

#[derive(Debug, Parser)]
#[command(name = "fydp-simulator", version, about = "Desktop simulator for the FYDP data monitor")]
struct Args {
    /// Pixel scale of the window and of written snapshots
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=8))]
    scale: u32,

    /// Write a PNG of every screen in both modes into DIR, then exit
    #[arg(long, value_name = "DIR")]
    snapshot: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Starting FYDP simulator");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, args.scale
    );

    // One store for the whole run; every screen borrows it.
    let store = ThemeStore::new();
    let shell = NavigationShell::new(&store).map_err(|e| anyhow!("building navigator: {e}"))?;

    if let Some(dir) = args.snapshot {
        let written = snapshot::write_all(shell, &dir, args.scale)?;
        info!("Wrote {} snapshots to {}", written, dir.display());
        return Ok(());
    }

    run_window(shell, args.scale)
}

#[cfg(feature = "window")]
fn run_window(shell: NavigationShell<'_>, scale: u32) -> anyhow::Result<()> {
    window::run(shell, scale);
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_window(_shell: NavigationShell<'_>, _scale: u32) -> anyhow::Result<()> {
    anyhow::bail!("built without the `window` feature; pass --snapshot <DIR> or rebuild with --features window")
}
