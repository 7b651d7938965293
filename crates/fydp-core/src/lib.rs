//! Hardware-independent core library for the FYDP data monitor
//!
//! This crate contains the platform-agnostic pieces of the dashboard shell:
//! the theme store and its consumers, UI components, the three screens, the
//! tab navigation shell and the display manager that drives them.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod display_manager;
pub mod framebuffer;
pub mod pages;
pub mod sample_data;
pub mod shell;
pub mod theme;
pub mod ui;
