//! Occupancy-limited access controller.
//!
//! This library holds everything that does not touch a pin: the occupancy
//! pool, input debouncing, the display command queue, the four actors and
//! the display dispatcher. It builds `no_std` for the firmware and with
//! `std` for host tests.
//!
//! Usage: `cargo test --lib` / `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and supplies the board drivers behind the `ui` traits.

#![cfg_attr(not(test), no_std)]

// Must stay first: the logging macros are textually scoped.
#[macro_use]
mod fmt;

pub mod actors;
pub mod command;
pub mod config;
pub mod debounce;
pub mod error;
pub mod occupancy;
pub mod ui;

pub use command::{CommandQueue, DisplayCommand};
pub use error::{Error, InitError};
pub use occupancy::{OccupancyPool, OccupancySnapshot};
