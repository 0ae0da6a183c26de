//! Board drivers for the BitDogLab RP2040 board.
//!
//! Each driver adapts one peripheral to a trait from `occupancy_gate::ui`
//! or `occupancy_gate::debounce`; nothing here knows about occupancy.

pub mod buttons;
pub mod buzzer;
pub mod display;
pub mod indicator;
pub mod matrix;
