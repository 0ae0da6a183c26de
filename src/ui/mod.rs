//! User interface subsystem - everything the occupancy state is shown on.
//!
//! The dispatcher task is the only writer. It owns (behind a lock) three
//! surfaces and updates them together from one [`frame::Frame`]:
//!
//! - **Status surface**: SSD1306 128×64 OLED (stats screen / avatar screen)
//! - **Indicator**: discrete RGB LED
//! - **Matrix**: 5×5 WS2812 pixel matrix
//!
//! The buzzer is not part of the render path; actors play tones on it
//! directly through [`crate::actors::SharedBuzzer`].
//!
//! Board drivers implement the traits below; the core never touches pins.

pub mod dispatcher;
pub mod frame;
pub mod glyphs;


use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::Error;

/// Occupancy classification shared by every surface in a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// Nobody inside.
    Empty,
    /// Between one person and two places short of full.
    Normal,
    /// One place left.
    NearlyFull,
    /// No place left.
    Full,
}

impl Band {
    pub fn classify(used: u8, capacity: u8) -> Self {
        if used == 0 {
            Band::Empty
        } else if used >= capacity {
            Band::Full
        } else if used == capacity - 1 {
            Band::NearlyFull
        } else {
            Band::Normal
        }
    }

    /// Status-screen label.
    pub fn label(self) -> &'static str {
        match self {
            Band::Empty => "EMPTY",
            Band::Normal => "NORMAL",
            Band::NearlyFull => "FILLING",
            Band::Full => "FULL",
        }
    }

    pub fn indicator(self) -> IndicatorColor {
        match self {
            Band::Empty => IndicatorColor::BLUE,
            Band::Normal => IndicatorColor::GREEN,
            Band::NearlyFull => IndicatorColor::YELLOW,
            Band::Full => IndicatorColor::RED,
        }
    }
}

/// On/off state of each channel of the discrete RGB LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorColor {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl IndicatorColor {
    pub const BLUE: Self = Self::new(false, false, true);
    pub const GREEN: Self = Self::new(false, true, false);
    /// Red and green together.
    pub const YELLOW: Self = Self::new(true, true, false);
    pub const RED: Self = Self::new(true, false, false);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    pub fn name(self) -> &'static str {
        match (self.red, self.green, self.blue) {
            (false, false, true) => "BLUE",
            (false, true, false) => "GREEN",
            (true, true, false) => "YELLOW",
            (true, false, false) => "RED",
            _ => "MIXED",
        }
    }
}

/// 24-bit pixel colour for the matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const SILVER: Self = Self::new(192, 192, 192);
    pub const GRAY: Self = Self::new(40, 35, 35);
    pub const VIOLET: Self = Self::new(130, 0, 130);
    pub const BLUE: Self = Self::new(0, 0, 200);
    pub const BROWN: Self = Self::new(30, 10, 10);
    pub const GREEN: Self = Self::new(0, 150, 0);
    pub const GOLD: Self = Self::new(218, 165, 32);
    pub const ORANGE: Self = Self::new(255, 65, 0);
    pub const YELLOW: Self = Self::new(255, 140, 0);
    pub const RED: Self = Self::new(190, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Screen mode flags read at render time.
///
/// Only the dispatcher writes these, so plain load/store is enough
/// (the RP2040 has no atomic read-modify-write anyway).
pub struct UiMode {
    stats_screen: AtomicBool,
    banner: AtomicBool,
}

/// Copy of [`UiMode`] taken at the start of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSnapshot {
    pub stats_screen_active: bool,
    pub banner_visible: bool,
}

impl UiMode {
    /// Stats screen shown, banner hidden.
    pub const fn new() -> Self {
        Self {
            stats_screen: AtomicBool::new(true),
            banner: AtomicBool::new(false),
        }
    }

    /// Flip the screen and return whether the stats screen is now active.
    pub fn toggle_screen(&self) -> bool {
        let next = !self.stats_screen.load(Ordering::Relaxed);
        self.stats_screen.store(next, Ordering::Relaxed);
        next
    }

    pub fn set_banner(&self, visible: bool) {
        self.banner.store(visible, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ModeSnapshot {
        ModeSnapshot {
            stats_screen_active: self.stats_screen.load(Ordering::Relaxed),
            banner_visible: self.banner.load(Ordering::Relaxed),
        }
    }
}

impl Default for UiMode {
    fn default() -> Self {
        Self::new()
    }
}

/// Monochrome text/graphics display with an off-screen buffer.
pub trait StatusSurface {
    /// Clear the buffer.
    fn clear(&mut self);
    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    /// Push the buffer to the panel.
    fn flush(&mut self) -> Result<(), Error>;
}

/// Discrete three-channel LED.
pub trait Indicator {
    fn set(&mut self, red: bool, green: bool, blue: bool);
}

/// Raw 5×5 pixel sink, pixels in wire order.
#[allow(async_fn_in_trait)]
pub trait PixelMatrix {
    async fn write(&mut self, pixels: &[Rgb; glyphs::MATRIX_PIXELS]);
}

/// Piezo buzzer. Both calls return immediately; callers time the tone.
pub trait Buzzer {
    /// Start a square wave at `frequency_hz`.
    fn start(&mut self, frequency_hz: u32);
    /// Silence the buzzer.
    fn stop(&mut self);
}
