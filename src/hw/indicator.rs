//! Discrete RGB status LED (red GPIO13, green GPIO11, blue GPIO12).

use embassy_rp::gpio::{AnyPin, Level, Output};
use occupancy_gate::ui::Indicator;

pub struct RgbLed {
    red: Output<'static>,
    green: Output<'static>,
    blue: Output<'static>,
}

impl RgbLed {
    /// All channels start off.
    pub fn new(red: AnyPin, green: AnyPin, blue: AnyPin) -> Self {
        Self {
            red: Output::new(red, Level::Low),
            green: Output::new(green, Level::Low),
            blue: Output::new(blue, Level::Low),
        }
    }
}

impl Indicator for RgbLed {
    fn set(&mut self, red: bool, green: bool, blue: bool) {
        self.red.set_level(Level::from(red));
        self.green.set_level(Level::from(green));
        self.blue.set_level(Level::from(blue));
    }
}
