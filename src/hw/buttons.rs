//! GPIO button inputs.
//!
//! All three buttons are active-low with the internal pull-up enabled:
//!   - ENTRY (GPIO5) and EXIT (GPIO6) are level-polled by their actors
//!   - RESET (GPIO22, joystick button) is edge-driven
//!
//! The reset watcher only timestamps falling edges and hands them to the
//! [`ResetLine`]; debouncing and the wake-up happen there.

use defmt::trace;
use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_time::Instant;
use occupancy_gate::debounce::{ButtonLine, ResetLine};

/// A pulled-up push button that reads low while pressed.
pub struct ActiveLowButton(Input<'static>);

impl ActiveLowButton {
    pub fn new(pin: AnyPin) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl ButtonLine for ActiveLowButton {
    fn is_pressed(&mut self) -> bool {
        self.0.is_low()
    }
}

/// Feed every falling edge on the reset pin into `line`. Never returns.
pub async fn watch_reset_edges(pin: AnyPin, line: &ResetLine) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        btn.wait_for_falling_edge().await;
        let accepted = line.on_edge(Instant::now().as_millis());
        trace!("Reset edge, accepted: {}", accepted);
    }
}
