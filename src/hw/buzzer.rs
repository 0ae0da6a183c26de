//! Piezo buzzer on GPIO10 (PWM slice 5, channel A).
//!
//! The slice runs from a 1 MHz tick (125 MHz / 125); the wrap value picks
//! the pitch and the compare value is half of it for a square wave.

use embassy_rp::pwm::{Config, Pwm};
use occupancy_gate::config::{BUZZER_PWM_BASE_HZ, BUZZER_PWM_DIVIDER};
use occupancy_gate::ui::Buzzer;

pub struct PwmBuzzer {
    pwm: Pwm<'static>,
    config: Config,
}

impl PwmBuzzer {
    /// Takes an output-A PWM channel; the buzzer starts silent.
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = Config::default();
        config.divider = BUZZER_PWM_DIVIDER.into();
        config.enable = false;
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl Buzzer for PwmBuzzer {
    fn start(&mut self, frequency_hz: u32) {
        let top = (BUZZER_PWM_BASE_HZ / frequency_hz.max(1)).saturating_sub(1);
        let top = u16::try_from(top).unwrap_or(u16::MAX);
        self.config.top = top;
        self.config.compare_a = top / 2;
        self.config.enable = true;
        self.pwm.set_config(&self.config);
    }

    fn stop(&mut self) {
        self.config.enable = false;
        self.pwm.set_config(&self.config);
    }
}
