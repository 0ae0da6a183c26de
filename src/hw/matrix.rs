//! 5×5 WS2812 matrix on GPIO7, driven by PIO0 state machine 0.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_time::Timer;
use occupancy_gate::config::MATRIX_LATCH_US;
use occupancy_gate::ui::glyphs::MATRIX_PIXELS;
use occupancy_gate::ui::{PixelMatrix, Rgb};
use smart_leds::RGB8;

pub type Ws2812 = PioWs2812<'static, PIO0, 0, MATRIX_PIXELS>;

pub struct LedMatrix {
    ws: Ws2812,
}

impl LedMatrix {
    pub fn new(ws: Ws2812) -> Self {
        Self { ws }
    }
}

impl PixelMatrix for LedMatrix {
    async fn write(&mut self, pixels: &[Rgb; MATRIX_PIXELS]) {
        let mut frame = [RGB8::default(); MATRIX_PIXELS];
        for (out, px) in frame.iter_mut().zip(pixels) {
            *out = RGB8::new(px.r, px.g, px.b);
        }
        self.ws.write(&frame).await;
        // Hold the line low so the strip latches.
        Timer::after_micros(MATRIX_LATCH_US).await;
    }
}
