//! 5×5 matrix glyphs and the helpers that turn them into pixel frames.
//!
//! Row masks use bit 4 for the leftmost column. The board is mounted upside
//! down: patterns are sent bottom row first, while the digit glyphs are
//! already stored inverted and go out top row first.

use super::{PixelMatrix, Rgb};

/// Matrix side length.
pub const MATRIX_SIDE: usize = 5;

/// Pixels per frame.
pub const MATRIX_PIXELS: usize = MATRIX_SIDE * MATRIX_SIDE;

/// "X" - room full, and the fallback for digits out of range.
pub const PATTERN_X: [u8; MATRIX_SIDE] = [0b10001, 0b01010, 0b00100, 0b01010, 0b10001];

/// Digits 0-9, pre-inverted for the mounting.
pub const DIGITS: [[u8; MATRIX_SIDE]; 10] = [
    [0b11111, 0b10001, 0b10001, 0b10001, 0b11111],
    [0b11111, 0b00100, 0b00100, 0b01100, 0b00100],
    [0b11111, 0b10000, 0b11111, 0b00001, 0b11111],
    [0b11111, 0b00001, 0b11111, 0b00001, 0b11111],
    [0b10000, 0b00001, 0b11111, 0b10001, 0b10001],
    [0b11111, 0b00001, 0b11111, 0b10000, 0b11111],
    [0b11111, 0b10001, 0b11111, 0b10000, 0b11111],
    [0b10000, 0b00001, 0b11100, 0b00001, 0b11111],
    [0b11111, 0b10001, 0b11111, 0b10001, 0b11111],
    [0b11111, 0b00001, 0b11111, 0b10001, 0b11111],
];

/// Colour of each occupancy digit.
const DIGIT_PALETTE: [Rgb; 10] = [
    Rgb::BLUE,
    Rgb::GREEN,
    Rgb::ORANGE,
    Rgb::VIOLET,
    Rgb::GOLD,
    Rgb::SILVER,
    Rgb::BROWN,
    Rgb::WHITE,
    Rgb::GRAY,
    Rgb::YELLOW,
];

/// Colour used to draw occupancy `n`; red once it no longer fits a digit.
pub fn digit_color(n: u8) -> Rgb {
    DIGIT_PALETTE
        .get(usize::from(n))
        .copied()
        .unwrap_or(Rgb::RED)
}

fn lit(mask: u8, col: usize) -> bool {
    mask & (1 << (MATRIX_SIDE - 1 - col)) != 0
}

/// Frame for a row-mask pattern, bottom row first.
pub fn pattern_frame(rows: &[u8; MATRIX_SIDE], color: Rgb) -> [Rgb; MATRIX_PIXELS] {
    let mut frame = [Rgb::OFF; MATRIX_PIXELS];
    for (i, mask) in rows.iter().rev().enumerate() {
        for col in 0..MATRIX_SIDE {
            if lit(*mask, col) {
                frame[i * MATRIX_SIDE + col] = color;
            }
        }
    }
    frame
}

/// Frame for a single digit. Anything above 9 draws a red "X".
pub fn digit_frame(digit: u8, color: Rgb) -> [Rgb; MATRIX_PIXELS] {
    let Some(rows) = DIGITS.get(usize::from(digit)) else {
        return pattern_frame(&PATTERN_X, Rgb::RED);
    };
    let mut frame = [Rgb::OFF; MATRIX_PIXELS];
    for (row, mask) in rows.iter().enumerate() {
        for col in 0..MATRIX_SIDE {
            if lit(*mask, col) {
                frame[row * MATRIX_SIDE + col] = color;
            }
        }
    }
    frame
}

/// Glyph-level API over a raw [`PixelMatrix`].
pub struct Matrix<P> {
    pixels: P,
}

impl<P: PixelMatrix> Matrix<P> {
    pub fn new(pixels: P) -> Self {
        Self { pixels }
    }

    pub async fn draw_pattern(&mut self, rows: &[u8; MATRIX_SIDE], color: Rgb) {
        self.pixels.write(&pattern_frame(rows, color)).await;
    }

    pub async fn draw_digit(&mut self, digit: u8, color: Rgb) {
        self.pixels.write(&digit_frame(digit, color)).await;
    }

    pub async fn clear(&mut self) {
        self.pixels.write(&[Rgb::OFF; MATRIX_PIXELS]).await;
    }

    pub fn pixels(&self) -> &P {
        &self.pixels
    }
}
