//! One composed render: what every surface should show for a given state.
//!
//! Composing is pure, so the cross-surface agreement (status text, LED and
//! matrix all derived from the same [`Band`]) can be checked on the host.

use core::fmt::Write;

use heapless::String;

use super::glyphs::{self, MATRIX_SIDE, PATTERN_X};
use super::{Band, IndicatorColor, ModeSnapshot, Rgb};
use crate::config::{OLED_HEIGHT, OLED_WIDTH};
use crate::occupancy::OccupancySnapshot;

/// Text lines on the stats screen.
pub const STATS_LINES: usize = 4;

/// Longest stats line we format.
pub const LINE_LEN: usize = 24;

/// Stats text origin and line pitch.
const STATS_X: i32 = 2;
const STATS_Y: i32 = 2;
const STATS_LINE_PITCH: i32 = 12;

/// Reset banner position.
pub const BANNER_TEXT: &str = "** RESET! **";
pub const BANNER_POS: (i32, i32) = (15, 52);

/// Avatar square side, gap between squares, squares per row.
pub const AVATAR_SIDE: i32 = 12;
const AVATAR_GAP: i32 = 8;
const AVATARS_PER_ROW: i32 = 5;

/// What the OLED shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Four text lines, plus the banner while a reset is being announced.
    Stats {
        lines: [String<LINE_LEN>; STATS_LINES],
        banner: bool,
    },
    /// One filled square per person inside.
    Avatars { count: u8 },
}

/// What the 5×5 matrix shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixImage {
    Pattern([u8; MATRIX_SIDE], Rgb),
    Digit(u8, Rgb),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub band: Band,
    pub screen: Screen,
    pub indicator: IndicatorColor,
    pub matrix: MatrixImage,
}

impl Frame {
    pub fn compose(occupancy: &OccupancySnapshot, mode: ModeSnapshot) -> Self {
        let band = Band::classify(occupancy.used, occupancy.capacity);
        let indicator = band.indicator();

        let screen = if mode.stats_screen_active {
            Screen::Stats {
                lines: stats_lines(occupancy, band, indicator),
                banner: mode.banner_visible,
            }
        } else {
            Screen::Avatars {
                count: occupancy.used.min(occupancy.capacity),
            }
        };

        let matrix = match band {
            Band::Full => MatrixImage::Pattern(PATTERN_X, Rgb::RED),
            _ => MatrixImage::Digit(occupancy.used, glyphs::digit_color(occupancy.used)),
        };

        Self {
            band,
            screen,
            indicator,
            matrix,
        }
    }
}

fn stats_lines(
    occupancy: &OccupancySnapshot,
    band: Band,
    indicator: IndicatorColor,
) -> [String<LINE_LEN>; STATS_LINES] {
    let mut lines: [String<LINE_LEN>; STATS_LINES] = Default::default();
    let _ = write!(
        lines[0],
        "Users: {}/{}",
        occupancy.used, occupancy.capacity
    );
    let _ = write!(lines[1], "State: {}", band.label());
    let _ = write!(lines[2], "LED: {}", indicator.name());
    let _ = write!(lines[3], "Resets: {}", occupancy.total_resets);
    lines
}

/// Top-left corner of stats line `index`.
pub fn stats_line_origin(index: usize) -> (i32, i32) {
    (STATS_X, STATS_Y + STATS_LINE_PITCH * index as i32)
}

/// Top-left corner of avatar `index` (0-based): five per row, two rows
/// centred on the quarter lines of the panel.
pub fn avatar_origin(index: u8) -> (i32, i32) {
    let index = i32::from(index);
    let row_width = AVATARS_PER_ROW * AVATAR_SIDE + (AVATARS_PER_ROW - 1) * AVATAR_GAP;
    let margin_x = (OLED_WIDTH - row_width) / 2;
    let top = OLED_HEIGHT / 4 - AVATAR_SIDE / 2;
    let bottom = OLED_HEIGHT * 3 / 4 - AVATAR_SIDE / 2;

    let x = margin_x + (index % AVATARS_PER_ROW) * (AVATAR_SIDE + AVATAR_GAP);
    let y = if index < AVATARS_PER_ROW { top } else { bottom };
    (x, y)
}
