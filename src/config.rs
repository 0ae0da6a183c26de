//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and occupancy
//! limits live here so they can be tuned in one place. The timing and
//! capacity values are part of the device's observable behaviour; change
//! them only together with the feedback they drive.

// Occupancy

/// Maximum number of people admitted at once.
pub const CAPACITY: u8 = 10;

/// Depth of the display command queue. Commands past this are dropped.
pub const COMMAND_QUEUE_DEPTH: usize = 5;

// Input timing

/// Minimum spacing between two accepted presses of the same button (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Delay after a falling edge before the button level is re-checked (ms).
pub const BUTTON_SETTLE_MS: u64 = 50;

/// Button level polling period, also used while waiting for release (ms).
pub const BUTTON_POLL_MS: u64 = 10;

/// Minimum spacing between two accepted reset edges (ms).
pub const RESET_DEBOUNCE_MS: u64 = 400;

// Feedback timing

/// Longest the dispatcher waits for the render surfaces before skipping (ms).
pub const RENDER_LOCK_TIMEOUT_MS: u64 = 100;

/// Period of the stats/avatar screen toggle (ms).
pub const SCREEN_TOGGLE_INTERVAL_MS: u64 = 2000;

/// How long the reset banner stays on screen (ms).
pub const RESET_BANNER_MS: u64 = 2000;

/// Buzzer tone frequency for every alert (Hz).
pub const ALERT_TONE_HZ: u32 = 2000;

/// Length of the "room is full" beep (ms).
pub const FULL_ALERT_MS: u64 = 100;

/// Length of each beep, and of the pause after it, in the reset double beep (ms).
pub const RESET_BEEP_MS: u64 = 100;

/// Number of beeps played after a reset.
pub const RESET_BEEP_COUNT: usize = 2;

// GPIO pin assignments (BitDogLab RP2040 board)
//
// These are logical names; actual `embassy_rp::peripherals::*` types are
// selected in `main.rs`.  Adjust for a different carrier board.
//
//   Entry button (A)   → GPIO5   (pull-up, active-low)
//   Exit button (B)    → GPIO6   (pull-up, active-low)
//   Reset (joystick)   → GPIO22  (pull-up, falling edge)
//   Buzzer (PWM5 A)    → GPIO10
//   LED green          → GPIO11
//   LED blue           → GPIO12
//   LED red            → GPIO13
//   I²C1 SDA           → GPIO14
//   I²C1 SCL           → GPIO15
//   WS2812 matrix      → GPIO7  (PIO0, SM0)

/// SSD1306 I²C address.
pub const OLED_ADDRESS: u8 = 0x3C;

/// I²C bus frequency for the OLED (Hz).
pub const OLED_I2C_FREQUENCY: u32 = 400_000;

/// OLED width in pixels.
pub const OLED_WIDTH: i32 = 128;

/// OLED height in pixels.
pub const OLED_HEIGHT: i32 = 64;

// Buzzer PWM
//
// 125 MHz system clock / 125 = 1 MHz counter; wrap sets the tone period.

/// PWM clock divider for the buzzer slice.
pub const BUZZER_PWM_DIVIDER: u8 = 125;

/// PWM counter frequency after the divider (Hz).
pub const BUZZER_PWM_BASE_HZ: u32 = 1_000_000;

// 5×5 matrix

/// WS2812 latch time after a full frame (µs).
pub const MATRIX_LATCH_US: u64 = 60;
