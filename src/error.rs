//! Unified error type for occupancy-gate.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.
//!
//! Note that a full room, a dropped display command and a skipped render
//! pass are *not* errors: they are normal outcomes reported through
//! `bool` / [`RenderOutcome`](crate::ui::dispatcher::RenderOutcome).

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Startup
    /// A synchronisation primitive or driver could not be set up.
    /// Fatal: no task is spawned after this.
    Init(InitError),

    /// The executor refused to spawn a task (pool exhausted).
    Spawn,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Generic
    /// Operation timed out.
    Timeout,
}

/// What failed during startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// The OLED did not acknowledge its init sequence.
    Display,
    /// The render surfaces' static slot was already taken.
    Surfaces,
    /// The buzzer's static slot was already taken.
    Buzzer,
}

// Convenience conversions

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Error::Init(e)
    }
}

impl From<embassy_time::TimeoutError> for Error {
    fn from(_: embassy_time::TimeoutError) -> Self {
        Error::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_wraps_into_error() {
        let e: Error = InitError::Display.into();
        assert_eq!(e, Error::Init(InitError::Display));
    }

    #[test]
    fn timeout_maps_to_timeout_variant() {
        let e: Error = embassy_time::TimeoutError.into();
        assert_eq!(e, Error::Timeout);
    }
}
