//! Input debouncing.
//!
//! Two kinds of input feed the controller:
//!
//! - **Level-polled buttons** (entry / exit, active-low with pull-up).
//!   A press is a released→pressed transition that is still pressed
//!   after [`BUTTON_SETTLE_MS`]; after an accepted press the input must be
//!   released before it can fire again. [`ButtonDebouncer`] is that state
//!   machine, [`ButtonWatcher`] drives it against a real pin with
//!   cooperative sleeps.
//! - **Edge-sourced reset** (joystick push). The edge handler only runs
//!   [`ResetLine::on_edge`]: a rate check against [`RESET_DEBOUNCE_MS`] and,
//!   if accepted, a wake of the reset actor. Nothing else happens in that
//!   context.
//!
//! Every input owns one [`DebounceGate`], which guarantees two accepted
//! events are never closer together than its minimum interval.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};

use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_POLL_MS, BUTTON_SETTLE_MS};

/// Rate limiter for one physical input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceGate {
    min_interval_ms: u64,
    last_accepted_ms: Option<u64>,
}

impl DebounceGate {
    pub const fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Accept an event at `now_ms` unless the previous accepted event was
    /// less than the minimum interval ago.
    ///
    /// `now_ms` must come from a monotonic clock. A timestamp earlier than
    /// the last accepted one is rejected.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms < last || now_ms - last < self.min_interval_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }
}

/// Where a polled button currently is in its press cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonPhase {
    /// Waiting for a released→pressed transition.
    Armed { was_pressed: bool },
    /// Transition seen at `since_ms`; level is re-checked after the settle delay.
    Settling { since_ms: u64 },
    /// Press handled (or discarded); waiting for release before re-arming.
    Held,
}

/// Result of feeding one level sample into a [`ButtonDebouncer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonSample {
    /// Nothing happening; keep polling at the normal rate.
    Idle,
    /// A transition is settling; sample again after the settle delay.
    Settling,
    /// A clean press was accepted. Act on it exactly once.
    Accepted,
    /// Still held after a press; poll for release.
    Held,
    /// Released after a press; the button is armed again.
    Released,
}

/// Explicit press/settle/release state machine for one polled button.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDebouncer {
    phase: ButtonPhase,
    settle_ms: u64,
    gate: DebounceGate,
}

impl ButtonDebouncer {
    pub const fn new(min_interval_ms: u64, settle_ms: u64) -> Self {
        Self {
            phase: ButtonPhase::Armed { was_pressed: false },
            settle_ms,
            gate: DebounceGate::new(min_interval_ms),
        }
    }

    pub fn phase(&self) -> ButtonPhase {
        self.phase
    }

    /// Feed the current level (`pressed == true` means the button is down).
    pub fn sample(&mut self, pressed: bool, now_ms: u64) -> ButtonSample {
        match self.phase {
            ButtonPhase::Armed { was_pressed } => {
                if pressed && !was_pressed {
                    self.phase = ButtonPhase::Settling { since_ms: now_ms };
                    ButtonSample::Settling
                } else {
                    self.phase = ButtonPhase::Armed {
                        was_pressed: pressed,
                    };
                    ButtonSample::Idle
                }
            }
            ButtonPhase::Settling { since_ms } => {
                if now_ms.saturating_sub(since_ms) < self.settle_ms {
                    return ButtonSample::Settling;
                }
                if !pressed {
                    // Bounce: the level did not hold.
                    self.phase = ButtonPhase::Armed { was_pressed: false };
                    return ButtonSample::Idle;
                }
                self.phase = ButtonPhase::Held;
                if self.gate.accept(now_ms) {
                    ButtonSample::Accepted
                } else {
                    ButtonSample::Held
                }
            }
            ButtonPhase::Held => {
                if pressed {
                    ButtonSample::Held
                } else {
                    self.phase = ButtonPhase::Armed { was_pressed: false };
                    ButtonSample::Released
                }
            }
        }
    }
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new(BUTTON_DEBOUNCE_MS, BUTTON_SETTLE_MS)
    }
}

/// A digital input that can be sampled without blocking.
pub trait ButtonLine {
    /// `true` while the button is held down.
    fn is_pressed(&mut self) -> bool;
}

/// Polls a [`ButtonLine`] and yields one event per physical press.
pub struct ButtonWatcher<L> {
    line: L,
    debouncer: ButtonDebouncer,
}

impl<L: ButtonLine> ButtonWatcher<L> {
    pub fn new(line: L) -> Self {
        Self {
            line,
            debouncer: ButtonDebouncer::default(),
        }
    }

    /// Wait for the next accepted press.
    ///
    /// If the previous press is still held, this first waits for its
    /// release. Every wait is a timer await, so other tasks keep running.
    pub async fn next_press(&mut self) {
        loop {
            let now_ms = Instant::now().as_millis();
            match self.debouncer.sample(self.line.is_pressed(), now_ms) {
                ButtonSample::Accepted => return,
                ButtonSample::Settling => Timer::after_millis(BUTTON_SETTLE_MS).await,
                ButtonSample::Held | ButtonSample::Idle | ButtonSample::Released => {
                    Timer::after_millis(BUTTON_POLL_MS).await
                }
            }
        }
    }
}

/// Edge-sourced reset input: rate check plus a binary wake for the reset actor.
///
/// `on_edge` is O(1), never blocks and is safe to call from interrupt
/// context. Several accepted edges before the actor wakes collapse into
/// one wake-up.
pub struct ResetLine {
    gate: Mutex<CriticalSectionRawMutex, Cell<DebounceGate>>,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl ResetLine {
    pub const fn new(min_interval_ms: u64) -> Self {
        Self {
            gate: Mutex::new(Cell::new(DebounceGate::new(min_interval_ms))),
            wake: Signal::new(),
        }
    }

    /// Handle one raw falling edge seen at `now_ms`. Returns whether it was accepted.
    pub fn on_edge(&self, now_ms: u64) -> bool {
        let accepted = self.gate.lock(|cell| {
            let mut gate = cell.get();
            let accepted = gate.accept(now_ms);
            cell.set(gate);
            accepted
        });
        if accepted {
            self.wake.signal(());
        }
        accepted
    }

    /// Wait until an accepted edge is pending, consuming it.
    pub async fn wait(&self) {
        self.wake.wait().await
    }

    /// Whether an accepted edge is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.wake.signaled()
    }
}
