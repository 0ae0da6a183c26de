//! Capacity-bounded occupancy accounting.
//!
//! The pool tracks how many people are inside (`used`) and how many free
//! places remain (`available`). Both counters live behind a single
//! critical-section mutex and are only reachable through the pool's
//! operations, so every caller observes `used + available == capacity`.
//!
//! The lock is held for the O(1) counter update only - never across a
//! render, a tone or a sleep.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// A consistent view of the pool, read in one critical section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OccupancySnapshot {
    pub used: u8,
    pub available: u8,
    pub capacity: u8,
    pub total_resets: u32,
}

struct PoolState {
    used: u8,
    available: u8,
    total_resets: u32,
}

/// The room: a counter of occupants bounded by `capacity`.
pub struct OccupancyPool {
    capacity: u8,
    state: Mutex<CriticalSectionRawMutex, RefCell<PoolState>>,
}

impl OccupancyPool {
    /// A pool with `used = 0` and `available = capacity`.
    pub const fn new(capacity: u8) -> Self {
        Self {
            capacity,
            state: Mutex::new(RefCell::new(PoolState {
                used: 0,
                available: capacity,
                total_resets: 0,
            })),
        }
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Admit one person if a place is free. Never waits.
    ///
    /// Returns `false` when the room is full; nothing changes in that case.
    pub fn try_enter(&self) -> bool {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if state.available == 0 {
                return false;
            }
            state.available -= 1;
            state.used += 1;
            true
        })
    }

    /// Let one person out. A no-op on an empty room, so `available` can
    /// never exceed `capacity`.
    pub fn exit(&self) {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            if state.used > 0 {
                state.used -= 1;
                state.available += 1;
            }
        })
    }

    /// Empty the room and count the reset. Returns the occupancy before the reset.
    pub fn reset(&self) -> u8 {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            let previous = state.used;
            state.available += previous;
            state.used = 0;
            state.total_resets = state.total_resets.saturating_add(1);
            previous
        })
    }

    pub fn snapshot(&self) -> OccupancySnapshot {
        self.state.lock(|state| {
            let state = state.borrow();
            OccupancySnapshot {
                used: state.used,
                available: state.available,
                capacity: self.capacity,
                total_resets: state.total_resets,
            }
        })
    }

    pub fn used(&self) -> u8 {
        self.snapshot().used
    }

    pub fn available(&self) -> u8 {
        self.snapshot().available
    }

    pub fn total_resets(&self) -> u32 {
        self.snapshot().total_resets
    }
}
