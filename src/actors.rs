//! The four actors that turn inputs and time into pool operations and
//! display commands.
//!
//! Each actor is an endless async loop. The binary wraps them in
//! `#[embassy_executor::task]` functions with concrete board types; the
//! building blocks (`admit`, `depart`, `handle_reset`) are public so the
//! host tests can drive one step at a time.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Timer;

use crate::command::{CommandQueue, DisplayCommand};
use crate::config::{
    ALERT_TONE_HZ, FULL_ALERT_MS, RESET_BANNER_MS, RESET_BEEP_COUNT, RESET_BEEP_MS,
    SCREEN_TOGGLE_INTERVAL_MS,
};
use crate::debounce::{ButtonLine, ButtonWatcher, ResetLine};
use crate::occupancy::OccupancyPool;
use crate::ui::Buzzer;

/// Buzzer shared by the entry and reset actors.
///
/// The lock is held only to start or stop the wave; each caller sleeps its
/// own tone. Overlapping tones share the output and whichever ends first
/// silences it.
pub struct SharedBuzzer<B> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<B>>,
}

impl<B: Buzzer> SharedBuzzer<B> {
    pub const fn new(buzzer: B) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(buzzer)),
        }
    }

    /// Sound `frequency_hz` for `duration_ms`, returning when the tone ends.
    /// A frequency of zero is a silent pause of the same length.
    pub async fn tone(&self, frequency_hz: u32, duration_ms: u64) {
        self.lock(|b| {
            if frequency_hz == 0 {
                b.stop();
            } else {
                b.start(frequency_hz);
            }
        });
        Timer::after_millis(duration_ms).await;
        self.lock(|b| b.stop());
    }

    /// Run `f` on the buzzer inside a critical section.
    pub fn lock<R>(&self, f: impl FnOnce(&mut B) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// Let one person in if there is room.
///
/// On success a `Refresh` is queued. When the room is full nothing changes
/// and a short alert tone is played instead. Returns whether the person
/// was admitted.
pub async fn admit<B: Buzzer>(
    pool: &OccupancyPool,
    queue: &CommandQueue,
    buzzer: &SharedBuzzer<B>,
) -> bool {
    if pool.try_enter() {
        debug!("Entry accepted, {} inside", pool.used());
        queue.enqueue(DisplayCommand::Refresh);
        true
    } else {
        warn!("Room full ({}), entry refused", pool.capacity());
        buzzer.tone(ALERT_TONE_HZ, FULL_ALERT_MS).await;
        false
    }
}

/// Let one person out. A no-op on the pool when nobody is inside, but the
/// display is refreshed either way.
pub fn depart(pool: &OccupancyPool, queue: &CommandQueue) {
    pool.exit();
    debug!("Exit, {} inside", pool.used());
    queue.enqueue(DisplayCommand::Refresh);
}

/// Empty the room, announce it, and return how many people were cleared.
///
/// Plays a double beep, shows the reset banner for [`RESET_BANNER_MS`] and
/// then hides it again.
pub async fn handle_reset<B: Buzzer>(
    pool: &OccupancyPool,
    queue: &CommandQueue,
    buzzer: &SharedBuzzer<B>,
) -> u8 {
    let cleared = pool.reset();
    info!(
        "Reset: cleared {} (total resets {})",
        cleared,
        pool.total_resets()
    );

    for _ in 0..RESET_BEEP_COUNT {
        buzzer.tone(ALERT_TONE_HZ, RESET_BEEP_MS).await;
        buzzer.tone(0, RESET_BEEP_MS).await;
    }

    queue.enqueue(DisplayCommand::ShowResetBanner);
    Timer::after_millis(RESET_BANNER_MS).await;
    queue.enqueue(DisplayCommand::HideResetBanner);
    cleared
}

/// Entry button loop.
pub async fn entry_actor<L: ButtonLine, B: Buzzer>(
    line: L,
    pool: &OccupancyPool,
    queue: &CommandQueue,
    buzzer: &SharedBuzzer<B>,
) -> ! {
    let mut watcher = ButtonWatcher::new(line);
    loop {
        watcher.next_press().await;
        admit(pool, queue, buzzer).await;
    }
}

/// Exit button loop.
pub async fn exit_actor<L: ButtonLine>(line: L, pool: &OccupancyPool, queue: &CommandQueue) -> ! {
    let mut watcher = ButtonWatcher::new(line);
    loop {
        watcher.next_press().await;
        depart(pool, queue);
    }
}

/// Reset loop: sleeps until the edge handler signals an accepted press.
pub async fn reset_actor<B: Buzzer>(
    reset: &ResetLine,
    pool: &OccupancyPool,
    queue: &CommandQueue,
    buzzer: &SharedBuzzer<B>,
) -> ! {
    loop {
        reset.wait().await;
        handle_reset(pool, queue, buzzer).await;
    }
}

/// Periodically asks the dispatcher to flip screens.
pub async fn ticker_actor(queue: &CommandQueue) -> ! {
    loop {
        Timer::after_millis(SCREEN_TOGGLE_INTERVAL_MS).await;
        queue.enqueue(DisplayCommand::ToggleScreen);
    }
}
