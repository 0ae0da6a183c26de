//! Display commands and the queue that carries them to the dispatcher.
//!
//! Commands are *state tags*, not snapshots: none of them carries a value.
//! When the dispatcher handles a command it re-reads the live occupancy and
//! UI flags, so a late or stale command still produces a fresh render, and
//! dropping a command only delays the next render - it never leaves the
//! display showing a wrong value once any later command gets through.
//! Do not add payloads here; that would turn the queue into an event log
//! and change what the user sees when commands are dropped.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::config::COMMAND_QUEUE_DEPTH;

/// UI-update intents, handled strictly in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Re-render with the current state.
    Refresh,
    /// Show the reset banner, then re-render.
    ShowResetBanner,
    /// Hide the reset banner, then re-render.
    HideResetBanner,
    /// Flip between the stats screen and the avatar screen, then re-render.
    ToggleScreen,
}

/// Bounded, lossy, single-consumer FIFO of [`DisplayCommand`]s.
pub struct CommandQueue {
    channel: Channel<CriticalSectionRawMutex, DisplayCommand, COMMAND_QUEUE_DEPTH>,
}

impl CommandQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue `cmd` without waiting. When the queue is full the command is
    /// dropped and `false` is returned.
    pub fn enqueue(&self, cmd: DisplayCommand) -> bool {
        match self.channel.try_send(cmd) {
            Ok(()) => true,
            Err(_) => {
                trace!("Display queue full, dropping {}", cmd);
                false
            }
        }
    }

    /// Wait for the oldest queued command.
    pub async fn dequeue(&self) -> DisplayCommand {
        self.channel.receive().await
    }

    /// Take the oldest queued command if there is one.
    pub fn try_dequeue(&self) -> Option<DisplayCommand> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_is_kept() {
        let q = CommandQueue::new();
        assert!(q.enqueue(DisplayCommand::ShowResetBanner));
        assert!(q.enqueue(DisplayCommand::Refresh));
        assert!(q.enqueue(DisplayCommand::ToggleScreen));
        assert_eq!(q.try_dequeue(), Some(DisplayCommand::ShowResetBanner));
        assert_eq!(q.try_dequeue(), Some(DisplayCommand::Refresh));
        assert_eq!(q.try_dequeue(), Some(DisplayCommand::ToggleScreen));
        assert_eq!(q.try_dequeue(), None);
    }

    #[test]
    fn sixth_command_is_dropped() {
        let q = CommandQueue::new();
        for _ in 0..COMMAND_QUEUE_DEPTH {
            assert!(q.enqueue(DisplayCommand::Refresh));
        }
        assert!(!q.enqueue(DisplayCommand::HideResetBanner));
        assert_eq!(q.len(), COMMAND_QUEUE_DEPTH);

        // The retained commands are the first five; the dropped one never shows up.
        for _ in 0..COMMAND_QUEUE_DEPTH {
            assert_eq!(q.try_dequeue(), Some(DisplayCommand::Refresh));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn space_frees_up_after_dequeue() {
        let q = CommandQueue::new();
        for _ in 0..COMMAND_QUEUE_DEPTH {
            q.enqueue(DisplayCommand::Refresh);
        }
        assert!(!q.enqueue(DisplayCommand::ToggleScreen));
        q.try_dequeue();
        assert!(q.enqueue(DisplayCommand::ToggleScreen));
    }

    #[test]
    fn dequeue_waits_for_oldest() {
        let q = CommandQueue::new();
        q.enqueue(DisplayCommand::ToggleScreen);
        q.enqueue(DisplayCommand::Refresh);
        let first = embassy_futures::block_on(q.dequeue());
        assert_eq!(first, DisplayCommand::ToggleScreen);
    }
}
