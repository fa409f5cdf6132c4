//! Command buffer between controller connections and the tick loop
//!
//! Connection handlers push seeker commands through a bounded crossbeam
//! channel; the loop drains everything pending before each tick, so a
//! command is never observed half-applied mid-update.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

use crate::game::entity::EntityId;
use crate::game::player::PlayerId;
use crate::util::vec2::Vector2D;

/// New steering target and magnet strength for one seeker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub seeker_id: EntityId,
    pub target: Vector2D,
    pub magnet: f64,
}

/// A command tagged with the player that issued it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandMessage {
    pub player_id: PlayerId,
    pub command: Command,
}

pub struct CommandBuffer {
    sender: Sender<CommandMessage>,
    receiver: Receiver<CommandMessage>,
    capacity: usize,
}

impl CommandBuffer {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Clonable handle for a connection
    pub fn sender(&self) -> CommandSender {
        CommandSender {
            sender: self.sender.clone(),
        }
    }

    /// Non-blocking submit; false when the buffer is full
    #[inline]
    pub fn try_submit(&self, player_id: PlayerId, command: Command) -> bool {
        self.sender
            .try_send(CommandMessage { player_id, command })
            .is_ok()
    }

    /// Everything pending, in submission order
    pub fn drain(&self) -> Vec<CommandMessage> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        // Two full batches from every seeker of a crowded match
        Self::new(1024)
    }
}

#[derive(Clone)]
pub struct CommandSender {
    sender: Sender<CommandMessage>,
}

impl CommandSender {
    /// Submit without blocking; `Full` signals backpressure
    pub fn try_send(&self, player_id: PlayerId, command: Command) -> Result<(), CommandBufferError> {
        self.sender
            .try_send(CommandMessage { player_id, command })
            .map_err(|e| match e {
                TrySendError::Full(_) => CommandBufferError::Full,
                TrySendError::Disconnected(_) => CommandBufferError::Disconnected,
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandBufferError {
    #[error("command buffer is full")]
    Full,
    #[error("command buffer disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_command(seeker_id: EntityId) -> Command {
        Command {
            seeker_id,
            target: Vector2D::new(10.0, 20.0),
            magnet: -1.0,
        }
    }

    #[test]
    fn test_submit_and_drain() {
        let buffer = CommandBuffer::new(10);

        assert!(buffer.try_submit(0, create_test_command(1)));
        assert!(buffer.try_submit(1, create_test_command(2)));
        assert_eq!(buffer.pending_count(), 2);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].player_id, 0);
        assert_eq!(drained[1].command.seeker_id, 2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_full_buffer_rejects() {
        let buffer = CommandBuffer::new(2);
        assert!(buffer.try_submit(0, create_test_command(1)));
        assert!(buffer.try_submit(0, create_test_command(2)));
        assert!(!buffer.try_submit(0, create_test_command(3)));

        let sender = buffer.sender();
        assert_eq!(
            sender.try_send(0, create_test_command(4)),
            Err(CommandBufferError::Full)
        );
    }

    #[test]
    fn test_sender_from_threads() {
        let buffer = CommandBuffer::new(100);
        let handles: Vec<_> = (0..4u32)
            .map(|player| {
                let sender = buffer.sender();
                std::thread::spawn(move || {
                    for seeker in 0..10 {
                        sender.try_send(player, create_test_command(seeker)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(buffer.drain().len(), 40);
    }

    #[test]
    fn test_disconnected_after_drop() {
        let buffer = CommandBuffer::new(4);
        let sender = buffer.sender();
        drop(buffer);
        assert_eq!(
            sender.try_send(0, create_test_command(1)),
            Err(CommandBufferError::Disconnected)
        );
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(CommandBuffer::default().capacity(), 1024);
    }
}
