use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::command_buffer::Command;
use crate::game::events::GameEvent;
use crate::game::player::PlayerId;
use crate::game::snapshot::GameSnapshot;
use crate::game::state::GameState;
use crate::net::session::SessionToken;

/// Messages from a remote controller to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Claim the next free player slot. Blank fields keep the defaults.
    Join {
        name: Option<String>,
        color: Option<String>,
    },
    /// Seeker commands, each applied independently
    Command {
        token: SessionToken,
        commands: Vec<Command>,
    },
    /// Ping for latency measurement
    Ping { timestamp: u64 },
}

/// Messages from server to controllers and viewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Slot assigned; the token authenticates later commands
    JoinAccepted {
        player_id: PlayerId,
        token: SessionToken,
        config: GameConfig,
    },
    JoinRejected { reason: String },
    /// Full world state
    Snapshot(GameSnapshot),
    /// Something observable happened during a tick
    Event(GameEvent),
    PhaseChange { state: GameState, tick: u64 },
    /// A command batch was refused as a whole (bad token)
    Rejected { reason: String },
    Pong {
        client_timestamp: u64,
        server_timestamp: u64,
    },
}

/// Encode a message using bincode
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(message, bincode::config::legacy()).map_err(|e| EncodeError(e.to_string()))
}

/// Decode a message using bincode
pub fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, DecodeError> {
    bincode::serde::decode_from_slice(data, bincode::config::legacy())
        .map(|(msg, _)| msg)
        .map_err(|e| DecodeError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Decode error: {0}")]
pub struct DecodeError(String);
