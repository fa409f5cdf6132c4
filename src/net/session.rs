use std::fmt;

use hashbrown::HashMap;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GameConfig;
use crate::game::player::PlayerId;
use crate::game::state::Game;

/// Opaque credential handed to a controller on join
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken([u8; 32]);

impl SessionToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("all {0} player slots are taken")]
    GameFull(usize),
    #[error("unknown session token")]
    UnknownToken,
}

/// What a controller receives after a successful join
#[derive(Debug, Clone)]
pub struct JoinTicket {
    pub player_id: PlayerId,
    pub token: SessionToken,
    pub config: GameConfig,
}

/// Maps tokens to the player slots they control. Slots are handed out in
/// player order and are never reassigned within a match.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionToken, PlayerId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the lowest free player slot, optionally renaming and recoloring it
    pub fn join(&mut self, game: &mut Game, name: Option<&str>, color: Option<&str>) -> Result<JoinTicket, SessionError> {
        let slot = game
            .players()
            .iter()
            .map(|p| p.id)
            .find(|id| !self.is_claimed(*id))
            .ok_or(SessionError::GameFull(game.players().len()))?;

        let config = game.config().clone();
        if let Some(player) = game.player_mut(slot) {
            if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
                player.name = name.to_string();
            }
            if let Some(color) = color.map(str::trim).filter(|c| !c.is_empty()) {
                player.color = color.to_string();
            }
            info!("Player {} ({}) joined", slot, player.name);
        }

        let token = SessionToken::generate();
        self.sessions.insert(token.clone(), slot);
        Ok(JoinTicket {
            player_id: slot,
            token,
            config,
        })
    }

    /// Resolve a token to the player it controls
    pub fn authorize(&self, token: &SessionToken) -> Result<PlayerId, SessionError> {
        self.sessions.get(token).copied().ok_or(SessionError::UnknownToken)
    }

    pub fn is_claimed(&self, player_id: PlayerId) -> bool {
        self.sessions.values().any(|id| *id == player_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
