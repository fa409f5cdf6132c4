use serde::{Deserialize, Serialize};

use crate::game::camp::CampId;
use crate::game::constants;
use crate::game::entity::EntityId;

/// Stable player identifier
pub type PlayerId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub score: u32,
    pub camp: CampId,
    /// Owned seekers in creation order
    pub seekers: Vec<EntityId>,
}

impl Player {
    pub fn new(id: PlayerId, camp: CampId) -> Self {
        Self {
            id,
            name: format!("Player {}", id),
            color: constants::player::COLOR.to_string(),
            score: 0,
            camp,
            seekers: Vec::new(),
        }
    }

    pub fn owns(&self, seeker: EntityId) -> bool {
        self.seekers.contains(&seeker)
    }

    pub fn score(&mut self) {
        self.score += 1;
    }
}
