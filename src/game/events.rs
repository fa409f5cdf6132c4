use serde::{Deserialize, Serialize};

use crate::game::camp::CampId;
use crate::game::entity::EntityId;
use crate::game::player::PlayerId;
use crate::game::state::GameState;

/// Observable changes produced by one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Lifecycle transition
    PhaseChanged { from: GameState, to: GameState, tick: u64 },
    /// A seeker collision started a disable timer
    SeekerDisabled { seeker: EntityId, player: PlayerId },
    /// A camp took a goal from nobody or from another camp
    GoalCaptured { goal: EntityId, camp: CampId },
    /// A goal was held long enough and respawned
    GoalScored {
        goal: EntityId,
        camp: CampId,
        player: PlayerId,
        score: u32,
    },
}
