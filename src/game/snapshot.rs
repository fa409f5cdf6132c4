//! Read-only view of a game for renderers and remote controllers

use serde::{Deserialize, Serialize};

use crate::game::camp::CampId;
use crate::game::entity::EntityId;
use crate::game::player::PlayerId;
use crate::game::state::{Game, GameState};
use crate::util::vec2::Vector2D;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub state: GameState,
    pub players: Vec<PlayerSnapshot>,
    pub camps: Vec<CampSnapshot>,
    pub seekers: Vec<SeekerSnapshot>,
    pub goals: Vec<GoalSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub score: u32,
    pub camp_id: CampId,
    pub seeker_ids: Vec<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampSnapshot {
    pub id: CampId,
    pub player_id: PlayerId,
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekerSnapshot {
    pub id: EntityId,
    pub player_id: PlayerId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub target: Vector2D,
    pub magnet: f64,
    pub disabled_counter: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub id: EntityId,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub camp_id: Option<CampId>,
    pub time_owned: u32,
}

impl GameSnapshot {
    pub fn from_game(game: &Game) -> Self {
        Self {
            tick: game.tick(),
            state: game.state(),
            players: game
                .players()
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color.clone(),
                    score: p.score,
                    camp_id: p.camp,
                    seeker_ids: p.seekers.clone(),
                })
                .collect(),
            camps: game
                .camps()
                .iter()
                .map(|c| CampSnapshot {
                    id: c.id,
                    player_id: c.player,
                    position: c.position,
                    width: c.width,
                    height: c.height,
                })
                .collect(),
            seekers: game
                .seekers()
                .map(|s| SeekerSnapshot {
                    id: s.id(),
                    player_id: s.player(),
                    position: s.body.position,
                    velocity: s.body.velocity,
                    acceleration: s.body.acceleration,
                    target: s.target(),
                    magnet: s.magnet(),
                    disabled_counter: s.disabled_counter(),
                })
                .collect(),
            goals: game
                .goals()
                .map(|g| GoalSnapshot {
                    id: g.id(),
                    position: g.body.position,
                    velocity: g.body.velocity,
                    acceleration: g.body.acceleration,
                    camp_id: g.capture(),
                    time_owned: g.time_owned(),
                })
                .collect(),
        }
    }

    pub fn seeker(&self, id: EntityId) -> Option<&SeekerSnapshot> {
        self.seekers.iter().find(|s| s.id == id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.id == id)
    }
}
