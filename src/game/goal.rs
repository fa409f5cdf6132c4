//! Neutral objectives pulled around by seeker magnets

use std::sync::Arc;

use crate::game::camp::CampId;
use crate::game::entity::EntityId;
use crate::game::physical::{Body, GoalProperties};
use crate::util::vec2::Vector2D;

#[derive(Debug, Clone)]
pub struct Goal {
    pub(crate) id: EntityId,
    pub body: Body,
    properties: Arc<GoalProperties>,
    /// Camp currently holding the goal (lookup key only)
    capture: Option<CampId>,
    time_owned: u32,
}

/// What happened to a goal's capture state during one adoption step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    /// A different camp took the goal; timer restarted
    Captured(CampId),
    /// Same camp kept it one more tick
    Held(CampId),
    /// Held long enough to score for this camp
    Scored(CampId),
}

impl Goal {
    pub fn new(id: EntityId, position: Vector2D, properties: Arc<GoalProperties>) -> Self {
        Self {
            id,
            body: Body::at(position),
            properties,
            capture: None,
            time_owned: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn properties(&self) -> &GoalProperties {
        &self.properties
    }

    pub fn capture(&self) -> Option<CampId> {
        self.capture
    }

    pub fn time_owned(&self) -> u32 {
        self.time_owned
    }

    /// Record that `camp` contains the goal this tick
    pub fn adopt(&mut self, camp: CampId) -> Adoption {
        if self.capture == Some(camp) {
            self.time_owned += 1;
            if f64::from(self.time_owned) >= self.properties.scoring_time {
                Adoption::Scored(camp)
            } else {
                Adoption::Held(camp)
            }
        } else {
            self.capture = Some(camp);
            self.time_owned = 0;
            Adoption::Captured(camp)
        }
    }

    /// Respawn at `position` with no capture. Velocity is kept.
    pub fn reset(&mut self, position: Vector2D) {
        self.body.position = position;
        self.capture = None;
        self.time_owned = 0;
    }
}
