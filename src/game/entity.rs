//! Closed set of physical entity kinds

use crate::game::goal::Goal;
use crate::game::physical::{Body, PhysicalProperties};
use crate::game::seeker::Seeker;

/// Stable entity identifier, unique across seekers and goals
pub type EntityId = u64;

#[derive(Debug, Clone)]
pub enum Entity {
    Seeker(Seeker),
    Goal(Goal),
}

impl Entity {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Seeker(s) => s.id,
            Entity::Goal(g) => g.id,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Seeker(s) => &s.body,
            Entity::Goal(g) => &g.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Seeker(s) => &mut s.body,
            Entity::Goal(g) => &mut g.body,
        }
    }

    pub fn physical(&self) -> &PhysicalProperties {
        match self {
            Entity::Seeker(s) => &s.properties().physical,
            Entity::Goal(g) => &g.properties().physical,
        }
    }

    /// Effective thrust this tick
    pub fn thrust(&self) -> f64 {
        match self {
            Entity::Seeker(s) => s.thrust(),
            Entity::Goal(g) => g.properties().physical.thrust,
        }
    }

    pub fn as_seeker(&self) -> Option<&Seeker> {
        match self {
            Entity::Seeker(s) => Some(s),
            Entity::Goal(_) => None,
        }
    }

    pub fn as_seeker_mut(&mut self) -> Option<&mut Seeker> {
        match self {
            Entity::Seeker(s) => Some(s),
            Entity::Goal(_) => None,
        }
    }

    pub fn as_goal(&self) -> Option<&Goal> {
        match self {
            Entity::Goal(g) => Some(g),
            Entity::Seeker(_) => None,
        }
    }

    pub fn as_goal_mut(&mut self) -> Option<&mut Goal> {
        match self {
            Entity::Goal(g) => Some(g),
            Entity::Seeker(_) => None,
        }
    }
}

/// Mutable borrows of two distinct entities
pub(crate) fn pair_mut(entities: &mut [Entity], a: usize, b: usize) -> (&mut Entity, &mut Entity) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = entities.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = entities.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
