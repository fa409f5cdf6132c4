//! Player-controlled agents: target steering, magnet and the disable timer

use std::sync::Arc;

use crate::game::constants::magnet;
use crate::game::entity::EntityId;
use crate::game::physical::{Body, SeekerProperties};
use crate::game::player::PlayerId;
use crate::game::systems::magnetism;
use crate::game::torus::Torus;
use crate::util::vec2::Vector2D;

#[derive(Debug, Clone)]
pub struct Seeker {
    pub(crate) id: EntityId,
    pub(crate) player: PlayerId,
    pub body: Body,
    properties: Arc<SeekerProperties>,
    target: Vector2D,
    /// Negative attracts, positive repels, zero is off
    magnet: f64,
    disabled_counter: u32,
}

impl Seeker {
    /// A seeker at rest whose target is its own spawn position
    pub fn new(id: EntityId, player: PlayerId, position: Vector2D, properties: Arc<SeekerProperties>) -> Self {
        Self {
            id,
            player,
            body: Body::at(position),
            properties,
            target: position,
            magnet: 0.0,
            disabled_counter: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Owning player
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn properties(&self) -> &SeekerProperties {
        &self.properties
    }

    pub fn target(&self) -> Vector2D {
        self.target
    }

    pub fn set_target(&mut self, target: Vector2D) {
        self.target = target;
    }

    pub fn magnet(&self) -> f64 {
        self.magnet
    }

    /// Clamp to `[-8, 1]`. Ignored while disabled; returns whether it was applied.
    pub fn set_magnet(&mut self, value: f64) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.magnet = value.clamp(magnet::MIN, magnet::MAX);
        true
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_counter > 0
    }

    pub fn disabled_counter(&self) -> u32 {
        self.disabled_counter
    }

    /// Start the disable timer and switch the magnet off.
    /// Returns false (and changes nothing) if already disabled.
    pub fn disable(&mut self) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.disabled_counter = self.properties.disabled_time;
        self.magnet = 0.0;
        true
    }

    /// Count one tick of the disable timer down, flooring at zero
    pub fn cool_down(&mut self) {
        self.disabled_counter = self.disabled_counter.saturating_sub(1);
    }

    /// Base thrust, reduced by the magnet slowdown while the magnet is on
    pub fn thrust(&self) -> f64 {
        let thrust = self.properties.physical.thrust;
        if self.magnet != 0.0 {
            thrust * self.properties.magnet_slowdown
        } else {
            thrust
        }
    }

    /// Unit steering toward the target; zero while disabled
    pub fn steering(&self, torus: &Torus) -> Vector2D {
        if self.is_disabled() {
            Vector2D::ZERO
        } else {
            torus.direction(self.body.position, self.target)
        }
    }

    /// Field this seeker exerts at `point`. Negative magnets pull toward the
    /// seeker, positive ones push away; disabled seekers exert nothing.
    pub fn magnetic_force(&self, point: Vector2D, torus: &Torus) -> Vector2D {
        if self.is_disabled() || self.magnet == 0.0 {
            return Vector2D::ZERO;
        }
        let r = torus.distance(self.body.position, point) / torus.diameter() * magnet::FALLOFF;
        let direction = torus.direction(self.body.position, point);
        direction.scale(self.magnet * magnetism::bump(r))
    }
}
