//! Physical properties and the moving body shared by every entity kind

use serde::{Deserialize, Serialize};

use crate::config::{check_open_range, check_positive, ConfigError};
use crate::game::torus::Torus;
use crate::util::vec2::Vector2D;

/// Per-kind immutable physical configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    pub mass: f64,
    pub radius: f64,
    /// Velocity gained per tick from a unit acceleration
    pub thrust: f64,
    /// Fraction of velocity lost per tick, in (0, 1)
    pub friction: f64,
}

impl PhysicalProperties {
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        check_positive(&format!("{section}.mass"), self.mass)?;
        check_positive(&format!("{section}.radius"), self.radius)?;
        check_positive(&format!("{section}.thrust"), self.thrust)?;
        check_open_range(&format!("{section}.friction"), self.friction, 0.0, 1.0)?;
        Ok(())
    }
}

/// Seeker kind configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeekerProperties {
    pub physical: PhysicalProperties,
    /// Thrust multiplier while the magnet is on
    pub magnet_slowdown: f64,
    /// Ticks spent disabled after a collision
    pub disabled_time: u32,
}

impl SeekerProperties {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physical.validate("seeker")?;
        check_positive("seeker.magnet_slowdown", self.magnet_slowdown)?;
        Ok(())
    }
}

/// Goal kind configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProperties {
    pub physical: PhysicalProperties,
    /// Ticks a goal must be held by one camp before it scores
    pub scoring_time: f64,
}

impl GoalProperties {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.physical.validate("goal")?;
        check_positive("goal.scoring_time", self.scoring_time)?;
        Ok(())
    }
}

/// Kinematic state of one entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
}

impl Body {
    /// A body at rest
    pub fn at(position: Vector2D) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Apply friction, then add the current acceleration scaled by thrust:
    /// `v = v * (1 - friction) + a * thrust`
    #[inline]
    pub fn integrate_velocity(&mut self, friction: f64, thrust: f64) {
        self.velocity = self.velocity.scale(1.0 - friction) + self.acceleration.scale(thrust);
    }

    /// Move by one tick of velocity and wrap back onto the torus
    #[inline]
    pub fn displace(&mut self, torus: &Torus) {
        self.position = torus.normalize(self.position + self.velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> PhysicalProperties {
        PhysicalProperties {
            mass: 1.0,
            radius: 10.0,
            thrust: 0.5,
            friction: 0.1,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(props().validate("seeker").is_ok());
    }

    #[test]
    fn test_validate_reports_field() {
        let mut p = props();
        p.radius = -1.0;
        match p.validate("goal") {
            Err(ConfigError::NotPositive { field, value }) => {
                assert_eq!(field, "goal.radius");
                assert_eq!(value, -1.0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_seeker_properties_reject_zero_slowdown() {
        let seeker = SeekerProperties {
            physical: props(),
            magnet_slowdown: 0.0,
            disabled_time: 0,
        };
        assert!(seeker.validate().is_err());
    }

    #[test]
    fn test_goal_properties_reject_zero_scoring_time() {
        let goal = GoalProperties {
            physical: props(),
            scoring_time: 0.0,
        };
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_velocity_applies_friction_then_thrust() {
        let mut body = Body::at(Vector2D::ZERO);
        body.velocity = Vector2D::new(10.0, 0.0);
        body.acceleration = Vector2D::new(0.0, 1.0);

        body.integrate_velocity(0.1, 0.5);

        assert!(body.velocity.approx_eq(Vector2D::new(9.0, 0.5), 1e-12));
    }

    #[test]
    fn test_displacement_wraps() {
        let torus = Torus::new(100.0, 100.0);
        let mut body = Body::at(Vector2D::new(99.0, 1.0));
        body.velocity = Vector2D::new(3.0, -2.0);

        body.displace(&torus);

        assert!(body.position.approx_eq(Vector2D::new(2.0, 99.0), 1e-9));
    }
}
