//! Pairwise collision response
//!
//! Elastic impulse along the contact normal, then positional correction so the
//! pair does not stay overlapped. Seeker pairs additionally run the disable rule.

use crate::game::entity::Entity;
use crate::game::events::GameEvent;
use crate::game::physical::Body;
use crate::game::seeker::Seeker;
use crate::game::torus::Torus;

/// Resolve a collision between `this` (the entity being updated) and `other`
pub fn resolve(this: &mut Entity, other: &mut Entity, min_distance: f64, torus: &Torus, events: &mut Vec<GameEvent>) {
    if let (Entity::Seeker(a), Entity::Seeker(b)) = (&mut *this, &mut *other) {
        apply_disable_rule(a, b, events);
    }

    let mass_a = this.physical().mass;
    let mass_b = other.physical().mass;
    resolve_bodies(this.body_mut(), mass_a, other.body_mut(), mass_b, min_distance, torus);
}

/// Decide which of two colliding seekers gets disabled:
///
/// | this       | other      | disabled   |
/// |------------|------------|------------|
/// | any        | disabled   | this       |
/// | magnet     | magnet     | both       |
/// | magnet     | no magnet  | this       |
/// | no magnet  | magnet     | other      |
/// | no magnet  | no magnet  | both       |
pub fn apply_disable_rule(this: &mut Seeker, other: &mut Seeker, events: &mut Vec<GameEvent>) {
    if other.is_disabled() {
        disable(this, events);
    } else if this.magnet() != 0.0 {
        disable(this, events);
        if other.magnet() != 0.0 {
            disable(other, events);
        }
    } else if other.magnet() != 0.0 {
        disable(other, events);
    } else {
        disable(this, events);
        disable(other, events);
    }
}

fn disable(seeker: &mut Seeker, events: &mut Vec<GameEvent>) {
    if seeker.disable() {
        tracing::debug!("Seeker {} of player {} disabled", seeker.id(), seeker.player());
        events.push(GameEvent::SeekerDisabled {
            seeker: seeker.id(),
            player: seeker.player(),
        });
    }
}

/// 1D elastic collision projected on the contact normal, followed by pushing
/// both bodies apart by half the remaining penetration each
pub fn resolve_bodies(a: &mut Body, mass_a: f64, b: &mut Body, mass_b: f64, min_distance: f64, torus: &Torus) {
    let distance = torus.difference(a.position, b.position);
    let delta_r = distance.normalize();
    let delta_v = b.velocity - a.velocity;
    let dual_v = delta_v.dot(delta_r);
    let dual_m = 2.0 / (mass_a + mass_b);

    // Only bodies moving toward each other exchange momentum
    if dual_v < 0.0 {
        a.velocity = a.velocity + delta_r.scale(mass_b * dual_m * dual_v);
        b.velocity = b.velocity - delta_r.scale(mass_a * dual_m * dual_v);
    }

    let separation = distance.dot(delta_r);
    if separation < min_distance {
        let push = delta_r.scale((min_distance - separation) / 2.0);
        a.position = torus.normalize(a.position - push);
        b.position = torus.normalize(b.position + push);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physical::{PhysicalProperties, SeekerProperties};
    use crate::util::vec2::Vector2D;
    use std::sync::Arc;

    const EPSILON: f64 = 1e-9;

    fn seeker(id: u64, magnet: f64) -> Seeker {
        let mut s = Seeker::new(
            id,
            id as u32,
            Vector2D::ZERO,
            Arc::new(SeekerProperties {
                physical: PhysicalProperties {
                    mass: 1.0,
                    radius: 10.0,
                    thrust: 0.1,
                    friction: 0.02,
                },
                magnet_slowdown: 0.2,
                disabled_time: 50,
            }),
        );
        s.set_magnet(magnet);
        s
    }

    fn rule(this_magnet: f64, other_magnet: f64) -> (bool, bool, usize) {
        let mut this = seeker(0, this_magnet);
        let mut other = seeker(1, other_magnet);
        let mut events = Vec::new();
        apply_disable_rule(&mut this, &mut other, &mut events);
        (this.is_disabled(), other.is_disabled(), events.len())
    }

    #[test]
    fn test_disable_rule_truth_table() {
        assert_eq!(rule(-1.0, -1.0), (true, true, 2));
        assert_eq!(rule(-1.0, 0.0), (true, false, 1));
        assert_eq!(rule(0.0, 1.0), (false, true, 1));
        assert_eq!(rule(0.0, 0.0), (true, true, 2));
    }

    #[test]
    fn test_colliding_with_disabled_seeker_disables_self_only() {
        let mut this = seeker(0, 0.0);
        let mut other = seeker(1, 0.0);
        other.disable();
        let mut events = Vec::new();

        apply_disable_rule(&mut this, &mut other, &mut events);

        assert!(this.is_disabled());
        assert_eq!(other.disabled_counter(), 50);
        assert_eq!(
            events,
            vec![GameEvent::SeekerDisabled { seeker: 0, player: 0 }]
        );
    }

    #[test]
    fn test_equal_mass_head_on_exchanges_velocity() {
        let torus = Torus::new(100.0, 100.0);
        let mut a = Body::at(Vector2D::new(41.0, 50.0));
        a.velocity = Vector2D::new(1.0, 0.0);
        let mut b = Body::at(Vector2D::new(59.0, 50.0));
        b.velocity = Vector2D::new(-1.0, 0.0);

        resolve_bodies(&mut a, 1.0, &mut b, 1.0, 20.0, &torus);

        assert!(a.velocity.approx_eq(Vector2D::new(-1.0, 0.0), EPSILON));
        assert!(b.velocity.approx_eq(Vector2D::new(1.0, 0.0), EPSILON));
        assert!(torus.distance(a.position, b.position) >= 20.0 - EPSILON);
        // Each moved half of the 2 unit overlap
        assert!(a.position.approx_eq(Vector2D::new(40.0, 50.0), EPSILON));
        assert!(b.position.approx_eq(Vector2D::new(60.0, 50.0), EPSILON));
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let torus = Torus::new(100.0, 100.0);
        let mut a = Body::at(Vector2D::new(45.0, 50.0));
        a.velocity = Vector2D::new(-1.0, 0.0);
        let mut b = Body::at(Vector2D::new(55.0, 50.0));
        b.velocity = Vector2D::new(1.0, 0.0);

        resolve_bodies(&mut a, 1.0, &mut b, 1.0, 20.0, &torus);

        assert_eq!(a.velocity, Vector2D::new(-1.0, 0.0));
        assert_eq!(b.velocity, Vector2D::new(1.0, 0.0));
        assert!(torus.distance(a.position, b.position) >= 20.0 - EPSILON);
    }

    #[test]
    fn test_momentum_conserved_for_unequal_masses() {
        let torus = Torus::new(100.0, 100.0);
        let mut a = Body::at(Vector2D::new(45.0, 50.0));
        a.velocity = Vector2D::new(2.0, 0.5);
        let mut b = Body::at(Vector2D::new(52.0, 53.0));
        b.velocity = Vector2D::new(-1.0, 0.0);
        let before = a.velocity.scale(1.0) + b.velocity.scale(0.5);

        resolve_bodies(&mut a, 1.0, &mut b, 0.5, 16.0, &torus);

        let after = a.velocity.scale(1.0) + b.velocity.scale(0.5);
        assert!(before.approx_eq(after, EPSILON));
    }

    #[test]
    fn test_collision_across_the_wrap_seam() {
        let torus = Torus::new(100.0, 100.0);
        let mut a = Body::at(Vector2D::new(95.0, 50.0));
        a.velocity = Vector2D::new(1.0, 0.0);
        let mut b = Body::at(Vector2D::new(3.0, 50.0));
        b.velocity = Vector2D::new(-1.0, 0.0);

        resolve_bodies(&mut a, 1.0, &mut b, 1.0, 20.0, &torus);

        assert!(a.velocity.approx_eq(Vector2D::new(-1.0, 0.0), EPSILON));
        assert!(b.velocity.approx_eq(Vector2D::new(1.0, 0.0), EPSILON));
        assert!((torus.distance(a.position, b.position) - 20.0).abs() < EPSILON);
        assert!(a.position.x >= 0.0 && a.position.x < 100.0);
        assert!(b.position.x >= 0.0 && b.position.x < 100.0);
    }
}
