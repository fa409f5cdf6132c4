use crate::game::entity::Entity;
use crate::game::torus::Torus;
use crate::util::vec2::Vector2D;

/// Smooth bump `exp(1 / (r^2 - 1))` on `r < 1`, zero outside.
/// Value and every derivative vanish as `r` approaches 1.
#[inline]
pub fn bump(r: f64) -> f64 {
    if r < 1.0 {
        (1.0 / (r * r - 1.0)).exp()
    } else {
        0.0
    }
}

/// Sum of every seeker's field at `point`
pub fn net_force(entities: &[Entity], torus: &Torus, point: Vector2D) -> Vector2D {
    entities
        .iter()
        .filter_map(Entity::as_seeker)
        .fold(Vector2D::ZERO, |force, seeker| force + seeker.magnetic_force(point, torus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physical::{PhysicalProperties, SeekerProperties};
    use crate::game::seeker::Seeker;
    use std::sync::Arc;

    fn seeker(id: u64, x: f64, y: f64, magnet: f64) -> Entity {
        let mut s = Seeker::new(
            id,
            0,
            Vector2D::new(x, y),
            Arc::new(SeekerProperties {
                physical: PhysicalProperties {
                    mass: 1.0,
                    radius: 1.0,
                    thrust: 0.1,
                    friction: 0.02,
                },
                magnet_slowdown: 0.2,
                disabled_time: 10,
            }),
        );
        s.set_magnet(magnet);
        Entity::Seeker(s)
    }

    #[test]
    fn test_bump_edges() {
        assert_eq!(bump(1.0), 0.0);
        assert_eq!(bump(2.5), 0.0);
        assert!((bump(0.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert!(bump(0.99) > 0.0);
        assert!(bump(0.5) > bump(0.9));
    }

    #[test]
    fn test_opposite_seekers_cancel() {
        let torus = Torus::new(100.0, 100.0);
        let entities = vec![seeker(0, 45.0, 50.0, -1.0), seeker(1, 55.0, 50.0, -1.0)];
        let force = net_force(&entities, &torus, Vector2D::new(50.0, 50.0));
        assert!(force.approx_eq(Vector2D::ZERO, 1e-12));
    }

    #[test]
    fn test_forces_add_up() {
        let torus = Torus::new(100.0, 100.0);
        let one = vec![seeker(0, 45.0, 50.0, -1.0)];
        let two = vec![seeker(0, 45.0, 50.0, -1.0), seeker(1, 45.0, 50.0, -1.0)];
        let p = Vector2D::new(50.0, 50.0);
        let single = net_force(&one, &torus, p);
        let double = net_force(&two, &torus, p);
        assert!(double.approx_eq(single.scale(2.0), 1e-12));
        // Attracted back toward x = 45
        assert!(single.x < 0.0);
    }
}
