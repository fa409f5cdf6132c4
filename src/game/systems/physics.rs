use crate::game::entity::{pair_mut, Entity};
use crate::game::events::GameEvent;
use crate::game::state::{Game, Quantity, SimulationError};
use crate::game::systems::{collision, magnetism, scoring};
use crate::game::torus::Torus;
use crate::util::vec2::Vector2D;

/// Run the full update protocol for the entity at `index`:
/// accelerate, integrate velocity, displace, resolve collisions, then the
/// kind-specific post step (seeker cool-down, goal adoption)
pub fn update_entity(game: &mut Game, index: usize, events: &mut Vec<GameEvent>) -> Result<(), SimulationError> {
    accelerate(game, index)?;
    integrate(game, index)?;
    check_collisions(game, index, events)?;

    let is_goal = game.entities[index].as_goal().is_some();
    if is_goal {
        scoring::adopt(game, index, events);
    } else if let Some(seeker) = game.entities[index].as_seeker_mut() {
        seeker.cool_down();
    }
    Ok(())
}

/// Seekers steer toward their target, goals follow the net magnetic field
fn accelerate(game: &mut Game, index: usize) -> Result<(), SimulationError> {
    let torus = game.torus;
    let acceleration = match &game.entities[index] {
        Entity::Seeker(seeker) => seeker.steering(&torus),
        Entity::Goal(goal) => magnetism::net_force(&game.entities, &torus, goal.body.position),
    };
    let entity = &mut game.entities[index];
    ensure_finite(entity.id(), Quantity::Acceleration, acceleration)?;
    entity.body_mut().acceleration = acceleration;
    Ok(())
}

fn integrate(game: &mut Game, index: usize) -> Result<(), SimulationError> {
    let torus = game.torus;
    let entity = &mut game.entities[index];
    let id = entity.id();
    let friction = entity.physical().friction;
    let thrust = entity.thrust();

    let body = entity.body_mut();
    body.integrate_velocity(friction, thrust);
    ensure_finite(id, Quantity::Velocity, body.velocity)?;
    ensure_within_period(id, body.velocity, &torus)?;
    body.displace(&torus);
    ensure_finite(id, Quantity::Position, body.position)
}

/// O(n) checks against every other entity; order follows the entity list
fn check_collisions(game: &mut Game, index: usize, events: &mut Vec<GameEvent>) -> Result<(), SimulationError> {
    let torus = game.torus;
    for other in 0..game.entities.len() {
        if other == index {
            continue;
        }
        let (this, that) = pair_mut(&mut game.entities, index, other);
        let min_distance = this.physical().radius + that.physical().radius;
        if torus.distance(this.body().position, that.body().position) < min_distance {
            collision::resolve(this, that, min_distance, &torus, events);
            ensure_body_finite(this)?;
            ensure_body_finite(that)?;
        }
    }
    Ok(())
}

fn ensure_body_finite(entity: &Entity) -> Result<(), SimulationError> {
    let body = entity.body();
    ensure_finite(entity.id(), Quantity::Velocity, body.velocity)?;
    ensure_finite(entity.id(), Quantity::Position, body.position)
}

/// `Torus::normalize` only corrects one period per axis
fn ensure_within_period(entity: u64, velocity: Vector2D, torus: &Torus) -> Result<(), SimulationError> {
    if velocity.x.abs() < torus.width() && velocity.y.abs() < torus.height() {
        Ok(())
    } else {
        tracing::error!("Entity {} outran the map: velocity {}", entity, velocity);
        Err(SimulationError::Overspeed { entity, velocity })
    }
}

fn ensure_finite(entity: u64, quantity: Quantity, value: Vector2D) -> Result<(), SimulationError> {
    if value.is_finite() {
        Ok(())
    } else {
        tracing::error!("Entity {} has non-finite {}: {}", entity, quantity, value);
        Err(SimulationError::NonFinite {
            entity,
            quantity,
            value,
        })
    }
}
