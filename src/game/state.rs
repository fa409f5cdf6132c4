//! Game state definitions and structures
//!
//! The `Game` value owns every entity, player and camp of one match, plus the
//! lifecycle state machine and the world RNG. Systems receive it by `&mut`.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::game::camp::{Camp, CampId};
use crate::game::command_buffer::Command;
use crate::game::constants;
use crate::game::entity::{Entity, EntityId};
use crate::game::events::GameEvent;
use crate::game::goal::Goal;
use crate::game::player::{Player, PlayerId};
use crate::game::seeker::Seeker;
use crate::game::snapshot::GameSnapshot;
use crate::game::systems::physics;
use crate::game::torus::Torus;
use crate::util::vec2::Vector2D;

/// Match lifecycle. Transitions are forward-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum GameState {
    /// Built, waiting for the first tick
    #[default]
    Preparing,
    /// Ticking
    Running,
    /// Playtime exhausted
    Finished,
}

/// Kinematic quantity that failed a finiteness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Acceleration,
    Velocity,
    Position,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Acceleration => "acceleration",
            Quantity::Velocity => "velocity",
            Quantity::Position => "position",
        };
        f.write_str(name)
    }
}

/// Errors that halt a tick
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    #[error("entity {entity} has non-finite {quantity} {value}")]
    NonFinite {
        entity: EntityId,
        quantity: Quantity,
        value: Vector2D,
    },
    #[error("entity {entity} moves {velocity} per tick, a full map period or more")]
    Overspeed { entity: EntityId, velocity: Vector2D },
    #[error("invalid state transition {from:?} -> {to:?}")]
    InvalidTransition { from: GameState, to: GameState },
}

/// Lifecycle callback, invoked with the game after the transition
pub type Listener = Box<dyn FnMut(&Game) + Send>;

pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) torus: Torus,
    pub(crate) tick: u64,
    pub(crate) state: GameState,
    /// Goals first, then each player's seekers; order is stable for the match
    pub(crate) entities: Vec<Entity>,
    pub(crate) players: Vec<Player>,
    pub(crate) camps: Vec<Camp>,
    pub(crate) rng: StdRng,
    on_started: Vec<Listener>,
    on_finished: Vec<Listener>,
    next_entity_id: EntityId,
}

impl Game {
    /// Validate `config` and populate the world: goals, then one camp and
    /// `seekers` seekers per player, all at random positions except camps.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let torus = Torus::from_config(&config.map);
        let rng = match config.global.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut game = Self {
            torus,
            tick: 0,
            state: GameState::Preparing,
            entities: Vec::new(),
            players: Vec::new(),
            camps: Vec::new(),
            rng,
            on_started: Vec::new(),
            on_finished: Vec::new(),
            next_entity_id: 0,
            config,
        };
        game.populate();

        info!(
            "Game created: {} players, {} seekers each, {} goals on {}x{}",
            game.config.global.players,
            game.config.global.seekers,
            game.config.global.goals,
            game.torus.width(),
            game.torus.height()
        );
        Ok(game)
    }

    fn populate(&mut self) {
        let goal_properties = Arc::new(self.config.goal.clone());
        for _ in 0..self.config.global.goals {
            let id = self.next_entity_id();
            let position = self.torus.random_position(&mut self.rng);
            self.entities
                .push(Entity::Goal(Goal::new(id, position, Arc::clone(&goal_properties))));
        }

        let seeker_properties = Arc::new(self.config.seeker.clone());
        let count = self.config.global.players;
        for index in 0..count {
            let player_id: PlayerId = index;
            let camp_id: CampId = index;
            let position = Camp::layout_position(index, count, self.torus.width(), self.torus.height());
            self.camps.push(Camp::new(
                camp_id,
                player_id,
                position,
                self.config.camp.width,
                self.config.camp.height,
            ));

            let mut player = Player::new(player_id, camp_id);
            for _ in 0..self.config.global.seekers {
                let id = self.next_entity_id();
                let position = self.torus.random_position(&mut self.rng);
                self.entities.push(Entity::Seeker(Seeker::new(
                    id,
                    player_id,
                    position,
                    Arc::clone(&seeker_properties),
                )));
                player.seekers.push(id);
            }
            self.players.push(player);
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn camps(&self) -> &[Camp] {
        &self.camps
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn camp(&self, id: CampId) -> Option<&Camp> {
        self.camps.iter().find(|c| c.id == id)
    }

    pub fn seeker(&self, id: EntityId) -> Option<&Seeker> {
        self.seekers().find(|s| s.id() == id)
    }

    pub fn seeker_mut(&mut self, id: EntityId) -> Option<&mut Seeker> {
        self.entities
            .iter_mut()
            .filter_map(Entity::as_seeker_mut)
            .find(|s| s.id() == id)
    }

    pub fn goal(&self, id: EntityId) -> Option<&Goal> {
        self.goals().find(|g| g.id() == id)
    }

    pub fn goal_mut(&mut self, id: EntityId) -> Option<&mut Goal> {
        self.entities
            .iter_mut()
            .filter_map(Entity::as_goal_mut)
            .find(|g| g.id() == id)
    }

    pub fn seekers(&self) -> impl Iterator<Item = &Seeker> {
        self.entities.iter().filter_map(Entity::as_seeker)
    }

    pub fn goals(&self) -> impl Iterator<Item = &Goal> {
        self.entities.iter().filter_map(Entity::as_goal)
    }

    /// Register a callback for `Preparing -> Running`. Callbacks run in
    /// registration order.
    pub fn on_game_started<F>(&mut self, listener: F)
    where
        F: FnMut(&Game) + Send + 'static,
    {
        self.on_started.push(Box::new(listener));
    }

    /// Register a callback for `Running -> Finished`
    pub fn on_game_finished<F>(&mut self, listener: F)
    where
        F: FnMut(&Game) + Send + 'static,
    {
        self.on_finished.push(Box::new(listener));
    }

    pub fn start(&mut self) -> Result<(), SimulationError> {
        self.set_state(GameState::Running)
    }

    /// Move the state machine forward. Setting the current state again is a
    /// no-op; any backward or skipping transition is rejected.
    pub fn set_state(&mut self, next: GameState) -> Result<(), SimulationError> {
        let from = self.state;
        if from == next {
            return Ok(());
        }
        match (from, next) {
            (GameState::Preparing, GameState::Running) => {
                self.state = next;
                info!("Game started at tick {}", self.tick);
                self.notify(next);
                Ok(())
            }
            (GameState::Running, GameState::Finished) => {
                self.state = next;
                info!("Game finished at tick {}", self.tick);
                self.notify(next);
                Ok(())
            }
            _ => {
                warn!("Rejected transition {:?} -> {:?}", from, next);
                Err(SimulationError::InvalidTransition { from, to: next })
            }
        }
    }

    fn notify(&mut self, state: GameState) {
        let slot = match state {
            GameState::Running => &mut self.on_started,
            GameState::Finished => &mut self.on_finished,
            GameState::Preparing => return,
        };
        let mut listeners = std::mem::take(slot);
        for listener in listeners.iter_mut() {
            listener(&*self);
        }
        match state {
            GameState::Running => self.on_started = listeners,
            _ => self.on_finished = listeners,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// A `Preparing` game is started first; a `Finished` game does nothing.
    /// Every entity is updated once in list order, then the tick counter
    /// advances and the playtime limit is checked. A non-finite quantity
    /// aborts the tick.
    pub fn update_all(&mut self) -> Result<Vec<GameEvent>, SimulationError> {
        let mut events = Vec::new();
        match self.state {
            GameState::Finished => return Ok(events),
            GameState::Preparing => {
                self.transition(GameState::Running, &mut events)?;
            }
            GameState::Running => {}
        }

        for index in 0..self.entities.len() {
            physics::update_entity(self, index, &mut events)?;
        }
        self.tick += 1;

        if self.tick >= self.config.global.playtime {
            self.transition(GameState::Finished, &mut events)?;
        }
        Ok(events)
    }

    fn transition(&mut self, to: GameState, events: &mut Vec<GameEvent>) -> Result<(), SimulationError> {
        let from = self.state;
        self.set_state(to)?;
        events.push(GameEvent::PhaseChanged {
            from,
            to,
            tick: self.tick,
        });
        Ok(())
    }

    /// Apply one remote command for `player`. Unknown seekers, seekers owned
    /// by someone else, non-finite values and unchanged values are ignored.
    /// Returns whether the seeker changed.
    pub fn apply_command(&mut self, player: PlayerId, seeker: EntityId, target: Vector2D, magnet: f64) -> bool {
        let owned = self.player(player).is_some_and(|p| p.owns(seeker));
        if !owned {
            debug!("Ignoring command from player {} for seeker {}", player, seeker);
            return false;
        }
        if !target.is_finite() || !magnet.is_finite() {
            warn!("Ignoring non-finite command from player {} for seeker {}", player, seeker);
            return false;
        }
        let torus = self.torus;
        let Some(seeker) = self.seeker_mut(seeker) else {
            return false;
        };

        let target = torus.normalize_far(target);
        let magnet = magnet.clamp(constants::magnet::MIN, constants::magnet::MAX);
        let mut changed = false;
        if seeker.target() != target {
            seeker.set_target(target);
            changed = true;
        }
        if seeker.magnet() != magnet && seeker.set_magnet(magnet) {
            changed = true;
        }
        changed
    }

    /// Apply a batch; each command stands alone. Returns how many changed a seeker.
    pub fn apply_commands(&mut self, player: PlayerId, commands: &[Command]) -> usize {
        commands
            .iter()
            .filter(|c| self.apply_command(player, c.seeker_id, c.target, c.magnet))
            .count()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_game(self)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("tick", &self.tick)
            .field("state", &self.state)
            .field("torus", &self.torus)
            .field("entities", &self.entities.len())
            .field("players", &self.players)
            .field("camps", &self.camps)
            .field("on_started", &self.on_started.len())
            .field("on_finished", &self.on_finished.len())
            .finish()
    }
}
