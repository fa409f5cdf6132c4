//! Tick driver
//!
//! `GameLoop` pairs a `Game` with its command buffer: every tick first applies
//! the commands queued since the previous tick, then advances the simulation.
//! Pacing is left to a `TickClock`, so the same loop runs under a real-time
//! interval or as fast as possible in tests and benchmarks.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::game::command_buffer::{CommandBuffer, CommandSender};
use crate::game::events::GameEvent;
use crate::game::state::{Game, SimulationError};

/// Source of tick boundaries
pub trait TickClock {
    /// Resolve when the next tick is due
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Fixed-rate clock; late ticks are skipped rather than bunched up
pub struct IntervalClock {
    interval: Interval,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

impl TickClock for IntervalClock {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        async move {
            self.interval.tick().await;
        }
    }
}

/// Ticks back to back, only yielding to the runtime in between
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateClock;

impl TickClock for ImmediateClock {
    fn next_tick(&mut self) -> impl Future<Output = ()> + Send {
        tokio::task::yield_now()
    }
}

pub struct GameLoop {
    game: Game,
    commands: CommandBuffer,
}

impl GameLoop {
    pub fn new(game: Game) -> Self {
        Self::with_buffer(game, CommandBuffer::default())
    }

    pub fn with_buffer(game: Game, commands: CommandBuffer) -> Self {
        Self { game, commands }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn commands(&self) -> &CommandBuffer {
        &self.commands
    }

    /// Handle for connections that queue commands for the next tick
    pub fn command_sender(&self) -> CommandSender {
        self.commands.sender()
    }

    /// Apply queued commands, then advance the game by one tick
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, SimulationError> {
        let pending = self.commands.drain();
        if !pending.is_empty() {
            let applied = pending
                .iter()
                .filter(|m| {
                    self.game
                        .apply_command(m.player_id, m.command.seeker_id, m.command.target, m.command.magnet)
                })
                .count();
            debug!("Applied {}/{} queued commands", applied, pending.len());
        }
        self.game.update_all()
    }

    /// Tick on `clock` until the game finishes
    pub async fn run_to_completion<C: TickClock>(&mut self, clock: &mut C) -> Result<(), SimulationError> {
        while !self.game.is_finished() {
            clock.next_tick().await;
            self.tick()?;
        }
        info!("Game loop completed after {} ticks", self.game.tick());
        Ok(())
    }
}
