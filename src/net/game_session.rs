//! Game session manager - runs the game loop and broadcasts state to viewers

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::game::command_buffer::{Command, CommandSender};
use crate::game::events::GameEvent;
use crate::game::game_loop::{GameLoop, TickClock};
use crate::game::state::{Game, SimulationError};
use crate::net::protocol::{ClientMessage, ServerMessage};
use crate::net::session::{JoinTicket, SessionError, SessionRegistry, SessionToken};

/// Broadcast backlog per subscriber before it starts lagging
const BROADCAST_CAPACITY: usize = 256;

/// One match plus the controllers attached to it
pub struct GameSession {
    id: Uuid,
    game_loop: GameLoop,
    sessions: SessionRegistry,
    updates: broadcast::Sender<Arc<ServerMessage>>,
}

/// Commands and ticks both go through this lock, so a command is applied
/// either before or after a tick, never during one
pub type SharedSession = Arc<Mutex<GameSession>>;

impl GameSession {
    pub fn new(game: Game) -> Self {
        let (updates, _) = broadcast::channel(BROADCAST_CAPACITY);
        let id = Uuid::new_v4();
        info!("Game session {} created", id);
        Self {
            id,
            game_loop: GameLoop::new(game),
            sessions: SessionRegistry::new(),
            updates,
        }
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn game(&self) -> &Game {
        self.game_loop.game()
    }

    pub fn game_mut(&mut self) -> &mut Game {
        self.game_loop.game_mut()
    }

    /// Queue handle for connections that should not take the session lock
    pub fn command_sender(&self) -> CommandSender {
        self.game_loop.command_sender()
    }

    /// Receive snapshots, events and phase changes as ticks happen
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ServerMessage>> {
        self.updates.subscribe()
    }

    pub fn join(&mut self, name: Option<&str>, color: Option<&str>) -> Result<JoinTicket, SessionError> {
        self.sessions.join(self.game_loop.game_mut(), name, color)
    }

    /// Apply a command batch right away. Returns how many commands changed a seeker.
    pub fn command(&mut self, token: &SessionToken, commands: &[Command]) -> Result<usize, SessionError> {
        let player = self.sessions.authorize(token)?;
        let applied = self.game_loop.game_mut().apply_commands(player, commands);
        debug!("Player {} applied {}/{} commands", player, applied, commands.len());
        Ok(applied)
    }

    /// Request/response handling for one controller message
    pub fn handle(&mut self, message: ClientMessage) -> ServerMessage {
        match message {
            ClientMessage::Join { name, color } => match self.join(name.as_deref(), color.as_deref()) {
                Ok(ticket) => ServerMessage::JoinAccepted {
                    player_id: ticket.player_id,
                    token: ticket.token,
                    config: ticket.config,
                },
                Err(e) => {
                    warn!("Join rejected: {}", e);
                    ServerMessage::JoinRejected { reason: e.to_string() }
                }
            },
            ClientMessage::Command { token, commands } => match self.command(&token, &commands) {
                Ok(_) => ServerMessage::Snapshot(self.game().snapshot()),
                Err(e) => ServerMessage::Rejected { reason: e.to_string() },
            },
            ClientMessage::Ping { timestamp } => ServerMessage::Pong {
                client_timestamp: timestamp,
                server_timestamp: now_millis(),
            },
        }
    }

    /// Run one tick and publish what happened
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, SimulationError> {
        let events = self.game_loop.tick()?;
        for event in &events {
            let message = match event {
                GameEvent::PhaseChanged { to, tick, .. } => ServerMessage::PhaseChange { state: *to, tick: *tick },
                other => ServerMessage::Event(other.clone()),
            };
            self.publish(message);
        }
        self.publish(ServerMessage::Snapshot(self.game().snapshot()));
        Ok(events)
    }

    fn publish(&self, message: ServerMessage) {
        // No subscribers is fine
        let _ = self.updates.send(Arc::new(message));
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Drive `session` on `clock` until the game finishes, the shutdown flag is
/// raised, or its sender goes away. A simulation error stops the loop and is
/// returned from the task.
pub fn start_game_loop<C>(
    session: SharedSession,
    mut clock: C,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<Result<(), SimulationError>>
where
    C: TickClock + Send + 'static,
{
    tokio::spawn(async move {
        let id = session.lock().id();
        info!("Game loop for session {} started", id);

        loop {
            if *shutdown.borrow() {
                info!("Game loop for session {} stopped", id);
                return Ok(());
            }

            tokio::select! {
                _ = clock.next_tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        info!("Shutdown channel closed, stopping session {}", id);
                        return Ok(());
                    }
                    continue;
                }
            }

            let finished = {
                let mut guard = session.lock();
                if let Err(e) = guard.tick() {
                    error!("Game tick failed in session {}: {}", id, e);
                    return Err(e);
                }
                guard.game().is_finished()
            };

            if finished {
                info!("Game in session {} finished", id);
                return Ok(());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::game_loop::ImmediateClock;
    use crate::game::state::GameState;
    use crate::util::vec2::Vector2D;

    fn create_test_session(playtime: u64) -> GameSession {
        let mut config = GameConfig::default();
        config.global.players = 2;
        config.global.seekers = 2;
        config.global.goals = 1;
        config.global.playtime = playtime;
        config.global.seed = Some(8);
        GameSession::new(Game::new(config).unwrap())
    }

    #[test]
    fn test_handle_join_and_command() {
        let mut session = create_test_session(10);

        let token = match session.handle(ClientMessage::Join {
            name: Some("Red".to_string()),
            color: None,
        }) {
            ServerMessage::JoinAccepted { player_id, token, .. } => {
                assert_eq!(player_id, 0);
                token
            }
            other => panic!("unexpected {:?}", other),
        };

        let seeker = session.game().players()[0].seekers[0];
        let reply = session.handle(ClientMessage::Command {
            token,
            commands: vec![Command {
                seeker_id: seeker,
                target: Vector2D::new(50.0, 60.0),
                magnet: 1.0,
            }],
        });

        match reply {
            ServerMessage::Snapshot(snapshot) => {
                let view = snapshot.seeker(seeker).unwrap();
                assert_eq!(view.target, Vector2D::new(50.0, 60.0));
                assert_eq!(view.magnet, 1.0);
                assert_eq!(snapshot.player(0).unwrap().name, "Red");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_handle_rejections() {
        let mut session = create_test_session(10);
        session.handle(ClientMessage::Join { name: None, color: None });
        session.handle(ClientMessage::Join { name: None, color: None });

        assert!(matches!(
            session.handle(ClientMessage::Join { name: None, color: None }),
            ServerMessage::JoinRejected { .. }
        ));
        assert!(matches!(
            session.handle(ClientMessage::Command {
                token: SessionToken::generate(),
                commands: Vec::new(),
            }),
            ServerMessage::Rejected { .. }
        ));
        assert!(matches!(
            session.handle(ClientMessage::Ping { timestamp: 5 }),
            ServerMessage::Pong { client_timestamp: 5, .. }
        ));
    }

    #[test]
    fn test_tick_publishes_phase_and_snapshot() {
        let mut session = create_test_session(10);
        let mut updates = session.subscribe();

        session.tick().unwrap();

        let first = updates.try_recv().unwrap();
        assert_eq!(
            *first,
            ServerMessage::PhaseChange {
                state: GameState::Running,
                tick: 0
            }
        );
        let snapshot = std::iter::from_fn(|| updates.try_recv().ok())
            .find_map(|m| match &*m {
                ServerMessage::Snapshot(snapshot) => Some(snapshot.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(snapshot.tick, 1);
    }

    #[tokio::test]
    async fn test_loop_runs_until_finished() {
        let session = create_test_session(20).shared();
        let (_stop, shutdown) = watch::channel(false);

        let handle = start_game_loop(Arc::clone(&session), ImmediateClock, shutdown);
        handle.await.unwrap().unwrap();

        let guard = session.lock();
        assert_eq!(guard.game().state(), GameState::Finished);
        assert_eq!(guard.game().tick(), 20);
    }

    #[tokio::test]
    async fn test_loop_stops_on_shutdown() {
        let session = create_test_session(u64::MAX).shared();
        let (stop, shutdown) = watch::channel(false);
        let mut updates = session.lock().subscribe();

        let handle = start_game_loop(Arc::clone(&session), ImmediateClock, shutdown);
        // Wait until the loop has ticked at least once
        updates.recv().await.unwrap();
        stop.send(true).unwrap();
        handle.await.unwrap().unwrap();

        let guard = session.lock();
        assert_eq!(guard.game().state(), GameState::Running);
        assert!(guard.game().tick() > 0);
    }

    #[tokio::test]
    async fn test_loop_stops_when_sender_dropped() {
        let session = create_test_session(u64::MAX).shared();
        let (stop, shutdown) = watch::channel(false);
        drop(stop);

        let handle = start_game_loop(Arc::clone(&session), ImmediateClock, shutdown);
        handle.await.unwrap().unwrap();
    }
}
