use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use seekers_server::config::GameConfig;
use seekers_server::game::game_loop::IntervalClock;
use seekers_server::game::match_result::determine_result;
use seekers_server::game::state::Game;
use seekers_server::net::game_session::{start_game_loop, GameSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    info!("Seekers Server v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load_or_default();
    let tick_duration = config.global.tick_duration();
    info!(
        "Configuration loaded: {} players, playtime {} ticks, tick {:?}",
        config.global.players, config.global.playtime, tick_duration
    );

    let mut game = Game::new(config)?;
    game.on_game_started(|g| info!("Match running with {} entities", g.entities().len()));
    game.on_game_finished(|g| {
        for player in g.players() {
            info!("{} scored {}", player.name, player.score);
        }
    });

    let session = GameSession::new(game).shared();
    let (stop, shutdown) = watch::channel(false);

    // Shutdown signal handler
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = stop.send(true);
            }
            Err(e) => {
                // Dropping `stop` would end the loop, so keep it alive
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    });

    let handle = start_game_loop(Arc::clone(&session), IntervalClock::new(tick_duration), shutdown);
    handle.await??;

    let result = determine_result(session.lock().game());
    println!("{}", serde_json::to_string_pretty(&result)?);
    info!("Server stopped");

    Ok(())
}
