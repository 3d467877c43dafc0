use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use triangle_arena::config::GameConfig;
use triangle_arena::game::constants::leaderboard::DEFAULT_LIMIT;
use triangle_arena::game::game_loop::Simulation;
use triangle_arena::game::leaderboard::player_rank;

/// Ticks between status lines
const REPORT_INTERVAL: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Triangle Arena v{}", env!("CARGO_PKG_VERSION"));

    let config = GameConfig::load_or_default();
    config.validate()?;
    info!(
        "Configuration loaded: world={}, food={}, ai={}, threshold={}",
        config.world_size, config.food_count, config.ai_count, config.collision_threshold
    );

    let max_ticks: Option<u64> = std::env::var("MAX_TICKS")
        .ok()
        .and_then(|s| s.parse().ok());

    let tick_interval = Duration::from_millis(config.tick_duration_ms());
    let mut sim = Simulation::from_config(config)?;

    let run = async {
        let mut interval = tokio::time::interval(tick_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut ai_eaten = 0usize;
        let mut respawns = 0usize;

        loop {
            interval.tick().await;
            let report = sim.tick();
            ai_eaten += report.ai_eaten_by_player;
            respawns += usize::from(report.player_respawned);

            if report.tick % REPORT_INTERVAL == 0 {
                let state = sim.state();
                info!(
                    "Tick {}: player score={:.0} rank={} cells={} kills={} respawns={}",
                    report.tick,
                    state.player_total_score(),
                    player_rank(state),
                    state.player_cells.len(),
                    ai_eaten,
                    respawns
                );
                match serde_json::to_string(&sim.leaderboard(DEFAULT_LIMIT)) {
                    Ok(json) => info!("Leaderboard: {}", json),
                    Err(e) => error!("Failed to serialize leaderboard: {}", e),
                }
            }

            if max_ticks.is_some_and(|max| report.tick >= max) {
                info!("Reached {} ticks", report.tick);
                break;
            }
        }
    };

    // Shutdown signal handler
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    tokio::select! {
        _ = run => {}
        _ = shutdown => {
            info!("Shutting down...");
        }
    }

    info!("Simulation stopped");
    Ok(())
}
