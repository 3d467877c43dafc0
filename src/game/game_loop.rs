//! Tick driver
//!
//! Owns the world and runs one full tick at a time:
//! food → player-vs-AI → AI-vs-AI → respawn. A tick always runs to
//! completion before the world is handed back to the caller.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::game::constants::camera::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::game::leaderboard::{leaderboard, LeaderboardEntry};
use crate::game::spatial::calculate_center_of_mass;
use crate::game::state::GameState;
use crate::game::systems::ai::{AiFactory, RandomAiFactory};
use crate::game::systems::collision::{self, CollisionEvent};
use crate::game::systems::population::{self, RespawnReport};
use crate::util::vec2::Vec2;

/// Summary of a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub food_eaten: usize,
    pub ai_eaten_by_player: usize,
    pub ai_eaten_by_ai: usize,
    pub player_cells_lost: usize,
    pub player_respawned: bool,
    pub respawn: RespawnReport,
    pub events: Vec<CollisionEvent>,
}

impl TickReport {
    fn record(&mut self, events: Vec<CollisionEvent>) {
        for event in &events {
            match event {
                CollisionEvent::FoodEaten { count, .. } => self.food_eaten += count,
                CollisionEvent::AiConsumedByPlayer { .. } => self.ai_eaten_by_player += 1,
                CollisionEvent::PlayerCellConsumed { .. } => self.player_cells_lost += 1,
                CollisionEvent::AiConsumedByAi { .. } => self.ai_eaten_by_ai += 1,
                CollisionEvent::PlayerRespawned { .. } => self.player_respawned = true,
            }
        }
        self.events.extend(events);
    }
}

/// A self-contained simulation: world, config, AI factory and RNG
pub struct Simulation<F: AiFactory = RandomAiFactory, R: Rng = StdRng> {
    config: GameConfig,
    state: GameState,
    factory: F,
    rng: R,
    viewport: (f32, f32),
}

impl Simulation {
    /// Simulation with the default AI factory and an entropy-seeded RNG
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        let factory = RandomAiFactory::from_config(&config);
        Self::new(config, factory, StdRng::from_entropy())
    }
}

impl<F: AiFactory, R: Rng> Simulation<F, R> {
    /// Validate the config and populate an initial world
    pub fn new(config: GameConfig, factory: F, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let state = GameState::new(config.player_name.clone());
        let mut sim = Self {
            config,
            state,
            factory,
            rng,
            viewport: (DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
        };

        let report = population::respawn_entities(
            &mut sim.state,
            &sim.config,
            &mut sim.factory,
            &mut sim.rng,
        );
        sim.update_camera();

        tracing::info!(
            "World populated: {} food, {} AI, {} player cell(s)",
            report.food_spawned,
            report.ai_spawned,
            sim.state.player_cells.len()
        );

        Ok(sim)
    }

    /// Run one full tick
    pub fn tick(&mut self) -> TickReport {
        self.state.tick += 1;
        let mut report = TickReport {
            tick: self.state.tick,
            ..Default::default()
        };

        report.record(collision::handle_food_collisions(&mut self.state, &self.config));
        report.record(collision::handle_player_ai_collisions(
            &mut self.state,
            &self.config,
            &mut self.rng,
        ));
        report.record(collision::handle_ai_ai_collisions(&mut self.state, &self.config));

        report.respawn = population::respawn_entities(
            &mut self.state,
            &self.config,
            &mut self.factory,
            &mut self.rng,
        );
        report.player_respawned |= report.respawn.player_respawned;

        self.update_camera();

        if report.player_respawned {
            tracing::info!("Tick {}: player lost all cells and respawned", report.tick);
        }

        report
    }

    /// Center the camera on the player's center of mass
    pub fn update_camera(&mut self) {
        let fallback = Vec2::world_center(self.config.world_size);
        let focus = calculate_center_of_mass(&self.state.player_cells, fallback);
        let (width, height) = self.viewport;
        self.state.center_camera_on(focus, width, height);
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width.max(0.0), height.max(0.0));
        self.update_camera();
    }

    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        leaderboard(&self.state, limit)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable world access for external gameplay (movement, splitting)
    /// between ticks
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
