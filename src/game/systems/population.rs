//! Population manager
//!
//! Tops food, AI players and the player back up to their targets after the
//! collision passes have removed whatever was eaten.

use rand::Rng;
use std::f32::consts::TAU;

use crate::config::GameConfig;
use crate::game::constants::hsl_color;
use crate::game::spatial::{find_safe_spawn_location, random_position};
use crate::game::state::{AiPlayer, Cell, Food, GameState};
use crate::game::systems::ai::AiFactory;
use crate::util::vec2::Vec2;

/// What a call to [`respawn_entities`] created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RespawnReport {
    pub food_spawned: usize,
    pub ai_spawned: usize,
    pub player_respawned: bool,
}

impl RespawnReport {
    pub fn is_empty(&self) -> bool {
        self.food_spawned == 0 && self.ai_spawned == 0 && !self.player_respawned
    }
}

/// Bring every population back to its target. No-op when already there.
pub fn respawn_entities<F, R>(
    state: &mut GameState,
    config: &GameConfig,
    factory: &mut F,
    rng: &mut R,
) -> RespawnReport
where
    F: AiFactory + ?Sized,
    R: Rng,
{
    let mut report = RespawnReport::default();

    while state.food.len() < config.food_count {
        state.food.push(spawn_food(config, rng));
        report.food_spawned += 1;
    }

    while state.ai_players.len() < config.ai_count {
        let position = find_safe_spawn_location(state, config, rng);
        let spawn = factory.spawn_ai(rng);
        let rotation = spawn.rotation.unwrap_or_else(|| rng.gen_range(0.0..TAU));

        state.ai_players.push(AiPlayer::new(
            Cell::new(position, spawn.score, rotation),
            spawn.name,
            spawn.color,
        ));
        report.ai_spawned += 1;
    }

    if state.player_cells.is_empty() {
        spawn_player_cell(state, config, rng);
        report.player_respawned = true;
    }

    if !report.is_empty() {
        tracing::debug!(
            "Respawned {} food, {} AI, player: {}",
            report.food_spawned,
            report.ai_spawned,
            report.player_respawned
        );
    }

    report
}

/// Food at a random position with a random hue and facing
pub fn spawn_food<R: Rng>(config: &GameConfig, rng: &mut R) -> Food {
    let position = random_position(config.world_size, rng);
    let color = hsl_color(rng.gen_range(0.0..360.0));
    Food::new(position, color, rng.gen_range(0.0..TAU))
}

/// Add one fresh player cell at a safe location and return where it landed
pub fn spawn_player_cell<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> Vec2 {
    let position = find_safe_spawn_location(state, config, rng);
    let rotation = rng.gen_range(0.0..TAU);
    state
        .player_cells
        .push(Cell::new(position, config.starting_score, rotation));

    tracing::info!(
        "Player '{}' spawned at ({:.0}, {:.0})",
        state.player_name,
        position.x,
        position.y
    );
    position
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::systems::ai::{AiSpawn, RandomAiFactory};
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn small_config() -> GameConfig {
        GameConfig {
            world_size: 1000.0,
            food_count: 20,
            ai_count: 4,
            ..Default::default()
        }
    }

    struct FixedFactory {
        calls: usize,
    }

    impl AiFactory for FixedFactory {
        fn spawn_ai(&mut self, _rng: &mut dyn RngCore) -> AiSpawn {
            self.calls += 1;
            AiSpawn {
                name: format!("Fixed{}", self.calls),
                color: "white".to_string(),
                score: 75.0,
                rotation: Some(1.25),
            }
        }
    }

    #[test]
    fn test_respawn_fills_empty_world() {
        let config = small_config();
        let mut state = GameState::new("Tester");
        let mut factory = RandomAiFactory::from_config(&config);
        let mut rng = StdRng::seed_from_u64(11);

        let report = respawn_entities(&mut state, &config, &mut factory, &mut rng);

        assert_eq!(state.food.len(), 20);
        assert_eq!(state.ai_players.len(), 4);
        assert_eq!(state.player_cells.len(), 1);
        assert_eq!(state.player_cells[0].score, config.starting_score);
        assert_eq!(report.food_spawned, 20);
        assert_eq!(report.ai_spawned, 4);
        assert!(report.player_respawned);
    }

    #[test]
    fn test_respawn_is_idempotent_at_target() {
        let config = small_config();
        let mut state = GameState::new("Tester");
        let mut factory = RandomAiFactory::from_config(&config);
        let mut rng = StdRng::seed_from_u64(11);

        respawn_entities(&mut state, &config, &mut factory, &mut rng);
        let before = state.clone();
        let report = respawn_entities(&mut state, &config, &mut factory, &mut rng);

        assert!(report.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_respawn_tops_up_partial_world() {
        let config = small_config();
        let mut state = GameState::new("Tester");
        let mut factory = RandomAiFactory::from_config(&config);
        let mut rng = StdRng::seed_from_u64(5);

        respawn_entities(&mut state, &config, &mut factory, &mut rng);
        state.food.truncate(3);
        state.ai_players.truncate(1);
        let existing_player = state.player_cells[0].clone();

        let report = respawn_entities(&mut state, &config, &mut factory, &mut rng);

        assert_eq!(report.food_spawned, 17);
        assert_eq!(report.ai_spawned, 3);
        assert!(!report.player_respawned);
        assert_eq!(state.food.len(), config.food_count);
        assert_eq!(state.ai_players.len(), config.ai_count);
        assert_eq!(state.player_cells, vec![existing_player]);
    }

    #[test]
    fn test_factory_rotation_is_kept() {
        let config = small_config();
        let mut state = GameState::new("Tester");
        let mut factory = FixedFactory { calls: 0 };
        let mut rng = StdRng::seed_from_u64(9);

        respawn_entities(&mut state, &config, &mut factory, &mut rng);

        assert_eq!(factory.calls, config.ai_count);
        for ai in &state.ai_players {
            assert_eq!(ai.cell.rotation, 1.25);
            assert_eq!(ai.cell.score, 75.0);
            assert!(ai.name.starts_with("Fixed"));
        }
    }

    #[test]
    fn test_spawned_food_inside_world() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let food = spawn_food(&config, &mut rng);
            assert!((0.0..config.world_size).contains(&food.position.x));
            assert!((0.0..config.world_size).contains(&food.position.y));
            assert!((0.0..TAU).contains(&food.rotation));
        }
    }
}
