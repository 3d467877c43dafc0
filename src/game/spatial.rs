//! Spatial queries shared by the collision passes, the population manager
//! and the renderer

use rand::Rng;

use crate::config::GameConfig;
use crate::game::constants::score_to_size;
use crate::game::state::{Cell, GameState};
use crate::util::vec2::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn get_distance(a: Vec2, b: Vec2) -> f32 {
    a.distance_to(b)
}

/// Collision/render size for a score. Same formula everywhere.
#[inline]
pub fn get_size(score: f32) -> f32 {
    score_to_size(score)
}

/// Uniform random position inside the world square
pub fn random_position<R: Rng>(world_size: f32, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.gen_range(0.0..world_size),
        rng.gen_range(0.0..world_size),
    )
}

/// Random position clear of every existing cell
///
/// A candidate is safe when it keeps `safe_spawn_distance` of clearance from
/// the edge of every player and AI cell. Gives up after
/// `max_spawn_attempts` candidates and returns a plain random position.
pub fn find_safe_spawn_location<R: Rng>(
    state: &GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Vec2 {
    for _ in 0..config.max_spawn_attempts {
        let pos = random_position(config.world_size, rng);

        let is_safe = state.occupied().all(|(other, size)| {
            get_distance(pos, other) >= config.safe_spawn_distance + size
        });

        if is_safe {
            return pos;
        }
    }

    tracing::debug!(
        "No safe spawn found in {} attempts, using random position",
        config.max_spawn_attempts
    );
    random_position(config.world_size, rng)
}

/// Score-weighted average position of `cells`
///
/// With zero total score the plain average is used; an empty list yields
/// `fallback`.
pub fn calculate_center_of_mass(cells: &[Cell], fallback: Vec2) -> Vec2 {
    if cells.is_empty() {
        return fallback;
    }

    let total: f32 = cells.iter().map(|c| c.score.max(0.0)).sum();
    let center = if total > 0.0 {
        let weighted = cells
            .iter()
            .fold(Vec2::ZERO, |acc, c| acc + c.position * c.score.max(0.0));
        weighted * (1.0 / total)
    } else {
        let sum = cells.iter().fold(Vec2::ZERO, |acc, c| acc + c.position);
        sum * (1.0 / cells.len() as f32)
    };

    if center.is_finite() {
        center
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::AiPlayer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_get_distance() {
        assert!((get_distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_get_size_matches_cell_size() {
        let cell = Cell::new(Vec2::ZERO, 256.0, 0.0);
        assert_eq!(get_size(256.0), cell.size());
    }

    #[test]
    fn test_random_position_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = random_position(500.0, &mut rng);
            assert!((0.0..500.0).contains(&p.x));
            assert!((0.0..500.0).contains(&p.y));
        }
    }

    #[test]
    fn test_safe_spawn_keeps_clearance() {
        let config = GameConfig {
            world_size: 1000.0,
            safe_spawn_distance: 50.0,
            ..Default::default()
        };
        let mut state = GameState::default();
        state.player_cells.push(Cell::new(Vec2::new(500.0, 500.0), 100.0, 0.0));
        state.ai_players.push(AiPlayer::new(
            Cell::new(Vec2::new(200.0, 200.0), 400.0, 0.0),
            "Bot".to_string(),
            "red".to_string(),
        ));

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let pos = find_safe_spawn_location(&state, &config, &mut rng);
            for (other, size) in state.occupied() {
                assert!(get_distance(pos, other) >= 50.0 + size);
            }
        }
    }

    #[test]
    fn test_safe_spawn_falls_back_when_crowded() {
        let config = GameConfig {
            world_size: 100.0,
            safe_spawn_distance: 1000.0,
            max_spawn_attempts: 5,
            ..Default::default()
        };
        let mut state = GameState::default();
        state.player_cells.push(Cell::new(Vec2::new(50.0, 50.0), 100.0, 0.0));

        let mut rng = StdRng::seed_from_u64(1);
        let pos = find_safe_spawn_location(&state, &config, &mut rng);
        assert!((0.0..100.0).contains(&pos.x));
        assert!((0.0..100.0).contains(&pos.y));
    }

    #[test]
    fn test_center_of_mass_weighted() {
        let cells = vec![
            Cell::new(Vec2::new(0.0, 0.0), 300.0, 0.0),
            Cell::new(Vec2::new(100.0, 0.0), 100.0, 0.0),
        ];
        let c = calculate_center_of_mass(&cells, Vec2::ZERO);
        assert!((c.x - 25.0).abs() < 1e-4);
        assert!(c.y.abs() < 1e-4);
    }

    #[test]
    fn test_center_of_mass_empty_uses_fallback() {
        let fallback = Vec2::new(1500.0, 1500.0);
        assert_eq!(calculate_center_of_mass(&[], fallback), fallback);
    }

    #[test]
    fn test_center_of_mass_zero_scores() {
        let cells = vec![
            Cell::new(Vec2::new(0.0, 10.0), 0.0, 0.0),
            Cell::new(Vec2::new(20.0, 30.0), 0.0, 0.0),
        ];
        let c = calculate_center_of_mass(&cells, Vec2::ZERO);
        assert_eq!(c, Vec2::new(10.0, 20.0));
    }
}
