//! World state definitions
//!
//! Holds every entity the simulation touches: player cells, AI players and
//! food. Entities are plain values; relationships between them are purely
//! positional.

use serde::{Deserialize, Serialize};

use crate::game::constants::score_to_size;
use crate::game::geometry::Triangle;
use crate::util::vec2::Vec2;

/// A player- or AI-controlled triangular cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub position: Vec2,
    /// Fitness; drives size and is what others gain when eating this cell
    pub score: f32,
    /// Facing angle in radians
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub velocity: Vec2,
}

impl Cell {
    pub fn new(position: Vec2, score: f32, rotation: f32) -> Self {
        Self {
            position,
            score: score.max(0.0),
            rotation,
            velocity: Vec2::ZERO,
        }
    }

    /// Collision size derived from score
    #[inline]
    pub fn size(&self) -> f32 {
        score_to_size(self.score)
    }

    /// Collision shape for this tick
    #[inline]
    pub fn triangle(&self) -> Triangle {
        Triangle::new(self.position.x, self.position.y, self.size(), self.rotation)
    }
}

/// AI-controlled cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPlayer {
    pub cell: Cell,
    pub name: String,
    pub color: String,
}

impl AiPlayer {
    pub fn new(cell: Cell, name: String, color: String) -> Self {
        Self { cell, name, color }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.cell.size()
    }
}

/// Food pellet; fixed size and reward, both taken from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Vec2,
    pub color: String,
    #[serde(default)]
    pub rotation: f32,
}

impl Food {
    pub fn new(position: Vec2, color: String, rotation: f32) -> Self {
        Self {
            position,
            color,
            rotation,
        }
    }

    #[inline]
    pub fn triangle(&self, food_size: f32) -> Triangle {
        Triangle::new(self.position.x, self.position.y, food_size, self.rotation)
    }
}

/// Viewport offset (top-left corner in world space) for the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

/// Complete world state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tick: u64,
    pub player_cells: Vec<Cell>,
    pub ai_players: Vec<AiPlayer>,
    pub food: Vec<Food>,
    pub camera: Camera,
    pub player_name: String,
}

impl GameState {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            ..Default::default()
        }
    }

    /// Sum of all player cell scores
    pub fn player_total_score(&self) -> f32 {
        self.player_cells.iter().map(|c| c.score).sum()
    }

    /// Positions and sizes of every cell (player and AI)
    pub fn occupied(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.player_cells
            .iter()
            .chain(self.ai_players.iter().map(|ai| &ai.cell))
            .map(|c| (c.position, c.size()))
    }

    /// Point the camera so that `focus` sits in the middle of a viewport of
    /// the given dimensions
    pub fn center_camera_on(&mut self, focus: Vec2, viewport_width: f32, viewport_height: f32) {
        self.camera.x = focus.x - viewport_width / 2.0;
        self.camera.y = focus.y - viewport_height / 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_new_clamps_score() {
        let cell = Cell::new(Vec2::new(1.0, 2.0), -5.0, 0.0);
        assert_eq!(cell.score, 0.0);
        assert_eq!(cell.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_cell_size_matches_score() {
        let cell = Cell::new(Vec2::ZERO, 100.0, 0.0);
        assert!((cell.size() - 20.0).abs() < 0.001);
        let t = cell.triangle();
        assert!((t.x1 - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_player_total_score() {
        let mut state = GameState::new("Tester");
        state.player_cells.push(Cell::new(Vec2::ZERO, 100.0, 0.0));
        state.player_cells.push(Cell::new(Vec2::ZERO, 50.0, 0.0));
        assert_eq!(state.player_total_score(), 150.0);
        assert_eq!(state.player_name, "Tester");
    }

    #[test]
    fn test_occupied_includes_ai() {
        let mut state = GameState::default();
        state.player_cells.push(Cell::new(Vec2::new(1.0, 1.0), 100.0, 0.0));
        state.ai_players.push(AiPlayer::new(
            Cell::new(Vec2::new(5.0, 5.0), 25.0, 0.0),
            "Bot".to_string(),
            "red".to_string(),
        ));
        let occupied: Vec<_> = state.occupied().collect();
        assert_eq!(occupied.len(), 2);
        assert_eq!(occupied[1].0, Vec2::new(5.0, 5.0));
        assert!((occupied[1].1 - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_missing_rotation_defaults_to_zero() {
        let json = r#"{"position":{"x":3.0,"y":4.0},"score":10.0}"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.rotation, 0.0);
        assert_eq!(cell.velocity, Vec2::ZERO);

        let json = r#"{"cell":{"position":{"x":3.0,"y":4.0},"score":10.0},"name":"Bot","color":"blue"}"#;
        let ai: AiPlayer = serde_json::from_str(json).unwrap();
        assert_eq!(ai.cell.rotation, 0.0);
        assert_eq!(ai.name, "Bot");
    }

    #[test]
    fn test_center_camera_on() {
        let mut state = GameState::default();
        state.center_camera_on(Vec2::new(500.0, 400.0), 800.0, 600.0);
        assert_eq!(state.camera, Camera { x: 100.0, y: 100.0 });
    }
}
