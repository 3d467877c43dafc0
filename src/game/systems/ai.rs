//! AI player creation
//!
//! Movement and decision making live outside this crate; the simulation only
//! needs something that can hand it fresh AI players to keep the arena full.

use rand::{Rng, RngCore};

use crate::config::GameConfig;
use crate::game::constants::{cosmetic::AI_NAMES, hsl_color};

/// A new AI player as produced by an [`AiFactory`]
///
/// Position is always assigned by the population manager. Rotation may be
/// left unset, in which case a random facing is chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSpawn {
    pub name: String,
    pub color: String,
    pub score: f32,
    pub rotation: Option<f32>,
}

/// Source of new AI players
pub trait AiFactory {
    fn spawn_ai(&mut self, rng: &mut dyn RngCore) -> AiSpawn;
}

/// Default factory: random name from a fixed list, random hue, random score
#[derive(Debug, Clone)]
pub struct RandomAiFactory {
    pub min_score: f32,
    pub max_score: f32,
}

impl RandomAiFactory {
    /// Bounds are taken as given; [`GameConfig::validate`] rejects an
    /// inverted range. An empty range always yields `min_score`.
    pub fn new(min_score: f32, max_score: f32) -> Self {
        Self {
            min_score,
            max_score,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.ai_min_score, config.ai_max_score)
    }
}

impl Default for RandomAiFactory {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl AiFactory for RandomAiFactory {
    fn spawn_ai(&mut self, rng: &mut dyn RngCore) -> AiSpawn {
        let name = AI_NAMES[rng.gen_range(0..AI_NAMES.len())].to_string();
        let score = if self.max_score > self.min_score {
            rng.gen_range(self.min_score..=self.max_score)
        } else {
            self.min_score
        };

        AiSpawn {
            name,
            color: hsl_color(rng.gen_range(0.0..360.0)),
            score,
            rotation: None,
        }
    }
}
