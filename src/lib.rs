//! Triangle Arena Simulation Core
//!
//! Collision detection and entity lifecycle for a single-player,
//! agar.io-style arena where every entity is an equilateral triangle.
//!
//! - [`game::geometry`] - triangle construction and overlap tests
//! - [`game::systems::collision`] - food, player-vs-AI and AI-vs-AI passes
//! - [`game::systems::population`] - respawning to target populations
//! - [`game::game_loop`] - the tick driver tying it all together

pub mod config;
pub mod util;
pub mod game;
