pub mod constants;
pub mod geometry;
pub mod state;
pub mod spatial;
pub mod systems;
pub mod game_loop;
pub mod leaderboard;
pub mod snapshot;
