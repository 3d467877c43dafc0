//! Leaderboard ranking
//!
//! Produces ranked entries for the UI. The player counts once, with the sum
//! of all its cells.

use serde::{Deserialize, Serialize};

use crate::game::state::GameState;

/// One ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub score: f32,
    pub is_player: bool,
}

/// Top `limit` entries, highest score first
pub fn leaderboard(state: &GameState, limit: usize) -> Vec<LeaderboardEntry> {
    let player = LeaderboardEntry {
        rank: 0,
        name: state.player_name.clone(),
        score: state.player_total_score(),
        is_player: true,
    };

    let mut entries: Vec<LeaderboardEntry> = std::iter::once(player)
        .chain(state.ai_players.iter().map(|ai| LeaderboardEntry {
            rank: 0,
            name: ai.name.clone(),
            score: ai.cell.score,
            is_player: false,
        }))
        .collect();

    // Stable sort keeps the player ahead of AIs on equal score
    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(limit);

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = (i + 1) as u32;
    }

    entries
}

/// 1-based position of the player among all entries
pub fn player_rank(state: &GameState) -> u32 {
    let total = state.player_total_score();
    let ahead = state
        .ai_players
        .iter()
        .filter(|ai| ai.cell.score > total)
        .count();
    (ahead + 1) as u32
}
