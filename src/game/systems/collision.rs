//! Collision resolution
//!
//! Three passes run every tick in a fixed order: food, player-vs-AI and
//! AI-vs-AI. Every pass does a cheap circle-distance prefilter before the
//! precise triangle overlap test.
//!
//! The cell-vs-cell passes are two-phase. Sizes and scores are read from a
//! snapshot taken before any pair is checked, eliminations and score gains
//! are collected, and only then applied. Removals happen in descending index
//! order so earlier indices stay valid.

use hashbrown::{HashMap, HashSet};
use rand::Rng;

use crate::config::GameConfig;
use crate::game::constants::collision::{COARSE_FACTOR, KILL_BONUS};
use crate::game::geometry::{do_triangles_overlap, Triangle};
use crate::game::spatial::get_distance;
use crate::game::state::{Cell, Food, GameState};
use crate::game::systems::population::spawn_player_cell;
use crate::util::vec2::Vec2;

/// Who ate a piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eater {
    PlayerCell(usize),
    Ai(usize),
}

/// Collision events for the tick report
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEvent {
    /// One eater consumed `count` food items this pass
    FoodEaten { eater: Eater, count: usize, gain: f32 },
    /// A player cell absorbed an AI
    AiConsumedByPlayer { ai_name: String, gain: f32 },
    /// An AI absorbed a player cell
    PlayerCellConsumed { ai_name: String, gain: f32 },
    /// An AI absorbed another AI
    AiConsumedByAi { winner: String, loser: String, gain: f32 },
    /// The player lost every cell and was given a fresh one
    PlayerRespawned { position: Vec2 },
}

/// Outcome of a size comparison between two overlapping cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    FirstEats,
    SecondEats,
    Standoff,
}

/// `a` eats `b` only when `size_a > size_b * threshold`; the first cell is
/// checked first
#[inline]
fn judge(size_a: f32, size_b: f32, threshold: f32) -> Verdict {
    if size_a > size_b * threshold {
        Verdict::FirstEats
    } else if size_b > size_a * threshold {
        Verdict::SecondEats
    } else {
        Verdict::Standoff
    }
}

/// Coarse prefilter followed by the triangle overlap test
#[inline]
fn cells_touch(a: &Cell, size_a: f32, b: &Cell, size_b: f32) -> bool {
    if get_distance(a.position, b.position) >= (size_a + size_b) * COARSE_FACTOR {
        return false;
    }
    let ta = Triangle::new(a.position.x, a.position.y, size_a, a.rotation);
    let tb = Triangle::new(b.position.x, b.position.y, size_b, b.rotation);
    do_triangles_overlap(&ta, &tb)
}

/// Remove every index in `indices` from `items`, highest first
fn remove_indices<T>(items: &mut Vec<T>, indices: &HashSet<usize>) {
    let mut sorted: Vec<usize> = indices.iter().copied().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    for index in sorted {
        if index < items.len() {
            items.remove(index);
        }
    }
}

/// Let `cell` eat every overlapping food item. Eaten food is removed
/// immediately so it cannot be eaten twice. Returns how many were eaten.
fn eat_food(cell: &mut Cell, food: &mut Vec<Food>, config: &GameConfig) -> usize {
    let mut eaten = 0;
    food.retain(|item| {
        let cell_size = cell.size();
        if get_distance(cell.position, item.position) >= cell_size + config.food_size {
            return true;
        }
        if do_triangles_overlap(&cell.triangle(), &item.triangle(config.food_size)) {
            cell.score += config.food_score;
            eaten += 1;
            return false;
        }
        true
    });
    eaten
}

/// Food pass: every player cell, then every AI, eats the food it overlaps
pub fn handle_food_collisions(state: &mut GameState, config: &GameConfig) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let GameState {
        player_cells,
        ai_players,
        food,
        ..
    } = state;

    for (index, cell) in player_cells.iter_mut().enumerate() {
        let count = eat_food(cell, food, config);
        if count > 0 {
            events.push(CollisionEvent::FoodEaten {
                eater: Eater::PlayerCell(index),
                count,
                gain: count as f32 * config.food_score,
            });
        }
    }

    for (index, ai) in ai_players.iter_mut().enumerate() {
        let count = eat_food(&mut ai.cell, food, config);
        if count > 0 {
            events.push(CollisionEvent::FoodEaten {
                eater: Eater::Ai(index),
                count,
                gain: count as f32 * config.food_score,
            });
        }
    }

    events
}

/// Player-vs-AI pass
///
/// Every player cell is checked against every AI. A cell already marked as
/// eaten takes no further part in the pass. If the player ends up with no
/// cells a fresh one is spawned at a safe location.
pub fn handle_player_ai_collisions<R: Rng>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    let player_sizes: Vec<f32> = state.player_cells.iter().map(Cell::size).collect();
    let ai_sizes: Vec<f32> = state.ai_players.iter().map(|ai| ai.size()).collect();

    let mut player_cells_to_remove: HashSet<usize> = HashSet::new();
    let mut ais_to_remove: HashSet<usize> = HashSet::new();
    let mut player_gains: HashMap<usize, f32> = HashMap::new();
    let mut ai_gains: HashMap<usize, f32> = HashMap::new();

    for (p, player_cell) in state.player_cells.iter().enumerate() {
        for (a, ai) in state.ai_players.iter().enumerate() {
            if player_cells_to_remove.contains(&p) {
                break;
            }
            if ais_to_remove.contains(&a) {
                continue;
            }
            if !cells_touch(player_cell, player_sizes[p], &ai.cell, ai_sizes[a]) {
                continue;
            }

            match judge(player_sizes[p], ai_sizes[a], config.collision_threshold) {
                Verdict::FirstEats => {
                    let gain = ai.cell.score + KILL_BONUS;
                    *player_gains.entry(p).or_insert(0.0) += gain;
                    ais_to_remove.insert(a);
                    tracing::debug!("Player cell {} consumed AI '{}' (+{:.0})", p, ai.name, gain);
                    events.push(CollisionEvent::AiConsumedByPlayer {
                        ai_name: ai.name.clone(),
                        gain,
                    });
                }
                Verdict::SecondEats => {
                    let gain = player_cell.score + KILL_BONUS;
                    *ai_gains.entry(a).or_insert(0.0) += gain;
                    player_cells_to_remove.insert(p);
                    tracing::debug!("AI '{}' consumed player cell {} (+{:.0})", ai.name, p, gain);
                    events.push(CollisionEvent::PlayerCellConsumed {
                        ai_name: ai.name.clone(),
                        gain,
                    });
                }
                Verdict::Standoff => {}
            }
        }
    }

    // Gains only land on survivors
    for (a, gain) in ai_gains {
        if !ais_to_remove.contains(&a) {
            state.ai_players[a].cell.score += gain;
        }
    }
    for (p, gain) in player_gains {
        if !player_cells_to_remove.contains(&p) {
            state.player_cells[p].score += gain;
        }
    }

    remove_indices(&mut state.ai_players, &ais_to_remove);
    remove_indices(&mut state.player_cells, &player_cells_to_remove);

    if state.player_cells.is_empty() {
        let position = spawn_player_cell(state, config, rng);
        events.push(CollisionEvent::PlayerRespawned { position });
    }

    events
}

/// AI-vs-AI pass
///
/// Pairs are visited as `i < j`. Once an AI is eaten it is skipped both as
/// eater and as target for the rest of the pass.
pub fn handle_ai_ai_collisions(state: &mut GameState, config: &GameConfig) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    let sizes: Vec<f32> = state.ai_players.iter().map(|ai| ai.size()).collect();
    let mut to_remove: HashSet<usize> = HashSet::new();
    let mut gains: HashMap<usize, f32> = HashMap::new();
    let ais = &state.ai_players;

    for i in 0..ais.len() {
        if to_remove.contains(&i) {
            continue;
        }

        for j in (i + 1)..ais.len() {
            if to_remove.contains(&j) {
                continue;
            }
            if !cells_touch(&ais[i].cell, sizes[i], &ais[j].cell, sizes[j]) {
                continue;
            }

            let (winner, loser) = match judge(sizes[i], sizes[j], config.collision_threshold) {
                Verdict::FirstEats => (i, j),
                Verdict::SecondEats => (j, i),
                Verdict::Standoff => continue,
            };

            let gain = ais[loser].cell.score + KILL_BONUS;
            *gains.entry(winner).or_insert(0.0) += gain;
            to_remove.insert(loser);
            tracing::debug!(
                "AI '{}' consumed AI '{}' (+{:.0})",
                ais[winner].name,
                ais[loser].name,
                gain
            );
            events.push(CollisionEvent::AiConsumedByAi {
                winner: ais[winner].name.clone(),
                loser: ais[loser].name.clone(),
                gain,
            });

            if loser == i {
                break;
            }
        }
    }

    for (index, gain) in gains {
        if !to_remove.contains(&index) {
            state.ai_players[index].cell.score += gain;
        }
    }
    remove_indices(&mut state.ai_players, &to_remove);

    events
}
