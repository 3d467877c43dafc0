//! World snapshots for an out-of-process renderer

use serde::{Deserialize, Serialize};

use crate::game::state::GameState;

/// Encode a value using bincode
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| EncodeError(e.to_string()))
}

/// Decode a value using bincode
pub fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, DecodeError> {
    bincode::serde::decode_from_slice(data, bincode::config::standard())
        .map(|(value, _)| value)
        .map_err(|e| DecodeError(e.to_string()))
}

/// Encode the full world state
pub fn encode_state(state: &GameState) -> Result<Vec<u8>, EncodeError> {
    encode(state)
}

/// Decode a world state produced by [`encode_state`]
pub fn decode_state(data: &[u8]) -> Result<GameState, DecodeError> {
    decode(data)
}

#[derive(Debug, thiserror::Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Decode error: {0}")]
pub struct DecodeError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{AiPlayer, Cell, Food};
    use crate::util::vec2::Vec2;

    #[test]
    fn test_state_snapshot() {
        let mut state = GameState::new("Snap");
        state.tick = 42;
        state.player_cells.push(Cell::new(Vec2::new(1.0, 2.0), 120.0, 0.5));
        state.ai_players.push(AiPlayer::new(
            Cell::new(Vec2::new(3.0, 4.0), 80.0, 1.0),
            "Bot".to_string(),
            "hsl(10, 50%, 50%)".to_string(),
        ));
        state.food.push(Food::new(Vec2::new(5.0, 6.0), "hsl(200, 50%, 50%)".to_string(), 2.0));

        let bytes = encode_state(&state).unwrap();
        let decoded = decode_state(&bytes).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_state(&[0xff, 0xff, 0xff]).unwrap_err();
        assert!(err.to_string().starts_with("Decode error"));
    }
}
