//! Per-tick snapshot for the rendering consumer
//!
//! Everything a renderer needs and nothing it could write back. Encoded
//! with bincode so the frame can also cross a process boundary.

use serde::{Deserialize, Serialize};

use crate::game::match_state::MatchPhase;
use crate::game::state::{GameState, Side};
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSnapshot {
    pub side: Side,
    pub position: Vec2,
    pub heading: f32,
    pub radius: f32,
    pub is_sprinting: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Oldest first
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub tick: u64,
    pub phase: MatchPhase,
    pub round: u32,
    pub score_left: u32,
    pub score_right: u32,
    pub remaining_time: f32,
    pub players: Vec<PlayerSnapshot>,
    pub ball: BallSnapshot,
}

impl GameSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let match_state = &state.match_state;
        Self {
            tick: state.tick,
            phase: match_state.phase,
            round: match_state.round,
            score_left: match_state.score_left,
            score_right: match_state.score_right,
            remaining_time: match_state.remaining_time,
            players: state
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    side: p.side,
                    position: p.position,
                    heading: p.heading,
                    radius: p.radius,
                    is_sprinting: p.is_sprinting,
                })
                .collect(),
            ball: BallSnapshot {
                position: state.ball.position,
                velocity: state.ball.velocity,
                radius: state.ball.radius,
                trail: state.ball.trail.iter().copied().collect(),
            },
        }
    }

    /// Remaining time as `mm:ss`, seconds truncated
    pub fn clock_text(&self) -> String {
        let total = self.remaining_time.max(0.0) as u32;
        format!("{:02}:{:02}", total / 60, total % 60)
    }

    /// Score line as shown on the scoreboard
    pub fn score_text(&self) -> String {
        format!("P1: {} - P2: {}", self.score_left, self.score_right)
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        bincode::serde::encode_to_vec(self, bincode::config::legacy())
            .map_err(|e| EncodeError(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        bincode::serde::decode_from_slice(data, bincode::config::legacy())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| DecodeError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Snapshot encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Snapshot decode error: {0}")]
pub struct DecodeError(String);
