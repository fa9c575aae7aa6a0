//! Round results for the persistence collaborator
//!
//! The core only builds the row; writing it anywhere is the caller's job.

use serde::{Deserialize, Serialize};

use crate::game::match_state::{MatchState, Winner};

/// One completed round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub round: u32,
    /// Game-loop clock time (seconds) when the round ended
    pub finished_at: f64,
    pub score_left: u32,
    pub score_right: u32,
    pub winner: Winner,
    /// Human-readable winner label
    pub winner_label: String,
    /// Accumulated reward, only filled in by learning harnesses
    pub cumulative_reward: Option<f32>,
}

/// Build the result row for the round that just ended
pub fn determine_result(match_state: &MatchState) -> RoundRecord {
    let winner = match_state.winner();
    RoundRecord {
        round: match_state.round,
        finished_at: match_state.game_over_time,
        score_left: match_state.score_left,
        score_right: match_state.score_right,
        winner,
        winner_label: winner.label().to_string(),
        cumulative_reward: None,
    }
}

impl RoundRecord {
    pub fn with_reward(mut self, reward: f32) -> Self {
        self.cumulative_reward = Some(reward);
        self
    }
}
