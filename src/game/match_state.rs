//! Match phases, score and clock bookkeeping
//!
//! Times are seconds on the game loop's own `f64` clock (the running sum of
//! every `dt` it was given), so pauses and restarts are deterministic.

use serde::{Deserialize, Serialize};

use crate::game::constants::game::MATCH_DURATION;
use crate::game::state::Side;

/// Overall game phase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MatchPhase {
    /// Waiting for a mode to be selected
    #[default]
    Menu,
    /// Clock running, players moving
    Playing,
    /// Short freeze after a goal
    GoalPause,
    /// Clock ran out
    GameOver,
}

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Winner {
    Left,
    Right,
    Draw,
}

impl Winner {
    pub fn from_scores(score_left: u32, score_right: u32) -> Self {
        match score_left.cmp(&score_right) {
            std::cmp::Ordering::Greater => Winner::Left,
            std::cmp::Ordering::Less => Winner::Right,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Winner::Left => "Player 1 wins!",
            Winner::Right => "Player 2 wins!",
            Winner::Draw => "Draw!",
        }
    }
}

/// Match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub score_left: u32,
    pub score_right: u32,
    /// Length of a round in seconds
    pub duration: f32,
    /// Seconds left on the match clock; frozen outside `Playing`
    pub remaining_time: f32,
    /// Clock anchor: remaining = duration - (now - start_time)
    pub start_time: f64,
    /// Clock time of the last goal
    pub last_goal_time: f64,
    /// Clock time the round ended
    pub game_over_time: f64,
    /// 1-based number of the current round, 0 before the first one
    pub round: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MATCH_DURATION)
    }
}

impl MatchState {
    pub fn new(duration: f32) -> Self {
        Self {
            phase: MatchPhase::Menu,
            score_left: 0,
            score_right: 0,
            duration,
            remaining_time: duration,
            start_time: 0.0,
            last_goal_time: 0.0,
            game_over_time: 0.0,
            round: 0,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    /// Fresh scores and a full clock, straight into `Playing`
    pub fn start_round(&mut self, now: f64) {
        self.score_left = 0;
        self.score_right = 0;
        self.remaining_time = self.duration;
        self.start_time = now;
        self.last_goal_time = 0.0;
        self.game_over_time = 0.0;
        self.round += 1;
        self.phase = MatchPhase::Playing;
    }

    /// Recompute the remaining time. Returns true when the clock hit zero.
    pub fn update_timer(&mut self, now: f64) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        let elapsed = now - self.start_time;
        let remaining = (f64::from(self.duration) - elapsed).max(0.0);
        self.remaining_time = remaining as f32;
        remaining == 0.0
    }

    /// Credit `scorer` and enter the goal pause
    pub fn record_goal(&mut self, scorer: Side, now: f64) {
        match scorer {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        self.last_goal_time = now;
        self.phase = MatchPhase::GoalPause;
    }

    pub fn pause_elapsed(&self, now: f64) -> f64 {
        now - self.last_goal_time
    }

    /// Leave the goal pause without charging the pause to the match clock
    pub fn resume(&mut self, now: f64) {
        self.start_time = now - f64::from(self.duration - self.remaining_time);
        self.phase = MatchPhase::Playing;
    }

    pub fn end(&mut self, now: f64) {
        self.remaining_time = 0.0;
        self.game_over_time = now;
        self.phase = MatchPhase::GameOver;
    }

    pub fn winner(&self) -> Winner {
        Winner::from_scores(self.score_left, self.score_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_default_is_menu() {
        let state = MatchState::default();
        assert_eq!(state.phase, MatchPhase::Menu);
        assert_eq!(state.remaining_time, MATCH_DURATION);
        assert_eq!(state.round, 0);
    }

    #[test]
    fn test_start_round_resets_scores() {
        let mut state = MatchState::new(60.0);
        state.score_left = 3;
        state.score_right = 2;
        state.remaining_time = 5.0;

        state.start_round(12.0);

        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!((state.score_left, state.score_right), (0, 0));
        assert_eq!(state.remaining_time, 60.0);
        assert_eq!(state.start_time, 12.0);
        assert_eq!(state.round, 1);
    }

    #[test]
    fn test_timer_counts_down_and_clamps() {
        let mut state = MatchState::new(60.0);
        state.start_round(0.0);

        assert!(!state.update_timer(20.0));
        assert!((state.remaining_time - 40.0).abs() < EPSILON);

        assert!(state.update_timer(75.0));
        assert_eq!(state.remaining_time, 0.0);
    }

    #[test]
    fn test_timer_frozen_outside_playing() {
        let mut state = MatchState::new(60.0);
        state.start_round(0.0);
        state.update_timer(20.0);
        state.record_goal(Side::Left, 20.0);

        assert!(!state.update_timer(50.0));
        assert!((state.remaining_time - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_resume_excludes_pause_from_clock() {
        let mut state = MatchState::new(60.0);
        state.start_round(0.0);
        state.update_timer(20.0);
        state.record_goal(Side::Right, 20.0);

        // 1.5s pause, then resume
        assert!((state.pause_elapsed(21.5) - 1.5).abs() < 1e-9);
        state.resume(21.5);

        state.update_timer(21.5);
        assert!((state.remaining_time - 40.0).abs() < EPSILON);
        state.update_timer(31.5);
        assert!((state.remaining_time - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_record_goal() {
        let mut state = MatchState::new(60.0);
        state.start_round(0.0);
        state.record_goal(Side::Right, 3.0);
        assert_eq!(state.score(Side::Right), 1);
        assert_eq!(state.score(Side::Left), 0);
        assert_eq!(state.phase, MatchPhase::GoalPause);
        assert_eq!(state.last_goal_time, 3.0);
    }

    #[test]
    fn test_winner() {
        assert_eq!(Winner::from_scores(2, 1), Winner::Left);
        assert_eq!(Winner::from_scores(0, 4), Winner::Right);
        assert_eq!(Winner::from_scores(3, 3), Winner::Draw);
        assert_eq!(Winner::Draw.label(), "Draw!");
        assert_eq!(Winner::Left.label(), "Player 1 wins!");
    }

    #[test]
    fn test_end_freezes_clock() {
        let mut state = MatchState::new(60.0);
        state.start_round(0.0);
        state.end(60.0);
        assert_eq!(state.phase, MatchPhase::GameOver);
        assert_eq!(state.remaining_time, 0.0);
        assert_eq!(state.game_over_time, 60.0);
    }

    #[test]
    fn test_timer_exact_far_from_zero() {
        // A process that has been running for days
        let start = 300_000.0;
        let dt = f64::from(1.0f32 / 60.0);
        let mut state = MatchState::new(60.0);
        state.start_round(start);

        let mut now = start;
        let mut ticks = 0;
        while !state.update_timer(now + dt) {
            now += dt;
            ticks += 1;
            assert!(ticks < 4000, "match clock never ran out");
        }
        assert_eq!(ticks + 1, 3600);
    }
}
