//! Discrete events emitted by the simulation each tick
//!
//! Effects, sound and logging collaborators subscribe to these instead of
//! being called from collision code.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::game::match_result::RoundRecord;
use crate::game::match_state::MatchPhase;
use crate::game::state::Side;
use crate::util::vec2::Vec2;

/// Which boundary the ball bounced off
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Game events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GameEvent {
    /// A sprinting player struck the ball
    Kick { side: Side, position: Vec2, velocity: Vec2 },
    /// A standing player nudged the ball
    Nudge { side: Side, position: Vec2 },
    /// The players overlapped and were pushed apart
    PlayerContact { position: Vec2 },
    /// The ball reflected off a boundary
    WallBounce { wall: Wall, position: Vec2 },
    /// The ball crossed a goal line inside the mouth
    GoalScored { scorer: Side, score_left: u32, score_right: u32 },
    /// The match moved to a new phase
    PhaseChanged { from: MatchPhase, to: MatchPhase },
    /// A round finished and produced a result row
    RoundFinished(RoundRecord),
}

/// Per-tick event list; most ticks carry none or a couple
pub type EventList = SmallVec<[GameEvent; 4]>;
