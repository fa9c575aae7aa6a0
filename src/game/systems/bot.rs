//! Attack/defense bot controller
//!
//! The bot never steers directly. Each tick it answers one question:
//! "should I sprint now?". Standing players rotate on their own, so a
//! bot aims by waiting until its heading lines up with the target and
//! then commits by sprinting straight at it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::game::constants::bot::*;
use crate::game::state::{Ball, Field, Player};
use crate::util::vec2::{angle_difference, Vec2};

/// Bot behavior mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BotMode {
    /// Go for the ball and push it toward the opponent goal
    Attack,
    /// Hold a line in front of the own goal, tracking the ball vertically
    Defense,
}

impl BotMode {
    /// Dwell time before switching to the other mode
    pub fn duration(self) -> f32 {
        match self {
            BotMode::Attack => ATTACK_DURATION,
            BotMode::Defense => DEFENSE_DURATION,
        }
    }

    pub fn other(self) -> BotMode {
        match self {
            BotMode::Attack => BotMode::Defense,
            BotMode::Defense => BotMode::Attack,
        }
    }
}

/// Where the bot wants to go this tick, and how picky it is about it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePlan {
    pub target: Vec2,
    /// Heading error (degrees) still accepted before sprinting
    pub angle_tolerance: f32,
    /// Distance at which the bot counts as arrived
    pub distance_tolerance: f32,
}

impl MovePlan {
    fn new(target: Vec2) -> Self {
        Self {
            target,
            angle_tolerance: GOTO_ANGLE_TOLERANCE,
            distance_tolerance: GOTO_DISTANCE_TOLERANCE,
        }
    }
}

/// Per-bot controller state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotController {
    pub mode: BotMode,
    /// Seconds spent in the current mode
    pub mode_timer: f32,
}

impl Default for BotController {
    fn default() -> Self {
        Self {
            mode: BotMode::Attack,
            mode_timer: 0.0,
        }
    }
}

impl BotController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to attack with a fresh timer (new match or round)
    pub fn reset(&mut self) {
        self.mode = BotMode::Attack;
        self.mode_timer = 0.0;
    }

    /// Advance the mode timer and decide whether to sprint this tick
    pub fn decide(
        &mut self,
        bot: &Player,
        ball: &Ball,
        opponent_goal_x: f32,
        field: &Field,
        dt: f32,
    ) -> bool {
        self.advance_mode(dt);
        let plan = self.plan(bot, ball, opponent_goal_x, field);
        go_to_position(bot, plan.target, plan.angle_tolerance, plan.distance_tolerance)
    }

    fn advance_mode(&mut self, dt: f32) {
        self.mode_timer += dt;
        if self.mode_timer >= self.mode.duration() {
            self.mode = self.mode.other();
            self.mode_timer = 0.0;
            debug!(mode = ?self.mode, "Bot switched mode");
        }
    }

    /// Target for the current mode, clamped into the field
    pub fn plan(&self, bot: &Player, ball: &Ball, opponent_goal_x: f32, field: &Field) -> MovePlan {
        let mut plan = match self.mode {
            BotMode::Defense => defense_plan(ball, opponent_goal_x, field),
            BotMode::Attack => attack_plan(bot, ball, opponent_goal_x, field),
        };
        plan.target = field.contain(plan.target, bot.radius);
        plan
    }
}

fn defense_plan(ball: &Ball, opponent_goal_x: f32, field: &Field) -> MovePlan {
    // Own goal line mirrors the opponent's
    let own_goal_x = field.width - opponent_goal_x;
    let toward_center = if own_goal_x < field.width / 2.0 { 1.0 } else { -1.0 };
    let goal_center_y = field.center_y();

    let x = own_goal_x + toward_center * DEFENSE_X_LINE_OFFSET;
    let y = ball.position.y.clamp(
        goal_center_y - DEFENSE_MAX_Y_DEVIATION,
        goal_center_y + DEFENSE_MAX_Y_DEVIATION,
    );
    MovePlan::new(Vec2::new(x, y))
}

fn attack_plan(bot: &Player, ball: &Ball, opponent_goal_x: f32, field: &Field) -> MovePlan {
    let opponent_goal = Vec2::new(opponent_goal_x, field.center_y());
    let fallback = if opponent_goal_x < field.width / 2.0 {
        Vec2::LEFT
    } else {
        Vec2::RIGHT
    };
    let to_goal = (opponent_goal - ball.position).normalize_or(fallback);

    let dist_to_ball = bot.position.distance_to(ball.position);
    let kick_reach = bot.radius + ball.radius;

    if dist_to_ball < kick_reach * KICK_ALIGN_REACH_FACTOR {
        // Close enough to strike: aim just past the ball, toward the goal
        MovePlan {
            target: ball.position + to_goal * (ball.radius + bot.radius * 0.5),
            angle_tolerance: ATTACK_KICK_ANGLE_TOLERANCE,
            distance_tolerance: bot.radius * 0.5,
        }
    } else if dist_to_ball < ATTACK_MIN_DIST_FOR_TARGET_BEHIND * 2.0 {
        MovePlan {
            target: ball.position,
            angle_tolerance: ATTACK_KICK_ANGLE_TOLERANCE,
            distance_tolerance: GOTO_DISTANCE_TOLERANCE,
        }
    } else {
        // Come in from behind the ball so contact pushes it goalward
        MovePlan::new(
            ball.position - to_goal * (bot.radius * ATTACK_TARGET_DEPTH_FACTOR + ball.radius),
        )
    }
}

/// Should `bot` sprint toward `target` right now?
///
/// False when already within `distance_tolerance` or when the heading is
/// more than `angle_tolerance` degrees off the bearing to the target.
pub fn go_to_position(
    bot: &Player,
    target: Vec2,
    angle_tolerance: f32,
    distance_tolerance: f32,
) -> bool {
    let to_target = target - bot.position;
    if to_target.length() < distance_tolerance {
        return false;
    }
    // No bearing to a point we are sitting on
    if to_target.length_sq() < 1e-6 {
        return false;
    }

    let bearing = to_target.angle_degrees();
    angle_difference(bot.heading, bearing).abs() < angle_tolerance
}
