//! Goal-line sensing

use crate::game::state::{Ball, Field, Side};

/// Check whether the ball is fully behind either goal line inside the
/// mouth. Returns the scoring side.
///
/// At most one goal per tick. If extreme speed ever put the ball past both
/// lines at once, the left goal line is checked first and wins.
pub fn check_goal(ball: &Ball, field: &Field) -> Option<Side> {
    if !field.in_goal_mouth(ball.position.y) {
        return None;
    }

    if ball.right_edge() < field.goal_line_x(Side::Left) {
        // Ball in the left goal: the right player scores
        Some(Side::Right)
    } else if ball.left_edge() > field.goal_line_x(Side::Right) {
        Some(Side::Left)
    } else {
        None
    }
}
