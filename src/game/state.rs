//! Game state definitions and structures
//!
//! Contains the field geometry, both players, the ball and the match
//! bookkeeping. All of it is owned by the game loop; systems receive it
//! by reference.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::game::constants::{ball, field, player};
use crate::game::match_state::MatchState;
use crate::util::vec2::{normalize_degrees, Vec2};

/// Which half of the field a player defends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Index into per-side arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Display label used in results ("Player 1" plays left)
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

/// Playable rectangle and goal placement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Field {
    /// Screen width; the field uses all of it
    pub width: f32,
    /// Screen height including tribunes
    pub height: f32,
    /// Margin removed from top and bottom
    pub tribune_height: f32,
    /// Vertical span of each goal mouth
    pub goal_height: f32,
    /// Goal line depth from the left/right edge
    pub goal_width: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: field::WIDTH,
            height: field::HEIGHT,
            tribune_height: field::TRIBUNE_HEIGHT,
            goal_height: field::GOAL_HEIGHT,
            goal_width: field::GOAL_WIDTH,
        }
    }
}

impl Field {
    #[inline]
    pub fn left(&self) -> f32 {
        0.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.tribune_height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.height - self.tribune_height
    }

    pub fn playable_height(&self) -> f32 {
        self.bottom() - self.top()
    }

    pub fn center_y(&self) -> f32 {
        self.top() + self.playable_height() / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.center_y())
    }

    /// Absolute (start, end) y of the goal mouth
    pub fn goal_span(&self) -> (f32, f32) {
        let half = self.goal_height / 2.0;
        (self.center_y() - half, self.center_y() + half)
    }

    /// Whether `y` lies strictly inside the goal mouth
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        let (start, end) = self.goal_span();
        start < y && y < end
    }

    /// Goal line x for the goal defended by `side`
    pub fn goal_line_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.goal_width,
            Side::Right => self.width - self.goal_width,
        }
    }

    /// Clamp a circle centre so the whole circle stays inside the field
    pub fn contain(&self, position: Vec2, radius: f32) -> Vec2 {
        position.clamp(
            Vec2::new(self.left() + radius, self.top() + radius),
            Vec2::new(self.right() - radius, self.bottom() - radius),
        )
    }

    /// Whether a circle is fully inside the field (inclusive)
    pub fn contains(&self, position: Vec2, radius: f32) -> bool {
        position.x >= self.left() + radius
            && position.x <= self.right() - radius
            && position.y >= self.top() + radius
            && position.y <= self.bottom() - radius
    }

    /// Kick-off position for `side`
    pub fn start_position(&self, side: Side) -> Vec2 {
        let fraction = match side {
            Side::Left => player::LEFT_START_X_FRACTION,
            Side::Right => player::RIGHT_START_X_FRACTION,
        };
        Vec2::new(self.width * fraction, self.center_y())
    }
}

/// Player state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    /// Centre position in screen space
    pub position: Vec2,
    /// Zero unless sprinting
    pub velocity: Vec2,
    /// Heading in degrees, [0, 360)
    pub heading: f32,
    pub radius: f32,
    pub is_sprinting: bool,
    /// Idle rotation rate (degrees/s)
    pub rotation_speed: f32,
    /// Sprint speed (units/s)
    pub sprint_speed: f32,
}

impl Player {
    pub fn new(side: Side, field: &Field) -> Self {
        Self {
            side,
            position: field.start_position(side),
            velocity: Vec2::ZERO,
            heading: Self::start_heading(side),
            radius: player::RADIUS,
            is_sprinting: false,
            rotation_speed: player::ROTATION_SPEED,
            sprint_speed: player::SPRINT_SPEED,
        }
    }

    fn start_heading(side: Side) -> f32 {
        match side {
            Side::Left => player::LEFT_START_HEADING,
            Side::Right => player::RIGHT_START_HEADING,
        }
    }

    /// Unit vector along the current heading
    pub fn direction(&self) -> Vec2 {
        Vec2::from_degrees(self.heading)
    }

    pub fn start_sprint(&mut self) {
        self.is_sprinting = true;
    }

    pub fn stop_sprint(&mut self) {
        self.is_sprinting = false;
        self.velocity = Vec2::ZERO;
    }

    pub fn set_heading(&mut self, degrees: f32) {
        self.heading = normalize_degrees(degrees);
    }

    /// Back to the kick-off spot, heading and idle state
    pub fn reset(&mut self, field: &Field) {
        self.position = field.start_position(self.side);
        self.heading = Self::start_heading(self.side);
        self.is_sprinting = false;
        self.velocity = Vec2::ZERO;
    }
}

/// Ball state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Recent positions while moving fast, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Ball {
    pub fn new(field: &Field) -> Self {
        Self {
            position: field.center(),
            velocity: Vec2::ZERO,
            radius: ball::RADIUS,
            trail: VecDeque::with_capacity(ball::TRAIL_LENGTH + 1),
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Leftmost x of the ball
    pub fn left_edge(&self) -> f32 {
        self.position.x - self.radius
    }

    /// Rightmost x of the ball
    pub fn right_edge(&self) -> f32 {
        self.position.x + self.radius
    }

    /// Back to the centre spot, at rest
    pub fn reset(&mut self, field: &Field) {
        self.position = field.center();
        self.velocity = Vec2::ZERO;
        self.trail.clear();
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tick: u64,
    pub field: Field,
    /// Indexed by `Side::index()`
    pub players: [Player; 2],
    pub ball: Ball,
    pub match_state: MatchState,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Field::default())
    }
}

impl GameState {
    pub fn new(field: Field) -> Self {
        Self {
            tick: 0,
            players: [Player::new(Side::Left, &field), Player::new(Side::Right, &field)],
            ball: Ball::new(&field),
            match_state: MatchState::default(),
            field,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        &mut self.players[side.index()]
    }

    /// Put both players and the ball back on their kick-off spots
    pub fn reset_positions(&mut self) {
        let field = self.field;
        for player in self.players.iter_mut() {
            player.reset(&field);
        }
        self.ball.reset(&field);
    }

    /// Stop both players' sprints
    pub fn freeze_players(&mut self) {
        for player in self.players.iter_mut() {
            player.stop_sprint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_field_geometry() {
        let field = Field::default();
        assert_eq!(field.top(), 50.0);
        assert_eq!(field.bottom(), 550.0);
        assert_eq!(field.center(), Vec2::new(400.0, 300.0));
        let (start, end) = field.goal_span();
        assert!((start - 200.0).abs() < 0.001);
        assert!((end - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_goal_mouth_is_strict() {
        let field = Field::default();
        let (start, end) = field.goal_span();
        assert!(field.in_goal_mouth(300.0));
        assert!(!field.in_goal_mouth(start));
        assert!(!field.in_goal_mouth(end));
        assert!(!field.in_goal_mouth(70.0));
    }

    #[test]
    fn test_goal_lines() {
        let field = Field::default();
        assert_eq!(field.goal_line_x(Side::Left), 10.0);
        assert_eq!(field.goal_line_x(Side::Right), 790.0);
    }

    #[test]
    fn test_contain_clamps_each_axis() {
        let field = Field::default();
        let clamped = field.contain(Vec2::new(-20.0, 580.0), 15.0);
        assert_eq!(clamped, Vec2::new(15.0, 535.0));
        assert!(field.contains(clamped, 15.0));
    }

    #[test]
    fn test_player_start_layout() {
        let state = GameState::default();
        let left = state.player(Side::Left);
        let right = state.player(Side::Right);
        assert_eq!(left.position, Vec2::new(200.0, 300.0));
        assert_eq!(right.position, Vec2::new(600.0, 300.0));
        assert_eq!(left.heading, 0.0);
        assert_eq!(right.heading, 180.0);
        assert_eq!(left.radius, 15.0);
        assert_eq!(state.ball.position, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.radius, 10.0);
    }

    #[test]
    fn test_stop_sprint_zeroes_velocity() {
        let mut player = Player::new(Side::Left, &Field::default());
        player.start_sprint();
        player.velocity = Vec2::new(250.0, 0.0);
        player.stop_sprint();
        assert!(!player.is_sprinting);
        assert_eq!(player.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_reset_positions() {
        let mut state = GameState::default();
        state.player_mut(Side::Left).position = Vec2::new(50.0, 60.0);
        state.player_mut(Side::Left).heading = 77.0;
        state.player_mut(Side::Right).start_sprint();
        state.ball.velocity = Vec2::new(100.0, 100.0);
        state.ball.trail.push_back(Vec2::new(1.0, 1.0));

        state.reset_positions();

        assert_eq!(state.player(Side::Left).position, Vec2::new(200.0, 300.0));
        assert_eq!(state.player(Side::Left).heading, 0.0);
        assert!(!state.player(Side::Right).is_sprinting);
        assert_eq!(state.ball.velocity, Vec2::ZERO);
        assert!(state.ball.trail.is_empty());
    }

    #[test]
    fn test_side_helpers() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.index(), 1);
        assert_eq!(Side::Right.label(), "Player 2");
    }
}
