//! Player and ball motion
//!
//! Integration, field containment, rolling friction and wall bounces.
//! Everything here runs before collision resolution in a tick.

use crate::game::constants::ball::{FRICTION, STOP_SPEED, TRAIL_LENGTH, TRAIL_MIN_SPEED};
use crate::game::events::{EventList, GameEvent, Wall};
use crate::game::state::{Ball, Field, GameState, Player};
use crate::util::vec2::{normalize_degrees, Vec2};

/// Integrate both players and the ball for one tick
/// Wall bounces are appended to `events`
pub fn update(state: &mut GameState, dt: f32, events: &mut EventList) {
    let field = state.field;
    for player in state.players.iter_mut() {
        update_player(player, &field, dt);
    }
    update_ball(&mut state.ball, &field, dt, events);
}

/// Sprinting players run straight along a frozen heading; idle players
/// stand still and rotate. Either way the circle is clamped into the field.
pub fn update_player(player: &mut Player, field: &Field, dt: f32) {
    if player.is_sprinting {
        player.velocity = player.direction() * player.sprint_speed;
        player.position += player.velocity * dt;
    } else {
        player.heading = normalize_degrees(player.heading + player.rotation_speed * dt);
        player.velocity = Vec2::ZERO;
    }

    player.position = field.contain(player.position, player.radius);
}

/// Clamp both players back inside the field after contact pushes
pub fn contain_players(state: &mut GameState) {
    let field = state.field;
    for player in state.players.iter_mut() {
        player.position = field.contain(player.position, player.radius);
    }
}

/// Exponential rolling friction
/// CRITICAL: velocity *= FRICTION^dt, NOT a linear slowdown
pub fn apply_friction(ball: &mut Ball, dt: f32) {
    ball.velocity *= FRICTION.powf(dt);
    if ball.velocity.length() < STOP_SPEED {
        ball.velocity = Vec2::ZERO;
    }
}

/// Friction, integration and wall reflection for one tick
pub fn update_ball(ball: &mut Ball, field: &Field, dt: f32, events: &mut EventList) {
    record_trail(ball);
    apply_friction(ball, dt);
    ball.position += ball.velocity * dt;
    reflect_off_walls(ball, field, events);
}

fn record_trail(ball: &mut Ball) {
    if ball.speed() > TRAIL_MIN_SPEED {
        ball.trail.push_back(ball.position);
        while ball.trail.len() > TRAIL_LENGTH {
            ball.trail.pop_front();
        }
    } else {
        ball.trail.clear();
    }
}

/// Elastic reflection off the four edges.
/// The left/right edges let the ball through while its centre is inside
/// the goal mouth, which is what makes goals possible.
pub fn reflect_off_walls(ball: &mut Ball, field: &Field, events: &mut EventList) {
    let in_mouth = field.in_goal_mouth(ball.position.y);

    if ball.left_edge() < field.left() && !in_mouth {
        ball.position.x = field.left() + ball.radius;
        ball.velocity.x = -ball.velocity.x;
        events.push(GameEvent::WallBounce { wall: Wall::Left, position: ball.position });
    }
    if ball.right_edge() > field.right() && !in_mouth {
        ball.position.x = field.right() - ball.radius;
        ball.velocity.x = -ball.velocity.x;
        events.push(GameEvent::WallBounce { wall: Wall::Right, position: ball.position });
    }
    if ball.position.y - ball.radius < field.top() {
        ball.position.y = field.top() + ball.radius;
        ball.velocity.y = -ball.velocity.y;
        events.push(GameEvent::WallBounce { wall: Wall::Top, position: ball.position });
    }
    if ball.position.y + ball.radius > field.bottom() {
        ball.position.y = field.bottom() - ball.radius;
        ball.velocity.y = -ball.velocity.y;
        events.push(GameEvent::WallBounce { wall: Wall::Bottom, position: ball.position });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::game::DT;
    use crate::game::state::Side;

    const EPSILON: f32 = 1e-3;

    fn field() -> Field {
        Field::default()
    }

    #[test]
    fn test_sprint_moves_along_frozen_heading() {
        let field = field();
        let mut player = Player::new(Side::Left, &field);
        player.set_heading(90.0);
        player.start_sprint();
        let start = player.position;

        update_player(&mut player, &field, 0.1);

        assert!((player.heading - 90.0).abs() < EPSILON);
        assert!(player.velocity.approx_eq(Vec2::new(0.0, 250.0), EPSILON));
        assert!(player.position.approx_eq(start + Vec2::new(0.0, 25.0), EPSILON));
    }

    #[test]
    fn test_idle_rotates_and_stands_still() {
        let field = field();
        let mut player = Player::new(Side::Right, &field);
        player.velocity = Vec2::new(5.0, 5.0);
        let start = player.position;

        update_player(&mut player, &field, 0.5);

        // 180 + 180 * 0.5 = 270
        assert!((player.heading - 270.0).abs() < EPSILON);
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.position, start);
    }

    #[test]
    fn test_heading_wraps() {
        let field = field();
        let mut player = Player::new(Side::Left, &field);
        player.heading = 350.0;

        update_player(&mut player, &field, 0.1);

        assert!((player.heading - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_player_stays_inside_field() {
        let field = field();
        let mut player = Player::new(Side::Left, &field);
        player.position = Vec2::new(20.0, 60.0);
        player.set_heading(225.0); // up and to the left
        player.start_sprint();

        for _ in 0..120 {
            update_player(&mut player, &field, DT);
            assert!(field.contains(player.position, player.radius));
        }
        assert!((player.position.x - 15.0).abs() < EPSILON);
        assert!((player.position.y - 65.0).abs() < EPSILON);
    }

    #[test]
    fn test_contain_players_after_push() {
        let mut state = GameState::default();
        state.player_mut(Side::Left).position = Vec2::new(5.0, 300.0);
        state.player_mut(Side::Right).position = Vec2::new(400.0, 560.0);

        contain_players(&mut state);

        assert_eq!(state.player(Side::Left).position, Vec2::new(15.0, 300.0));
        assert_eq!(state.player(Side::Right).position, Vec2::new(400.0, 535.0));
    }

    #[test]
    fn test_friction_decays_and_snaps_to_zero() {
        let mut ball = Ball::new(&field());
        ball.velocity = Vec2::new(300.0, -120.0);

        let mut previous = ball.speed();
        let mut ticks = 0;
        while ball.speed() > 0.0 {
            apply_friction(&mut ball, DT);
            assert!(ball.speed() <= previous);
            previous = ball.speed();
            ticks += 1;
            assert!(ticks < 2000, "friction never brought the ball to rest");
        }
        assert_eq!(ball.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_friction_one_second_halves_speed() {
        let mut ball = Ball::new(&field());
        ball.velocity = Vec2::new(100.0, 0.0);
        apply_friction(&mut ball, 1.0);
        assert!((ball.velocity.x - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_top_wall_reflection_is_exact() {
        let field = field();
        let mut ball = Ball::new(&field);
        ball.position = Vec2::new(400.0, 55.0);
        ball.velocity = Vec2::new(0.0, -200.0);
        let mut events = EventList::new();

        reflect_off_walls(&mut ball, &field, &mut events);

        assert_eq!(ball.velocity, Vec2::new(0.0, 200.0));
        assert_eq!(ball.position.y, 60.0);
        assert_eq!(
            events.as_slice(),
            &[GameEvent::WallBounce { wall: Wall::Top, position: ball.position }]
        );
    }

    #[test]
    fn test_side_wall_reflects_outside_goal_mouth() {
        let field = field();
        let mut ball = Ball::new(&field);
        ball.position = Vec2::new(4.0, 100.0);
        ball.velocity = Vec2::new(-180.0, 0.0);
        let mut events = EventList::new();

        reflect_off_walls(&mut ball, &field, &mut events);

        assert_eq!(ball.velocity.x, 180.0);
        assert_eq!(ball.position.x, 10.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_goal_mouth_lets_ball_through() {
        let field = field();
        let mut ball = Ball::new(&field);
        ball.position = Vec2::new(796.0, 300.0);
        ball.velocity = Vec2::new(180.0, 0.0);
        let mut events = EventList::new();

        reflect_off_walls(&mut ball, &field, &mut events);

        assert_eq!(ball.velocity.x, 180.0);
        assert_eq!(ball.position.x, 796.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_ball_integrates_with_friction() {
        let field = field();
        let mut ball = Ball::new(&field);
        ball.velocity = Vec2::new(100.0, 0.0);
        let mut events = EventList::new();

        update_ball(&mut ball, &field, 1.0, &mut events);

        // friction first, then integration
        assert!((ball.velocity.x - 50.0).abs() < EPSILON);
        assert!((ball.position.x - 450.0).abs() < EPSILON);
    }

    #[test]
    fn test_trail_recorded_only_when_fast() {
        let field = field();
        let mut ball = Ball::new(&field);
        ball.velocity = Vec2::new(0.0, 0.0);
        let mut events = EventList::new();

        update_ball(&mut ball, &field, DT, &mut events);
        assert!(ball.trail.is_empty());

        ball.velocity = Vec2::new(400.0, 0.0);
        ball.position = Vec2::new(100.0, 300.0);
        for _ in 0..20 {
            update_ball(&mut ball, &field, DT, &mut events);
        }
        assert_eq!(ball.trail.len(), TRAIL_LENGTH);

        ball.velocity = Vec2::new(10.0, 0.0);
        update_ball(&mut ball, &field, DT, &mut events);
        assert!(ball.trail.is_empty());
    }
}
