//! Circle-circle collision detection and resolution
//!
//! Ball-player contacts transfer momentum (kick or nudge) and separate the
//! pair; player-player contacts only separate.

use crate::game::constants::ball::NUDGE_IMPULSE;
use crate::game::constants::collision::{BALL_SHARE, DEAD_ZONE, PLAYER_SHARE};
use crate::game::constants::kick_speed;
use crate::game::events::{EventList, GameEvent};
use crate::game::state::{Ball, GameState, Player};
use crate::util::vec2::Vec2;

/// Normal used when two centres coincide
const FALLBACK_NORMAL: Vec2 = Vec2::RIGHT;

/// Broad phase: axis-aligned bounding boxes of the two circles overlap
#[inline]
pub fn bounds_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    (a.x - b.x).abs() < ra + rb && (a.y - b.y).abs() < ra + rb
}

/// Two-phase circle test: bounding boxes first, then true distance
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    if !bounds_overlap(a, ra, b, rb) {
        return false;
    }
    let reach = ra + rb;
    a.distance_sq_to(b) < reach * reach
}

/// Resolve ball contacts for both players (left first)
pub fn resolve_ball_contacts(state: &mut GameState, events: &mut EventList) {
    let GameState { players, ball, .. } = state;
    for player in players.iter_mut() {
        if let Some(event) = resolve_ball_player(player, ball) {
            events.push(event);
        }
    }
}

/// Apply a kick or nudge and separate one player from the ball.
/// Returns the resulting event, or None if they are not touching.
pub fn resolve_ball_player(player: &mut Player, ball: &mut Ball) -> Option<GameEvent> {
    if !circles_overlap(player.position, player.radius, ball.position, ball.radius) {
        return None;
    }

    let (normal, distance) =
        (ball.position - player.position).normalize_with_length(FALLBACK_NORMAL);

    let event = if player.is_sprinting {
        // A kick replaces whatever the ball was doing
        ball.velocity = normal * kick_speed();
        GameEvent::Kick {
            side: player.side,
            position: ball.position,
            velocity: ball.velocity,
        }
    } else {
        ball.velocity += normal * NUDGE_IMPULSE;
        GameEvent::Nudge {
            side: player.side,
            position: ball.position,
        }
    };

    let overlap = (player.radius + ball.radius) - distance;
    if overlap > DEAD_ZONE {
        let correction = normal * overlap;
        ball.position += correction * BALL_SHARE;
        player.position -= correction * PLAYER_SHARE;
    }

    Some(event)
}

/// Push overlapping players apart symmetrically; velocities are untouched
pub fn resolve_player_contact(state: &mut GameState) -> Option<GameEvent> {
    let [left, right] = &mut state.players;
    separate_players(left, right)
}

pub fn separate_players(a: &mut Player, b: &mut Player) -> Option<GameEvent> {
    if !circles_overlap(a.position, a.radius, b.position, b.radius) {
        return None;
    }

    let (normal, distance) = (b.position - a.position).normalize_with_length(Vec2::ZERO);
    // Coincident centres have no separating direction
    if distance <= 0.0 {
        return None;
    }

    let overlap = (a.radius + b.radius) - distance;
    a.position -= normal * (overlap / 2.0);
    b.position += normal * (overlap / 2.0);

    Some(GameEvent::PlayerContact {
        position: a.position + normal * a.radius,
    })
}
