/// Field geometry (screen units)
pub mod field {
    /// Full screen width; the playable field spans all of it
    pub const WIDTH: f32 = 800.0;
    /// Full screen height, including both tribunes
    pub const HEIGHT: f32 = 600.0;
    /// Tribune band removed from the top and from the bottom of the field
    pub const TRIBUNE_HEIGHT: f32 = 50.0;
    /// Vertical span of each goal mouth, centred on the field
    pub const GOAL_HEIGHT: f32 = HEIGHT / 3.0;
    /// Depth of the goal line from the left/right edge
    pub const GOAL_WIDTH: f32 = 10.0;
}

/// Player motion constants
pub mod player {
    pub const RADIUS: f32 = 15.0;
    /// Idle rotation rate in degrees per second
    pub const ROTATION_SPEED: f32 = 180.0;
    /// Straight-line sprint speed in units per second
    pub const SPRINT_SPEED: f32 = 250.0;
    /// Starting heading of the left player (facing right)
    pub const LEFT_START_HEADING: f32 = 0.0;
    /// Starting heading of the right player (facing left)
    pub const RIGHT_START_HEADING: f32 = 180.0;
    /// Starting x as a fraction of field width
    pub const LEFT_START_X_FRACTION: f32 = 0.25;
    pub const RIGHT_START_X_FRACTION: f32 = 0.75;
}

/// Ball constants
pub mod ball {
    pub const RADIUS: f32 = 10.0;
    /// Fraction of velocity left after one second of rolling.
    /// Applied as: velocity *= FRICTION.powf(dt)
    pub const FRICTION: f32 = 0.5;
    /// Speeds below this snap to zero
    pub const STOP_SPEED: f32 = 0.5;
    /// Kick speed = sprint speed * KICK_MULTIPLIER
    pub const KICK_MULTIPLIER: f32 = 1.1;
    /// Additive impulse when a standing player touches the ball
    pub const NUDGE_IMPULSE: f32 = 50.0;
    /// Maximum number of trail samples kept for rendering
    pub const TRAIL_LENGTH: usize = 12;
    /// Trail is only recorded above this speed
    pub const TRAIL_MIN_SPEED: f32 = 150.0;
}

/// Penetration resolution constants (empirically tuned, kept as-is)
pub mod collision {
    /// Overlaps at or below this are left alone to avoid jitter
    pub const DEAD_ZONE: f32 = 0.1;
    /// Share of the overlap applied to the ball
    pub const BALL_SHARE: f32 = 0.51;
    /// Share of the overlap applied to the player
    pub const PLAYER_SHARE: f32 = 0.5;
}

/// Bot controller constants
pub mod bot {
    /// Seconds spent in defense before switching to attack
    pub const DEFENSE_DURATION: f32 = 10.0;
    /// Seconds spent in attack before switching to defense
    pub const ATTACK_DURATION: f32 = 10.0;
    /// Default heading tolerance (degrees) before committing to a sprint
    pub const GOTO_ANGLE_TOLERANCE: f32 = 15.0;
    /// Default arrival radius
    pub const GOTO_DISTANCE_TOLERANCE: f32 = 5.0;
    /// Depth of the defensive line in front of the own goal line
    pub const DEFENSE_X_LINE_OFFSET: f32 = 70.0;
    /// Maximum vertical deviation from the goal centre while defending
    pub const DEFENSE_MAX_Y_DEVIATION: f32 = 150.0;
    /// Approach depth behind the ball, in player radii
    pub const ATTACK_TARGET_DEPTH_FACTOR: f32 = 1.5;
    /// Heading tolerance (degrees) when lining up a kick
    pub const ATTACK_KICK_ANGLE_TOLERANCE: f32 = 8.0;
    /// Half of the distance band in which the bot drives straight at the ball
    pub const ATTACK_MIN_DIST_FOR_TARGET_BEHIND: f32 = 40.0;
    /// Kick alignment starts within this multiple of kick reach
    pub const KICK_ALIGN_REACH_FACTOR: f32 = 1.2;
}

/// Match/round constants
pub mod game {
    /// Default match duration in seconds
    pub const MATCH_DURATION: f32 = 60.0;
    /// Pause after a goal before play resumes
    pub const GOAL_PAUSE: f32 = 1.5;
    /// Delay in game over before an automatic new round
    pub const AUTO_RESTART_DELAY: f32 = 5.0;
    /// Default simulation rate in Hz
    pub const TICK_RATE: u32 = 60;
    /// Delta time per tick in seconds
    pub const DT: f32 = 1.0 / 60.0;
}

/// Sum of player and ball radii: distance at which a player can strike the ball
#[inline]
pub fn kick_reach() -> f32 {
    player::RADIUS + ball::RADIUS
}

/// Speed given to the ball by a sprinting player
#[inline]
pub fn kick_speed() -> f32 {
    player::SPRINT_SPEED * ball::KICK_MULTIPLIER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kick_speed() {
        assert!((kick_speed() - 275.0).abs() < 0.001);
    }

    #[test]
    fn test_kick_reach() {
        assert_eq!(kick_reach(), 25.0);
    }

    #[test]
    fn test_collision_split_consumes_overlap() {
        // Ball and player shares together slightly exceed the overlap
        let total = collision::BALL_SHARE + collision::PLAYER_SHARE;
        assert!(total > 1.0 && total < 1.02);
        assert!(collision::BALL_SHARE > collision::PLAYER_SHARE);
    }

    #[test]
    fn test_friction_is_exponential_decay() {
        assert!(ball::FRICTION > 0.0 && ball::FRICTION < 1.0);
        let after_one_second = 100.0 * ball::FRICTION.powf(1.0);
        assert!((after_one_second - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_goal_fits_inside_field() {
        let playable = field::HEIGHT - 2.0 * field::TRIBUNE_HEIGHT;
        assert!(field::GOAL_HEIGHT < playable);
    }
}
