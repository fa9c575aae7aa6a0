//! Match orchestrator
//!
//! Owns the game state and the bot controllers and advances everything one
//! fixed tick at a time. Tick order while playing:
//!
//! 1. bot decisions
//! 2. player and ball integration
//! 3. ball-player collisions
//! 4. player-player collisions (then players are clamped back inside)
//! 5. goal sensing
//! 6. match clock

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::game::constants::game::{AUTO_RESTART_DELAY, GOAL_PAUSE, MATCH_DURATION};
use crate::game::events::{EventList, GameEvent};
use crate::game::match_result::determine_result;
use crate::game::match_state::{MatchPhase, MatchState};
use crate::game::snapshot::GameSnapshot;
use crate::game::state::{Field, GameState, Side};
use crate::game::systems::bot::BotController;
use crate::game::systems::{collision, goal, physics};

/// Who controls which side
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchMode {
    /// Two humans
    PlayerVsPlayer,
    /// Human on the left, bot on the right
    PlayerVsBot,
    /// Bots on both sides
    BotVsBot,
}

impl MatchMode {
    pub fn is_bot(self, side: Side) -> bool {
        match self {
            MatchMode::PlayerVsPlayer => false,
            MatchMode::PlayerVsBot => side == Side::Right,
            MatchMode::BotVsBot => true,
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pvp" => Ok(MatchMode::PlayerVsPlayer),
            "pve" => Ok(MatchMode::PlayerVsBot),
            "bots" | "eve" => Ok(MatchMode::BotVsBot),
            other => Err(format!("unknown match mode '{}'", other)),
        }
    }
}

/// Game loop configuration
#[derive(Debug, Clone)]
pub struct GameLoopConfig {
    /// Round length in seconds
    pub match_duration: f32,
    /// Freeze after a goal before play resumes
    pub goal_pause: f32,
    /// Start a new round automatically after game over
    pub auto_restart: bool,
    /// Seconds spent in game over before the automatic restart
    pub auto_restart_delay: f32,
    pub field: Field,
}

impl Default for GameLoopConfig {
    fn default() -> Self {
        Self {
            match_duration: MATCH_DURATION,
            goal_pause: GOAL_PAUSE,
            auto_restart: false,
            auto_restart_delay: AUTO_RESTART_DELAY,
            field: Field::default(),
        }
    }
}

/// Fixed-tick match driver
pub struct GameLoop {
    config: GameLoopConfig,
    state: GameState,
    mode: MatchMode,
    /// One controller per bot-driven side, indexed by `Side::index()`
    bots: [Option<BotController>; 2],
    /// Sum of every dt fed to `tick`, kept in f64 so long runs stay exact
    clock: f64,
}

impl GameLoop {
    pub fn new(config: GameLoopConfig) -> Self {
        let mut state = GameState::new(config.field);
        state.match_state = MatchState::new(config.match_duration);
        Self {
            config,
            state,
            mode: MatchMode::PlayerVsPlayer,
            bots: [None, None],
            clock: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameLoopConfig {
        &self.config
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.match_state.phase
    }

    /// Game-loop clock in seconds
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn bot(&self, side: Side) -> Option<&BotController> {
        self.bots[side.index()].as_ref()
    }

    pub fn is_bot(&self, side: Side) -> bool {
        self.bots[side.index()].is_some()
    }

    /// Menu -> Playing with the chosen controllers. Ignored outside the menu.
    pub fn select_mode(&mut self, mode: MatchMode) -> EventList {
        let mut events = EventList::new();
        if self.phase() != MatchPhase::Menu {
            return events;
        }

        self.mode = mode;
        for side in Side::BOTH {
            self.bots[side.index()] = mode.is_bot(side).then(BotController::new);
        }
        info!(?mode, "Mode selected");
        self.start_new_game(&mut events);
        events
    }

    /// GameOver -> Playing: a new round with the same controllers
    pub fn restart(&mut self) -> EventList {
        let mut events = EventList::new();
        if self.phase() == MatchPhase::GameOver {
            self.start_new_game(&mut events);
        }
        events
    }

    /// Back to the menu from any phase
    pub fn return_to_menu(&mut self) -> EventList {
        let mut events = EventList::new();
        let from = self.phase();
        if from != MatchPhase::Menu {
            self.state.freeze_players();
            self.state.match_state.phase = MatchPhase::Menu;
            events.push(GameEvent::PhaseChanged { from, to: MatchPhase::Menu });
        }
        events
    }

    /// Sprint key pressed. Only honoured for human sides while playing.
    pub fn start_sprint(&mut self, side: Side) -> bool {
        if !self.accepts_input(side) {
            return false;
        }
        self.state.player_mut(side).start_sprint();
        true
    }

    /// Sprint key released. Only honoured for human sides while playing.
    pub fn stop_sprint(&mut self, side: Side) -> bool {
        if !self.accepts_input(side) {
            return false;
        }
        self.state.player_mut(side).stop_sprint();
        true
    }

    fn accepts_input(&self, side: Side) -> bool {
        self.phase() == MatchPhase::Playing && !self.is_bot(side)
    }

    fn start_new_game(&mut self, events: &mut EventList) {
        let from = self.phase();
        self.state.reset_positions();
        for bot in self.bots.iter_mut().flatten() {
            bot.reset();
        }
        self.state.match_state.start_round(self.clock);
        info!(round = self.state.match_state.round, "Round started");
        events.push(GameEvent::PhaseChanged { from, to: MatchPhase::Playing });
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> EventList {
        let mut events = EventList::new();
        self.clock += f64::from(dt);
        self.state.tick += 1;

        match self.phase() {
            MatchPhase::Menu => {}
            MatchPhase::Playing => self.tick_playing(dt, &mut events),
            MatchPhase::GoalPause => self.tick_goal_pause(&mut events),
            MatchPhase::GameOver => self.tick_game_over(&mut events),
        }

        events
    }

    fn tick_playing(&mut self, dt: f32, events: &mut EventList) {
        let now = self.clock;

        self.update_bots(dt);
        physics::update(&mut self.state, dt, events);
        collision::resolve_ball_contacts(&mut self.state, events);
        if let Some(event) = collision::resolve_player_contact(&mut self.state) {
            events.push(event);
        }
        // Contact pushes must not leave a player outside the field
        physics::contain_players(&mut self.state);

        if let Some(scorer) = goal::check_goal(&self.state.ball, &self.state.field) {
            let match_state = &mut self.state.match_state;
            match_state.record_goal(scorer, now);
            info!(
                scorer = scorer.label(),
                score_left = match_state.score_left,
                score_right = match_state.score_right,
                "Goal!"
            );
            events.push(GameEvent::GoalScored {
                scorer,
                score_left: match_state.score_left,
                score_right: match_state.score_right,
            });
            events.push(GameEvent::PhaseChanged {
                from: MatchPhase::Playing,
                to: MatchPhase::GoalPause,
            });
            self.state.freeze_players();
        }

        // Only still playing if no goal this tick
        if self.state.match_state.update_timer(now) {
            self.state.match_state.end(now);
            self.state.freeze_players();
            let record = determine_result(&self.state.match_state);
            info!(
                round = record.round,
                score_left = record.score_left,
                score_right = record.score_right,
                winner = %record.winner_label,
                "Game over"
            );
            events.push(GameEvent::PhaseChanged {
                from: MatchPhase::Playing,
                to: MatchPhase::GameOver,
            });
            events.push(GameEvent::RoundFinished(record));
        }
    }

    fn update_bots(&mut self, dt: f32) {
        let GameState { field, players, ball, .. } = &mut self.state;

        for side in Side::BOTH {
            let Some(bot) = self.bots[side.index()].as_mut() else {
                continue;
            };
            let opponent_goal_x = field.goal_line_x(side.opponent());
            let player = &mut players[side.index()];

            let sprint = bot.decide(player, ball, opponent_goal_x, field, dt);
            if sprint && !player.is_sprinting {
                player.start_sprint();
            } else if !sprint && player.is_sprinting {
                player.stop_sprint();
            }
        }
    }

    fn tick_goal_pause(&mut self, events: &mut EventList) {
        let now = self.clock;
        if self.state.match_state.pause_elapsed(now) > f64::from(self.config.goal_pause) {
            self.state.reset_positions();
            self.state.match_state.resume(now);
            debug!(remaining = self.state.match_state.remaining_time, "Play resumed");
            events.push(GameEvent::PhaseChanged {
                from: MatchPhase::GoalPause,
                to: MatchPhase::Playing,
            });
        }
    }

    fn tick_game_over(&mut self, events: &mut EventList) {
        if !self.config.auto_restart {
            return;
        }
        let waited = self.clock - self.state.match_state.game_over_time;
        if waited >= f64::from(self.config.auto_restart_delay) {
            self.start_new_game(events);
        }
    }

    /// Read-only view for the rendering consumer
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(&self.state)
    }
}
