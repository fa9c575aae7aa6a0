use crate::game::constants::game::{AUTO_RESTART_DELAY, MATCH_DURATION, TICK_RATE};
use crate::game::game_loop::{GameLoopConfig, MatchMode};

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Round length in seconds
    pub match_duration: f32,
    /// Who controls which side
    pub mode: MatchMode,
    /// Start the next round automatically after game over
    pub auto_restart: bool,
    /// Seconds spent in game over before the automatic restart
    pub auto_restart_delay: f32,
    /// Fixed simulation rate in Hz
    pub tick_rate: u32,
    /// Rounds played by the headless runner
    pub rounds: u32,
    /// Append finished rounds here as JSON lines
    pub round_log_path: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            match_duration: MATCH_DURATION,
            mode: MatchMode::BotVsBot,
            auto_restart: true,
            auto_restart_delay: AUTO_RESTART_DELAY,
            tick_rate: TICK_RATE,
            rounds: 3,
            round_log_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("match_duration must be 1-3600 seconds, got {0}")]
    MatchDuration(f32),
    #[error("tick_rate must be 1-1000 Hz, got {0}")]
    TickRate(u32),
    #[error("auto_restart_delay cannot be negative, got {0}")]
    AutoRestartDelay(f32),
    #[error("rounds must be at least 1")]
    NoRounds,
}

impl SimConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unparsable or out-of-range
    /// values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(duration) = lookup("GAME_DURATION") {
            match duration.parse::<f32>() {
                Ok(parsed) if (1.0..=3600.0).contains(&parsed) => config.match_duration = parsed,
                Ok(_) => tracing::warn!("GAME_DURATION must be 1-3600, using default"),
                Err(_) => tracing::warn!("Invalid GAME_DURATION '{}', using default", duration),
            }
        }

        if let Some(mode) = lookup("MATCH_MODE") {
            match mode.parse::<MatchMode>() {
                Ok(parsed) => config.mode = parsed,
                Err(e) => tracing::warn!("Invalid MATCH_MODE: {}, using default", e),
            }
        }

        if let Some(auto_restart) = lookup("AUTO_RESTART") {
            match parse_bool(&auto_restart) {
                Some(parsed) => config.auto_restart = parsed,
                None => tracing::warn!("Invalid AUTO_RESTART '{}', using default", auto_restart),
            }
        }

        if let Some(delay) = lookup("AUTO_RESTART_DELAY") {
            match delay.parse::<f32>() {
                Ok(parsed) if parsed >= 0.0 => config.auto_restart_delay = parsed,
                Ok(_) => tracing::warn!("AUTO_RESTART_DELAY cannot be negative, using default"),
                Err(_) => tracing::warn!("Invalid AUTO_RESTART_DELAY '{}', using default", delay),
            }
        }

        if let Some(tick_rate) = lookup("TICK_RATE") {
            match tick_rate.parse::<u32>() {
                Ok(parsed) if (1..=1000).contains(&parsed) => config.tick_rate = parsed,
                Ok(_) => tracing::warn!("TICK_RATE must be 1-1000, using default"),
                Err(_) => tracing::warn!("Invalid TICK_RATE '{}', using default", tick_rate),
            }
        }

        if let Some(rounds) = lookup("ROUNDS") {
            match rounds.parse::<u32>() {
                Ok(parsed) if parsed > 0 => config.rounds = parsed,
                Ok(_) => tracing::warn!("ROUNDS must be > 0, using default"),
                Err(_) => tracing::warn!("Invalid ROUNDS '{}', using default", rounds),
            }
        }

        if let Some(path) = lookup("ROUND_LOG_PATH") {
            if !path.trim().is_empty() {
                config.round_log_path = Some(path);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1.0..=3600.0).contains(&self.match_duration) {
            return Err(ConfigError::MatchDuration(self.match_duration));
        }
        if !(1..=1000).contains(&self.tick_rate) {
            return Err(ConfigError::TickRate(self.tick_rate));
        }
        if self.auto_restart_delay < 0.0 {
            return Err(ConfigError::AutoRestartDelay(self.auto_restart_delay));
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }

    /// Fixed tick length in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn to_game_loop_config(&self) -> GameLoopConfig {
        GameLoopConfig {
            match_duration: self.match_duration,
            auto_restart: self.auto_restart,
            auto_restart_delay: self.auto_restart_delay,
            ..GameLoopConfig::default()
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
