use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::Context;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use space_ball::config::SimConfig;
use space_ball::game::events::GameEvent;
use space_ball::game::game_loop::{GameLoop, MatchMode};
use space_ball::game::match_result::RoundRecord;
use space_ball::game::match_state::MatchPhase;
use space_ball::game::state::Side;

/// Seed for the scripted human input
const INPUT_SEED: u64 = 0x5BA1_1BA1;
/// Chance per tick that a scripted human flips its sprint button
const TOGGLE_CHANCE: f64 = 1.0 / 30.0;

/// One line of the round log
#[derive(Serialize)]
struct RoundLogLine<'a> {
    recorded_at: DateTime<Utc>,
    mode: MatchMode,
    #[serde(flatten)]
    record: &'a RoundRecord,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Space Ball v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: mode={:?}, duration={}s, tick_rate={}Hz, rounds={}",
        config.mode, config.match_duration, config.tick_rate, config.rounds
    );

    let mut round_log = match &config.round_log_path {
        Some(path) => Some(open_round_log(path)?),
        None => None,
    };

    let mut game = GameLoop::new(config.to_game_loop_config());
    game.select_mode(config.mode);

    let dt = config.dt();
    let mut rng = StdRng::seed_from_u64(INPUT_SEED);
    let mut finished = 0;

    loop {
        drive_humans(&mut game, &mut rng);

        for event in game.tick(dt) {
            match event {
                GameEvent::RoundFinished(record) => {
                    finished += 1;
                    info!(
                        "Round {} finished {}:{} - {}",
                        record.round, record.score_left, record.score_right, record.winner_label
                    );
                    if let Some(writer) = round_log.as_mut() {
                        write_round(writer, config.mode, &record)?;
                    }
                }
                GameEvent::Kick { side, velocity, .. } => {
                    debug!(side = side.label(), speed = velocity.length(), "Kick");
                }
                GameEvent::PhaseChanged { from, to } => {
                    debug!(?from, ?to, "Phase changed");
                }
                _ => {}
            }
        }

        if finished >= config.rounds {
            break;
        }
        if !config.auto_restart && game.phase() == MatchPhase::GameOver {
            break;
        }
    }

    if let Some(mut writer) = round_log {
        writer.flush().context("failed to flush round log")?;
    }

    let snapshot = game.snapshot();
    info!(
        "Simulation finished after {} ticks ({}), last score {}",
        snapshot.tick,
        finished,
        snapshot.score_text()
    );

    Ok(())
}

/// Random sprint toggles for every human-controlled side
fn drive_humans(game: &mut GameLoop, rng: &mut StdRng) {
    if game.phase() != MatchPhase::Playing {
        return;
    }
    for side in Side::BOTH {
        if game.is_bot(side) || !rng.gen_bool(TOGGLE_CHANCE) {
            continue;
        }
        if game.state().player(side).is_sprinting {
            game.stop_sprint(side);
        } else {
            game.start_sprint(side);
        }
    }
}

fn open_round_log(path: &str) -> anyhow::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open round log '{}'", path))?;
    info!("Appending round results to {}", path);
    Ok(BufWriter::new(file))
}

fn write_round(
    writer: &mut BufWriter<File>,
    mode: MatchMode,
    record: &RoundRecord,
) -> anyhow::Result<()> {
    let line = RoundLogLine {
        recorded_at: Utc::now(),
        mode,
        record,
    };
    serde_json::to_writer(&mut *writer, &line).context("failed to encode round record")?;
    writeln!(writer).context("failed to write round log")?;
    Ok(())
}
