//! Space Ball simulation core
//!
//! A two-player top-down soccer arcade game: one-button players that
//! rotate while standing and sprint straight ahead while the button is
//! held, a friction-damped ball, goal mouths in the side walls and an
//! attack/defense bot for either side.
//!
//! The crate has no rendering or audio. Callers drive [`game::game_loop::GameLoop`]
//! with input and a fixed `dt`, then read a [`game::snapshot::GameSnapshot`]
//! and the per-tick [`game::events::GameEvent`]s.

pub mod config;
pub mod game;
pub mod util;
