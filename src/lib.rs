//! Rules engine for a grid-based robot racing board game.
//!
//! The robot starts on the bottom row and races to a flag on the top row. Each
//! turn it rolls a pool of dice, picks three of the offered commands, and the
//! engine resolves them one per tick against the terrain:
//!
//! - grass is safe, rock bounces the robot back, water stops it and sends it
//!   back to where the turn began, lava is all but fatal;
//! - reaching the flag awards a life and loads the next map, fixed tiers first
//!   and randomly generated (always solvable) boards after that;
//! - losing the last life ends the run and returns to the title scene.
//!
//! The crate never renders anything itself. `GameManager` exposes the board,
//! the robot and a queue of `GameEvent`s, and accepts a start signal and
//! command selections. `demo` is a terminal front end built on that API.

pub mod config;
pub mod demo;
pub mod error;
pub mod game;


pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use game::{GameEvent, GameManager, StateKind, TickReport};
