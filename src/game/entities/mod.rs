//! Game entities module.
//!
//! This module organizes the player and dice entity logic.

pub mod dice;
pub mod player;

pub use dice::*;
pub use player::*;
