/// Main configuration module.
///
/// `game` holds the default gameplay constants and the loadable `GameConfig`.
pub mod game;

pub use game::{GameConfig, TerrainThresholds};
