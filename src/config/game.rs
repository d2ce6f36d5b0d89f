/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as grid dimensions,
/// life totals, dice pool size and state timings, plus the `GameConfig` value
/// that carries them (optionally overridden from a JSON file).
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::game::systems::CommandKind;
use crate::game::types::TerrainGrid;

/// Number of rows in a random grid.
pub const GRID_ROW: usize = 20;

/// Number of columns in a random grid.
pub const GRID_COL: usize = 20;

/// Life total of a fresh player.
pub const STARTING_LIFE: u32 = 3;

/// Healing never raises life above this.
pub const MAX_LIFE: u32 = 5;

/// Number of dice rolled at the start of each input phase.
pub const DICE_POOL_SIZE: usize = 5;

/// Number of commands the player must pick before the execute phase begins.
pub const COMMAND_QUEUE_LEN: usize = 3;

/// Duration of one tick in milliseconds.
pub const TICK_PERIOD_MS: u64 = 250;

/// Ticks the execute phase waits before resolving its first command.
pub const SETTLE_TICKS: u32 = 2;

/// Ticks the game-over feedback stays up before returning to the title.
pub const GAME_OVER_TICKS: u32 = 8;

/// Ticks the map-completed feedback stays up before the next map loads.
pub const MAP_COMPLETED_TICKS: u32 = 8;

/// Completed fixed maps after which random boards take over.
pub const RANDOM_AFTER: usize = 3;

/// Rarity cut-offs for random terrain: a uniform draw in `[0, 1)` below
/// `water` is grass, below `rock` water, below `lava` rock, anything else lava.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainThresholds {
    pub water: f64,
    pub rock: f64,
    pub lava: f64,
}

impl Default for TerrainThresholds {
    fn default() -> Self {
        Self {
            water: 0.70,
            rock: 0.85,
            lava: 0.95,
        }
    }
}

/// Every recognised option, built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub starting_life: u32,
    pub max_life: u32,
    pub dice_pool_size: usize,
    pub tick_period_ms: u64,
    pub settle_ticks: u32,
    pub game_over_ticks: u32,
    pub map_completed_ticks: u32,
    pub thresholds: TerrainThresholds,
    /// Faces carried by every die of the pool.
    pub die_faces: Vec<CommandKind>,
    /// Pre-authored boards in difficulty order. `None` uses the built-in tiers.
    pub fixed_maps: Option<Vec<TerrainGrid>>,
    /// `0` means random boards from the first map on.
    pub random_after: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROW,
            columns: GRID_COL,
            starting_life: STARTING_LIFE,
            max_life: MAX_LIFE,
            dice_pool_size: DICE_POOL_SIZE,
            tick_period_ms: TICK_PERIOD_MS,
            settle_ticks: SETTLE_TICKS,
            game_over_ticks: GAME_OVER_TICKS,
            map_completed_ticks: MAP_COMPLETED_TICKS,
            thresholds: TerrainThresholds::default(),
            die_faces: CommandKind::DICE_FACES.to_vec(),
            fixed_maps: None,
            random_after: RANDOM_AFTER,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file. Missing fields fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> GameResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::InvalidConfig(format!(
                "random grid must be at least 1x1, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.max_life == 0 || self.starting_life == 0 || self.starting_life > self.max_life {
            return Err(GameError::InvalidConfig(format!(
                "starting life {} must be within 1..={}",
                self.starting_life, self.max_life
            )));
        }
        if self.dice_pool_size < COMMAND_QUEUE_LEN {
            return Err(GameError::InvalidConfig(format!(
                "dice pool of {} cannot fill a queue of {}",
                self.dice_pool_size, COMMAND_QUEUE_LEN
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(GameError::InvalidConfig("tick period must be positive".into()));
        }
        if self.die_faces.is_empty() {
            return Err(GameError::InvalidConfig("dice need at least one face".into()));
        }
        if self.die_faces.contains(&CommandKind::ReturnToOrigin) {
            return Err(GameError::InvalidConfig(
                "return-to-origin is not a dice face".into(),
            ));
        }

        let t = self.thresholds;
        let ordered = 0.5 <= t.water && t.water <= t.rock && t.rock <= t.lava && t.lava <= 1.0;
        if !ordered {
            return Err(GameError::InvalidConfig(format!(
                "terrain thresholds must satisfy 0.5 <= water <= rock <= lava <= 1, got {t:?}"
            )));
        }

        if let Some(maps) = &self.fixed_maps {
            if maps.is_empty() && self.random_after > 0 {
                return Err(GameError::InvalidConfig(
                    "an empty fixed-map set requires random_after = 0".into(),
                ));
            }
        }
        Ok(())
    }
}
