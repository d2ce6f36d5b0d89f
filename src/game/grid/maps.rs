//! Pre-authored maps, easiest first.
//!
//! Each map is a row-major grid of terrain names, the same JSON layout that
//! `Board::export_json` writes.

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::types::TerrainGrid;

const EASY: &str = include_str!("../../../maps/easy.json");
const MEDIUM: &str = include_str!("../../../maps/medium.json");
const HARD: &str = include_str!("../../../maps/hard.json");

/// Parse one terrain-name grid.
pub fn parse_map(raw: &str) -> GameResult<TerrainGrid> {
    let grid: TerrainGrid = serde_json::from_str(raw)
        .map_err(|e| GameError::MapFormat(format!("not a terrain-name grid: {e}")))?;
    Ok(grid)
}

pub fn builtin_maps() -> GameResult<Vec<TerrainGrid>> {
    [EASY, MEDIUM, HARD].into_iter().map(parse_map).collect()
}

/// The fixed maps a session plays through before random boards take over.
pub fn fixed_map_set(config: &GameConfig) -> GameResult<Vec<TerrainGrid>> {
    match &config.fixed_maps {
        Some(maps) => Ok(maps.clone()),
        None => builtin_maps(),
    }
}
