//! Terrain catalog.
//!
//! Maps each terrain kind to what happens when a robot steps onto it. The
//! catalog is built once and handed by reference to command resolution.

use serde::Serialize;

use crate::game::types::TerrainKind;

/// What a move does after landing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LandingPolicy {
    /// Keep stepping if the command has steps left.
    Continue,
    /// Step back to the previous cell and stop.
    Bounce,
    /// Stay on the cell and stop.
    Stop,
    /// Stay on the cell, stop, and drop the rest of the queue.
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerrainEffect {
    pub damage: u32,
    pub policy: LandingPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainCatalog {
    grass: TerrainEffect,
    water: TerrainEffect,
    rock: TerrainEffect,
    lava: TerrainEffect,
}

impl TerrainCatalog {
    pub const LAVA_DAMAGE: u32 = 99;

    pub const fn standard() -> Self {
        Self {
            grass: TerrainEffect { damage: 0, policy: LandingPolicy::Continue },
            water: TerrainEffect { damage: 1, policy: LandingPolicy::Stop },
            rock: TerrainEffect { damage: 1, policy: LandingPolicy::Bounce },
            lava: TerrainEffect { damage: Self::LAVA_DAMAGE, policy: LandingPolicy::Abandon },
        }
    }

    pub const fn effect(&self, kind: TerrainKind) -> TerrainEffect {
        match kind {
            TerrainKind::Grass => self.grass,
            TerrainKind::Water => self.water,
            TerrainKind::Rock => self.rock,
            TerrainKind::Lava => self.lava,
        }
    }
}

impl Default for TerrainCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
