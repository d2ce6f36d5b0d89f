use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A cell coordinate. Row 0 is the top of the board, where the flag sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn manhattan_distance(&self, other: &Location) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Facing direction, numbered clockwise from up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Any integer is accepted and wrapped mod 4, negatives included.
    pub const fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }

    pub const fn turn_left(self) -> Self {
        Self::from_index(self.index() as i32 - 1)
    }

    pub const fn turn_right(self) -> Self {
        Self::from_index(self.index() as i32 + 1)
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() as i32 + 2)
    }

    /// Row and column delta of one step in this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    Grass,
    Water,
    Rock,
    Lava,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Grass,
        TerrainKind::Water,
        TerrainKind::Rock,
        TerrainKind::Lava,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Water => "water",
            TerrainKind::Rock => "rock",
            TerrainKind::Lava => "lava",
        }
    }

    /// Number of sprite variants the presentation layer can pick from.
    pub const fn variants(self) -> u8 {
        match self {
            TerrainKind::Lava => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| GameError::MapFormat(format!("unknown terrain name {s:?}")))
    }
}

/// Row-major terrain layout, the shape fixed maps are authored in.
pub type TerrainGrid = Vec<Vec<TerrainKind>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub location: Location,
    pub terrain: TerrainKind,
    /// Sprite variant index, always below `terrain.variants()`.
    pub variant: u8,
}

impl Cell {
    pub const fn new(location: Location, terrain: TerrainKind, variant: u8) -> Self {
        Self { location, terrain, variant }
    }

    pub const fn is_grass(&self) -> bool {
        matches!(self.terrain, TerrainKind::Grass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Location::new(2, 7);
        let b = Location::new(5, 1);
        assert_eq!(a.manhattan_distance(&b), 9);
        assert_eq!(b.manhattan_distance(&a), 9);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn facing_wraps_in_both_directions() {
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::from_index(-1), Direction::Left);
        assert_eq!(Direction::from_index(6), Direction::Down);
    }

    #[test]
    fn terrain_names_parse() {
        assert_eq!("lava".parse::<TerrainKind>().unwrap(), TerrainKind::Lava);
        assert!("mud".parse::<TerrainKind>().is_err());
        assert_eq!(serde_json::to_string(&TerrainKind::Water).unwrap(), "\"water\"");
    }
}
