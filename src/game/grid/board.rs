//! Board model.
//!
//! A rectangular grid of terrain cells with a derived start (bottom row) and
//! flag (top row). Both always resolve to grass once the board is built.

use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::game::types::{Cell, Direction, Location, TerrainGrid, TerrainKind};

/// Where a board came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardOrigin {
    /// Pre-authored map, by difficulty tier (0 = easiest).
    Fixed { tier: usize },
    Random,
}

#[derive(Debug, Clone, Serialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    starting_location: Location,
    flag_location: Location,
    origin: BoardOrigin,
    carved_path: Vec<Location>,
}

impl Board {
    /// Build a board from a row-major terrain layout and derive start and flag.
    pub fn from_grid(grid: &TerrainGrid, origin: BoardOrigin, rng: &mut impl Rng) -> GameResult<Self> {
        let rows = grid.len();
        let columns = grid.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return Err(GameError::MapFormat("a board needs at least one cell".into()));
        }
        if let Some(row) = grid.iter().position(|r| r.len() != columns) {
            return Err(GameError::MapFormat(format!(
                "row {row} has {} cells, expected {columns}",
                grid[row].len()
            )));
        }

        let cells = grid
            .iter()
            .enumerate()
            .map(|(row, kinds)| {
                kinds
                    .iter()
                    .enumerate()
                    .map(|(column, &terrain)| {
                        let variant = rng.random_range(0..terrain.variants());
                        Cell::new(Location::new(row, column), terrain, variant)
                    })
                    .collect()
            })
            .collect();

        let mut board = Board {
            rows,
            columns,
            cells,
            starting_location: Location::default(),
            flag_location: Location::default(),
            origin,
            carved_path: Vec::new(),
        };
        board.init();
        Ok(board)
    }

    /// Parse a terrain-name grid (`"grass"`, `"water"`, `"rock"`, `"lava"`).
    pub fn from_names<S: AsRef<str>>(names: &[Vec<S>], origin: BoardOrigin, rng: &mut impl Rng) -> GameResult<Self> {
        let grid = names
            .iter()
            .map(|row| row.iter().map(|name| name.as_ref().parse()).collect::<GameResult<Vec<_>>>())
            .collect::<GameResult<TerrainGrid>>()?;
        Self::from_grid(&grid, origin, rng)
    }

    /// Derive start and flag, patching in grass where a row has none.
    fn init(&mut self) {
        let bottom = self.rows - 1;
        let start = (0..self.columns)
            .rev()
            .map(|column| Location::new(bottom, column))
            .find(|&loc| self.is_grass(loc));
        self.starting_location = match start {
            Some(loc) => loc,
            None => {
                let corner = Location::new(bottom, self.columns - 1);
                debug!("[Board] No grass on the bottom row, forcing {corner}");
                self.set_terrain(corner, TerrainKind::Grass, 0);
                corner
            }
        };

        let flag = (0..self.columns)
            .map(|column| Location::new(0, column))
            .find(|&loc| self.is_grass(loc));
        self.flag_location = match flag {
            Some(loc) => loc,
            None => {
                let corner = Location::new(0, 0);
                debug!("[Board] No grass on the top row, forcing {corner}");
                self.set_terrain(corner, TerrainKind::Grass, 0);
                corner
            }
        };
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn origin(&self) -> BoardOrigin {
        self.origin
    }

    pub fn starting_location(&self) -> Location {
        self.starting_location
    }

    pub fn flag_location(&self) -> Location {
        self.flag_location
    }

    /// Corridor painted by the solvability carve; empty for fixed maps.
    pub fn carved_path(&self) -> &[Location] {
        &self.carved_path
    }

    pub fn contains(&self, loc: Location) -> bool {
        loc.row < self.rows && loc.column < self.columns
    }

    pub fn cell(&self, loc: Location) -> Option<&Cell> {
        self.cells.get(loc.row).and_then(|row| row.get(loc.column))
    }

    pub fn terrain(&self, loc: Location) -> Option<TerrainKind> {
        self.cell(loc).map(|cell| cell.terrain)
    }

    pub fn is_grass(&self, loc: Location) -> bool {
        self.cell(loc).is_some_and(Cell::is_grass)
    }

    /// Rows of cells, top row first.
    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// The cell one step from `loc` in `direction`, or `None` off the edge.
    pub fn neighbor(&self, loc: Location, direction: Direction) -> Option<Location> {
        let (dr, dc) = direction.delta();
        let row = loc.row.checked_add_signed(dr)?;
        let column = loc.column.checked_add_signed(dc)?;
        let next = Location::new(row, column);
        self.contains(next).then_some(next)
    }

    pub(crate) fn set_terrain(&mut self, loc: Location, terrain: TerrainKind, variant: u8) {
        if let Some(cell) = self.cells.get_mut(loc.row).and_then(|row| row.get_mut(loc.column)) {
            *cell = Cell::new(loc, terrain, variant);
        }
    }

    pub(crate) fn record_carve(&mut self, path: Vec<Location>) {
        self.carved_path = path;
    }

    pub fn count(&self, terrain: TerrainKind) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.terrain == terrain).count()
    }

    /// Row-major terrain names, the same layout fixed maps are authored in.
    pub fn to_names(&self) -> Vec<Vec<&'static str>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.terrain.name()).collect())
            .collect()
    }

    /// Debug export for authoring fixed maps offline.
    pub fn export_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_names())?)
    }
}
