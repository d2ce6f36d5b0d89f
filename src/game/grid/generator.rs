//! Random board generation.
//!
//! Terrain is drawn per cell from rarity thresholds, then a grass corridor is
//! painted from the start to the flag so every random board can be finished.

use log::debug;
use rand::Rng;

use crate::config::{GameConfig, TerrainThresholds};
use crate::error::GameResult;
use crate::game::grid::board::{Board, BoardOrigin};
use crate::game::types::{Direction, Location, TerrainGrid, TerrainKind};

/// Chance a sideways leg of the carve heads toward the flag's column.
const CARVE_BIAS: f64 = 0.75;

/// Map a uniform draw in `[0, 1)` to a terrain kind.
pub fn terrain_for_draw(draw: f64, thresholds: &TerrainThresholds) -> TerrainKind {
    if draw >= thresholds.lava {
        TerrainKind::Lava
    } else if draw >= thresholds.rock {
        TerrainKind::Rock
    } else if draw >= thresholds.water {
        TerrainKind::Water
    } else {
        TerrainKind::Grass
    }
}

pub fn random_grid(rows: usize, columns: usize, thresholds: &TerrainThresholds, rng: &mut impl Rng) -> TerrainGrid {
    (0..rows)
        .map(|_| {
            (0..columns)
                .map(|_| terrain_for_draw(rng.random::<f64>(), thresholds))
                .collect()
        })
        .collect()
}

/// Generate a random board of the configured size and carve a path through it.
pub fn random_board(config: &GameConfig, rng: &mut impl Rng) -> GameResult<Board> {
    let grid = random_grid(config.rows, config.columns, &config.thresholds, rng);
    let mut board = Board::from_grid(&grid, BoardOrigin::Random, rng)?;
    carve_path(&mut board, rng);
    Ok(board)
}

/// Paint a contiguous grass corridor from the start up to the top row, then
/// along the top row to the flag.
///
/// Alternates an upward leg and a sideways leg (1 to 3 cells each, sideways
/// legs leaning toward the flag) until the top row is reached. Sideways legs
/// stop at the board edge.
pub fn carve_path(board: &mut Board, rng: &mut impl Rng) {
    let flag = board.flag_location();
    let mut current = board.starting_location();
    let mut path = vec![current];
    paint(board, current, rng);

    while current.row > 0 {
        let up = rng.random_range(1..=3);
        for _ in 0..up {
            let Some(next) = board.neighbor(current, Direction::Up) else {
                break;
            };
            current = next;
            paint(board, current, rng);
            path.push(current);
        }
        if current.row == 0 {
            break;
        }

        let toward = side_toward(current, flag, rng);
        let side = if rng.random_bool(CARVE_BIAS) { toward } else { toward.opposite() };
        let steps = rng.random_range(1..=3);
        for _ in 0..steps {
            let Some(next) = board.neighbor(current, side) else {
                break;
            };
            current = next;
            paint(board, current, rng);
            path.push(current);
        }
    }

    while current.column != flag.column {
        let side = if flag.column > current.column { Direction::Right } else { Direction::Left };
        let Some(next) = board.neighbor(current, side) else {
            break;
        };
        current = next;
        paint(board, current, rng);
        path.push(current);
    }

    debug!(
        "[Board] Carved {} cells from {} to {}",
        path.len(),
        board.starting_location(),
        flag
    );
    board.record_carve(path);
}

fn side_toward(current: Location, flag: Location, rng: &mut impl Rng) -> Direction {
    if flag.column > current.column {
        Direction::Right
    } else if flag.column < current.column {
        Direction::Left
    } else if rng.random_bool(0.5) {
        Direction::Right
    } else {
        Direction::Left
    }
}

fn paint(board: &mut Board, loc: Location, rng: &mut impl Rng) {
    if !board.is_grass(loc) {
        let variant = rng.random_range(0..TerrainKind::Grass.variants());
        board.set_terrain(loc, TerrainKind::Grass, variant);
    }
}
