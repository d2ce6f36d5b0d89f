//! Game rendering system (terminal).
//!
//! This module draws the board and robot into a text surface sized for one
//! map, and turns core events into status lines.

use crate::config::game::COMMAND_QUEUE_LEN;
use crate::error::{GameError, GameResult};
use crate::game::GameEvent;
use crate::game::entities::Player;
use crate::game::grid::Board;
use crate::game::systems::Landing;
use crate::game::types::{Direction, TerrainKind};

/// Text tiles for one map, row-major. Created when a map loads.
#[derive(Debug, Clone)]
pub struct TileSurface {
    columns: usize,
    tiles: Vec<&'static str>,
}

impl TileSurface {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { columns, tiles: vec!["  "; rows * columns] }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.tiles
            .chunks(self.columns.max(1))
            .map(|row| row.concat())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn terrain_symbol(terrain: TerrainKind, variant: u8) -> &'static str {
    match (terrain, variant) {
        (TerrainKind::Grass, 0) => "..",
        (TerrainKind::Grass, _) => ",,",
        (TerrainKind::Water, 0) => "~~",
        (TerrainKind::Water, _) => "≈≈",
        (TerrainKind::Rock, _) => "##",
        (TerrainKind::Lava, _) => "^^",
    }
}

fn robot_symbol(player: &Player) -> &'static str {
    if !player.is_alive() {
        return "XX";
    }
    match player.facing {
        Direction::Up => "R↑",
        Direction::Right => "R→",
        Direction::Down => "R↓",
        Direction::Left => "R←",
    }
}

/// Draw the board, flag and robot. The surface must match the board size.
pub fn draw_board(surface: &mut TileSurface, board: &Board, player: &Player) -> GameResult<()> {
    let expected = board.rows() * board.columns();
    if surface.len() != expected || surface.columns != board.columns() {
        return Err(GameError::RenderMismatch { expected, found: surface.len() });
    }

    for (tile, cell) in surface.tiles.iter_mut().zip(board.cells().iter().flatten()) {
        *tile = if cell.location == player.location {
            robot_symbol(player)
        } else if cell.location == board.flag_location() {
            "FL"
        } else {
            terrain_symbol(cell.terrain, cell.variant)
        };
    }
    Ok(())
}

pub fn status_line(player: &Player, maps_completed: usize) -> String {
    format!(
        "life {}/{} | maps {} | at {} facing {:?}",
        player.life(),
        player.max_life(),
        maps_completed,
        player.location,
        player.facing
    )
}

/// A line of feedback for the events worth telling the player about.
pub fn describe_event(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::MapLoaded { map_number, origin, rows, columns } => {
            Some(format!("Map {map_number} ({origin:?}, {rows}x{columns})"))
        }
        GameEvent::DiceOffered(offered) => {
            let choices: Vec<String> = offered
                .iter()
                .enumerate()
                .map(|(i, command)| format!("[{}] {}", i + 1, command.label()))
                .collect();
            Some(format!("Pick {COMMAND_QUEUE_LEN}: {}", choices.join("  ")))
        }
        GameEvent::CommandQueued { command, queued, .. } => {
            Some(format!("Queued {} ({queued}/{COMMAND_QUEUE_LEN})", command.label()))
        }
        GameEvent::CommandResolved(result) => match result.landed_on {
            Some(Landing::Terrain(terrain)) if result.damage > 0 => Some(format!(
                "{}: hit {terrain}, {} damage",
                result.command.label(),
                result.damage
            )),
            Some(Landing::Reset) => Some("Back to where the turn began".to_string()),
            _ => None,
        },
        GameEvent::GameOver { maps_completed } => {
            Some(format!("GAME OVER after {maps_completed} maps. Press Enter to play again."))
        }
        GameEvent::MapCompleted { maps_completed } => {
            Some(format!("Flag reached! {maps_completed} maps completed, +1 life"))
        }
        _ => None,
    }
}
