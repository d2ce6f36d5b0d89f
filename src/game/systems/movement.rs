//! Player movement system.
//!
//! This module moves the robot one cell at a time on the board. Landing
//! effects are applied separately by the rules system.

use crate::game::entities::Player;
use crate::game::grid::Board;
use crate::game::types::Location;

/// Move the player one cell in its facing direction.
/// Returns the cell it left, or `None` if the edge of the board blocked it.
pub fn step_forward(player: &mut Player, board: &Board) -> Option<Location> {
    let next = board.neighbor(player.location, player.facing)?;
    let previous = player.location;
    player.location = next;
    Some(previous)
}

/// Put the player back on the cell it just left.
pub fn step_back(player: &mut Player, previous: Location) {
    player.location = previous;
}

/// Teleport the player to where the current execute phase started.
pub fn return_to_turn_start(player: &mut Player) -> Location {
    player.location = player.turn_start_location;
    player.location
}
