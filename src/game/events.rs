//! Events the core emits for the presentation layer.
//!
//! The core never draws or plays sounds itself. It queues these events and the
//! presentation drains them after each tick.

use serde::Serialize;

use crate::game::grid::BoardOrigin;
use crate::game::systems::{CommandKind, CommandResult};
use crate::game::turn::StateKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "data")]
pub enum GameEvent {
    StateEntered(StateKind),
    MapLoaded {
        /// 1-based number of the map within the current run.
        map_number: usize,
        origin: BoardOrigin,
        rows: usize,
        columns: usize,
    },
    DiceOffered(Vec<CommandKind>),
    CommandQueued {
        index: usize,
        command: CommandKind,
        queued: usize,
    },
    CommandResolved(CommandResult),
    /// The rest of the queue was dropped, optionally replaced by a return to
    /// the turn's starting cell.
    QueueReset {
        dropped: usize,
        return_to_origin: bool,
    },
    LifeChanged {
        life: u32,
        max_life: u32,
    },
    GameOver {
        maps_completed: usize,
    },
    MapCompleted {
        maps_completed: usize,
    },
}
