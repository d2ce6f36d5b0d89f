//! Error types for the rules engine.
//!
//! Board invariant violations (no grass anchor for start or flag) never show up
//! here: the board patches them itself. Everything below propagates up to the
//! `GameManager` and halts the operation that raised it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The configuration is inconsistent (thresholds out of order, empty dice, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A board was requested before the Setup state created one.
    #[error("no board has been set up yet")]
    BoardNotReady,

    /// A command selection arrived while the current state is not Input.
    #[error("command selections are only accepted during the input phase")]
    NotAcceptingInput,

    #[error("selection {index} is out of range ({offered} commands offered)")]
    InvalidSelection { index: usize, offered: usize },

    #[error("offered command {0} has already been selected this turn")]
    AlreadySelected(usize),

    /// The presentation surface does not match the board it is asked to draw.
    #[error("render surface has {found} tiles but the board needs {expected}")]
    RenderMismatch { expected: usize, found: usize },

    /// A terrain-name grid could not be turned into a board.
    #[error("malformed map: {0}")]
    MapFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
