pub mod types;
pub mod terrain;
pub mod state;
pub mod events;
pub mod turn;
pub mod manager;

pub mod entities;
pub mod grid;
pub mod systems;

pub use events::GameEvent;
pub use manager::{GameManager, TickReport};
pub use state::GameState;
pub use turn::{StateKind, TickOutcome, TurnState};
