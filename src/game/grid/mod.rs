//! Board model, random generation and the fixed map set.

pub mod board;
pub mod generator;
pub mod maps;

pub use board::{Board, BoardOrigin};
pub use generator::{carve_path, random_board, random_grid, terrain_for_draw};
pub use maps::{builtin_maps, fixed_map_set, parse_map};
