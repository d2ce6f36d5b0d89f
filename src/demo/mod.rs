// Terminal front end for the engine. Provides the interval-driven game loop
// and the text renderer it draws with.
pub mod game_loop;
pub mod render;

pub use game_loop::run_game_loop;
