pub mod command;
pub mod movement;
pub mod rules;

pub use command::*;
pub use movement::*;
pub use rules::*;
