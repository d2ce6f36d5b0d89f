//! Command resolution.
//!
//! Every command runs exactly once against the player and board and reports
//! a `CommandResult`. Damage is only reported here; the manager applies it.

use serde::{Deserialize, Serialize};

use crate::game::entities::Player;
use crate::game::grid::Board;
use crate::game::systems::movement::return_to_turn_start;
use crate::game::systems::rules::step_and_land;
use crate::game::terrain::TerrainCatalog;
use crate::game::types::TerrainKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    MoveOne,
    MoveTwo,
    MoveThree,
    MoveBack,
    TurnLeft,
    TurnRight,
    /// Injected by the execute phase after a water landing, never rolled.
    ReturnToOrigin,
}

/// What a command reports the robot landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Landing {
    Terrain(TerrainKind),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub command: CommandKind,
    pub damage: u32,
    pub landed_on: Option<Landing>,
    pub continue_move: bool,
}

impl CommandResult {
    pub fn terrain(&self) -> Option<TerrainKind> {
        match self.landed_on {
            Some(Landing::Terrain(kind)) => Some(kind),
            _ => None,
        }
    }
}

impl CommandKind {
    /// Faces of a standard die.
    pub const DICE_FACES: [CommandKind; 6] = [
        CommandKind::MoveOne,
        CommandKind::MoveTwo,
        CommandKind::MoveThree,
        CommandKind::MoveBack,
        CommandKind::TurnLeft,
        CommandKind::TurnRight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommandKind::MoveOne => "move 1",
            CommandKind::MoveTwo => "move 2",
            CommandKind::MoveThree => "move 3",
            CommandKind::MoveBack => "move back",
            CommandKind::TurnLeft => "turn left",
            CommandKind::TurnRight => "turn right",
            CommandKind::ReturnToOrigin => "return",
        }
    }

    pub fn execute(self, player: &mut Player, board: &Board, catalog: &TerrainCatalog) -> CommandResult {
        match self {
            CommandKind::MoveOne => self.move_forward(1, player, board, catalog),
            CommandKind::MoveTwo => self.move_forward(2, player, board, catalog),
            CommandKind::MoveThree => self.move_forward(3, player, board, catalog),
            CommandKind::MoveBack => {
                player.facing = player.facing.opposite();
                let result = self.move_forward(1, player, board, catalog);
                player.facing = player.facing.opposite();
                result
            }
            CommandKind::TurnLeft => {
                player.turn_left();
                self.stay(player, board)
            }
            CommandKind::TurnRight => {
                player.turn_right();
                self.stay(player, board)
            }
            CommandKind::ReturnToOrigin => {
                return_to_turn_start(player);
                CommandResult {
                    command: self,
                    damage: 0,
                    landed_on: Some(Landing::Reset),
                    continue_move: false,
                }
            }
        }
    }

    /// Up to `steps` forward steps, stopping at the first non-grass landing.
    fn move_forward(self, steps: u32, player: &mut Player, board: &Board, catalog: &TerrainCatalog) -> CommandResult {
        let mut result = CommandResult {
            command: self,
            damage: 0,
            landed_on: None,
            continue_move: true,
        };
        for _ in 0..steps {
            let step = step_and_land(player, board, catalog);
            result.damage += step.damage;
            result.landed_on = step.terrain.map(Landing::Terrain);
            result.continue_move = step.continue_move;
            if !step.continue_move {
                break;
            }
        }
        result
    }

    fn stay(self, player: &Player, board: &Board) -> CommandResult {
        CommandResult {
            command: self,
            damage: 0,
            landed_on: board.terrain(player.location).map(Landing::Terrain),
            continue_move: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::grid::BoardOrigin;
    use crate::game::types::{Direction, Location, TerrainGrid};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::game::types::TerrainKind::{Grass as G, Lava as L, Rock as R, Water as W};

    fn setup(grid: TerrainGrid, at: Location, facing: Direction) -> (Player, Board) {
        let mut rng = StdRng::seed_from_u64(0);
        let board = Board::from_grid(&grid, BoardOrigin::Fixed { tier: 0 }, &mut rng).unwrap();
        let mut player = Player::new("p", &GameConfig::default()).unwrap();
        player.place_at(at);
        player.facing = facing;
        (player, board)
    }

    fn run(kind: CommandKind, player: &mut Player, board: &Board) -> CommandResult {
        kind.execute(player, board, &TerrainCatalog::standard())
    }

    #[test]
    fn move_three_up_a_grass_column() {
        let grid = vec![vec![L, G, G], vec![G, G, G], vec![G, G, G]];
        let (mut p, board) = setup(grid, Location::new(2, 2), Direction::Up);
        let result = run(CommandKind::MoveThree, &mut p, &board);
        assert_eq!(p.location, Location::new(0, 2));
        assert_eq!(result.damage, 0);
        assert_eq!(result.landed_on, Some(Landing::Terrain(G)));
        assert!(result.continue_move);
    }

    #[test]
    fn move_three_stops_on_water() {
        let grid = vec![vec![G], vec![W], vec![G], vec![G]];
        let (mut p, board) = setup(grid, Location::new(3, 0), Direction::Up);
        let result = run(CommandKind::MoveThree, &mut p, &board);
        assert_eq!(p.location, Location::new(1, 0));
        assert_eq!(result.damage, 1);
        assert_eq!(result.terrain(), Some(W));
        assert!(!result.continue_move);
    }

    #[test]
    fn move_two_bounces_off_rock() {
        let grid = vec![vec![G, G, R, G]];
        let (mut p, board) = setup(grid, Location::new(0, 0), Direction::Right);
        let result = run(CommandKind::MoveTwo, &mut p, &board);
        assert_eq!(p.location, Location::new(0, 1));
        assert_eq!(result.damage, 1);
        assert_eq!(result.terrain(), Some(R));
    }

    #[test]
    fn move_one_at_the_right_edge_stays_put() {
        let grid = vec![vec![G, G, G], vec![G, G, G]];
        let (mut p, board) = setup(grid, Location::new(0, 2), Direction::Right);
        let result = run(CommandKind::MoveOne, &mut p, &board);
        assert_eq!(p.location, Location::new(0, 2));
        assert_eq!(result.damage, 0);
        assert_eq!(result.terrain(), Some(G));
    }

    #[test]
    fn move_back_keeps_heading() {
        let grid = vec![vec![G, G, G], vec![G, G, G], vec![G, G, G]];
        let (mut p, board) = setup(grid, Location::new(1, 1), Direction::Right);
        let result = run(CommandKind::MoveBack, &mut p, &board);
        assert_eq!(p.location, Location::new(1, 0));
        assert_eq!(p.facing, Direction::Right);
        assert_eq!(result.damage, 0);
    }

    #[test]
    fn move_back_into_lava() {
        let grid = vec![vec![G, G], vec![L, G]];
        let (mut p, board) = setup(grid, Location::new(0, 0), Direction::Up);
        let result = run(CommandKind::MoveBack, &mut p, &board);
        assert_eq!(p.location, Location::new(1, 0));
        assert_eq!(result.damage, 99);
        assert_eq!(p.facing, Direction::Up);
    }

    #[test]
    fn turns_report_current_terrain() {
        let grid = vec![vec![G, L], vec![G, G]];
        let (mut p, board) = setup(grid, Location::new(0, 1), Direction::Up);
        let result = run(CommandKind::TurnLeft, &mut p, &board);
        assert_eq!(p.facing, Direction::Left);
        assert_eq!(result.damage, 0);
        assert_eq!(result.terrain(), Some(L));
        let result = run(CommandKind::TurnRight, &mut p, &board);
        assert_eq!(p.facing, Direction::Up);
        assert_eq!(result.damage, 0);
        assert_eq!(p.location, Location::new(0, 1));
    }

    #[test]
    fn return_to_origin_goes_back_to_turn_start() {
        let grid = vec![vec![G, G, G]];
        let (mut p, board) = setup(grid, Location::new(0, 0), Direction::Right);
        p.snapshot_turn_start();
        run(CommandKind::MoveTwo, &mut p, &board);
        assert_eq!(p.location, Location::new(0, 2));
        let result = run(CommandKind::ReturnToOrigin, &mut p, &board);
        assert_eq!(p.location, Location::new(0, 0));
        assert_eq!(result.landed_on, Some(Landing::Reset));
        assert_eq!(result.damage, 0);
    }
}
