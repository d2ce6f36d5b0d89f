use crate::game::entities::Player;
use crate::game::grid::Board;
use crate::game::systems::movement::{step_back, step_forward};
use crate::game::terrain::{LandingPolicy, TerrainCatalog};
use crate::game::types::TerrainKind;

/// Outcome of a single step and its landing effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub damage: u32,
    /// Terrain the step landed on. For a blocked or bounced step this is
    /// still the terrain that stopped the robot.
    pub terrain: Option<TerrainKind>,
    pub continue_move: bool,
}

/// Step forward once and apply the landing rule of the cell reached.
///
/// The board edge is inert: the robot stays put, takes no damage, and the
/// step reports the terrain underfoot.
pub fn step_and_land(player: &mut Player, board: &Board, catalog: &TerrainCatalog) -> StepOutcome {
    let Some(previous) = step_forward(player, board) else {
        return StepOutcome {
            damage: 0,
            terrain: board.terrain(player.location),
            continue_move: true,
        };
    };

    let Some(terrain) = board.terrain(player.location) else {
        step_back(player, previous);
        return StepOutcome { damage: 0, terrain: None, continue_move: false };
    };

    let effect = catalog.effect(terrain);
    match effect.policy {
        LandingPolicy::Continue => StepOutcome {
            damage: effect.damage,
            terrain: Some(terrain),
            continue_move: true,
        },
        LandingPolicy::Bounce => {
            step_back(player, previous);
            StepOutcome {
                damage: effect.damage,
                terrain: Some(terrain),
                continue_move: false,
            }
        }
        LandingPolicy::Stop | LandingPolicy::Abandon => StepOutcome {
            damage: effect.damage,
            terrain: Some(terrain),
            continue_move: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::grid::BoardOrigin;
    use crate::game::types::{Direction, Location};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::game::types::TerrainKind::{Grass as G, Lava as L, Rock as R, Water as W};

    fn setup(at: Location, facing: Direction) -> (Player, Board) {
        let grid = vec![vec![G, W, G], vec![R, G, L], vec![G, G, G]];
        let mut rng = StdRng::seed_from_u64(0);
        let board = Board::from_grid(&grid, BoardOrigin::Fixed { tier: 0 }, &mut rng).unwrap();
        let mut player = Player::new("p", &GameConfig::default()).unwrap();
        player.place_at(at);
        player.facing = facing;
        (player, board)
    }

    #[test]
    fn rock_bounces_back() {
        let (mut p, board) = setup(Location::new(1, 1), Direction::Left);
        let out = step_and_land(&mut p, &board, &TerrainCatalog::standard());
        assert_eq!(p.location, Location::new(1, 1));
        assert_eq!(out, StepOutcome { damage: 1, terrain: Some(R), continue_move: false });
    }

    #[test]
    fn water_stops_on_the_cell() {
        let (mut p, board) = setup(Location::new(1, 1), Direction::Up);
        let out = step_and_land(&mut p, &board, &TerrainCatalog::standard());
        assert_eq!(p.location, Location::new(0, 1));
        assert_eq!(out.damage, 1);
        assert!(!out.continue_move);
    }

    #[test]
    fn lava_is_heavy_damage() {
        let (mut p, board) = setup(Location::new(1, 1), Direction::Right);
        let out = step_and_land(&mut p, &board, &TerrainCatalog::standard());
        assert_eq!(p.location, Location::new(1, 2));
        assert_eq!(out.damage, 99);
        assert_eq!(out.terrain, Some(L));
    }

    #[test]
    fn edge_is_inert() {
        let (mut p, board) = setup(Location::new(2, 0), Direction::Down);
        let out = step_and_land(&mut p, &board, &TerrainCatalog::standard());
        assert_eq!(p.location, Location::new(2, 0));
        assert_eq!(out, StepOutcome { damage: 0, terrain: Some(G), continue_move: true });
    }
}
