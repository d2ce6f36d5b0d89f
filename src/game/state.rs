use std::sync::Arc;

use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::entities::Player;
use crate::game::grid::{Board, BoardOrigin, fixed_map_set, random_board};
use crate::game::terrain::TerrainCatalog;
use crate::game::types::TerrainGrid;

/// Everything the turn states read and mutate: the board, the robot and the
/// run's progress. Owned by the `GameManager` and lent to whichever state is
/// active.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Arc<GameConfig>,
    pub catalog: TerrainCatalog,
    pub player: Player,
    pub board: Option<Board>,
    pub maps_completed: usize,
    fixed_maps: Vec<TerrainGrid>,
}

impl GameState {
    pub fn new(config: Arc<GameConfig>) -> GameResult<Self> {
        config.validate()?;
        let fixed_maps = fixed_map_set(&config)?;
        let player = Player::new("robot", &config)?;
        Ok(GameState {
            config,
            catalog: TerrainCatalog::standard(),
            player,
            board: None,
            maps_completed: 0,
            fixed_maps,
        })
    }

    pub fn board(&self) -> GameResult<&Board> {
        self.board.as_ref().ok_or(GameError::BoardNotReady)
    }

    /// Fixed maps in tier order until `random_after` maps are done, random boards after.
    pub fn next_board(&self, rng: &mut impl Rng) -> GameResult<Board> {
        let use_fixed = self.maps_completed < self.config.random_after && !self.fixed_maps.is_empty();
        if use_fixed {
            let tier = self.maps_completed.min(self.fixed_maps.len() - 1);
            Board::from_grid(&self.fixed_maps[tier], BoardOrigin::Fixed { tier }, rng)
        } else {
            random_board(&self.config, rng)
        }
    }

    /// Build the next board and put the robot on its start cell.
    pub fn load_next_map(&mut self, rng: &mut impl Rng) -> GameResult<&Board> {
        let board = self.next_board(rng)?;
        self.player.place_at(board.starting_location());
        info!(
            "[GameState] Map {} loaded: {:?} {}x{} start={} flag={}",
            self.maps_completed + 1,
            board.origin(),
            board.rows(),
            board.columns(),
            board.starting_location(),
            board.flag_location()
        );
        let board: &Board = self.board.insert(board);
        Ok(board)
    }

    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        self.player.take_damage(damage)
    }

    pub fn reached_flag(&self) -> GameResult<bool> {
        Ok(self.board()?.flag_location() == self.player.location)
    }

    /// Award a life and count the map.
    pub fn complete_map(&mut self) {
        self.player.heal(1);
        self.maps_completed += 1;
    }

    /// Fresh robot and progress for a new run.
    pub fn reset_progress(&mut self) {
        self.player.reset();
        self.maps_completed = 0;
        self.board = None;
    }
}
