//! Turn state machine.
//!
//! TitleScene -> Setup -> Input -> ExecuteQueue -> Input -> ... with GameOver
//! and MapCompleted pre-empting whatever is active. Each state is entered
//! once, updated once per tick, and exits by naming its successor.

use std::collections::VecDeque;

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::config::game::COMMAND_QUEUE_LEN;
use crate::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::state::GameState;
use crate::game::systems::{CommandKind, CommandResult};
use crate::game::terrain::LandingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StateKind {
    TitleScene,
    Setup,
    Input,
    ExecuteQueue,
    GameOver,
    MapCompleted,
}

/// What one tick of the active state produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    /// A command resolved; the manager applies damage and checks for a win.
    Landed(CommandResult),
    Finished,
}

#[derive(Debug, Clone, Default)]
pub struct TitleScene {
    started: bool,
}

impl TitleScene {
    pub fn start(&mut self) {
        self.started = true;
    }
}

/// Command choice for one turn. Each offered die can be picked once.
#[derive(Debug, Clone, Default)]
pub struct InputPhase {
    offered: Vec<CommandKind>,
    taken: Vec<bool>,
    queue: Vec<CommandKind>,
}

impl InputPhase {
    pub fn offered(&self) -> &[CommandKind] {
        &self.offered
    }

    pub fn queue(&self) -> &[CommandKind] {
        &self.queue
    }

    /// Queue the offered command at `index`. Choice order is execution order.
    pub fn select(&mut self, index: usize) -> GameResult<CommandKind> {
        if self.queue.len() >= COMMAND_QUEUE_LEN {
            return Err(GameError::NotAcceptingInput);
        }
        let Some(&command) = self.offered.get(index) else {
            return Err(GameError::InvalidSelection { index, offered: self.offered.len() });
        };
        if self.taken[index] {
            return Err(GameError::AlreadySelected(index));
        }
        self.taken[index] = true;
        self.queue.push(command);
        Ok(command)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteQueue {
    ticks: u32,
    queue: VecDeque<CommandKind>,
}

impl ExecuteQueue {
    pub fn new(queue: impl IntoIterator<Item = CommandKind>) -> Self {
        Self { ticks: 0, queue: queue.into_iter().collect() }
    }

    pub fn remaining(&self) -> impl Iterator<Item = &CommandKind> {
        self.queue.iter()
    }
}

/// Timed feedback state, finishes after a fixed number of ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Countdown {
    ticks: u32,
}

#[derive(Debug, Clone)]
pub enum TurnState {
    TitleScene(TitleScene),
    Setup,
    Input(InputPhase),
    ExecuteQueue(ExecuteQueue),
    GameOver(Countdown),
    MapCompleted(Countdown),
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::TitleScene(TitleScene::default())
    }
}

/// Advance a tick counter; `true` once `limit` ticks have passed.
fn tick_timer(ticks: &mut u32, limit: u32) -> bool {
    if *ticks >= limit {
        return true;
    }
    *ticks += 1;
    false
}

impl TurnState {
    pub fn kind(&self) -> StateKind {
        match self {
            TurnState::TitleScene(_) => StateKind::TitleScene,
            TurnState::Setup => StateKind::Setup,
            TurnState::Input(_) => StateKind::Input,
            TurnState::ExecuteQueue(_) => StateKind::ExecuteQueue,
            TurnState::GameOver(_) => StateKind::GameOver,
            TurnState::MapCompleted(_) => StateKind::MapCompleted,
        }
    }

    pub fn enter(&mut self, game: &mut GameState, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::StateEntered(self.kind()));
        match self {
            TurnState::TitleScene(_) | TurnState::Setup => {}
            TurnState::Input(input) => {
                input.offered = game.player.roll_dice(rng);
                input.taken = vec![false; input.offered.len()];
                input.queue.clear();
                debug!("[Input] Offered {:?}", input.offered);
                events.push(GameEvent::DiceOffered(input.offered.clone()));
            }
            TurnState::ExecuteQueue(exec) => {
                exec.ticks = 0;
                game.player.snapshot_turn_start();
            }
            TurnState::GameOver(_) => {
                info!("[GameOver] Robot destroyed after {} maps", game.maps_completed);
                events.push(GameEvent::GameOver { maps_completed: game.maps_completed });
            }
            TurnState::MapCompleted(_) => {
                game.complete_map();
                info!("[MapCompleted] {} maps completed", game.maps_completed);
                events.push(GameEvent::MapCompleted { maps_completed: game.maps_completed });
                events.push(GameEvent::LifeChanged {
                    life: game.player.life(),
                    max_life: game.player.max_life(),
                });
            }
        }
    }

    pub fn update(
        &mut self,
        game: &mut GameState,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> GameResult<TickOutcome> {
        match self {
            TurnState::TitleScene(title) => Ok(if title.started {
                TickOutcome::Finished
            } else {
                TickOutcome::Idle
            }),
            TurnState::Setup => {
                let map_number = game.maps_completed + 1;
                let board = game.load_next_map(rng)?;
                events.push(GameEvent::MapLoaded {
                    map_number,
                    origin: board.origin(),
                    rows: board.rows(),
                    columns: board.columns(),
                });
                Ok(TickOutcome::Finished)
            }
            TurnState::Input(input) => Ok(if input.queue.len() >= COMMAND_QUEUE_LEN {
                TickOutcome::Finished
            } else {
                TickOutcome::Idle
            }),
            TurnState::ExecuteQueue(exec) => exec.update(game, events),
            TurnState::GameOver(countdown) => Ok(Self::countdown(countdown, game.config.game_over_ticks)),
            TurnState::MapCompleted(countdown) => {
                Ok(Self::countdown(countdown, game.config.map_completed_ticks))
            }
        }
    }

    fn countdown(countdown: &mut Countdown, limit: u32) -> TickOutcome {
        if tick_timer(&mut countdown.ticks, limit) {
            TickOutcome::Finished
        } else {
            TickOutcome::Idle
        }
    }

    /// Leave a finished state and return its successor.
    pub fn exit(&mut self, game: &mut GameState) -> TurnState {
        match self {
            TurnState::TitleScene(_) => TurnState::Setup,
            TurnState::Setup => TurnState::Input(InputPhase::default()),
            TurnState::Input(input) => TurnState::ExecuteQueue(ExecuteQueue::new(std::mem::take(&mut input.queue))),
            TurnState::ExecuteQueue(_) => TurnState::Input(InputPhase::default()),
            TurnState::GameOver(_) => {
                game.reset_progress();
                TurnState::TitleScene(TitleScene::default())
            }
            TurnState::MapCompleted(_) => TurnState::Setup,
        }
    }
}

impl ExecuteQueue {
    /// One command per tick once the settle delay has passed.
    fn update(&mut self, game: &mut GameState, events: &mut Vec<GameEvent>) -> GameResult<TickOutcome> {
        if !tick_timer(&mut self.ticks, game.config.settle_ticks) {
            return Ok(TickOutcome::Idle);
        }
        let Some(command) = self.queue.pop_front() else {
            return Ok(TickOutcome::Finished);
        };

        let board = game.board.as_ref().ok_or(GameError::BoardNotReady)?;
        let before = game.player.location;
        let result = command.execute(&mut game.player, board, &game.catalog);
        debug!(
            "[ExecuteQueue] {:?} -> {:?} at {} (damage {})",
            command, result.landed_on, game.player.location, result.damage
        );

        // Turns and blocked steps report the terrain underfoot without landing on it.
        let moved = game.player.location != before;
        let policy = result
            .terrain()
            .filter(|_| moved)
            .map(|terrain| game.catalog.effect(terrain).policy);
        match policy {
            Some(LandingPolicy::Stop) => {
                let dropped = self.queue.len();
                self.queue.clear();
                self.queue.push_back(CommandKind::ReturnToOrigin);
                events.push(GameEvent::QueueReset { dropped, return_to_origin: true });
            }
            Some(LandingPolicy::Abandon) => {
                let dropped = self.queue.len();
                self.queue.clear();
                events.push(GameEvent::QueueReset { dropped, return_to_origin: false });
            }
            _ => {}
        }
        Ok(TickOutcome::Landed(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::grid::{Board, BoardOrigin};
    use crate::game::systems::Landing;
    use crate::game::types::{Direction, Location, TerrainGrid};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    use crate::game::types::TerrainKind::{Grass as G, Lava as L, Water as W};

    fn game_on(grid: TerrainGrid, at: Location, facing: Direction) -> GameState {
        let config = GameConfig { settle_ticks: 0, ..GameConfig::default() };
        let mut game = GameState::new(Arc::new(config)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        game.board = Some(Board::from_grid(&grid, BoardOrigin::Fixed { tier: 0 }, &mut rng).unwrap());
        game.player.place_at(at);
        game.player.facing = facing;
        game
    }

    fn drive(state: &mut TurnState, game: &mut GameState, events: &mut Vec<GameEvent>) -> Vec<TickOutcome> {
        let mut rng = StdRng::seed_from_u64(0);
        let mut outcomes = Vec::new();
        loop {
            let outcome = state.update(game, &mut rng, events).unwrap();
            outcomes.push(outcome);
            if outcome == TickOutcome::Finished {
                return outcomes;
            }
        }
    }

    #[test]
    fn water_swaps_the_rest_of_the_queue_for_a_return() {
        let grid = vec![vec![G], vec![W], vec![G], vec![G]];
        let mut game = game_on(grid, Location::new(3, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([
            CommandKind::MoveThree,
            CommandKind::TurnLeft,
            CommandKind::TurnLeft,
        ]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        let landed: Vec<CommandKind> = outcomes
            .iter()
            .filter_map(|o| match o {
                TickOutcome::Landed(r) => Some(r.command),
                _ => None,
            })
            .collect();
        assert_eq!(landed, vec![CommandKind::MoveThree, CommandKind::ReturnToOrigin]);
        assert_eq!(game.player.location, Location::new(3, 0));
        assert_eq!(game.player.facing, Direction::Up);
        assert!(events.contains(&GameEvent::QueueReset { dropped: 2, return_to_origin: true }));
    }

    #[test]
    fn lava_drops_the_queue_without_a_return() {
        let grid = vec![vec![G], vec![L], vec![G]];
        let mut game = game_on(grid, Location::new(2, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([
            CommandKind::MoveOne,
            CommandKind::MoveOne,
            CommandKind::TurnRight,
        ]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(game.player.location, Location::new(1, 0));
        assert!(events.contains(&GameEvent::QueueReset { dropped: 2, return_to_origin: false }));
    }

    #[test]
    fn settle_delay_holds_the_first_command() {
        let grid = vec![vec![G], vec![G]];
        let mut game = game_on(grid, Location::new(1, 0), Direction::Up);
        game.config = Arc::new(GameConfig { settle_ticks: 2, ..GameConfig::default() });
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([CommandKind::MoveOne]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        assert!(matches!(
            outcomes.as_slice(),
            [TickOutcome::Idle, TickOutcome::Idle, TickOutcome::Landed(_), TickOutcome::Finished]
        ));
    }

    #[test]
    fn input_accepts_each_die_once() {
        let mut game = game_on(vec![vec![G]], Location::new(0, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::Input(InputPhase::default());
        state.enter(&mut game, &mut rng, &mut events);

        let TurnState::Input(input) = &mut state else { unreachable!() };
        assert_eq!(input.offered().len(), 5);
        input.select(4).unwrap();
        assert!(matches!(input.select(4), Err(GameError::AlreadySelected(4))));
        assert!(matches!(input.select(9), Err(GameError::InvalidSelection { index: 9, offered: 5 })));
        input.select(0).unwrap();
        assert_eq!(
            state.update(&mut game, &mut rng, &mut events).unwrap(),
            TickOutcome::Idle
        );

        let TurnState::Input(input) = &mut state else { unreachable!() };
        input.select(2).unwrap();
        assert!(matches!(input.select(1), Err(GameError::NotAcceptingInput)));
        assert_eq!(
            state.update(&mut game, &mut rng, &mut events).unwrap(),
            TickOutcome::Finished
        );

        let next = state.exit(&mut game);
        let TurnState::ExecuteQueue(exec) = next else { unreachable!() };
        assert_eq!(exec.remaining().count(), 3);
    }

    #[test]
    fn countdown_finishes_after_its_ticks() {
        let mut game = game_on(vec![vec![G]], Location::new(0, 0), Direction::Up);
        let mut events = Vec::new();
        let mut state = TurnState::GameOver(Countdown::default());
        let outcomes = drive(&mut state, &mut game, &mut events);
        assert_eq!(outcomes.len() as u32, game.config.game_over_ticks + 1);
        assert_eq!(state.exit(&mut game).kind(), StateKind::TitleScene);
        assert!(game.board.is_none());
    }

    #[test]
    fn water_on_the_last_command_still_returns() {
        let grid = vec![vec![G], vec![W], vec![G], vec![G]];
        let mut game = game_on(grid, Location::new(3, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([
            CommandKind::TurnLeft,
            CommandKind::TurnRight,
            CommandKind::MoveTwo,
        ]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        let last_landed = outcomes.iter().rev().find_map(|o| match o {
            TickOutcome::Landed(r) => Some(r.command),
            _ => None,
        });
        assert_eq!(outcomes.len(), 5);
        assert_eq!(last_landed, Some(CommandKind::ReturnToOrigin));
        assert_eq!(game.player.location, Location::new(3, 0));
        assert!(events.contains(&GameEvent::QueueReset { dropped: 0, return_to_origin: true }));
    }

    #[test]
    fn turning_on_water_keeps_the_queue() {
        let grid = vec![vec![G], vec![W], vec![G]];
        let mut game = game_on(grid, Location::new(1, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([
            CommandKind::TurnRight,
            CommandKind::TurnLeft,
            CommandKind::TurnLeft,
        ]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        assert_eq!(outcomes.len(), 4);
        assert_eq!(game.player.facing, Direction::Left);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::QueueReset { .. })));
    }

    #[test]
    fn blocked_step_on_lava_keeps_the_queue() {
        let grid = vec![vec![L, G], vec![G, G]];
        let mut game = game_on(grid, Location::new(0, 0), Direction::Up);
        let mut rng = StdRng::seed_from_u64(0);
        let mut events = Vec::new();
        let mut state = TurnState::ExecuteQueue(ExecuteQueue::new([
            CommandKind::MoveOne,
            CommandKind::TurnRight,
            CommandKind::MoveOne,
        ]));
        state.enter(&mut game, &mut rng, &mut events);

        let outcomes = drive(&mut state, &mut game, &mut events);
        assert!(matches!(
            outcomes[0],
            TickOutcome::Landed(CommandResult { damage: 0, landed_on: Some(Landing::Terrain(L)), .. })
        ));
        assert_eq!(outcomes.len(), 4);
        assert_eq!(game.player.location, Location::new(0, 1));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::QueueReset { .. })));
    }
}
