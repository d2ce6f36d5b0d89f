//! Game manager.
//!
//! Owns the board, the robot and the active turn state. Each `tick` updates
//! the active state once and routes its outcome: damage is applied first,
//! then the flag is checked, so a fatal landing on the flag is a game over.

use std::sync::Arc;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use uuid::Uuid;

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::game::entities::Player;
use crate::game::events::GameEvent;
use crate::game::grid::Board;
use crate::game::state::GameState;
use crate::game::systems::{CommandKind, CommandResult};
use crate::game::turn::{Countdown, StateKind, TickOutcome, TurnState};

/// Undrained events kept before the oldest are dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Per-tick record handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// State that ran this tick.
    pub state: StateKind,
    pub result: Option<CommandResult>,
    pub state_finished: bool,
}

#[derive(Debug)]
pub struct GameManager {
    session_id: Uuid,
    game: GameState,
    state: TurnState,
    rng: StdRng,
    events: Vec<GameEvent>,
    ticks: u64,
}

impl GameManager {
    pub fn new(config: GameConfig) -> GameResult<Self> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Deterministic manager, for replays and tests.
    pub fn with_seed(config: GameConfig, seed: u64) -> GameResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> GameResult<Self> {
        let game = GameState::new(Arc::new(config))?;
        let mut manager = GameManager {
            session_id: Uuid::new_v4(),
            game,
            state: TurnState::default(),
            rng,
            events: Vec::new(),
            ticks: 0,
        };
        manager.state.enter(&mut manager.game, &mut manager.rng, &mut manager.events);
        info!("[GameManager] Session {} created", manager.session_id);
        Ok(manager)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.game.config
    }

    pub fn state(&self) -> StateKind {
        self.state.kind()
    }

    pub fn board(&self) -> Option<&Board> {
        self.game.board.as_ref()
    }

    pub fn player(&self) -> &Player {
        &self.game.player
    }

    pub fn maps_completed(&self) -> usize {
        self.game.maps_completed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Commands offered this turn, while the input phase is active.
    pub fn offered_commands(&self) -> Option<&[CommandKind]> {
        match &self.state {
            TurnState::Input(input) => Some(input.offered()),
            _ => None,
        }
    }

    /// Commands chosen so far this turn.
    pub fn selected_commands(&self) -> &[CommandKind] {
        match &self.state {
            TurnState::Input(input) => input.queue(),
            _ => &[],
        }
    }

    /// Events queued since the last drain, oldest first.
    ///
    /// Callers that never drain only see the newest `MAX_PENDING_EVENTS`.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start signal from the title screen. Ignored in any other state.
    pub fn start(&mut self) -> bool {
        match &mut self.state {
            TurnState::TitleScene(title) => {
                title.start();
                true
            }
            other => {
                debug!("[GameManager] Start signal ignored in {:?}", other.kind());
                false
            }
        }
    }

    /// Queue the offered command at `index`.
    pub fn select_command(&mut self, index: usize) -> GameResult<CommandKind> {
        let TurnState::Input(input) = &mut self.state else {
            warn!("[GameManager] Selection {index} outside the input phase");
            return Err(GameError::NotAcceptingInput);
        };
        let command = input.select(index)?;
        let queued = input.queue().len();
        self.events.push(GameEvent::CommandQueued { index, command, queued });
        Ok(command)
    }

    /// Run the active state for one tick and route what it produced.
    pub fn tick(&mut self) -> GameResult<TickReport> {
        self.ticks += 1;
        let state = self.state.kind();
        let outcome = self.state.update(&mut self.game, &mut self.rng, &mut self.events)?;
        let mut report = TickReport { state, result: None, state_finished: false };

        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Landed(result) => {
                report.result = Some(result);
                self.events.push(GameEvent::CommandResolved(result));
                self.resolve_landing(&result)?;
            }
            TickOutcome::Finished => {
                report.state_finished = true;
                let next = self.state.exit(&mut self.game);
                self.transition(next);
            }
        }
        self.trim_events();
        Ok(report)
    }

    fn trim_events(&mut self) {
        if self.events.len() > MAX_PENDING_EVENTS {
            let dropped = self.events.len() - MAX_PENDING_EVENTS;
            self.events.drain(..dropped);
            debug!("[GameManager] {} dropped {dropped} undrained events", self.session_id);
        }
    }

    /// Damage first, then the flag.
    fn resolve_landing(&mut self, result: &CommandResult) -> GameResult<()> {
        if result.damage > 0 {
            let life = self.game.apply_damage(result.damage);
            self.events.push(GameEvent::LifeChanged { life, max_life: self.game.player.max_life() });
        }
        if !self.game.player.is_alive() {
            self.transition(TurnState::GameOver(Countdown::default()));
        } else if self.game.reached_flag()? {
            self.transition(TurnState::MapCompleted(Countdown::default()));
        }
        Ok(())
    }

    fn transition(&mut self, mut next: TurnState) {
        info!(
            "[GameManager] {} {:?} -> {:?} (tick {})",
            self.session_id,
            self.state.kind(),
            next.kind(),
            self.ticks
        );
        next.enter(&mut self.game, &mut self.rng, &mut self.events);
        self.state = next;
    }
}
