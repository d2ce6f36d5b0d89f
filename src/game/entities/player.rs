//! The robot: position, heading, life total and dice.

use rand::Rng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::error::GameResult;
use crate::game::entities::dice::{Die, dice_pool};
use crate::game::systems::CommandKind;
use crate::game::types::{Direction, Location};

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub name: String,
    pub location: Location,
    pub facing: Direction,
    /// Where the robot stood when the current execute phase began.
    pub turn_start_location: Location,
    life: u32,
    max_life: u32,
    starting_life: u32,
    dice: Vec<Die>,
}

impl Player {
    pub fn new(name: impl Into<String>, config: &GameConfig) -> GameResult<Self> {
        Ok(Self {
            name: name.into(),
            location: Location::default(),
            facing: Direction::Up,
            turn_start_location: Location::default(),
            life: config.starting_life,
            max_life: config.max_life,
            starting_life: config.starting_life,
            dice: dice_pool(config.dice_pool_size, &config.die_faces)?,
        })
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn max_life(&self) -> u32 {
        self.max_life
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Subtract damage, clamping at zero. Returns the remaining life.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.life = self.life.saturating_sub(damage);
        self.life
    }

    /// Add life, never above the maximum. Returns the new life.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.life = self.life.saturating_add(amount).min(self.max_life);
        self.life
    }

    /// Put the robot on a new map's start cell, facing up.
    pub fn place_at(&mut self, location: Location) {
        self.location = location;
        self.turn_start_location = location;
        self.facing = Direction::Up;
    }

    pub fn snapshot_turn_start(&mut self) {
        self.turn_start_location = self.location;
    }

    /// Back to a fresh robot, used when a lost game returns to the title.
    pub fn reset(&mut self) {
        self.place_at(Location::default());
        self.life = self.starting_life;
    }

    pub fn turn_left(&mut self) {
        self.facing = self.facing.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.facing = self.facing.turn_right();
    }

    /// One command per die, in dice order.
    pub fn roll_dice(&self, rng: &mut impl Rng) -> Vec<CommandKind> {
        self.dice.iter().map(|die| die.roll(rng)).collect()
    }

    /// Sprite-selection token for the presentation layer.
    pub fn sprite(&self) -> &'static str {
        if !self.is_alive() {
            return "robot-broken";
        }
        match self.facing {
            Direction::Up => "robot-up",
            Direction::Right => "robot-right",
            Direction::Down => "robot-down",
            Direction::Left => "robot-left",
        }
    }
}
