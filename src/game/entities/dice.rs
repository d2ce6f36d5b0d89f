//! Dice that offer commands.

use rand::Rng;
use serde::Serialize;

use crate::error::{GameError, GameResult};
use crate::game::systems::CommandKind;

/// A die whose faces are command kinds. Every face is equally likely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Die {
    faces: Vec<CommandKind>,
}

impl Die {
    pub fn new(faces: Vec<CommandKind>) -> GameResult<Self> {
        if faces.is_empty() {
            return Err(GameError::InvalidConfig("a die needs at least one face".into()));
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[CommandKind] {
        &self.faces
    }

    pub fn roll(&self, rng: &mut impl Rng) -> CommandKind {
        // `faces` is never empty, see `Die::new`.
        self.faces[rng.random_range(0..self.faces.len())]
    }
}

/// Build `count` identical dice.
pub fn dice_pool(count: usize, faces: &[CommandKind]) -> GameResult<Vec<Die>> {
    (0..count).map(|_| Die::new(faces.to_vec())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_die_is_rejected() {
        assert!(Die::new(Vec::new()).is_err());
    }

    #[test]
    fn rolls_only_land_on_faces() {
        let die = Die::new(vec![CommandKind::TurnLeft, CommandKind::MoveThree]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(die.faces().contains(&die.roll(&mut rng)));
        }
    }

    #[test]
    fn every_face_shows_up_eventually() {
        let die = Die::new(CommandKind::DICE_FACES.to_vec()).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let rolled: Vec<CommandKind> = (0..500).map(|_| die.roll(&mut rng)).collect();
        for face in CommandKind::DICE_FACES {
            assert!(rolled.contains(&face), "{face:?} never rolled");
        }
    }

    #[test]
    fn pool_has_requested_size() {
        let pool = dice_pool(5, &CommandKind::DICE_FACES).unwrap();
        assert_eq!(pool.len(), 5);
    }
}
