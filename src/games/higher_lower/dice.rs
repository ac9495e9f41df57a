use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DIE_FACES: u8 = 6;

/// Anything that can produce fair six-sided die faces.
pub trait DiceSource {
    /// Returns a single face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    fn roll_pair(&mut self) -> Roll {
        let first = self.roll_die();
        let second = self.roll_die();
        Roll::new(first, second)
    }
}

/// Dice backed by a `StdRng`, each die drawn independently and uniformly.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn from_os() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl DiceSource for RandomDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(1..=DIE_FACES)
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
///
/// Faces outside `1..=6` are clamped into range; an empty script always shows 1.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces = faces.into_iter().map(|f| f.clamp(1, DIE_FACES)).collect();
        Self { faces, next: 0 }
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}

/// The two dice thrown by one side in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub dice: [u8; 2],
}

impl Roll {
    pub fn new(first: u8, second: u8) -> Self {
        Self { dice: [first, second] }
    }

    /// Saturates for faces that did not come from a die.
    pub fn total(&self) -> u8 {
        self.dice[0].saturating_add(self.dice[1])
    }
}
