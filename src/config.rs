use rand::{SeedableRng, rngs::StdRng};

use crate::room::{DEFAULT_START, Position, Prime};

pub const DEFAULT_CEILING: u64 = 2000;
pub const DEFAULT_WALK_STEPS: usize = 1000;
pub const DEFAULT_EXPLORE_STEPS: u64 = 1_000_000;

/// Knobs for one labyrinth run. The sieve ceiling is the only one the
/// engine itself consumes; the rest are traversal defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabyrinthConfig {
    pub ceiling: u64,
    pub start: Position,
    pub walk_steps: usize,
    pub explore_steps: u64,
    pub explore_ceiling: Option<Prime>,
    pub seed: Option<u64>,
}

impl Default for LabyrinthConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            start: DEFAULT_START,
            walk_steps: DEFAULT_WALK_STEPS,
            explore_steps: DEFAULT_EXPLORE_STEPS,
            explore_ceiling: None,
            seed: None,
        }
    }
}

impl LabyrinthConfig {
    /// Seeded generator when `seed` is set, entropy-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
