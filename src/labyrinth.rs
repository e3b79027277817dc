use rand::Rng;

use crate::{
    cache::RoomCache,
    config::LabyrinthConfig,
    errors::LabyrinthError,
    explore::{self, ExploreSummary},
    primes::PrimeTable,
    room::{Position, Prime, Row},
    row::RowBuilder,
    session::Session,
    walk::{self, Walk},
};

/// Owns the prime table and hands out row builders, caches and sessions
/// that borrow it.
pub struct Labyrinth {
    table: PrimeTable,
}

impl Labyrinth {
    pub fn new(ceiling: u64) -> Result<Self, LabyrinthError> {
        Ok(Self {
            table: PrimeTable::build(ceiling)?,
        })
    }

    pub fn from_config(config: &LabyrinthConfig) -> Result<Self, LabyrinthError> {
        Self::new(config.ceiling)
    }

    pub fn table(&self) -> &PrimeTable {
        &self.table
    }

    pub fn rows(&self) -> RowBuilder<'_> {
        RowBuilder::new(&self.table)
    }

    pub fn build_row(&self, p: Prime) -> Result<Row, LabyrinthError> {
        self.rows().build_row(p)
    }

    pub fn cache(&self) -> RoomCache<'_> {
        RoomCache::new(self.rows())
    }

    pub fn session(&self, start: Position) -> Result<Session<'_>, LabyrinthError> {
        Session::new(self.rows(), start)
    }

    pub fn leftmost_walk(&self, start: Position, max_steps: usize) -> Walk {
        walk::leftmost_walk(&self.rows(), start, max_steps)
    }

    pub fn random_walk<R: Rng + ?Sized>(
        &self,
        start: Position,
        max_steps: usize,
        rng: &mut R,
    ) -> Walk {
        walk::random_walk(&self.rows(), start, max_steps, rng)
    }

    pub fn depth_first_explore(
        &self,
        start: Position,
        max_total_steps: u64,
        max_prime: Option<Prime>,
    ) -> ExploreSummary {
        explore::depth_first_explore(&self.rows(), start, max_total_steps, max_prime)
    }
}
