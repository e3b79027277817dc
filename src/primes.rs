//! Sieve-backed prime table with constant-time neighbour lookup.

use ahash::AHashMap;

use crate::{errors::LabyrinthError, room::Prime};

/// Largest accepted sieve ceiling; the sieve holds one byte per integer.
pub const MAX_CEILING: u64 = 1_000_000_000;

/// Ascending primes up to a fixed ceiling. Immutable after [`PrimeTable::build`],
/// so one table can be shared read-only by any number of traversals.
#[derive(Clone, Debug)]
pub struct PrimeTable {
    ceiling: u64,
    sieve: Vec<bool>,
    primes: Vec<Prime>,
    positions: AHashMap<Prime, usize>,
}

impl PrimeTable {
    pub fn build(ceiling: u64) -> Result<Self, LabyrinthError> {
        if ceiling < 2 {
            return Err(LabyrinthError::InvalidCeiling(ceiling));
        }
        if ceiling > MAX_CEILING {
            return Err(LabyrinthError::invalid_input(format!(
                "ceiling {ceiling} exceeds the maximum of {MAX_CEILING}"
            )));
        }
        let limit = usize::try_from(ceiling)
            .map_err(|_| LabyrinthError::invalid_input(format!("ceiling {ceiling} is too large")))?;
        let sieve = sieve_of_eratosthenes(limit)?;
        let primes: Vec<Prime> = sieve
            .iter()
            .enumerate()
            .filter(|(_, is_prime)| **is_prime)
            .map(|(n, _)| n as Prime)
            .collect();
        let positions = primes
            .iter()
            .enumerate()
            .map(|(idx, &p)| (p, idx))
            .collect::<AHashMap<_, _>>();
        log::debug!(
            "prime table built: ceiling={ceiling} primes={}",
            primes.len()
        );
        Ok(Self {
            ceiling,
            sieve,
            primes,
            positions,
        })
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn primes(&self) -> &[Prime] {
        &self.primes
    }

    pub fn smallest(&self) -> Prime {
        self.primes[0]
    }

    pub fn largest(&self) -> Prime {
        self.primes[self.primes.len() - 1]
    }

    pub fn contains(&self, n: u64) -> bool {
        usize::try_from(n)
            .ok()
            .and_then(|idx| self.sieve.get(idx))
            .copied()
            .unwrap_or(false)
    }

    pub fn index_of(&self, p: Prime) -> Option<usize> {
        self.positions.get(&p).copied()
    }

    /// Next prime after `p`, or `None` when `p` is the largest prime (or not in the table).
    pub fn successor(&self, p: Prime) -> Option<Prime> {
        let idx = self.index_of(p)?;
        self.primes.get(idx + 1).copied()
    }

    /// Previous prime before `p`. Saturates at the smallest prime: `predecessor(2) == Some(2)`.
    pub fn predecessor(&self, p: Prime) -> Option<Prime> {
        let idx = self.index_of(p)?;
        Some(self.primes[idx.saturating_sub(1)])
    }

    /// `{pred(p), p, succ(p)}` in that order; the successor is omitted at the table edge.
    /// For the smallest prime the predecessor repeats `p`.
    pub fn neighbours(&self, p: Prime) -> Vec<Prime> {
        let mut values = Vec::with_capacity(3);
        if let Some(prev) = self.predecessor(p) {
            values.push(prev);
            values.push(p);
            if let Some(next) = self.successor(p) {
                values.push(next);
            }
        }
        values
    }

    /// Table primes inside `[lo, hi]`; the bounds may be given in either order.
    pub fn primes_in_range(&self, lo: u64, hi: u64) -> &[Prime] {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let start = self.primes.partition_point(|&p| p < lo);
        let end = self.primes.partition_point(|&p| p <= hi);
        &self.primes[start..end.max(start)]
    }
}

fn sieve_of_eratosthenes(limit: usize) -> Result<Vec<bool>, LabyrinthError> {
    let len = limit
        .checked_add(1)
        .ok_or_else(|| LabyrinthError::invalid_input(format!("ceiling {limit} is too large")))?;
    let mut sieve = Vec::new();
    sieve.try_reserve_exact(len).map_err(|e| {
        LabyrinthError::invalid_input(format!("cannot allocate a sieve up to {limit}: {e}"))
    })?;
    sieve.resize(len, true);
    sieve[0] = false;
    sieve[1] = false;
    let mut p = 2;
    while p * p <= limit {
        if sieve[p] {
            let mut k = p * p;
            while k <= limit {
                sieve[k] = false;
                k += p;
            }
        }
        p += 1;
    }
    Ok(sieve)
}
