use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    errors::LabyrinthError,
    primes::PrimeTable,
    room::Position,
    row::{DoorList, RoomSource, RowBuilder},
};

/// State of one door as recorded by whoever owns the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorMark {
    #[default]
    Closed,
    Opened,
    /// Opened as part of a registered visit (the caller's sequence number).
    Visited(usize),
}

impl DoorMark {
    pub fn is_open(&self) -> bool {
        !matches!(self, DoorMark::Closed)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

struct CachedRoom {
    doors: DoorList,
    marks: Vec<DoorMark>,
}

/// Memoized room lookups keyed by (layer, room). Entries are created on the
/// first query and live as long as the cache; door lists are handed out as
/// shared `Arc` slices, never copied.
pub struct RoomCache<'a> {
    rows: RowBuilder<'a>,
    inner: RwLock<AHashMap<Position, CachedRoom>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<'a> RoomCache<'a> {
    pub fn new(rows: RowBuilder<'a>) -> Self {
        Self {
            rows,
            inner: RwLock::new(AHashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn rows(&self) -> RowBuilder<'a> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn marks(&self, position: &Position) -> Option<Vec<DoorMark>> {
        self.inner
            .read()
            .get(position)
            .map(|entry| entry.marks.clone())
    }

    /// Marks door `index` (0-based) as opened and returns its previous mark.
    pub fn open_door(&self, position: &Position, index: usize) -> Result<DoorMark, LabyrinthError> {
        self.mark_door(position, index, DoorMark::Opened)
    }

    /// Sets the mark of door `index` (0-based), creating the entry if needed.
    /// Returns the previous mark.
    pub fn mark_door(
        &self,
        position: &Position,
        index: usize,
        mark: DoorMark,
    ) -> Result<DoorMark, LabyrinthError> {
        if self.lookup(position).is_none() {
            return Err(LabyrinthError::not_found(format!("room {position}")));
        }
        let mut guard = self.inner.write();
        let entry = guard
            .get_mut(position)
            .ok_or_else(|| LabyrinthError::not_found(format!("room {position}")))?;
        let count = entry.marks.len();
        let slot = entry.marks.get_mut(index).ok_or_else(|| {
            LabyrinthError::invalid_input(format!(
                "door {index} out of range for {position} ({count} doors)"
            ))
        })?;
        Ok(std::mem::replace(slot, mark))
    }
}

impl RoomSource for RoomCache<'_> {
    fn table(&self) -> &PrimeTable {
        self.rows.table()
    }

    fn lookup(&self, position: &Position) -> Option<DoorList> {
        if let Some(entry) = self.inner.read().get(position) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(entry.doors.clone());
        }
        let doors = self.rows.lookup(position)?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        log::debug!("room cache miss for {position}");
        let mut guard = self.inner.write();
        let entry = guard.entry(*position).or_insert_with(|| CachedRoom {
            marks: vec![DoorMark::Closed; doors.len()],
            doors,
        });
        Some(entry.doors.clone())
    }
}
