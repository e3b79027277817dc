use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LabyrinthError;

pub type Prime = u64;

/// Canonical (ascending) triple of primes. Every constructor sorts, so two
/// permutations of the same multiset compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[Prime; 3]", into = "[Prime; 3]")]
pub struct Room([Prime; 3]);

impl Room {
    pub fn new(a: Prime, b: Prime, c: Prime) -> Self {
        let mut coords = [a, b, c];
        coords.sort_unstable();
        Room(coords)
    }

    pub fn coords(&self) -> [Prime; 3] {
        self.0
    }

    pub fn sum(&self) -> u64 {
        self.0.iter().sum()
    }
}

impl From<[Prime; 3]> for Room {
    fn from(coords: [Prime; 3]) -> Self {
        Room::new(coords[0], coords[1], coords[2])
    }
}

impl From<(Prime, Prime, Prime)> for Room {
    fn from((a, b, c): (Prime, Prime, Prime)) -> Self {
        Room::new(a, b, c)
    }
}

impl From<Room> for [Prime; 3] {
    fn from(room: Room) -> Self {
        room.0
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "({a}, {b}, {c})")
    }
}

/// Accepts `2,2,3`, `(2, 2, 3)` or `2 2 3`.
impl FromStr for Room {
    type Err = LabyrinthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<Prime>().map_err(|_| {
                    LabyrinthError::invalid_input(format!("room coordinate '{part}' is not a number"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [a, b, c] => Ok(Room::new(*a, *b, *c)),
            _ => Err(LabyrinthError::invalid_input(format!(
                "room '{s}' must have exactly three coordinates"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub layer: Prime,
    pub room: Room,
}

impl Position {
    pub fn new(layer: Prime, room: impl Into<Room>) -> Self {
        Self {
            layer,
            room: room.into(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{} {}", self.layer, self.room)
    }
}

pub const DEFAULT_START_LAYER: Prime = 7;
pub const DEFAULT_START_ROOM: Room = Room([2, 2, 3]);
pub const DEFAULT_START: Position = Position {
    layer: DEFAULT_START_LAYER,
    room: DEFAULT_START_ROOM,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEntry {
    pub room: Room,
    pub doors: Vec<Room>,
}

/// `next` is `None` (and `rooms` empty) at the largest prime of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub layer: Prime,
    pub next: Option<Prime>,
    pub rooms: Vec<RoomEntry>,
}

impl Row {
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn is_edge(&self) -> bool {
        self.next.is_none()
    }

    pub fn contains(&self, room: &Room) -> bool {
        self.doors_of(room).is_some()
    }

    pub fn doors_of(&self, room: &Room) -> Option<&[Room]> {
        self.rooms
            .binary_search_by(|entry| entry.room.cmp(room))
            .ok()
            .map(|idx| self.rooms[idx].doors.as_slice())
    }

    pub fn door_count(&self) -> usize {
        self.rooms.iter().map(|entry| entry.doors.len()).sum()
    }

    pub fn reachable_targets(&self) -> BTreeSet<Room> {
        self.rooms
            .iter()
            .flat_map(|entry| entry.doors.iter().copied())
            .collect()
    }

    /// Compact form `( 19 ) (2)(3)(1)`: door counts of the rooms that have doors.
    pub fn signature(&self) -> Option<String> {
        self.next?;
        let counts: Vec<usize> = self
            .rooms
            .iter()
            .map(|entry| entry.doors.len())
            .filter(|&count| count > 0)
            .collect();
        if counts.is_empty() {
            return Some(format!("( {} )  -- no doors out", self.layer));
        }
        let body: String = counts.iter().map(|count| format!("({count})")).collect();
        Some(format!("( {} ) {body}", self.layer))
    }
}
