use std::sync::Arc;

use serde::Serialize;

use crate::{
    cache::{DoorMark, RoomCache},
    errors::LabyrinthError,
    room::{Position, Prime, Room},
    row::{RoomSource, RowBuilder},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomView {
    pub position: Position,
    pub next: Option<Prime>,
    pub doors: Arc<[Room]>,
    pub marks: Vec<DoorMark>,
}

impl RoomView {
    pub fn open_count(&self) -> usize {
        self.marks.iter().filter(|mark| mark.is_open()).count()
    }

    /// 1-based indices of the doors not yet opened.
    pub fn closed_doors(&self) -> Vec<usize> {
        self.marks
            .iter()
            .enumerate()
            .filter(|(_, mark)| !mark.is_open())
            .map(|(idx, _)| idx + 1)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorOutcome {
    Moved(Position),
    AlreadyOpen,
    EdgeOfLabyrinth,
}

/// Door-by-door traversal state: a room cache, the current room and the
/// trail of rooms left behind. Each session is independent of every other.
pub struct Session<'a> {
    cache: RoomCache<'a>,
    start: Position,
    current: Position,
    trail: Vec<Position>,
    moves: usize,
}

impl<'a> Session<'a> {
    pub fn new(rows: RowBuilder<'a>, start: Position) -> Result<Self, LabyrinthError> {
        let cache = RoomCache::new(rows);
        if cache.lookup(&start).is_none() {
            return Err(LabyrinthError::start_invalid(start.layer, start.room));
        }
        Ok(Self {
            cache,
            start,
            current: start,
            trail: Vec::new(),
            moves: 0,
        })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn cache(&self) -> &RoomCache<'a> {
        &self.cache
    }

    pub fn room(&self) -> RoomView {
        match self.cache.lookup(&self.current) {
            Some(doors) => RoomView {
                position: self.current,
                next: Some(doors.next),
                marks: self.cache.marks(&self.current).unwrap_or_default(),
                doors: doors.doors,
            },
            None => RoomView {
                position: self.current,
                next: None,
                doors: Arc::from(Vec::<Room>::new()),
                marks: Vec::new(),
            },
        }
    }

    /// Takes door `index` (1-based, as shown to players).
    pub fn take_door(&mut self, index: usize) -> Result<DoorOutcome, LabyrinthError> {
        let view = self.room();
        let Some(next) = view.next else {
            return Ok(DoorOutcome::EdgeOfLabyrinth);
        };
        if index == 0 || index > view.doors.len() {
            return Err(LabyrinthError::invalid_input(format!(
                "door {index} is not available in {}",
                self.current
            )));
        }
        if view.marks[index - 1].is_open() {
            return Ok(DoorOutcome::AlreadyOpen);
        }
        self.moves += 1;
        self.cache
            .mark_door(&self.current, index - 1, DoorMark::Visited(self.moves))?;
        self.trail.push(self.current);
        self.current = Position {
            layer: next,
            room: view.doors[index - 1],
        };
        log::debug!("door {index} taken, now at {}", self.current);
        Ok(DoorOutcome::Moved(self.current))
    }

    /// Steps back along the trail. `None` when already at the start.
    pub fn reverse(&mut self) -> Option<Position> {
        let previous = self.trail.pop()?;
        self.current = previous;
        Some(previous)
    }

    /// Forgets every opened door and returns to the start room.
    pub fn restart(&mut self) {
        self.cache = RoomCache::new(self.cache.rows());
        self.trail.clear();
        self.moves = 0;
        self.current = self.start;
    }
}
