use std::sync::Arc;

use crate::{
    errors::LabyrinthError,
    primes::PrimeTable,
    room::{Position, Prime, Room, RoomEntry, Row},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoorList {
    pub next: Prime,
    pub doors: Arc<[Room]>,
}

impl DoorList {
    pub fn len(&self) -> usize {
        self.doors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }
}

/// `lookup` returns `None` exactly when the room is absent from
/// `build_row(position.layer)`: the room is malformed for that layer, the
/// layer is not a table prime, or the layer is the edge of the table.
pub trait RoomSource {
    fn table(&self) -> &PrimeTable;

    fn lookup(&self, position: &Position) -> Option<DoorList>;
}

#[derive(Clone, Copy)]
pub struct RowBuilder<'a> {
    table: &'a PrimeTable,
}

impl<'a> RowBuilder<'a> {
    pub fn new(table: &'a PrimeTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a PrimeTable {
        self.table
    }

    /// At the largest table prime the row is empty and `next` is `None`.
    pub fn build_row(&self, p: Prime) -> Result<Row, LabyrinthError> {
        if !self.table.contains(p) {
            return Err(LabyrinthError::UnknownPrime(p));
        }
        let Some(next) = self.table.successor(p) else {
            return Ok(Row {
                layer: p,
                next: None,
                rooms: Vec::new(),
            });
        };
        let primes = self.table.primes();
        let mut rooms = Vec::new();
        for (i, &a) in primes.iter().enumerate() {
            if a > p {
                break;
            }
            for &b in &primes[i..] {
                if a + b > p {
                    break;
                }
                let c = p - a - b;
                if c < b {
                    break;
                }
                if self.table.contains(c) {
                    let room = Room::new(a, b, c);
                    let doors = self.doors_out_of(&room, next);
                    rooms.push(RoomEntry { room, doors });
                }
            }
        }
        log::debug!("row {p} -> {next}: {} rooms", rooms.len());
        Ok(Row {
            layer: p,
            next: Some(next),
            rooms,
        })
    }

    /// Each coordinate moves to its predecessor, itself or its successor prime.
    pub fn doors_out_of(&self, room: &Room, target: Prime) -> Vec<Room> {
        let [a, b, c] = room.coords();
        let (na, nb, nc) = (
            self.table.neighbours(a),
            self.table.neighbours(b),
            self.table.neighbours(c),
        );
        let mut doors = Vec::new();
        for &aa in &na {
            for &bb in &nb {
                for &cc in &nc {
                    if aa + bb + cc == target {
                        doors.push(Room::new(aa, bb, cc));
                    }
                }
            }
        }
        doors.sort_unstable();
        doors.dedup();
        doors
    }
}

impl RoomSource for RowBuilder<'_> {
    fn table(&self) -> &PrimeTable {
        self.table
    }

    fn lookup(&self, position: &Position) -> Option<DoorList> {
        let next = self.table.successor(position.layer)?;
        let room = position.room;
        if room.sum() != position.layer
            || !room.coords().iter().all(|&coord| self.table.contains(coord))
        {
            return None;
        }
        Some(DoorList {
            next,
            doors: Arc::from(self.doors_out_of(&room, next)),
        })
    }
}
