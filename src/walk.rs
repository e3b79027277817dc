//! Single-path walks without backtracking.

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    room::{Position, Room},
    row::RoomSource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkStatus {
    /// The budget was spent on a room that still has a door to take.
    Advancing,
    DeadEnd,
    NoNextPrime,
    StartInvalid,
    /// Only for a zero budget, where nothing was recorded. A positive budget
    /// that runs out on a room with doors left reports `Advancing`, since the
    /// walk could still move on.
    MaxSteps,
}

impl WalkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalkStatus::Advancing => "advancing",
            WalkStatus::DeadEnd => "dead_end",
            WalkStatus::NoNextPrime => "no_next_prime",
            WalkStatus::StartInvalid => "start_invalid",
            WalkStatus::MaxSteps => "max_steps",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walk {
    pub path: Vec<Position>,
    pub status: WalkStatus,
}

impl Walk {
    pub fn last(&self) -> Option<&Position> {
        self.path.last()
    }
}

/// Always takes the lexicographically smallest door.
pub fn leftmost_walk<S: RoomSource + ?Sized>(source: &S, start: Position, max_steps: usize) -> Walk {
    walk_with(source, start, max_steps, |doors| doors.first().copied())
}

/// Takes a uniformly random door at every room, drawing from `rng`.
pub fn random_walk<S, R>(source: &S, start: Position, max_steps: usize, rng: &mut R) -> Walk
where
    S: RoomSource + ?Sized,
    R: Rng + ?Sized,
{
    walk_with(source, start, max_steps, |doors| doors.choose(rng).copied())
}

/// Records at most `max_steps` rooms, choosing each door with `choose`.
fn walk_with<S, F>(source: &S, start: Position, max_steps: usize, mut choose: F) -> Walk
where
    S: RoomSource + ?Sized,
    F: FnMut(&[Room]) -> Option<Room>,
{
    let mut path = Vec::new();
    if max_steps == 0 {
        return Walk {
            path,
            status: WalkStatus::MaxSteps,
        };
    }
    let table = source.table();
    let mut current = start;
    loop {
        path.push(current);
        if !table.contains(current.layer) {
            return finish(path, WalkStatus::StartInvalid);
        }
        if table.successor(current.layer).is_none() {
            return finish(path, WalkStatus::NoNextPrime);
        }
        let Some(doors) = source.lookup(&current) else {
            return finish(path, WalkStatus::StartInvalid);
        };
        if doors.is_empty() {
            return finish(path, WalkStatus::DeadEnd);
        }
        if path.len() >= max_steps {
            return finish(path, WalkStatus::Advancing);
        }
        let Some(target) = choose(&doors.doors) else {
            return finish(path, WalkStatus::DeadEnd);
        };
        current = Position {
            layer: doors.next,
            room: target,
        };
    }
}

fn finish(path: Vec<Position>, status: WalkStatus) -> Walk {
    log::debug!("walk stopped after {} rooms: {}", path.len(), status.as_str());
    Walk { path, status }
}
