//! Exhaustive depth-first exploration with an explicit frame stack.
//!
//! Every door of every entered room is tried exactly once per traversal.
//! Rooms are not deduplicated: entering a room again through another path
//! pushes a fresh frame with all of its doors untried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    errors::LabyrinthError,
    room::{Position, Prime, Room},
    row::RoomSource,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploreStatus {
    Completed,
    MaxSteps,
    StartInvalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreSummary {
    pub status: ExploreStatus,
    /// Walls included.
    pub total_steps: u64,
    /// Frames ever pushed, counting re-entries.
    pub total_nodes_visited: u64,
    pub max_depth: usize,
}

impl ExploreSummary {
    fn start_invalid() -> Self {
        Self {
            status: ExploreStatus::StartInvalid,
            total_steps: 0,
            total_nodes_visited: 0,
            max_depth: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExploreEvent {
    Entered { from: Position, to: Position },
    /// A door was tried but leads past the ceiling or off the table.
    Wall { from: Position, target: Room },
    Backtracked(Position),
}

struct Frame {
    position: Position,
    next: Prime,
    doors: Arc<[Room]>,
    cursor: usize,
}

pub struct Explorer<'s, S: RoomSource + ?Sized> {
    source: &'s S,
    ceiling: Option<Prime>,
    stack: Vec<Frame>,
    total_steps: u64,
    total_nodes: u64,
    max_depth: usize,
}

impl<'s, S: RoomSource + ?Sized> Explorer<'s, S> {
    pub fn new(
        source: &'s S,
        start: Position,
        ceiling: Option<Prime>,
    ) -> Result<Self, LabyrinthError> {
        let doors = source
            .lookup(&start)
            .ok_or_else(|| LabyrinthError::start_invalid(start.layer, start.room))?;
        Ok(Self {
            source,
            ceiling,
            stack: vec![Frame {
                position: start,
                next: doors.next,
                doors: doors.doors,
                cursor: 0,
            }],
            total_steps: 0,
            total_nodes: 1,
            max_depth: 1,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current(&self) -> Option<Position> {
        self.stack.last().map(|frame| frame.position)
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn total_nodes_visited(&self) -> u64 {
        self.total_nodes
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn step(&mut self) -> Option<ExploreEvent> {
        let frame = self.stack.last_mut()?;
        let from = frame.position;
        let Some(&target) = frame.doors.get(frame.cursor) else {
            self.stack.pop();
            return Some(ExploreEvent::Backtracked(from));
        };
        frame.cursor += 1;
        let layer = frame.next;
        self.total_steps += 1;
        if self.ceiling.is_some_and(|ceiling| layer > ceiling) {
            return Some(ExploreEvent::Wall { from, target });
        }
        let to = Position {
            layer,
            room: target,
        };
        let Some(doors) = self.source.lookup(&to) else {
            if self.source.table().successor(layer).is_some() {
                log::warn!("door from {from} resolves to {to}, which is missing from its row");
            }
            return Some(ExploreEvent::Wall { from, target });
        };
        self.stack.push(Frame {
            position: to,
            next: doors.next,
            doors: doors.doors,
            cursor: 0,
        });
        self.total_nodes += 1;
        self.max_depth = self.max_depth.max(self.stack.len());
        Some(ExploreEvent::Entered { from, to })
    }

    pub fn summary(&self, status: ExploreStatus) -> ExploreSummary {
        ExploreSummary {
            status,
            total_steps: self.total_steps,
            total_nodes_visited: self.total_nodes,
            max_depth: self.max_depth,
        }
    }
}

/// Doors whose target layer exceeds `max_prime` count as walls.
pub fn depth_first_explore<S: RoomSource + ?Sized>(
    source: &S,
    start: Position,
    max_total_steps: u64,
    max_prime: Option<Prime>,
) -> ExploreSummary {
    let mut explorer = match Explorer::new(source, start, max_prime) {
        Ok(explorer) => explorer,
        Err(err) => {
            log::debug!("exploration not started: {err}");
            return ExploreSummary::start_invalid();
        }
    };
    loop {
        if explorer.is_finished() {
            let summary = explorer.summary(ExploreStatus::Completed);
            log::info!(
                "explored from {start}: steps={} nodes={} max_depth={}",
                summary.total_steps,
                summary.total_nodes_visited,
                summary.max_depth
            );
            return summary;
        }
        if explorer.total_steps() >= max_total_steps {
            return explorer.summary(ExploreStatus::MaxSteps);
        }
        explorer.step();
    }
}
