//! Deterministic layered graph ("labyrinth") of prime triples.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod cache;
pub mod cli;
pub mod cli_commands;
pub mod config;
pub mod errors;
pub mod explore;
pub mod labyrinth;
pub mod primes;
pub mod probe;
pub mod room;
pub mod row;
pub mod session;
pub mod walk;
pub mod world;

pub use crate::cache::{CacheStats, DoorMark, RoomCache};
pub use crate::config::LabyrinthConfig;
pub use crate::errors::LabyrinthError;
pub use crate::explore::{ExploreEvent, ExploreStatus, ExploreSummary, Explorer};
pub use crate::labyrinth::Labyrinth;
pub use crate::primes::PrimeTable;
pub use crate::room::{DEFAULT_START, Position, Prime, Room, RoomEntry, Row};
pub use crate::row::{DoorList, RoomSource, RowBuilder};
pub use crate::session::{DoorOutcome, RoomView, Session};
pub use crate::walk::{Walk, WalkStatus};
pub use crate::world::{WorldGraph, build_world_graph};
