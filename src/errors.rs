use thiserror::Error;

use crate::room::{Prime, Room};

#[derive(Debug, Error)]
pub enum LabyrinthError {
    #[error("invalid ceiling {0}: the sieve needs a ceiling of at least 2")]
    InvalidCeiling(u64),
    #[error("{0} is not a prime in the table")]
    UnknownPrime(Prime),
    #[error("room {room} does not exist at layer {layer}")]
    StartInvalid { layer: Prime, room: Room },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl LabyrinthError {
    pub fn start_invalid(layer: Prime, room: Room) -> Self {
        LabyrinthError::StartInvalid { layer, room }
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        LabyrinthError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LabyrinthError::NotFound(msg.into())
    }
}
