use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::seat::SeatNumber;
use crate::show::ShowId;

/// Business-rule rejection of a command against the current show.
///
/// These are expected outcomes returned by `Show::process`; callers surface
/// them to whoever issued the command.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowCommandError {
    #[error("show already exists")]
    ShowAlreadyExists,

    #[error("seat does not exist")]
    SeatNotExists,

    #[error("seat is not available")]
    SeatNotAvailable,

    #[error("seat is not reserved")]
    SeatNotReserved,
}

/// Structural corruption found while folding a show's event history.
///
/// Never produced by a valid history written through `Show::process`. Has no
/// conversion into [`ShowCommandError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("event history is empty")]
    EmptyHistory,

    #[error("history must start with show.created, found {event_type}")]
    NotCreated { event_type: &'static str },

    #[error("show {show_id} is already created, use Show::create instead")]
    AlreadyCreated { show_id: ShowId },

    #[error("seat {seat_number} does not exist")]
    UnknownSeat { seat_number: SeatNumber },
}
