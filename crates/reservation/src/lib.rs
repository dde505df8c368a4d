//! Show seat reservation domain module (event-sourced).
//!
//! This crate contains the business rules for reserving and releasing the seats
//! of a single show, implemented purely as deterministic domain logic (no IO, no
//! HTTP, no storage). Persistence, concurrency control and the command bus live
//! outside and drive the aggregate through `create`, `process` and `apply`.

pub mod error;
pub mod seat;
pub mod show;

pub use error::{ReplayError, ShowCommandError};
pub use seat::{Seat, SeatNumber, SeatStatus};
pub use show::{
    CancelSeatReservation, CreateShow, InitialShow, ReserveSeat, SeatReservationCancelled,
    SeatReserved, Show, ShowCommand, ShowCreated, ShowEvent, ShowId,
};
