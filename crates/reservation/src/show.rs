use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_core::{Aggregate, AggregateId, AggregateRoot, Clock};
use cinema_events::{Command, Event};

use crate::error::{ReplayError, ShowCommandError};
use crate::seat::{Seat, SeatNumber};

/// Show identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub AggregateId);

impl ShowId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ShowId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Complete starting snapshot carried by [`ShowCreated`].
///
/// Accepted verbatim by [`Show::create`]; whoever produces the creation event is
/// responsible for its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialShow {
    pub id: ShowId,
    pub title: String,
    pub seats: BTreeMap<SeatNumber, Seat>,
}

impl InitialShow {
    /// Key the given seats by number. A later seat with the same number replaces
    /// an earlier one.
    pub fn new(id: ShowId, title: impl Into<String>, seats: impl IntoIterator<Item = Seat>) -> Self {
        Self {
            id,
            title: title.into(),
            seats: seats
                .into_iter()
                .map(|seat| (seat.number().clone(), seat))
                .collect(),
        }
    }
}

/// Command: CreateShow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShow {
    pub show_id: ShowId,
    pub title: String,
}

/// Command: ReserveSeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveSeat {
    pub show_id: ShowId,
    pub seat_number: SeatNumber,
}

/// Command: CancelSeatReservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelSeatReservation {
    pub show_id: ShowId,
    pub seat_number: SeatNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowCommand {
    CreateShow(CreateShow),
    ReserveSeat(ReserveSeat),
    CancelSeatReservation(CancelSeatReservation),
}

impl Command for ShowCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        match self {
            ShowCommand::CreateShow(cmd) => cmd.show_id.0,
            ShowCommand::ReserveSeat(cmd) => cmd.show_id.0,
            ShowCommand::CancelSeatReservation(cmd) => cmd.show_id.0,
        }
    }
}

/// Event: ShowCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowCreated {
    pub occurred_at: DateTime<Utc>,
    pub initial_show: InitialShow,
}

/// Event: SeatReserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatReserved {
    pub show_id: ShowId,
    pub occurred_at: DateTime<Utc>,
    pub seat_number: SeatNumber,
}

/// Event: SeatReservationCancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatReservationCancelled {
    pub show_id: ShowId,
    pub occurred_at: DateTime<Utc>,
    pub seat_number: SeatNumber,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShowEvent {
    ShowCreated(ShowCreated),
    SeatReserved(SeatReserved),
    SeatReservationCancelled(SeatReservationCancelled),
}

impl ShowEvent {
    /// Stream this event belongs to.
    pub fn show_id(&self) -> ShowId {
        match self {
            ShowEvent::ShowCreated(e) => e.initial_show.id,
            ShowEvent::SeatReserved(e) => e.show_id,
            ShowEvent::SeatReservationCancelled(e) => e.show_id,
        }
    }
}

impl Event for ShowEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShowEvent::ShowCreated(_) => "show.created",
            ShowEvent::SeatReserved(_) => "show.seat_reserved",
            ShowEvent::SeatReservationCancelled(_) => "show.seat_reservation_cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ShowEvent::ShowCreated(e) => e.occurred_at,
            ShowEvent::SeatReserved(e) => e.occurred_at,
            ShowEvent::SeatReservationCancelled(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: Show.
///
/// An immutable snapshot. The seat map is shared between snapshots and copied
/// only when `apply` replaces a seat, so older snapshots stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    id: ShowId,
    title: String,
    seats: Arc<BTreeMap<SeatNumber, Seat>>,
    version: u64,
}

impl Show {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn seat(&self, number: &SeatNumber) -> Option<&Seat> {
        self.seats.get(number)
    }

    /// All seats, ordered by seat number.
    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    /// Fallible form of [`Aggregate::apply`] for infrastructure that wants to
    /// report a corrupt stream instead of aborting.
    pub fn try_apply(&self, event: &ShowEvent) -> Result<Show, ReplayError> {
        match event {
            ShowEvent::ShowCreated(_) => Err(ReplayError::AlreadyCreated { show_id: self.id }),
            ShowEvent::SeatReserved(e) => {
                let seat = self.seat_for_replay(&e.seat_number)?;
                Ok(self.with_seat(&e.seat_number, seat.reserved()))
            }
            ShowEvent::SeatReservationCancelled(e) => {
                let seat = self.seat_for_replay(&e.seat_number)?;
                Ok(self.with_seat(&e.seat_number, seat.available()))
            }
        }
    }

    /// Rebuild a snapshot from a full stream, oldest event first.
    pub fn replay<'a, I>(events: I) -> Result<Show, ReplayError>
    where
        I: IntoIterator<Item = &'a ShowEvent>,
    {
        let mut events = events.into_iter();
        let show = match events.next() {
            None => return Err(ReplayError::EmptyHistory),
            Some(ShowEvent::ShowCreated(created)) => Show::create(created),
            Some(other) => {
                return Err(ReplayError::NotCreated {
                    event_type: other.event_type(),
                });
            }
        };

        let show = events.try_fold(show, |show, event| show.try_apply(event))?;
        tracing::debug!(show_id = %show.id, version = show.version, "show replayed");
        Ok(show)
    }

    fn seat_for_replay(&self, number: &SeatNumber) -> Result<&Seat, ReplayError> {
        self.seats.get(number).ok_or_else(|| ReplayError::UnknownSeat {
            seat_number: number.clone(),
        })
    }

    /// Replace the seat stored under `number`; the key set never changes.
    fn with_seat(&self, number: &SeatNumber, seat: Seat) -> Show {
        let mut seats = Arc::clone(&self.seats);
        if let Some(slot) = Arc::make_mut(&mut seats).get_mut(number) {
            *slot = seat;
        }
        Show {
            id: self.id,
            title: self.title.clone(),
            seats,
            version: self.version + 1,
        }
    }

    fn handle_reservation(
        &self,
        cmd: &ReserveSeat,
        clock: &dyn Clock,
    ) -> Result<Vec<ShowEvent>, ShowCommandError> {
        let seat = self
            .seats
            .get(&cmd.seat_number)
            .ok_or(ShowCommandError::SeatNotExists)?;
        if !seat.is_available() {
            return Err(ShowCommandError::SeatNotAvailable);
        }

        Ok(vec![ShowEvent::SeatReserved(SeatReserved {
            show_id: self.id,
            occurred_at: clock.now(),
            seat_number: cmd.seat_number.clone(),
        })])
    }

    fn handle_cancellation(
        &self,
        cmd: &CancelSeatReservation,
        clock: &dyn Clock,
    ) -> Result<Vec<ShowEvent>, ShowCommandError> {
        let seat = self
            .seats
            .get(&cmd.seat_number)
            .ok_or(ShowCommandError::SeatNotExists)?;
        if !seat.is_reserved() {
            return Err(ShowCommandError::SeatNotReserved);
        }

        Ok(vec![ShowEvent::SeatReservationCancelled(
            SeatReservationCancelled {
                show_id: self.id,
                occurred_at: clock.now(),
                seat_number: cmd.seat_number.clone(),
            },
        )])
    }
}

impl AggregateRoot for Show {
    type Id = ShowId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Show {
    type Command = ShowCommand;
    type Event = ShowEvent;
    type Error = ShowCommandError;
    type Created = ShowCreated;

    fn create(created: &ShowCreated) -> Self {
        let initial = &created.initial_show;
        Self {
            id: initial.id,
            title: initial.title.clone(),
            seats: Arc::new(initial.seats.clone()),
            version: 1,
        }
    }

    fn process(
        &self,
        command: &ShowCommand,
        clock: &dyn Clock,
    ) -> Result<Vec<ShowEvent>, ShowCommandError> {
        // A snapshot only exists once its ShowCreated was folded, so creation
        // can never succeed here.
        let outcome = match command {
            ShowCommand::CreateShow(_) => Err(ShowCommandError::ShowAlreadyExists),
            ShowCommand::ReserveSeat(cmd) => self.handle_reservation(cmd, clock),
            ShowCommand::CancelSeatReservation(cmd) => self.handle_cancellation(cmd, clock),
        };

        match &outcome {
            Ok(events) => tracing::debug!(
                show_id = %self.id,
                command = ?command,
                events = events.len(),
                "show command accepted"
            ),
            Err(err) => tracing::debug!(
                show_id = %self.id,
                command = ?command,
                error = %err,
                "show command rejected"
            ),
        }
        outcome
    }

    fn apply(&self, event: &ShowEvent) -> Self {
        match self.try_apply(event) {
            Ok(next) => next,
            Err(err) => {
                tracing::error!(
                    show_id = %self.id,
                    event_type = event.event_type(),
                    error = %err,
                    "corrupt show history"
                );
                panic!("{err}");
            }
        }
    }
}
