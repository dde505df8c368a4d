//! Black-box walk through a show's lifecycle: create, decide, persist, fold, replay.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use cinema_core::{Aggregate, AggregateId, AggregateRoot, FixedClock};
use cinema_reservation::{
    CancelSeatReservation, InitialShow, ReserveSeat, Seat, SeatNumber, SeatReservationCancelled,
    SeatReserved, SeatStatus, Show, ShowCommand, ShowCommandError, ShowCreated, ShowEvent, ShowId,
};

fn seat(n: &str) -> SeatNumber {
    SeatNumber::new(n).unwrap()
}

fn reserve(show: &Show, n: &str) -> ShowCommand {
    ShowCommand::ReserveSeat(ReserveSeat {
        show_id: *show.id(),
        seat_number: seat(n),
    })
}

fn cancel(show: &Show, n: &str) -> ShowCommand {
    ShowCommand::CancelSeatReservation(CancelSeatReservation {
        show_id: *show.id(),
        seat_number: seat(n),
    })
}

fn statuses(show: &Show) -> Vec<(String, SeatStatus)> {
    show.seats()
        .map(|s| (s.number().to_string(), s.status()))
        .collect()
}

#[test]
fn two_seat_scenario() {
    cinema_observability::init();

    let t = Utc.with_ymd_and_hms(2025, 3, 14, 19, 30, 0).unwrap();
    let clock = FixedClock::new(t);
    let show_id = ShowId::new(AggregateId::from_uuid(Uuid::from_u128(0x5157)));

    let created = ShowCreated {
        occurred_at: t,
        initial_show: InitialShow::new(
            show_id,
            "Nosferatu",
            [
                Seat::new(seat("A1"), SeatStatus::Available),
                Seat::new(seat("A2"), SeatStatus::Reserved),
            ],
        ),
    };
    let mut history = vec![ShowEvent::ShowCreated(created.clone())];
    let s = Show::create(&created);

    // Reserve A1.
    let events = s.process(&reserve(&s, "A1"), &clock).unwrap();
    assert_eq!(
        events,
        vec![ShowEvent::SeatReserved(SeatReserved {
            show_id,
            occurred_at: t,
            seat_number: seat("A1"),
        })]
    );
    let s1 = s.clone().apply_all(&events);
    history.extend(events);
    assert_eq!(
        statuses(&s1),
        vec![
            ("A1".to_string(), SeatStatus::Reserved),
            ("A2".to_string(), SeatStatus::Reserved),
        ]
    );

    // A2 was reserved from the start.
    assert_eq!(
        s1.process(&reserve(&s1, "A2"), &clock),
        Err(ShowCommandError::SeatNotAvailable)
    );

    // Cancel A2.
    let events = s1.process(&cancel(&s1, "A2"), &clock).unwrap();
    assert_eq!(
        events,
        vec![ShowEvent::SeatReservationCancelled(SeatReservationCancelled {
            show_id,
            occurred_at: t,
            seat_number: seat("A2"),
        })]
    );
    let s2 = s1.clone().apply_all(&events);
    history.extend(events);
    assert_eq!(
        statuses(&s2),
        vec![
            ("A1".to_string(), SeatStatus::Reserved),
            ("A2".to_string(), SeatStatus::Available),
        ]
    );

    // A3 is not part of the layout.
    assert_eq!(
        s.process(&reserve(&s, "A3"), &clock),
        Err(ShowCommandError::SeatNotExists)
    );

    // Every intermediate snapshot is still intact.
    assert_eq!(
        statuses(&s),
        vec![
            ("A1".to_string(), SeatStatus::Available),
            ("A2".to_string(), SeatStatus::Reserved),
        ]
    );
    assert_eq!(s1.seat(&seat("A2")).map(Seat::status), Some(SeatStatus::Reserved));

    // Replaying the persisted history lands on the same snapshot.
    let replayed = Show::replay(&history).unwrap();
    assert_eq!(replayed, s2);
    assert_eq!(replayed.version(), 3);
}

#[test]
fn retry_after_refresh_sees_the_competing_reservation() {
    let t = Utc.with_ymd_and_hms(2025, 3, 14, 19, 30, 0).unwrap();
    let clock = FixedClock::new(t);
    let created = ShowCreated {
        occurred_at: t,
        initial_show: InitialShow::new(
            ShowId::new(AggregateId::new()),
            "Metropolis",
            [Seat::new(seat("B3"), SeatStatus::Available)],
        ),
    };
    let stale = Show::create(&created);

    // Two callers decide against the same snapshot; both are accepted.
    let first = stale.process(&reserve(&stale, "B3"), &clock).unwrap();
    let second = stale.process(&reserve(&stale, "B3"), &clock).unwrap();
    assert_eq!(first, second);

    // The store accepts the first append; the second caller refreshes and retries.
    let refreshed = stale.apply_all(&first);
    assert_eq!(
        refreshed.process(&reserve(&refreshed, "B3"), &clock),
        Err(ShowCommandError::SeatNotAvailable)
    );
}
