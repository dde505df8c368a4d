use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use cinema_core::{Aggregate, AggregateId, AggregateRoot, FixedClock};
use cinema_reservation::{
    InitialShow, ReserveSeat, Seat, SeatNumber, SeatStatus, Show, ShowCommand, ShowCreated,
    ShowEvent, ShowId,
};

const ROWS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K'];

fn seat_numbers(seats_per_row: usize) -> Vec<SeatNumber> {
    ROWS.iter()
        .flat_map(|row| (1..=seats_per_row).map(move |n| format!("{row}{n}")))
        .filter_map(|n| SeatNumber::new(n).ok())
        .collect()
}

/// Creation event plus one reservation per seat, in seat order.
fn history(seats_per_row: usize) -> (Vec<ShowEvent>, FixedClock) {
    let clock = FixedClock::new(Utc::now());
    let numbers = seat_numbers(seats_per_row);
    let created = ShowCreated {
        occurred_at: Utc::now(),
        initial_show: InitialShow::new(
            ShowId::new(AggregateId::new()),
            "Benchmark Matinee",
            numbers
                .iter()
                .map(|n| Seat::new(n.clone(), SeatStatus::Available)),
        ),
    };

    let mut show = Show::create(&created);
    let mut events = vec![ShowEvent::ShowCreated(created)];
    for n in numbers {
        let cmd = ShowCommand::ReserveSeat(ReserveSeat {
            show_id: *show.id(),
            seat_number: n,
        });
        let new_events = match show.process(&cmd, &clock) {
            Ok(new_events) => new_events,
            Err(err) => panic!("benchmark history rejected a reservation: {err}"),
        };
        show = show.apply_all(&new_events);
        events.extend(new_events);
    }
    (events, clock)
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("show_replay");

    for seats_per_row in [10, 50, 100] {
        let (events, _) = history(seats_per_row);
        group.throughput(Throughput::Elements(events.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(events.len()),
            &events,
            |b, events| b.iter(|| Show::replay(black_box(events))),
        );
    }

    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let (events, clock) = history(50);
    // Replay everything except the final reservation so the last seat is still free.
    let show = match Show::replay(&events[..events.len() - 1]) {
        Ok(show) => show,
        Err(err) => panic!("benchmark history is corrupt: {err}"),
    };
    let last = match events.last() {
        Some(ShowEvent::SeatReserved(e)) => e.seat_number.clone(),
        _ => panic!("benchmark history must end with a reservation"),
    };
    let cmd = ShowCommand::ReserveSeat(ReserveSeat {
        show_id: *show.id(),
        seat_number: last,
    });

    c.bench_function("show_process_reserve", |b| {
        b.iter(|| show.process(black_box(&cmd), &clock))
    });
}

criterion_group!(benches, bench_replay, bench_process);
criterion_main!(benches);
