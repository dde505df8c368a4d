//! Aggregate root traits for event-sourced domain models.

use crate::clock::Clock;

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Number of events folded into this snapshot (the bootstrap event counts as 1).
    ///
    /// The external store compares this against the stream revision when appending.
    fn version(&self) -> u64;
}

/// Aggregate execution semantics over immutable snapshots.
///
/// - **Bootstrap**: `create(&created)` builds the first snapshot from the creation event.
/// - **Decision logic**: `process(&self, cmd, clock)` returns events or a domain error.
/// - **Evolution**: `apply(&self, event)` returns the *next* snapshot.
///
/// Snapshots are never mutated in place. Aggregates must not perform IO; the only
/// outside input is the injected [`Clock`].
pub trait Aggregate: AggregateRoot + Sized {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Payload of the event that brings an aggregate into existence.
    type Created;

    /// Build the first snapshot from the creation event.
    fn create(created: &Self::Created) -> Self;

    /// Decide which events to emit given the current snapshot and a command.
    fn process(
        &self,
        command: &Self::Command,
        clock: &dyn Clock,
    ) -> Result<Vec<Self::Event>, Self::Error>;

    /// Fold a single event into the snapshot, producing the next one.
    ///
    /// Structural corruption in the history (events that cannot belong to this
    /// aggregate) is not a recoverable outcome; implementations panic.
    fn apply(&self, event: &Self::Event) -> Self;

    /// Fold a sequence of events, in order.
    fn apply_all<'a, I>(self, events: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        events
            .into_iter()
            .fold(self, |snapshot, event| snapshot.apply(event))
    }
}
