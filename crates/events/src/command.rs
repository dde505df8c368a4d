use cinema_core::AggregateId;

/// A command targets a specific aggregate.
///
/// Commands represent **intent**: a request that the aggregate either accepts
/// (producing events) or rejects (producing a domain error). They are transient;
/// only the resulting events are persisted.
///
/// `target_aggregate_id()` lets the command bus route a command to the stream
/// whose snapshot must decide it. Each command operates on exactly one aggregate.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
