//! Observability: structured evaluation telemetry through a pluggable sink.

pub(crate) mod sink;

// re-exports
pub use sink::{EngineEvent, EventSink, NoopSink, record, with_sink};
