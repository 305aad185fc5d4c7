//! Event sink boundary.
//!
//! Operator logic MUST NOT depend on sink state directly.
//! All instrumentation flows through `EngineEvent` and `record`.
//!
//! This module is the only bridge between dispatch and whatever
//! telemetry backend the host wires in.

use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = const { RefCell::new(None) };
}

///
/// EngineEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineEvent {
    Evaluated {
        family: &'static str,
        operator: &'static str,
    },
    AuxColumnWritten {
        column: String,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &EngineEvent);
}

///
/// NoopSink
///

pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _: &EngineEvent) {}
}

/// Route every event raised on this thread to `sink` for the duration
/// of `f`, then restore the previous sink.
pub fn with_sink<R>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> R) -> R {
    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let result = f();
    SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
    result
}

/// Record an event against the active sink. Without an override the
/// event is dropped.
pub fn record(event: &EngineEvent) {
    SINK_OVERRIDE.with(|cell| {
        if let Some(sink) = cell.borrow().as_ref() {
            sink.record(event);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CaptureSink {
        events: RefCell<Vec<EngineEvent>>,
    }

    impl EventSink for CaptureSink {
        fn record(&self, event: &EngineEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn events_reach_the_scoped_sink_only() {
        let sink = Rc::new(CaptureSink::default());
        record(&EngineEvent::AuxColumnWritten {
            column: "dropped".to_string(),
        });

        with_sink(sink.clone(), || {
            record(&EngineEvent::Evaluated {
                family: "string",
                operator: "equal_to",
            });
        });

        record(&EngineEvent::AuxColumnWritten {
            column: "dropped too".to_string(),
        });

        let events = sink.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            EngineEvent::Evaluated {
                family: "string",
                operator: "equal_to",
            }
        );
    }
}
