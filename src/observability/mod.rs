//! Observability subsystem for answerdb
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed events
//! - Monotonic counters
//!
//! Observability is read-only: a logging failure never fails the operation
//! being observed.
//!
//! ```ignore
//! use answerdb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::VoteCast, &[("answer_id", &id.to_string())]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
