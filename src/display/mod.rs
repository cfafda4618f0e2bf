//! Display sink seam.
//!
//! Rendering lives outside the engine. Board mutations, countdown ticks,
//! freeze timers, scores, and the final winner announcement are pushed into
//! a `DisplaySink`; the engine never reads anything back from it.
//!
//! Three sinks ship with the crate:
//!
//! - `NullDisplay` discards everything (headless runs, benchmarks)
//! - `LogDisplay` emits tracing events, handy during development
//! - `RecordingDisplay` captures events in memory for assertions

pub mod log;
pub mod recording;
pub mod sink;

pub use log::LogDisplay;
pub use recording::{DisplayEvent, RecordingDisplay};
pub use sink::{DisplaySink, NullDisplay};
