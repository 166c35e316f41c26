//! Shared utilities for the Meridian wallet CLI.

pub mod logging;
pub mod sink;

pub use logging::init_tracing;
pub use sink::{sink_for_verbosity, LogSink, QuietSink, TracingSink};
