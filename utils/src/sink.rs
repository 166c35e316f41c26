//! Log sink capability for components that talk to external systems.
//!
//! The node client and the device bridge receive a `LogSink` at
//! construction instead of consulting a global verbosity switch. The
//! quiet sink still reports errors; progress chatter is dropped.

use std::sync::Arc;

/// Capability for emitting operator-facing progress and error messages.
///
/// Implementations must never be handed secret material; callers log
/// descriptions of what they are doing, not payload contents.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sink that forwards everything to the `tracing` subscriber.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Sink for non-verbose runs: errors only.
pub struct QuietSink;

impl LogSink for QuietSink {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Select a sink for the given verbosity flag.
pub fn sink_for_verbosity(verbose: bool) -> Arc<dyn LogSink> {
    if verbose {
        Arc::new(TracingSink)
    } else {
        Arc::new(QuietSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinks_are_selectable() {
        // Both sinks accept all levels without panicking.
        for sink in [sink_for_verbosity(true), sink_for_verbosity(false)] {
            sink.info("connecting");
            sink.warn("slow peer");
            sink.error("node unreachable");
        }
    }
}
