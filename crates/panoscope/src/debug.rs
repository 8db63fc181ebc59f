//! Injectable debug/inspection context.
//!
//! Diagnostics flow to an explicit sink handed to the session at
//! construction, never to ambient global state. Hosts that want a debug
//! console implement [`DebugSink`]; everyone else passes [`NopDebugSink`].

use panoscope_nav::SwitchRequest;

/// Sink for navigation diagnostics.
pub trait DebugSink {
    /// A transition stage change, named by state tags.
    fn transition(&mut self, _from: &'static str, _to: &'static str) {}

    /// A switch request was emitted to the host.
    fn switch_requested(&mut self, _request: &SwitchRequest) {}

    /// Hotspots surviving culling this frame.
    fn hotspots_projected(&mut self, _count: usize) {}
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopDebugSink;

impl DebugSink for NopDebugSink {}

/// Sink that records events in memory, for tests and debug consoles.
#[derive(Debug, Default)]
pub struct RecordingDebugSink {
    /// Recorded event lines, oldest first.
    pub events: Vec<String>,
}

impl DebugSink for RecordingDebugSink {
    fn transition(&mut self, from: &'static str, to: &'static str) {
        self.events.push(format!("transition {from} -> {to}"));
    }

    fn switch_requested(&mut self, request: &SwitchRequest) {
        self.events
            .push(format!("switch -> viewpoint {}", request.target_id));
    }

    fn hotspots_projected(&mut self, count: usize) {
        self.events.push(format!("hotspots {count}"));
    }
}
