//! Demonstration output. Components and the coordinator describe every state
//! change as a [`TraceLine`]; where the line ends up is the sink's business.

use std::cell::RefCell;
use std::fmt;

use colored::Colorize;

use crate::components::ComponentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceSource {
    Component(ComponentId),
    Coordinator,
}

impl TraceSource {
    pub fn label(&self) -> &'static str {
        match self {
            TraceSource::Component(id) => id.label(),
            TraceSource::Coordinator => "Coordinator",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub source: TraceSource,
    pub message: String,
}

impl TraceLine {
    pub fn new(source: TraceSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source.label(), self.message)
    }
}

pub trait TraceSink {
    fn emit(&self, line: TraceLine);
}

// =============================================================================
// Console sink
// =============================================================================

pub struct ConsoleTrace;

impl TraceSink for ConsoleTrace {
    fn emit(&self, line: TraceLine) {
        let label = format!("[{}]", line.source.label());
        let label = match line.source {
            TraceSource::Coordinator => label.magenta().bold(),
            TraceSource::Component(_) => label.cyan(),
        };
        println!("{} {}", label, line.message);
    }
}

// =============================================================================
// Recording sink
// =============================================================================

#[derive(Default)]
pub struct RecordingTrace {
    lines: RefCell<Vec<TraceLine>>,
}

impl RecordingTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<TraceLine> {
        self.lines.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.lines.borrow().iter().map(ToString::to_string).collect()
    }

    /// Lines emitted by the given source, in order.
    pub fn from_source(&self, source: TraceSource) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|line| line.source == source)
            .map(|line| line.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl TraceSink for RecordingTrace {
    fn emit(&self, line: TraceLine) {
        self.lines.borrow_mut().push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_display() {
        let line = TraceLine::new(TraceSource::Coordinator, "refreshing slots");
        assert_eq!(line.to_string(), "[Coordinator] refreshing slots");
    }

    #[test]
    fn test_recording_filters_by_source() {
        let trace = RecordingTrace::new();
        trace.emit(TraceLine::new(TraceSource::Coordinator, "a"));
        trace.emit(TraceLine::new(
            TraceSource::Component(ComponentId::NameField),
            "b",
        ));
        assert_eq!(trace.from_source(TraceSource::Coordinator), vec!["a"]);
        assert_eq!(trace.lines().len(), 2);

        trace.clear();
        assert!(trace.rendered().is_empty());
    }
}
