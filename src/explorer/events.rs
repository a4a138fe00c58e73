//! Lifecycle event channel
//!
//! The ordered event stream a host consumes to mirror discovery and run
//! progress in its UI. Exactly one `LoadStarted`/`LoadFinished` pair per
//! discovery call and one `RunStarted`/`RunFinished` pair per run call;
//! suite and test events for a node and its descendants are strictly nested.

use std::fmt;

use super::tree::{SuiteNode, node_to_json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteState {
    Running,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestState {
    Running,
    Passed,
    Failed,
}

/// One lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    LoadStarted,
    LoadFinished { root: SuiteNode },
    RunStarted { ids: Vec<String> },
    Suite { id: String, state: SuiteState },
    Test { id: String, state: TestState },
    RunFinished,
}

/// Consumer of the event stream.
///
/// Implementations must tolerate being called once per event, in order, on
/// a single thread.
pub trait EventSink {
    fn emit(&mut self, event: ExplorerEvent);
}

/// Collecting sink, convenient for hosts that drain events in batches and
/// for tests asserting on exact sequences.
impl EventSink for Vec<ExplorerEvent> {
    fn emit(&mut self, event: ExplorerEvent) {
        self.push(event);
    }
}

impl fmt::Display for SuiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteState::Running => write!(f, "running"),
            SuiteState::Completed => write!(f, "completed"),
        }
    }
}

impl fmt::Display for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestState::Running => write!(f, "running"),
            TestState::Passed => write!(f, "passed"),
            TestState::Failed => write!(f, "failed"),
        }
    }
}

impl fmt::Display for ExplorerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplorerEvent::LoadStarted => write!(f, "load started"),
            ExplorerEvent::LoadFinished { root } => {
                write!(f, "load finished ({} tests)", root.test_count())
            }
            ExplorerEvent::RunStarted { ids } => write!(f, "run started ({} requested)", ids.len()),
            ExplorerEvent::Suite { id, state } => write!(f, "suite {state} {id}"),
            ExplorerEvent::Test { id, state } => write!(f, "test {state} {id}"),
            ExplorerEvent::RunFinished => write!(f, "run finished"),
        }
    }
}

/// JSON rendering of one event, one object per event for line-delimited
/// machine consumption.
pub fn event_to_json(event: &ExplorerEvent) -> serde_json::Value {
    match event {
        ExplorerEvent::LoadStarted => serde_json::json!({ "event": "loadStarted" }),
        ExplorerEvent::LoadFinished { root } => serde_json::json!({
            "event": "loadFinished",
            "tree": node_to_json(&super::tree::TestNode::Suite(root.clone())),
        }),
        ExplorerEvent::RunStarted { ids } => serde_json::json!({
            "event": "runStarted",
            "ids": ids,
        }),
        ExplorerEvent::Suite { id, state } => serde_json::json!({
            "event": "suite",
            "id": id,
            "state": state.to_string(),
        }),
        ExplorerEvent::Test { id, state } => serde_json::json!({
            "event": "test",
            "id": id,
            "state": state.to_string(),
        }),
        ExplorerEvent::RunFinished => serde_json::json!({ "event": "runFinished" }),
    }
}
