//! Run orchestrator
//!
//! Executes a requested subset of the discovered tree against the external
//! test runner, emitting the lifecycle event sequence a host relies on for
//! UI state. Single-threaded and sequential: events for a node and its
//! descendants are strictly nested, and independently requested IDs are
//! processed in caller order, never interleaved.

use std::path::{Path, PathBuf};

use super::ExplorerError;
use super::events::{EventSink, ExplorerEvent, SuiteState, TestState};
use super::registry::{Registry, RunRecord};
use super::tree::{TestCase, TestNode};

/// Everything the external test runner needs for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecConfig {
    pub working_dir: PathBuf,
    pub build_flags: Vec<String>,
    /// Functions to target, in order. For a suite-member test this is the
    /// raw member name followed by its suite runners.
    pub target_functions: Vec<String>,
    pub is_benchmark: bool,
    pub is_module_mode: bool,
    pub coverage_requested: bool,
}

/// External test execution service.
///
/// Returns whether all targeted functions succeeded.
pub trait TestExecutor {
    fn execute(&self, config: &ExecConfig) -> Result<bool, ExplorerError>;
}

/// Workspace configuration collaborator: build flags and module mode.
pub trait WorkspaceSettings {
    fn build_flags(&self) -> Vec<String>;
    fn is_module_mode(&self, dir: &Path) -> bool;
}

/// Drives one run over a fixed registry.
pub struct RunOrchestrator<'a> {
    registry: &'a Registry,
    executor: &'a dyn TestExecutor,
    settings: &'a dyn WorkspaceSettings,
}

impl<'a> RunOrchestrator<'a> {
    pub fn new(
        registry: &'a Registry,
        executor: &'a dyn TestExecutor,
        settings: &'a dyn WorkspaceSettings,
    ) -> Self {
        Self {
            registry,
            executor,
            settings,
        }
    }

    /// Run the requested node IDs in order.
    ///
    /// Unknown IDs are skipped silently; a failing test is a normal `failed`
    /// event, not an error. Never returns a failure to the caller.
    #[tracing::instrument(skip_all, fields(requested = ids.len()))]
    pub fn run(&self, ids: &[String], sink: &mut dyn EventSink) {
        sink.emit(ExplorerEvent::RunStarted { ids: ids.to_vec() });

        for id in ids {
            match self.registry.get(id) {
                Some(record) => self.run_node(record, sink),
                None => tracing::debug!(%id, "skipping unknown node id"),
            }
        }

        sink.emit(ExplorerEvent::RunFinished);
    }

    fn run_node(&self, record: &RunRecord, sink: &mut dyn EventSink) {
        match &record.node {
            TestNode::Suite(suite) => {
                sink.emit(ExplorerEvent::Suite {
                    id: suite.id.clone(),
                    state: SuiteState::Running,
                });
                for child in &suite.children {
                    // Children are re-resolved through the registry so that
                    // suite and leaf execution share one addressing path.
                    if let Some(child_record) = self.registry.get(child.id()) {
                        self.run_node(child_record, sink);
                    }
                }
                sink.emit(ExplorerEvent::Suite {
                    id: suite.id.clone(),
                    state: SuiteState::Completed,
                });
            }
            TestNode::Test(test) => {
                sink.emit(ExplorerEvent::Test {
                    id: test.id.clone(),
                    state: TestState::Running,
                });
                let passed = self.execute_test(test, record);
                sink.emit(ExplorerEvent::Test {
                    id: test.id.clone(),
                    state: if passed { TestState::Passed } else { TestState::Failed },
                });
            }
        }
    }

    /// Hand one test to the external runner and map its outcome.
    ///
    /// An executor error is reported as a failed test; the protocol does not
    /// distinguish "could not run" from "ran and failed".
    fn execute_test(&self, test: &TestCase, record: &RunRecord) -> bool {
        let working_dir = test
            .file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut target_functions = vec![record.function_name.clone()];
        target_functions.extend(record.suite_names.iter().cloned());

        let config = ExecConfig {
            is_module_mode: self.settings.is_module_mode(&working_dir),
            build_flags: self.settings.build_flags(),
            working_dir,
            target_functions,
            is_benchmark: false,
            coverage_requested: false,
        };

        match self.executor.execute(&config) {
            Ok(passed) => passed,
            Err(e) => {
                tracing::warn!(id = %test.id, error = %e, "test execution failed");
                false
            }
        }
    }
}
