//! Test explorer engine
//!
//! ## Modules
//!
//! - `classify` - raw-name classification (plain test vs. suite member)
//! - `scan` - source scanning boundary and the built-in Go scanner
//! - `tree` - suite/test node model
//! - `builder` - recursive discovery pass (tree + registration list)
//! - `registry` - stable-ID lookup table for one discovery pass
//! - `runner` - run orchestration over the registry
//! - `events` - lifecycle event channel consumed by the host
//! - `gotest` - default collaborators backed by the `go` toolchain
//!
//! ## Design
//!
//! Discovery and run are independent sequential passes over shared state
//! owned by a [`TestExplorer`] session: discovery replaces the tree and
//! registry wholesale, a run only reads them and emits events. There is no
//! module-level state, so multiple sessions (multi-root workspaces) do not
//! interfere.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod builder;
pub mod classify;
pub mod events;
pub mod gotest;
pub mod registry;
pub mod runner;
pub mod scan;
pub mod tree;

use std::path::PathBuf;

use thiserror::Error;

use builder::Discovery;
use events::{EventSink, ExplorerEvent};
use gotest::{GoTestExecutor, GoWorkspaceSettings};
use registry::Registry;
use runner::{RunOrchestrator, TestExecutor, WorkspaceSettings};
use scan::{GoSourceScanner, SourceScanner};
use tree::SuiteNode;

/// Errors surfaced by discovery and execution.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("scan failed: {0}")]
    Scan(String),

    #[error("test execution failed: {0}")]
    Execution(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One explorer session: a workspace root, its collaborators, and the most
/// recent discovery pass.
pub struct TestExplorer<S = GoSourceScanner, X = GoTestExecutor, W = GoWorkspaceSettings> {
    root_dir: Option<PathBuf>,
    scanner: S,
    executor: X,
    settings: W,
    discovery: Option<Discovery>,
}

impl TestExplorer {
    /// Session with the built-in Go scanner, executor, and settings.
    pub fn with_defaults(root_dir: Option<PathBuf>) -> Self {
        Self::new(
            root_dir,
            GoSourceScanner,
            GoTestExecutor,
            GoWorkspaceSettings::default(),
        )
    }
}

impl<S, X, W> TestExplorer<S, X, W>
where
    S: SourceScanner,
    X: TestExecutor,
    W: WorkspaceSettings,
{
    pub fn new(root_dir: Option<PathBuf>, scanner: S, executor: X, settings: W) -> Self {
        Self {
            root_dir,
            scanner,
            executor,
            settings,
            discovery: None,
        }
    }

    /// Root of the most recent discovery pass, if one has completed.
    pub fn tree(&self) -> Option<&SuiteNode> {
        self.discovery.as_ref().map(|d| &d.root)
    }

    /// Registry of the most recent discovery pass.
    pub fn registry(&self) -> Option<&Registry> {
        self.discovery.as_ref().map(|d| &d.registry)
    }

    /// The session's execution collaborator.
    pub fn executor(&self) -> &X {
        &self.executor
    }

    /// Run a fresh discovery pass.
    ///
    /// Emits `LoadStarted`, then either installs the new tree and registry
    /// and emits `LoadFinished`, or propagates the failure with nothing
    /// installed (no partial `LoadFinished`). The previous pass is dropped
    /// up front so stale IDs stop resolving while the rebuild is underway.
    #[tracing::instrument(skip_all)]
    pub fn load(&mut self, sink: &mut dyn EventSink) -> Result<(), ExplorerError> {
        sink.emit(ExplorerEvent::LoadStarted);
        self.discovery = None;

        let discovery = match &self.root_dir {
            Some(root) => builder::discover(root, &self.scanner)?,
            None => Discovery::placeholder(),
        };

        sink.emit(ExplorerEvent::LoadFinished {
            root: discovery.root.clone(),
        });
        self.discovery = Some(discovery);
        Ok(())
    }

    /// Run the requested node IDs against the current registry.
    ///
    /// Without a completed discovery pass every ID is unknown, so only the
    /// `RunStarted`/`RunFinished` bracket is emitted. Never fails.
    pub fn run(&self, ids: &[String], sink: &mut dyn EventSink) {
        let empty = Registry::default();
        let registry = self
            .discovery
            .as_ref()
            .map(|d| &d.registry)
            .unwrap_or(&empty);

        RunOrchestrator::new(registry, &self.executor, &self.settings).run(ids, sink);
    }

    /// Debug-mode run.
    ///
    /// # Panics
    ///
    /// Always. This is an intentionally unimplemented contract point.
    pub fn debug(&self, _ids: &[String]) {
        unimplemented!("debug runs are not supported")
    }

    /// Cancel an in-flight run.
    ///
    /// # Panics
    ///
    /// Always. This is an intentionally unimplemented contract point.
    pub fn cancel(&self) {
        unimplemented!("cancelling a run is not supported")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use super::events::TestState;
    use super::runner::ExecConfig;
    use std::path::Path;

    struct PassingExecutor;

    impl TestExecutor for PassingExecutor {
        fn execute(&self, _config: &ExecConfig) -> Result<bool, ExplorerError> {
            Ok(true)
        }
    }

    struct NoFlags;

    impl WorkspaceSettings for NoFlags {
        fn build_flags(&self) -> Vec<String> {
            Vec::new()
        }

        fn is_module_mode(&self, _dir: &Path) -> bool {
            false
        }
    }

    fn session(root: Option<PathBuf>) -> TestExplorer<GoSourceScanner, PassingExecutor, NoFlags> {
        TestExplorer::new(root, GoSourceScanner, PassingExecutor, NoFlags)
    }

    #[test]
    fn test_load_without_workspace_root_yields_placeholder() {
        let mut explorer = session(None);
        let mut events: Vec<ExplorerEvent> = Vec::new();
        explorer.load(&mut events).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ExplorerEvent::LoadStarted);
        let ExplorerEvent::LoadFinished { root } = &events[1] else {
            panic!("expected LoadFinished");
        };
        assert!(root.children.is_empty());
        assert!(explorer.registry().unwrap().is_empty());
    }

    #[test]
    fn test_failed_load_emits_no_load_finished_and_installs_nothing() {
        let mut explorer = session(Some(PathBuf::from("/definitely/not/here")));
        let mut events: Vec<ExplorerEvent> = Vec::new();
        assert!(explorer.load(&mut events).is_err());
        assert_eq!(events, vec![ExplorerEvent::LoadStarted]);
        assert!(explorer.tree().is_none());
    }

    #[test]
    fn test_run_before_load_emits_only_the_bracket() {
        let explorer = session(None);
        let mut events: Vec<ExplorerEvent> = Vec::new();
        explorer.run(&["root".to_string()], &mut events);
        assert_eq!(
            events,
            vec![
                ExplorerEvent::RunStarted { ids: vec!["root".to_string()] },
                ExplorerEvent::RunFinished,
            ]
        );
    }

    #[test]
    fn test_load_then_run_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("demo_test.go"),
            "package demo\n\nfunc TestA(t *testing.T) {}\n",
        )
        .unwrap();

        let mut explorer = session(Some(dir.path().to_path_buf()));
        let mut load_events: Vec<ExplorerEvent> = Vec::new();
        explorer.load(&mut load_events).unwrap();

        let file_suite_id = explorer.tree().unwrap().children[0].id().to_string();
        let mut events: Vec<ExplorerEvent> = Vec::new();
        explorer.run(&[file_suite_id], &mut events);

        assert!(events.iter().any(|e| matches!(
            e,
            ExplorerEvent::Test { state: TestState::Passed, .. }
        )));
    }

    #[test]
    #[should_panic(expected = "debug runs are not supported")]
    fn test_debug_is_a_defined_failure() {
        session(None).debug(&[]);
    }

    #[test]
    #[should_panic(expected = "cancelling a run is not supported")]
    fn test_cancel_is_a_defined_failure() {
        session(None).cancel();
    }
}
