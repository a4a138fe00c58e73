//! Command implementations for the CLI

use std::path::Path;

use crate::explorer::TestExplorer;
use crate::explorer::builder::ROOT_ID;
use crate::explorer::events::{EventSink, ExplorerEvent, TestState, event_to_json};
use crate::explorer::gotest::{GoTestExecutor, GoWorkspaceSettings};
use crate::explorer::runner::{TestExecutor, WorkspaceSettings};
use crate::explorer::scan::{GoSourceScanner, SourceScanner};
use crate::explorer::tree::{TestNode, node_to_json};

use super::{CliError, CliResult, ExitCode};

/// Discover tests under `path` and print the tree.
pub fn list_tree(path: &Path, json: bool) -> CliResult<ExitCode> {
    let mut explorer = TestExplorer::with_defaults(Some(path.to_path_buf()));
    load(&mut explorer)?;

    let Some(tree) = explorer.tree() else {
        return Err(CliError::failure("discovery produced no tree"));
    };

    if json {
        println!("{}", node_to_json(&TestNode::Suite(tree.clone())));
    } else {
        eprintln!("collected {} test(s)", tree.test_count());
        println!("{}", tree.render());
    }

    Ok(ExitCode::SUCCESS)
}

/// Discover tests under `path`, then run the requested node IDs.
///
/// With no IDs the whole tree is run. Exit code reflects whether any test
/// failed.
pub fn run_ids(
    path: &Path,
    ids: &[String],
    build_flags: Vec<String>,
    json: bool,
) -> CliResult<ExitCode> {
    let mut explorer = TestExplorer::new(
        Some(path.to_path_buf()),
        GoSourceScanner,
        GoTestExecutor,
        GoWorkspaceSettings::new(build_flags),
    );
    load(&mut explorer)?;

    let ids: Vec<String> = if ids.is_empty() {
        vec![ROOT_ID.to_string()]
    } else {
        ids.to_vec()
    };

    let mut sink = ReportingSink::new(json);
    explorer.run(&ids, &mut sink);

    if !json {
        sink.print_summary();
    }

    if sink.failed > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn load<S, X, W>(explorer: &mut TestExplorer<S, X, W>) -> CliResult<()>
where
    S: SourceScanner,
    X: TestExecutor,
    W: WorkspaceSettings,
{
    // The CLI has no use for load events; a Vec sink swallows them.
    let mut events: Vec<ExplorerEvent> = Vec::new();
    explorer
        .load(&mut events)
        .map_err(|e| CliError::failure(format!("discovery failed: {e}")))
}

/// Sink used by `run`: prints events (text or JSON lines) and tallies test
/// outcomes for the exit code and summary.
struct ReportingSink {
    json: bool,
    passed: usize,
    failed: usize,
}

impl ReportingSink {
    fn new(json: bool) -> Self {
        Self {
            json,
            passed: 0,
            failed: 0,
        }
    }

    fn print_summary(&self) {
        let color = if self.failed > 0 { "\x1b[1;31m" } else { "\x1b[1;32m" };
        eprintln!(
            "{}====== {} passed, {} failed ======\x1b[0m",
            color, self.passed, self.failed
        );
    }
}

impl EventSink for ReportingSink {
    fn emit(&mut self, event: ExplorerEvent) {
        match &event {
            ExplorerEvent::Test { state: TestState::Passed, .. } => self.passed += 1,
            ExplorerEvent::Test { state: TestState::Failed, .. } => self.failed += 1,
            _ => {}
        }

        if self.json {
            println!("{}", event_to_json(&event));
            return;
        }

        match &event {
            ExplorerEvent::Test { id, state: TestState::Passed } => {
                println!("{id} \x1b[32mPASSED\x1b[0m");
            }
            ExplorerEvent::Test { id, state: TestState::Failed } => {
                println!("{id} \x1b[31mFAILED\x1b[0m");
            }
            // Running/suite/bracket events are UI state, noise on a terminal.
            _ => {}
        }
    }
}
