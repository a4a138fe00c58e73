//! Default external collaborators backed by the `go` toolchain
//!
//! [`GoTestExecutor`] shells out to `go test` with a `-run` pattern built
//! from the target function list; [`GoWorkspaceSettings`] supplies build
//! flags and decides module mode by probing for a `go.mod`.

use std::path::Path;
use std::process::Command;

use super::ExplorerError;
use super::classify::classify;
use super::runner::{ExecConfig, TestExecutor, WorkspaceSettings};

/// Runs tests through `go test`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoTestExecutor;

impl GoTestExecutor {
    /// `-run` / `-bench` pattern for the target list.
    ///
    /// Receiver-qualified names are stripped to their method name (the
    /// runner addresses suite members through their suite runner, which is
    /// also in the list), then anchored and alternated: `^(A|B)$`.
    fn run_pattern(targets: &[String]) -> String {
        let mut names: Vec<String> = Vec::new();
        for target in targets {
            let name = classify(target).display_name;
            if !names.contains(&name) {
                names.push(name);
            }
        }
        format!("^({})$", names.join("|"))
    }

    /// Assemble the `go test` invocation for one config.
    ///
    /// A benchmark invocation pins `-run` to `^$` so no tests execute
    /// alongside the `-bench` pattern.
    fn build_command(config: &ExecConfig) -> Command {
        let pattern = Self::run_pattern(&config.target_functions);

        let mut cmd = Command::new("go");
        cmd.arg("test");
        if config.is_benchmark {
            cmd.arg("-run").arg("^$").arg("-bench").arg(&pattern);
        } else {
            cmd.arg("-run").arg(&pattern);
        }
        if config.coverage_requested {
            cmd.arg("-cover");
        }
        cmd.args(&config.build_flags);
        cmd.current_dir(&config.working_dir);
        cmd.env("GO111MODULE", if config.is_module_mode { "on" } else { "auto" });
        cmd
    }
}

impl TestExecutor for GoTestExecutor {
    fn execute(&self, config: &ExecConfig) -> Result<bool, ExplorerError> {
        let output = Self::build_command(config)
            .output()
            .map_err(|e| ExplorerError::Execution(format!("failed to run go test: {e}")))?;

        if !output.status.success() {
            tracing::debug!(
                dir = %config.working_dir.display(),
                "go test reported failure:\n{}",
                String::from_utf8_lossy(&output.stdout)
            );
        }

        Ok(output.status.success())
    }
}

/// Workspace configuration sourced from construction-time flags and the
/// on-disk module layout.
#[derive(Debug, Default, Clone)]
pub struct GoWorkspaceSettings {
    build_flags: Vec<String>,
}

impl GoWorkspaceSettings {
    pub fn new(build_flags: Vec<String>) -> Self {
        Self { build_flags }
    }
}

impl WorkspaceSettings for GoWorkspaceSettings {
    fn build_flags(&self) -> Vec<String> {
        self.build_flags.clone()
    }

    /// Module mode when `dir` or any ancestor carries a `go.mod`.
    fn is_module_mode(&self, dir: &Path) -> bool {
        dir.ancestors().any(|a| a.join("go.mod").is_file())
    }
}
