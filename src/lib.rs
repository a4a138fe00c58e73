#![forbid(unsafe_code)]
//! Go Test Explorer Engine
//!
//! The engine behind an editor's "test explorer" for Go projects: it walks a
//! workspace for `_test.go` files, classifies the test functions they declare
//! (plain tests, testify-style suite runners, suite-member methods), builds a
//! hierarchical suite/test tree with stable node IDs, and drives selective
//! runs of that tree through `go test`, reporting structured lifecycle events.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `explorer` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Unsupported contract points**: [`TestExplorer::debug`] and [`TestExplorer::cancel`] are intentionally
//!   unimplemented entry points and panic via `unimplemented!`. Hosts may probe them; they are defined failures,
//!   not degraded paths.

pub mod cli;
pub mod explorer;

pub use explorer::builder::{Discovery, discover};
pub use explorer::classify::{Classification, classify};
pub use explorer::events::{EventSink, ExplorerEvent, SuiteState, TestState};
pub use explorer::gotest::{GoTestExecutor, GoWorkspaceSettings};
pub use explorer::registry::{Registry, RunRecord};
pub use explorer::runner::{ExecConfig, RunOrchestrator, TestExecutor, WorkspaceSettings};
pub use explorer::scan::{GoSourceScanner, ScanOutcome, SourceScanner, TestSymbol};
pub use explorer::tree::{SuiteNode, TestCase, TestNode};
pub use explorer::{ExplorerError, TestExplorer};
