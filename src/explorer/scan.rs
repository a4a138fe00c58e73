//! Source scanning I/O boundary
//!
//! The tree builder only needs two things from a test file: the ordered list
//! of test-like function symbols (with the line they are declared on) and
//! the subset of those symbols that are suite runners. How runners are
//! detected is an implementation detail of the scanner; the core treats this
//! as a black box so an editor host can plug in a symbol provider (e.g.
//! gopls document symbols) instead.
//!
//! [`GoSourceScanner`] is the built-in implementation: a line-based scan of
//! the Go source, good enough for conventional `gofmt`-formatted files.

use std::fs;
use std::path::Path;

use super::ExplorerError;

/// One test-like function symbol discovered in a file.
///
/// `name` is the raw symbol: `TestFoo` for a top-level function,
/// `(*MySuite).TestFoo` for a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSymbol {
    pub name: String,
    /// Zero-based line of the declaration, for editor navigation.
    pub line: u32,
}

/// Everything the tree builder needs from one test file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// All test-like symbols, in declaration order.
    pub symbols: Vec<TestSymbol>,
    /// Names of the symbols that are suite runners (a subset of `symbols`).
    pub suite_runners: Vec<String>,
}

/// Scan a test file for test symbols and suite runners.
pub trait SourceScanner {
    fn scan(&self, file: &Path) -> Result<ScanOutcome, ExplorerError>;
}

/// Line-based scanner for Go test files.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoSourceScanner;

impl SourceScanner for GoSourceScanner {
    fn scan(&self, file: &Path) -> Result<ScanOutcome, ExplorerError> {
        // Wrapped rather than `?`-propagated as Io so the error names the
        // file; the walk's own read_dir errors stay plain Io.
        let source = fs::read_to_string(file)
            .map_err(|e| ExplorerError::Scan(format!("{}: {e}", file.display())))?;
        Ok(scan_source(&source))
    }
}

/// Scan Go source text for test functions.
///
/// Recognizes top-level declarations only (column zero, the `gofmt` shape):
///
/// - `func TestXxx(...)` yields symbol `TestXxx`
/// - `func (r *Recv) TestXxx(...)` yields symbol `(*Recv).TestXxx`
/// - `func (r Recv) TestXxx(...)` yields symbol `(Recv).TestXxx`
///
/// A top-level test function whose body contains a `suite.Run(` call is
/// reported as a suite runner. Only functions whose name starts with `Test`
/// participate.
pub fn scan_source(source: &str) -> ScanOutcome {
    let lines: Vec<&str> = source.lines().collect();
    let mut outcome = ScanOutcome::default();

    for (idx, line) in lines.iter().enumerate() {
        let Some(decl) = parse_func_decl(line) else {
            continue;
        };
        if !decl.method.starts_with("Test") {
            continue;
        }
        if !decl.has_receiver && body_calls_suite_run(&lines[idx..]) {
            outcome.suite_runners.push(decl.raw.clone());
        }
        outcome.symbols.push(TestSymbol {
            name: decl.raw,
            line: idx as u32,
        });
    }

    outcome
}

struct FuncDecl {
    /// Raw symbol name, receiver-qualified for methods.
    raw: String,
    /// Bare function or method name.
    method: String,
    has_receiver: bool,
}

/// Parse a single line as a top-level Go `func` declaration.
fn parse_func_decl(line: &str) -> Option<FuncDecl> {
    let rest = line.strip_prefix("func ")?;

    if let Some(recv_rest) = rest.strip_prefix('(') {
        // Method: func (r *Recv) Name(...)
        let close = recv_rest.find(')')?;
        let receiver_ty = recv_rest[..close].split_whitespace().last()?;
        let (pointer, ty) = match receiver_ty.strip_prefix('*') {
            Some(ty) => (true, ty),
            None => (false, receiver_ty),
        };
        if ty.is_empty() {
            return None;
        }
        let name = ident_before_paren(recv_rest[close + 1..].trim_start())?;
        let raw = if pointer {
            format!("(*{ty}).{name}")
        } else {
            format!("({ty}).{name}")
        };
        Some(FuncDecl {
            raw,
            method: name.to_string(),
            has_receiver: true,
        })
    } else {
        // Plain function: func Name(...)
        let name = ident_before_paren(rest)?;
        Some(FuncDecl {
            raw: name.to_string(),
            method: name.to_string(),
            has_receiver: false,
        })
    }
}

/// Leading identifier of `s`, required to be followed by `(`.
fn ident_before_paren(s: &str) -> Option<&str> {
    let end = s.find(|c: char| !(c.is_alphanumeric() || c == '_'))?;
    if end == 0 || !s[end..].starts_with('(') {
        return None;
    }
    Some(&s[..end])
}

/// Whether the function body starting at `lines[0]` calls `suite.Run(`.
///
/// The body ends at the first closing brace in column zero, which is where
/// `gofmt` puts it for a top-level function.
fn body_calls_suite_run(lines: &[&str]) -> bool {
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 && (line.starts_with('}') || line.starts_with("func ")) {
            return false;
        }
        if line.contains("suite.Run(") {
            return true;
        }
    }
    false
}
