//! Tree builder: one discovery pass over a workspace
//!
//! Walks the root directory recursively, building a suite node per
//! subdirectory and per `_test.go` file, classifying each discovered
//! function, and collecting a registration list on the side. The caller
//! composes that list into the [`Registry`]; nothing in the returned tree
//! aliases a registry entry.

use std::fs;
use std::path::Path;

use super::ExplorerError;
use super::classify::classify;
use super::registry::{Registry, RunRecord};
use super::scan::SourceScanner;
use super::tree::{SuiteNode, TestCase, TestNode};

/// File name suffix that marks a Go test file.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// ID of the tree root. Child IDs are derived from it segment by segment.
pub const ROOT_ID: &str = "root";

/// Result of one discovery pass: the tree and the registry addressing it.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub root: SuiteNode,
    pub registry: Registry,
}

impl Discovery {
    /// Fixed result for a session without a workspace root: an empty
    /// placeholder suite and an empty registry, no walk performed.
    pub fn placeholder() -> Self {
        Self {
            root: SuiteNode::new(ROOT_ID, "no workspace"),
            registry: Registry::default(),
        }
    }
}

/// Run one discovery pass from `root`.
///
/// Any I/O error mid-walk aborts the entire pass; no partial tree or
/// registry is produced.
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn discover(root: &Path, scanner: &dyn SourceScanner) -> Result<Discovery, ExplorerError> {
    let label = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut records: Vec<(String, RunRecord)> = Vec::new();
    let tree = walk_dir(root, ROOT_ID, &label, scanner, &mut records)?;
    records.push((tree.id.clone(), RunRecord::suite(&tree)));

    tracing::debug!(
        tests = tree.test_count(),
        registered = records.len(),
        "discovery pass complete"
    );

    Ok(Discovery {
        root: tree,
        registry: Registry::from_records(records),
    })
}

/// Build the suite for one directory.
///
/// Entries are taken in directory-enumeration order, not re-sorted.
/// Subdirectory suites are attached (and registered) only when the recursion
/// produced at least one child; file suites are always attached, even with
/// zero test children.
fn walk_dir(
    dir: &Path,
    id: &str,
    label: &str,
    scanner: &dyn SourceScanner,
    records: &mut Vec<(String, RunRecord)>,
) -> Result<SuiteNode, ExplorerError> {
    let mut suite = SuiteNode::new(id, label);

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if entry.file_type()?.is_dir() {
            let child_id = format!("{}_{}", suite.id, name);
            let child = walk_dir(&path, &child_id, &name, scanner, records)?;
            if child.children.is_empty() {
                continue;
            }
            records.push((child.id.clone(), RunRecord::suite(&child)));
            suite.children.push(TestNode::Suite(child));
        } else if name.ends_with(TEST_FILE_SUFFIX) {
            let file_suite = build_file_suite(&path, &name, &suite.id, scanner, records)?;
            records.push((file_suite.id.clone(), RunRecord::suite(&file_suite)));
            suite.children.push(TestNode::Suite(file_suite));
        }
    }

    Ok(suite)
}

/// Build the suite for one test file from the scanner's output.
///
/// Suite-runner symbols are excluded from the tree; the remaining tests are
/// sorted case-insensitively by display name. A file with zero remaining
/// tests still yields an (empty) suite node.
fn build_file_suite(
    path: &Path,
    file_name: &str,
    parent_id: &str,
    scanner: &dyn SourceScanner,
    records: &mut Vec<(String, RunRecord)>,
) -> Result<SuiteNode, ExplorerError> {
    let outcome = scanner.scan(path)?;
    let runner_names = outcome.suite_runners;

    let mut suite = SuiteNode::new(path.display().to_string(), file_name);

    let mut tests: Vec<(TestCase, String, Vec<String>)> = Vec::new();
    for symbol in &outcome.symbols {
        if runner_names.contains(&symbol.name) {
            continue;
        }
        let class = classify(&symbol.name);
        let case = TestCase {
            id: format!("{parent_id}_{file_name}_{}", symbol.name),
            label: class.display_name,
            description: if class.is_suite_member {
                symbol.name.clone()
            } else {
                String::new()
            },
            file: path.to_path_buf(),
            line: symbol.line,
        };
        let suite_names = if class.is_suite_member {
            runner_names.clone()
        } else {
            Vec::new()
        };
        tests.push((case, symbol.name.clone(), suite_names));
    }

    tests.sort_by(|a, b| a.0.label.to_lowercase().cmp(&b.0.label.to_lowercase()));

    for (case, raw_name, suite_names) in tests {
        records.push((case.id.clone(), RunRecord::test(&case, raw_name, suite_names)));
        suite.children.push(TestNode::Test(case));
    }

    Ok(suite)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::explorer::scan::{ScanOutcome, TestSymbol};
    use std::collections::HashMap;

    /// Scanner fed from a canned map, so builder semantics can be tested
    /// without touching real Go source.
    struct MapScanner {
        files: HashMap<String, ScanOutcome>,
    }

    impl SourceScanner for MapScanner {
        fn scan(&self, file: &Path) -> Result<ScanOutcome, ExplorerError> {
            let name = file.file_name().unwrap().to_string_lossy().into_owned();
            Ok(self.files.get(&name).cloned().unwrap_or_default())
        }
    }

    fn symbol(name: &str, line: u32) -> TestSymbol {
        TestSymbol { name: name.to_string(), line }
    }

    #[test]
    fn test_placeholder_discovery() {
        let discovery = Discovery::placeholder();
        assert_eq!(discovery.root.id, ROOT_ID);
        assert!(discovery.root.children.is_empty());
        assert!(discovery.registry.is_empty());
    }

    #[test]
    fn test_file_suite_ordering_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ord_test.go"), "").unwrap();

        let scanner = MapScanner {
            files: HashMap::from([(
                "ord_test.go".to_string(),
                ScanOutcome {
                    symbols: vec![symbol("TestB", 1), symbol("testA", 2), symbol("TestC", 3)],
                    suite_runners: vec![],
                },
            )]),
        };

        let discovery = discover(dir.path(), &scanner).unwrap();
        let TestNode::Suite(file_suite) = &discovery.root.children[0] else {
            panic!("expected file suite");
        };
        let labels: Vec<&str> = file_suite.children.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["testA", "TestB", "TestC"]);
    }

    #[test]
    fn test_suite_member_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("suite_test.go"), "").unwrap();

        let scanner = MapScanner {
            files: HashMap::from([(
                "suite_test.go".to_string(),
                ScanOutcome {
                    symbols: vec![
                        symbol("(*MySuite).TestFoo", 5),
                        symbol("TestMySuite", 10),
                        symbol("TestPlain", 15),
                    ],
                    suite_runners: vec!["TestMySuite".to_string()],
                },
            )]),
        };

        let discovery = discover(dir.path(), &scanner).unwrap();

        // Runner is excluded from the tree.
        let TestNode::Suite(file_suite) = &discovery.root.children[0] else {
            panic!("expected file suite");
        };
        let labels: Vec<&str> = file_suite.children.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["TestFoo", "TestPlain"]);

        // Member test carries the raw name plus the runner.
        let member_id = file_suite.children[0].id();
        let record = discovery.registry.get(member_id).unwrap();
        assert_eq!(record.function_name, "(*MySuite).TestFoo");
        assert_eq!(record.suite_names, vec!["TestMySuite"]);

        // Plain test targets only itself.
        let plain_id = file_suite.children[1].id();
        let record = discovery.registry.get(plain_id).unwrap();
        assert_eq!(record.function_name, "TestPlain");
        assert!(record.suite_names.is_empty());
    }

    #[test]
    fn test_empty_directory_is_pruned_but_empty_file_suite_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nothing")).unwrap();
        std::fs::write(dir.path().join("empty_test.go"), "").unwrap();

        let scanner = MapScanner { files: HashMap::new() };
        let discovery = discover(dir.path(), &scanner).unwrap();

        // The empty subdirectory is absent and unregistered; the empty file
        // suite is present with zero children.
        assert_eq!(discovery.root.children.len(), 1);
        let TestNode::Suite(file_suite) = &discovery.root.children[0] else {
            panic!("expected file suite");
        };
        assert_eq!(file_suite.label, "empty_test.go");
        assert!(file_suite.children.is_empty());
        assert!(!discovery.registry.contains("root_nothing"));
        assert!(discovery.registry.contains(&file_suite.id));
    }

    #[test]
    fn test_non_test_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.go"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let scanner = MapScanner { files: HashMap::new() };
        let discovery = discover(dir.path(), &scanner).unwrap();
        assert!(discovery.root.children.is_empty());
        // Only the root itself is registered.
        assert_eq!(discovery.registry.len(), 1);
    }

    #[test]
    fn test_ids_are_derived_from_the_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pkg")).unwrap();
        std::fs::write(dir.path().join("pkg").join("pkg_test.go"), "").unwrap();

        let scanner = MapScanner {
            files: HashMap::from([(
                "pkg_test.go".to_string(),
                ScanOutcome {
                    symbols: vec![symbol("TestA", 0)],
                    suite_runners: vec![],
                },
            )]),
        };

        let discovery = discover(dir.path(), &scanner).unwrap();
        let TestNode::Suite(pkg) = &discovery.root.children[0] else {
            panic!("expected directory suite");
        };
        assert_eq!(pkg.id, "root_pkg");
        let TestNode::Suite(file_suite) = &pkg.children[0] else {
            panic!("expected file suite");
        };
        assert_eq!(
            file_suite.id,
            dir.path().join("pkg").join("pkg_test.go").display().to_string()
        );
        assert_eq!(file_suite.children[0].id(), "root_pkg_pkg_test.go_TestA");
    }

    #[test]
    fn test_missing_root_propagates_io_error() {
        let scanner = MapScanner { files: HashMap::new() };
        let err = discover(Path::new("/definitely/not/here"), &scanner).unwrap_err();
        assert!(matches!(err, ExplorerError::Io(_)));
    }
}
