//! Identity registry
//!
//! Maps a stable node ID to the metadata a run needs: the node itself, the
//! underlying function name the external runner must target, and any suite
//! runners that have to be invoked alongside a suite-member test. Populated
//! exclusively by the tree builder during a discovery pass and replaced
//! wholesale on the next one; read-only during a run.

use std::collections::HashMap;

use super::tree::{SuiteNode, TestCase, TestNode};

/// Execution metadata for one registered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub node: TestNode,
    /// Raw function identifier the external runner must target; empty for
    /// suites.
    pub function_name: String,
    /// Suite-runner function names from the same file; non-empty exactly
    /// when the test is a suite member.
    pub suite_names: Vec<String>,
}

impl RunRecord {
    pub fn suite(node: &SuiteNode) -> Self {
        Self {
            node: TestNode::Suite(node.clone()),
            function_name: String::new(),
            suite_names: Vec::new(),
        }
    }

    pub fn test(node: &TestCase, function_name: impl Into<String>, suite_names: Vec<String>) -> Self {
        Self {
            node: TestNode::Test(node.clone()),
            function_name: function_name.into(),
            suite_names,
        }
    }
}

/// ID-to-record lookup table for one discovery pass.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, RunRecord>,
}

impl Registry {
    /// Compose a registry from the builder's registration list.
    ///
    /// Later registrations win, but IDs are unique within one pass by
    /// construction.
    pub fn from_records(records: Vec<(String, RunRecord)>) -> Self {
        Self {
            entries: records.into_iter().collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&RunRecord> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn case(id: &str) -> TestCase {
        TestCase {
            id: id.to_string(),
            label: "TestFoo".to_string(),
            description: String::new(),
            file: PathBuf::from("/ws/a_test.go"),
            line: 0,
        }
    }

    #[test]
    fn test_suite_record_is_empty() {
        let record = RunRecord::suite(&SuiteNode::new("root", "ws"));
        assert!(record.function_name.is_empty());
        assert!(record.suite_names.is_empty());
    }

    #[test]
    fn test_from_records_lookup() {
        let registry = Registry::from_records(vec![
            ("root".to_string(), RunRecord::suite(&SuiteNode::new("root", "ws"))),
            (
                "t1".to_string(),
                RunRecord::test(&case("t1"), "TestFoo", vec![]),
            ),
        ]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("root"));
        assert_eq!(registry.get("t1").unwrap().function_name, "TestFoo");
        assert!(registry.get("missing").is_none());
    }
}
