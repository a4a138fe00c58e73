//! Suite/test tree model
//!
//! Nodes are immutable once discovery has produced them; IDs are derived
//! deterministically from the path down from the tree root, so re-discovery
//! of an unchanged workspace reproduces identical IDs.

use std::path::PathBuf;

/// A node in the discovered tree: a grouping suite or a runnable test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestNode {
    Suite(SuiteNode),
    Test(TestCase),
}

impl TestNode {
    pub fn id(&self) -> &str {
        match self {
            TestNode::Suite(s) => &s.id,
            TestNode::Test(t) => &t.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TestNode::Suite(s) => &s.label,
            TestNode::Test(t) => &t.label,
        }
    }
}

/// A directory or test-file grouping of tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteNode {
    pub id: String,
    pub label: String,
    pub children: Vec<TestNode>,
}

impl SuiteNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Total number of test leaves anywhere under this suite.
    pub fn test_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                TestNode::Suite(s) => s.test_count(),
                TestNode::Test(_) => 1,
            })
            .sum()
    }

    /// Render the tree as indented text, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node_into(&TestNode::Suite(self.clone()), 0, &mut out);
        out.trim_end().to_string()
    }
}

fn render_node_into(node: &TestNode, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(node.label());
    out.push('\n');
    if let TestNode::Suite(suite) = node {
        for child in &suite.children {
            render_node_into(child, depth + 1, out);
        }
    }
}

/// One runnable test function (or suite-member test).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub id: String,
    pub label: String,
    /// Secondary display text: the raw receiver-qualified name for suite
    /// members, empty for plain tests.
    pub description: String,
    /// File the enclosing function is declared in; used for navigation and
    /// as the working directory for execution.
    pub file: PathBuf,
    /// Zero-based declaration line, for navigation only.
    pub line: u32,
}

/// JSON rendering of a node, for machine consumers of `list --json`.
pub fn node_to_json(node: &TestNode) -> serde_json::Value {
    match node {
        TestNode::Suite(suite) => serde_json::json!({
            "type": "suite",
            "id": suite.id,
            "label": suite.label,
            "children": suite.children.iter().map(node_to_json).collect::<Vec<_>>(),
        }),
        TestNode::Test(test) => serde_json::json!({
            "type": "test",
            "id": test.id,
            "label": test.label,
            "description": test.description,
            "file": test.file.display().to_string(),
            "line": test.line,
        }),
    }
}
