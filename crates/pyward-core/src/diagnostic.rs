use std::fmt;
use std::ops::Range;

use tree_sitter::Node;

use crate::registry::{Category, Check};
use crate::source::SourceModel;

#[derive(Debug, Clone, PartialEq, Eq)]
// An edit that removes the violation, expressed against the byte offsets of
// the source the diagnostic was computed on.
pub struct Fix {
    pub content: String,
    pub start: usize,
    pub end: usize,
    // One line of the fix log per applied fix.
    pub description: String,
}

impl Fix {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether two fixes would perform exactly the same edit.
    pub fn same_edit(&self, other: &Fix) -> bool {
        self.start == other.start && self.end == other.end && self.content == other.content
    }
}

/// Details on the violated check.
pub trait Violation {
    /// The check that reports this violation.
    fn check(&self) -> Check;
    /// Explanation of the problem.
    fn body(&self) -> String;
    /// Optional suggestion for how to fix the violation.
    fn suggestion(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationData {
    pub check: Check,
    pub body: String,
    pub suggestion: Option<String>,
}

impl<T: Violation> From<T> for ViolationData {
    fn from(value: T) -> Self {
        Self {
            check: Violation::check(&value),
            body: Violation::body(&value),
            suggestion: Violation::suggestion(&value),
        }
    }
}

impl ViolationData {
    pub fn new(check: Check, body: String, suggestion: Option<String>) -> Self {
        Self { check, body, suggestion }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
// A single finding. Produced by a check during one analysis pass and
// discarded when the call returns.
pub struct Diagnostic {
    pub message: ViolationData,
    // One-based line, always within the analysed source.
    pub line: usize,
    pub range: Range<usize>,
    // Only filled in by fixable checks, and only when the edit is safe.
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn new<T: Into<ViolationData>>(message: T, line: usize, range: Range<usize>) -> Self {
        Self { message: message.into(), line, range, fix: None }
    }

    /// A diagnostic located at `node`.
    pub fn at_node<T: Into<ViolationData>>(message: T, model: &SourceModel, node: Node<'_>) -> Self {
        Self::new(message, model.line(node), node.byte_range())
    }

    pub fn with_fix(mut self, fix: Option<Fix>) -> Self {
        self.fix = fix;
        self
    }

    pub fn check(&self) -> Check {
        self.message.check
    }

    pub fn category(&self) -> Category {
        self.message.check.category()
    }

    /// The message as shown to users: the body, followed by the suggestion
    /// if there is one.
    pub fn text(&self) -> String {
        match &self.message.suggestion {
            Some(suggestion) => format!("{} {}", self.message.body, suggestion),
            None => self.message.body.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.text())
    }
}
