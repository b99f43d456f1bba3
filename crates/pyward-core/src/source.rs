//! Source Model Builder: parses Python text into a position-annotated tree.
//!
//! The tree is tree-sitter's lossless concrete syntax tree. Each node knows
//! its byte range and its zero-based (row, column) points, which is enough
//! to report exact lines and to splice edits back into the original text.

use std::ops::Range;

use tree_sitter::{Node, Tree, TreeCursor};

use crate::error::Error;

/// A parsed Python source unit.
///
/// Built fresh for every call and never mutated afterwards. The fix engine
/// edits the text and re-parses rather than touching a shared tree.
#[derive(Debug)]
pub struct SourceModel {
    tree: Tree,
    source: String,
    // Byte offset of the first character of every line.
    line_starts: Vec<usize>,
    // Byte ranges of all `comment` nodes, in source order.
    comments: Vec<Range<usize>>,
}

impl SourceModel {
    /// Parses `source`, failing with [`Error::Syntax`] if it is not valid
    /// Python. Nothing from the input is ever executed.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| Error::ParserInit { message: e.to_string() })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::ParserInit { message: "parsing was cancelled".to_string() })?;

        if tree.root_node().has_error() {
            return Err(first_syntax_error(tree.root_node()));
        }
        if let Some(err) = rejected_construct(tree.root_node()) {
            return Err(err);
        }

        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        let comments = Preorder::new(tree.root_node())
            .filter(|node| node.kind() == "comment")
            .map(|node| node.byte_range())
            .collect();

        Ok(Self { tree, source: source.to_string(), line_starts, comments })
    }

    /// Returns the source text that was parsed.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the `module` node at the root of the tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the source text covered by `node`.
    pub fn text(&self, node: Node<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// One-based line on which `node` starts.
    pub fn line(&self, node: Node<'_>) -> usize {
        node.start_position().row + 1
    }

    /// Number of lines in the source. An empty source has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => self.line_starts[idx],
            Err(idx) => self.line_starts[idx.saturating_sub(1)],
        }
    }

    /// Byte offset just past the end of the line containing `offset`,
    /// including its newline character if there is one.
    pub fn line_end(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => self.line_starts.get(idx + 1).copied(),
            Err(idx) => self.line_starts.get(idx).copied(),
        }
        .unwrap_or(self.source.len())
    }

    /// All nodes of the tree, parents before children, in source order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self.root())
    }

    /// All nodes of the given kind, in source order.
    pub fn nodes_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = Node<'a>> + 'a {
        self.preorder().filter(move |node| node.kind() == kind)
    }

    /// Returns true if a comment starts inside `range`.
    pub fn contains_comments(&self, range: Range<usize>) -> bool {
        self.comments
            .iter()
            .any(|comment| comment.start >= range.start && comment.start < range.end)
    }
}

/// Pre-order iterator over a subtree.
pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Preorder<'tree> {
    /// Iterates over `root` and all of its descendants.
    pub fn new(root: Node<'tree>) -> Self {
        Self { cursor: root.walk(), done: false }
    }
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }

        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}

fn first_syntax_error(root: Node<'_>) -> Error {
    let culprit = Preorder::new(root).find(|node| node.is_error() || node.is_missing());

    match culprit {
        Some(node) => {
            let start = node.start_position();
            let message = if node.is_missing() {
                format!("missing \"{}\"", node.kind())
            } else {
                "invalid syntax".to_string()
            };
            Error::Syntax { line: start.row + 1, column: start.column + 1, message }
        }
        // `has_error()` was true, so this only happens if the error is
        // carried by the root itself.
        None => {
            let start = root.start_position();
            Error::Syntax {
                line: start.row + 1,
                column: start.column + 1,
                message: "invalid syntax".to_string(),
            }
        }
    }
}

// Constructs the grammar accepts without an ERROR node but Python 3 rejects.
// `exec` statements are left to the `no_exec` check.
fn rejected_construct(root: Node<'_>) -> Option<Error> {
    Preorder::new(root).find_map(|node| {
        let (position, message) = match node.kind() {
            // A suite that is only a newline. Reported where the indented
            // block should have started.
            "block" if is_empty_block(node) => (node.end_position(), "expected an indented block"),
            // `print >>f, x` is also a valid Python 3 expression.
            "print_statement" if !has_chevron(node) => (node.start_position(), "`print` statement"),
            "<>" => (node.start_position(), "`<>` operator"),
            _ => return None,
        };
        Some(Error::Syntax {
            line: position.row + 1,
            column: position.column + 1,
            message: message.to_string(),
        })
    })
}

fn has_chevron(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|child| child.kind() == "chevron")
}

fn is_empty_block(block: Node<'_>) -> bool {
    let mut cursor = block.walk();
    block
        .named_children(&mut cursor)
        .all(|child| child.kind() == "comment")
}
