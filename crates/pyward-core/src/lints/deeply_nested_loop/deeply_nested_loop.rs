use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{LOOP_KINDS, SCOPE_KINDS};

/// Deepest nesting level of loops that is not reported.
const MAX_LOOP_DEPTH: usize = 2;

pub struct DeeplyNestedLoop {
    depth: usize,
}

/// ## What it does
///
/// Checks for loops nested more than two levels deep in the same function
/// (or module).
///
/// ## Why is this bad?
///
/// The cost of the innermost body grows with the product of all the loop
/// sizes, which quickly becomes the bottleneck of a program. Such code is
/// also hard to follow.
///
/// Loops in nested functions start counting from zero again.
///
/// ## Example
///
/// ```python
/// for a in xs:
///     for b in ys:
///         for c in zs:
///             visit(a, b, c)
/// ```
///
/// Use instead:
/// ```python
/// for a, b, c in itertools.product(xs, ys, zs):
///     visit(a, b, c)
/// ```
impl Violation for DeeplyNestedLoop {
    fn check(&self) -> Check {
        Check::DeeplyNestedLoop
    }
    fn body(&self) -> String {
        format!("Loop nested {} levels deep.", self.depth)
    }
    fn suggestion(&self) -> Option<String> {
        Some(
            "Move the inner loops into a function, or flatten them with `itertools.product()`."
                .to_string(),
        )
    }
}

pub fn deeply_nested_loop(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let diagnostics = model
        .preorder()
        .filter(|node| LOOP_KINDS.contains(&node.kind()))
        .filter_map(|node| {
            let depth = loop_depth(node);
            (depth > MAX_LOOP_DEPTH)
                .then(|| Diagnostic::at_node(DeeplyNestedLoop { depth }, model, node))
        })
        .collect();

    Ok(diagnostics)
}

// 1 for a loop that is not inside another loop of the same scope.
fn loop_depth(node: Node<'_>) -> usize {
    let mut depth = 1;
    let mut current = node;
    while let Some(parent) = current.parent() {
        if SCOPE_KINDS.contains(&parent.kind()) {
            break;
        }
        if LOOP_KINDS.contains(&parent.kind()) {
            depth += 1;
        }
        current = parent;
    }
    depth
}
