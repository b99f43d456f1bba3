use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{call_name, has_splat_arguments, positional_arguments};

pub struct RangeLen {
    sequence: String,
}

/// ## What it does
///
/// Checks for `for i in range(len(x))` loops.
///
/// ## Why is this bad?
///
/// Indexing `x[i]` at every iteration is slower and harder to read than
/// iterating over `x` directly. When the index is needed too, `enumerate()`
/// provides both.
///
/// ## Example
///
/// ```python
/// for i in range(len(items)):
///     print(i, items[i])
/// ```
///
/// Use instead:
/// ```python
/// for i, item in enumerate(items):
///     print(i, item)
/// ```
impl Violation for RangeLen {
    fn check(&self) -> Check {
        Check::RangeLen
    }
    fn body(&self) -> String {
        format!("Loop over `range(len({}))`.", self.sequence)
    }
    fn suggestion(&self) -> Option<String> {
        Some("Iterate directly, or use `enumerate()` if the index is needed.".to_string())
    }
}

pub fn range_len(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let diagnostics = model
        .nodes_of_kind("for_statement")
        .filter_map(|node| {
            let iterable = node.child_by_field_name("right")?;
            let sequence = range_len_argument(model, iterable)?;
            Some(Diagnostic::at_node(
                RangeLen { sequence: model.text(sequence).to_string() },
                model,
                node,
            ))
        })
        .collect();

    Ok(diagnostics)
}

// `x` in `range(len(x))`.
fn range_len_argument<'a>(model: &SourceModel, node: Node<'a>) -> Option<Node<'a>> {
    let inner = single_argument(model, node, "range")?;
    single_argument(model, inner, "len")
}

fn single_argument<'a>(model: &SourceModel, node: Node<'a>, function: &str) -> Option<Node<'a>> {
    if node.kind() != "call" || call_name(model, node).as_deref() != Some(function) {
        return None;
    }
    if has_splat_arguments(node) {
        return None;
    }
    match positional_arguments(node).as_slice() {
        [argument] => Some(*argument),
        _ => None,
    }
}
