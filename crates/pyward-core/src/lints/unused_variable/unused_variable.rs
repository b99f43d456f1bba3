use rustc_hash::FxHashSet;
use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::{Preorder, SourceModel};
use crate::utils_ast::{SCOPE_KINDS, is_name_reference, named_children};

pub struct UnusedVariable {
    name: String,
}

/// ## What it does
///
/// Checks for local variables that are assigned in a function but never
/// read.
///
/// ## Why is this bad?
///
/// The value is computed and stored for nothing. It is often a leftover from
/// a refactoring, or a typo in the name used later on.
///
/// Names starting with `_` are ignored, and so are functions that call
/// `locals()`.
///
/// ## Example
///
/// ```python
/// def area(r):
///     unused = r * 2
///     return 3.14 * r * r
/// ```
///
/// Use instead:
/// ```python
/// def area(r):
///     return 3.14 * r * r
/// ```
impl Violation for UnusedVariable {
    fn check(&self) -> Check {
        Check::UnusedVariable
    }
    fn body(&self) -> String {
        format!("Variable '{}' is assigned but never used.", self.name)
    }
}

pub fn unused_variable(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for function in model.nodes_of_kind("function_definition") {
        let Some(body) = function.child_by_field_name("body") else {
            continue;
        };

        // First assignment of every local, in source order.
        let mut assigned: Vec<Node> = vec![];
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        // Names read anywhere in the function, nested scopes included.
        let mut reads: FxHashSet<&str> = FxHashSet::default();
        let mut uses_locals = false;

        for node in Preorder::new(body) {
            if node.kind() == "assignment" && enclosing_scope(node).map(|s| s.id()) == Some(function.id())
            {
                let Some(left) = node.child_by_field_name("left") else {
                    continue;
                };
                for target in targets(left) {
                    if seen.insert(model.text(target)) {
                        assigned.push(target);
                    }
                }
            } else if is_name_reference(node) && !is_assignment_target(node) {
                let name = model.text(node);
                if name == "locals" {
                    uses_locals = true;
                }
                reads.insert(name);
            }
        }

        if uses_locals {
            continue;
        }

        for target in assigned {
            let name = model.text(target);
            if name.starts_with('_') || reads.contains(name) {
                continue;
            }
            diagnostics.push(Diagnostic::at_node(
                UnusedVariable { name: name.to_string() },
                model,
                target,
            ));
        }
    }

    Ok(diagnostics)
}

fn enclosing_scope(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    while let Some(parent) = current.parent() {
        if SCOPE_KINDS.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

// Plain names bound by the left-hand side of an assignment. Attributes and
// subscripts do not bind locals.
fn targets(node: Node<'_>) -> Vec<Node<'_>> {
    match node.kind() {
        "identifier" => vec![node],
        "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern" => {
            named_children(node).into_iter().flat_map(targets).collect()
        }
        _ => vec![],
    }
}

fn is_assignment_target(node: Node<'_>) -> bool {
    let mut current = node;
    while let Some(parent) = current.parent() {
        match parent.kind() {
            "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern" => {
                current = parent;
            }
            "assignment" => {
                return parent
                    .child_by_field_name("left")
                    .is_some_and(|left| left.id() == current.id());
            }
            _ => return false,
        }
    }
    false
}
