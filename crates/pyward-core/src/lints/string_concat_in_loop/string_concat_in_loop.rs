use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{enclosing_loop, is_string};

pub struct StringConcatInLoop {
    variable: String,
}

/// ## What it does
///
/// Checks for strings built by repeated concatenation inside a loop, e.g.
/// `s += "..."` or `s = s + "..."`.
///
/// ## Why is this bad?
///
/// Strings are immutable: each concatenation copies the whole string built
/// so far, which makes the loop quadratic in the length of the result.
///
/// ## Example
///
/// ```python
/// out = ""
/// for word in words:
///     out += word + " "
/// ```
///
/// Use instead:
/// ```python
/// out = " ".join(words)
/// ```
impl Violation for StringConcatInLoop {
    fn check(&self) -> Check {
        Check::StringConcatInLoop
    }
    fn body(&self) -> String {
        format!("String concatenation in a loop for variable '{}'.", self.variable)
    }
    fn suggestion(&self) -> Option<String> {
        Some("Collect the parts in a list and use `''.join()` instead.".to_string())
    }
}

pub fn string_concat_in_loop(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let diagnostics = model
        .preorder()
        .filter_map(|node| concatenated_variable(model, node).map(|variable| (node, variable)))
        .filter(|(node, _)| enclosing_loop(*node).is_some())
        .map(|(node, variable)| {
            Diagnostic::at_node(StringConcatInLoop { variable: variable.to_string() }, model, node)
        })
        .collect();

    Ok(diagnostics)
}

// The variable a string is appended to, for `s += "..."` and
// `s = s + "..."`.
fn concatenated_variable<'a>(model: &'a SourceModel, node: Node<'_>) -> Option<&'a str> {
    match node.kind() {
        "augmented_assignment" => {
            let operator = node.child_by_field_name("operator")?;
            let left = node.child_by_field_name("left")?;
            let right = node.child_by_field_name("right")?;
            (model.text(operator) == "+="
                && left.kind() == "identifier"
                && involves_string(right))
            .then(|| model.text(left))
        }
        "assignment" => {
            let left = node.child_by_field_name("left")?;
            let right = node.child_by_field_name("right")?;
            if left.kind() != "identifier" || right.kind() != "binary_operator" {
                return None;
            }
            // `s + a + b` nests to the left.
            let mut operand = right;
            while operand.kind() == "binary_operator" {
                let operator = operand.child_by_field_name("operator")?;
                if model.text(operator) != "+" {
                    return None;
                }
                operand = operand.child_by_field_name("left")?;
            }
            (model.text(operand) == model.text(left) && involves_string(right))
                .then(|| model.text(left))
        }
        _ => None,
    }
}

// A string literal, or a `+` chain with a string literal in it.
fn involves_string(node: Node<'_>) -> bool {
    if is_string(node) {
        return true;
    }
    if node.kind() == "binary_operator" {
        return ["left", "right"].iter().any(|field| {
            node.child_by_field_name(field)
                .is_some_and(involves_string)
        });
    }
    false
}
