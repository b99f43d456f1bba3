use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{has_splat_arguments, named_children, positional_arguments};

pub struct AppendInLoop {
    list: String,
}

/// ## What it does
///
/// Checks for `for` loops whose only statement appends to a list.
///
/// ## Why is this bad?
///
/// A list comprehension builds the same list faster: it avoids looking up
/// and calling `.append()` at every iteration, and states the intent in one
/// expression.
///
/// Loops with an `else` clause are ignored.
///
/// ## Example
///
/// ```python
/// squares = []
/// for x in values:
///     squares.append(x * x)
/// ```
///
/// Use instead:
/// ```python
/// squares = [x * x for x in values]
/// ```
impl Violation for AppendInLoop {
    fn check(&self) -> Check {
        Check::AppendInLoop
    }
    fn body(&self) -> String {
        format!("Loop only appends to '{}'.", self.list)
    }
    fn suggestion(&self) -> Option<String> {
        Some("Use a list comprehension instead.".to_string())
    }
}

pub fn append_in_loop(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for node in model.nodes_of_kind("for_statement") {
        if node.child_by_field_name("alternative").is_some() {
            continue;
        }
        let Some(body) = node.child_by_field_name("body") else {
            continue;
        };
        let statements = named_children(body);
        let [statement] = statements.as_slice() else {
            continue;
        };
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(call) = statement.named_child(0).filter(|n| n.kind() == "call") else {
            continue;
        };
        let Some(function) = call
            .child_by_field_name("function")
            .filter(|f| f.kind() == "attribute")
        else {
            continue;
        };
        let (Some(object), Some(attribute)) = (
            function.child_by_field_name("object"),
            function.child_by_field_name("attribute"),
        ) else {
            continue;
        };

        if model.text(attribute) != "append"
            || positional_arguments(call).len() != 1
            || has_splat_arguments(call)
        {
            continue;
        }

        diagnostics.push(Diagnostic::at_node(
            AppendInLoop { list: model.text(object).to_string() },
            model,
            node,
        ));
    }

    Ok(diagnostics)
}
