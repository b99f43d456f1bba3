use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::call_name;

pub struct NoEval;

/// ## What it does
///
/// Checks for calls to `eval()`.
///
/// ## Why is this bad?
///
/// `eval()` evaluates arbitrary Python expressions, function calls included.
/// Given untrusted input it lets an attacker run code with the rights of the
/// program. To parse literals, `ast.literal_eval()` is safe.
///
/// ## Example
///
/// ```python
/// values = eval(line)
/// ```
///
/// Use instead:
/// ```python
/// values = ast.literal_eval(line)
/// ```
impl Violation for NoEval {
    fn check(&self) -> Check {
        Check::NoEval
    }
    fn body(&self) -> String {
        "Use of `eval()` detected.".to_string()
    }
    fn suggestion(&self) -> Option<String> {
        Some("Use `ast.literal_eval()` for literals, or avoid evaluating dynamic input.".to_string())
    }
}

pub fn no_eval(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let diagnostics = model
        .nodes_of_kind("call")
        .filter(|node| matches!(call_name(model, *node).as_deref(), Some("eval" | "builtins.eval")))
        .map(|node| Diagnostic::at_node(NoEval, model, node))
        .collect();

    Ok(diagnostics)
}
