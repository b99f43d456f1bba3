use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::call_name;

pub struct NoExec;

/// ## What it does
///
/// Checks for calls to `exec()`, and for Python 2 `exec` statements.
///
/// ## Why is this bad?
///
/// `exec()` runs arbitrary Python code. If any part of its input comes from
/// a user, a file or the network, an attacker can run code with the rights
/// of the program.
///
/// ## Example
///
/// ```python
/// exec(f"result = {expression}")
/// ```
impl Violation for NoExec {
    fn check(&self) -> Check {
        Check::NoExec
    }
    fn body(&self) -> String {
        "Use of `exec()` detected.".to_string()
    }
    fn suggestion(&self) -> Option<String> {
        Some("It runs arbitrary code: avoid it, or never pass it untrusted input.".to_string())
    }
}

pub fn no_exec(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let diagnostics = model
        .preorder()
        .filter(|node| match node.kind() {
            "call" => matches!(call_name(model, *node).as_deref(), Some("exec" | "builtins.exec")),
            "exec_statement" => true,
            _ => false,
        })
        .map(|node| Diagnostic::at_node(NoExec, model, node))
        .collect();

    Ok(diagnostics)
}
