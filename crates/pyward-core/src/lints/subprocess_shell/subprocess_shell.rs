use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{call_name, is_false, keyword_argument};

/// `subprocess` functions that take a `shell` argument.
const SHELL_ARGUMENT_FUNCTIONS: &[&str] = &["call", "check_call", "check_output", "run", "Popen"];

/// Functions that always go through the shell.
const SHELL_FUNCTIONS: &[&str] = &[
    "os.system",
    "os.popen",
    "subprocess.getoutput",
    "subprocess.getstatusoutput",
];

pub enum SubprocessShell {
    ShellArgument { function: String },
    AlwaysShell { function: String },
}

/// ## What it does
///
/// Checks for commands run through the system shell: `subprocess` calls with
/// `shell=True`, `os.system()`, `os.popen()`, `subprocess.getoutput()` and
/// `subprocess.getstatusoutput()`.
///
/// ## Why is this bad?
///
/// The shell interprets the whole command string. If any part of it comes
/// from outside the program, metacharacters like `;` or `$(...)` let an
/// attacker run other commands.
///
/// ## Example
///
/// ```python
/// subprocess.run(f"convert {path} out.png", shell=True)
/// ```
///
/// Use instead:
/// ```python
/// subprocess.run(["convert", path, "out.png"])
/// ```
impl Violation for SubprocessShell {
    fn check(&self) -> Check {
        Check::SubprocessShell
    }
    fn body(&self) -> String {
        match self {
            Self::ShellArgument { function } => {
                format!("`{function}()` is called with `shell=True`.")
            }
            Self::AlwaysShell { function } => {
                format!("`{function}()` runs its command through the shell.")
            }
        }
    }
    fn suggestion(&self) -> Option<String> {
        Some("Use `subprocess.run()` with a list of arguments instead.".to_string())
    }
}

pub fn subprocess_shell(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for call in model.nodes_of_kind("call") {
        let Some(function) = call_name(model, call) else {
            continue;
        };

        if SHELL_FUNCTIONS.contains(&function.as_str()) {
            diagnostics.push(Diagnostic::at_node(
                SubprocessShell::AlwaysShell { function },
                model,
                call,
            ));
            continue;
        }

        let is_shell_argument_function = function
            .strip_prefix("subprocess.")
            .is_some_and(|name| SHELL_ARGUMENT_FUNCTIONS.contains(&name));
        if !is_shell_argument_function {
            continue;
        }

        // Any value but a literal `False` (or `None`/`0`) may turn the shell on.
        let Some(shell) = keyword_argument(model, call, "shell") else {
            continue;
        };
        if is_false(shell) || matches!(model.text(shell), "None" | "0") {
            continue;
        }

        diagnostics.push(Diagnostic::at_node(
            SubprocessShell::ShellArgument { function },
            model,
            call,
        ));
    }

    Ok(diagnostics)
}
