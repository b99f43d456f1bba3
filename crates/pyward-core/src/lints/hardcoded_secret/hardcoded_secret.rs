use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::string_value;

/// Name fragments that mark a credential.
const SECRET_MARKERS: &[&str] = &[
    "password",
    "passwd",
    "secret",
    "api_key",
    "apikey",
    "access_key",
    "private_key",
    "auth_token",
    "access_token",
];

/// Names that are credentials on their own.
const SECRET_NAMES: &[&str] = &["pwd", "token"];

pub struct HardcodedSecret {
    name: String,
}

/// ## What it does
///
/// Checks for string literals assigned to, or passed as, names that look
/// like credentials: `password`, `secret`, `api_key`, `token`, ...
///
/// ## Why is this bad?
///
/// Secrets in source code end up in version control, logs and every copy of
/// the program. Anyone with read access to the code gets the credential.
///
/// Empty strings are not reported.
///
/// ## Example
///
/// ```python
/// API_KEY = "sk-4f9a0c..."
/// ```
///
/// Use instead:
/// ```python
/// API_KEY = os.environ["API_KEY"]
/// ```
impl Violation for HardcodedSecret {
    fn check(&self) -> Check {
        Check::HardcodedSecret
    }
    fn body(&self) -> String {
        format!("Hardcoded secret in '{}'.", self.name)
    }
    fn suggestion(&self) -> Option<String> {
        Some("Load it from the environment or a secrets manager instead.".to_string())
    }
}

pub fn hardcoded_secret(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for node in model.preorder() {
        let (target, value) = match node.kind() {
            "assignment" => (node.child_by_field_name("left"), node.child_by_field_name("right")),
            "keyword_argument" => (node.child_by_field_name("name"), node.child_by_field_name("value")),
            "pair" => (node.child_by_field_name("key"), node.child_by_field_name("value")),
            _ => continue,
        };
        let (Some(target), Some(value)) = (target, value) else {
            continue;
        };

        let Some(name) = target_name(model, target) else {
            continue;
        };
        if !is_secret_name(&name) {
            continue;
        }
        if string_value(model, value).is_none_or(|value| value.is_empty()) {
            continue;
        }

        diagnostics.push(Diagnostic::at_node(HardcodedSecret { name }, model, node));
    }

    Ok(diagnostics)
}

// `password`, `self.password` and `{"password": ...}` all name `password`.
fn target_name(model: &SourceModel, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "identifier" => Some(model.text(node).to_string()),
        "attribute" => node
            .child_by_field_name("attribute")
            .map(|attribute| model.text(attribute).to_string()),
        "string" => string_value(model, node),
        _ => None,
    }
}

fn is_secret_name(name: &str) -> bool {
    let name = name.to_lowercase();
    SECRET_NAMES.contains(&name.as_str())
        || SECRET_MARKERS.iter().any(|marker| name.contains(marker))
}
