use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{call_name, is_false, keyword_argument, positional_arguments, string_value};

const WEAK_ALGORITHMS: &[&str] = &["md4", "md5", "sha", "sha1"];

pub struct WeakHash {
    algorithm: String,
}

/// ## What it does
///
/// Checks for `hashlib.md5()`, `hashlib.sha1()` and `hashlib.new()` with a
/// weak algorithm name.
///
/// ## Why is this bad?
///
/// Collisions can be computed for MD5 and SHA-1, so they cannot protect
/// passwords, signatures or integrity checks against an attacker.
///
/// Calls passing `usedforsecurity=False` state that the hash is not used for
/// security and are not reported.
///
/// ## Example
///
/// ```python
/// digest = hashlib.md5(password).hexdigest()
/// ```
///
/// Use instead:
/// ```python
/// digest = hashlib.sha256(password).hexdigest()
/// ```
impl Violation for WeakHash {
    fn check(&self) -> Check {
        Check::WeakHash
    }
    fn body(&self) -> String {
        format!("Weak hash algorithm `{}` used.", self.algorithm)
    }
    fn suggestion(&self) -> Option<String> {
        Some(
            "Use `hashlib.sha256()` or stronger, or pass `usedforsecurity=False` if the hash is not used for security."
                .to_string(),
        )
    }
}

pub fn weak_hash(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for call in model.nodes_of_kind("call") {
        let algorithm = match call_name(model, call).as_deref() {
            Some("hashlib.md5") => "md5".to_string(),
            Some("hashlib.sha1") => "sha1".to_string(),
            Some("hashlib.new") => {
                let name = keyword_argument(model, call, "name")
                    .or_else(|| positional_arguments(call).first().copied())
                    .and_then(|node| string_value(model, node));
                match name {
                    Some(name) if WEAK_ALGORITHMS.contains(&name.to_lowercase().as_str()) => {
                        name.to_lowercase()
                    }
                    _ => continue,
                }
            }
            _ => continue,
        };

        if keyword_argument(model, call, "usedforsecurity").is_some_and(is_false) {
            continue;
        }

        diagnostics.push(Diagnostic::at_node(WeakHash { algorithm }, model, call));
    }

    Ok(diagnostics)
}
