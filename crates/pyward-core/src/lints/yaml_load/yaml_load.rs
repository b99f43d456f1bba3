use tree_sitter::Node;

use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{call_name, dotted_name, has_splat_arguments, keyword_argument, positional_arguments};

/// Loaders that only build plain Python objects.
const SAFE_LOADERS: &[&str] = &["SafeLoader", "CSafeLoader", "BaseLoader", "CBaseLoader"];

pub struct YamlLoad {
    function: &'static str,
}

impl YamlLoad {
    fn safe_function(&self) -> &'static str {
        if self.function == "load_all" { "safe_load_all" } else { "safe_load" }
    }
}

/// ## What it does
///
/// Checks for `yaml.load()` and `yaml.load_all()` calls that do not use a
/// safe loader.
///
/// ## Why is this bad?
///
/// The full YAML loaders can instantiate arbitrary Python objects from tags
/// in the document, which lets a crafted file run code. `yaml.safe_load()`
/// only builds plain values.
///
/// This rule has a safe fix when no loader is passed: the call is replaced by
/// `yaml.safe_load()` (or `yaml.safe_load_all()`).
///
/// ## Example
///
/// ```python
/// config = yaml.load(stream)
/// ```
///
/// Use instead:
/// ```python
/// config = yaml.safe_load(stream)
/// ```
impl Violation for YamlLoad {
    fn check(&self) -> Check {
        Check::YamlLoad
    }
    fn body(&self) -> String {
        format!("`yaml.{}()` without a safe loader can execute arbitrary code.", self.function)
    }
    fn suggestion(&self) -> Option<String> {
        Some(format!("Use `yaml.{}()` instead.", self.safe_function()))
    }
}

pub fn yaml_load(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for call in model.nodes_of_kind("call") {
        let function = match call_name(model, call).as_deref() {
            Some("yaml.load") => "load",
            Some("yaml.load_all") => "load_all",
            _ => continue,
        };

        let loader = keyword_argument(model, call, "Loader")
            .or_else(|| positional_arguments(call).get(1).copied());
        if loader.is_some_and(|loader| is_safe_loader(model, loader)) {
            continue;
        }

        let violation = YamlLoad { function };
        let line = model.line(call);

        // Without an explicit loader, `safe_load` takes the same arguments.
        let fix = if loader.is_none() && !has_splat_arguments(call) {
            call.child_by_field_name("function")
                .and_then(|f| f.child_by_field_name("attribute"))
                .map(|attribute| Fix {
                    content: violation.safe_function().to_string(),
                    start: attribute.start_byte(),
                    end: attribute.end_byte(),
                    description: format!(
                        "yaml.{function}() replaced with yaml.{}() at line {line}",
                        violation.safe_function()
                    ),
                })
        } else {
            None
        };

        diagnostics.push(Diagnostic::at_node(violation, model, call).with_fix(fix));
    }

    Ok(diagnostics)
}

fn is_safe_loader(model: &SourceModel, node: Node<'_>) -> bool {
    dotted_name(model, node).is_some_and(|name| {
        let last = name.rsplit('.').next().unwrap_or_default();
        SAFE_LOADERS.contains(&last)
    })
}
