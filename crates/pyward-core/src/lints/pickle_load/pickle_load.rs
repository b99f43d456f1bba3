use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::call_name;

/// Modules whose deserialisers can run code embedded in the data.
const UNSAFE_MODULES: &[&str] = &["pickle", "cPickle", "_pickle", "dill", "marshal", "shelve"];

pub struct PickleLoad {
    function: String,
}

/// ## What it does
///
/// Checks for calls to `load()`/`loads()` of `pickle`, `cPickle`, `dill` and
/// `marshal`, and to `shelve.open()`.
///
/// ## Why is this bad?
///
/// Unpickling runs the constructors recorded in the data. A crafted payload
/// can execute arbitrary code as soon as it is loaded, so these functions
/// must never see data that could have been tampered with.
///
/// ## Example
///
/// ```python
/// session = pickle.loads(request.cookies["session"])
/// ```
///
/// Use instead:
/// ```python
/// session = json.loads(request.cookies["session"])
/// ```
impl Violation for PickleLoad {
    fn check(&self) -> Check {
        Check::PickleLoad
    }
    fn body(&self) -> String {
        format!("`{}()` can execute arbitrary code when loading untrusted data.", self.function)
    }
    fn suggestion(&self) -> Option<String> {
        Some("Only load trusted data, or use a format such as JSON.".to_string())
    }
}

pub fn pickle_load(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for call in model.nodes_of_kind("call") {
        let Some(function) = call_name(model, call) else {
            continue;
        };
        let Some((module, name)) = function.rsplit_once('.') else {
            continue;
        };
        if !UNSAFE_MODULES.contains(&module) {
            continue;
        }
        let is_loader = match module {
            "shelve" => name == "open",
            _ => matches!(name, "load" | "loads" | "Unpickler"),
        };
        if is_loader {
            diagnostics.push(Diagnostic::at_node(PickleLoad { function }, model, call));
        }
    }

    Ok(diagnostics)
}
