use crate::diagnostic::*;
use crate::registry::Check;
use crate::source::SourceModel;
use crate::utils_ast::{call_name, is_false, keyword_argument};

pub enum SslVerify {
    VerifyFalse,
    UnverifiedContext,
}

/// ## What it does
///
/// Checks for disabled TLS certificate verification: calls passing
/// `verify=False` (as in `requests`/`httpx`), and
/// `ssl._create_unverified_context()`.
///
/// ## Why is this bad?
///
/// Without certificate verification anyone on the network path can
/// impersonate the server and read or modify the traffic.
///
/// ## Example
///
/// ```python
/// requests.get(url, verify=False)
/// ```
///
/// Use instead:
/// ```python
/// requests.get(url)
/// ```
impl Violation for SslVerify {
    fn check(&self) -> Check {
        Check::SslVerify
    }
    fn body(&self) -> String {
        match self {
            Self::VerifyFalse => "TLS certificate verification is disabled with `verify=False`.",
            Self::UnverifiedContext => {
                "`ssl._create_unverified_context()` disables certificate verification."
            }
        }
        .to_string()
    }
    fn suggestion(&self) -> Option<String> {
        match self {
            Self::VerifyFalse => Some("Remove `verify=False` so that certificates are checked.".to_string()),
            Self::UnverifiedContext => Some("Use `ssl.create_default_context()` instead.".to_string()),
        }
    }
}

pub fn ssl_verify(model: &SourceModel) -> anyhow::Result<Vec<Diagnostic>> {
    let mut diagnostics = vec![];

    for call in model.nodes_of_kind("call") {
        if call_name(model, call).as_deref() == Some("ssl._create_unverified_context") {
            diagnostics.push(Diagnostic::at_node(SslVerify::UnverifiedContext, model, call));
            continue;
        }
        if let Some(verify) = keyword_argument(model, call, "verify").filter(|v| is_false(*v)) {
            diagnostics.push(Diagnostic::at_node(SslVerify::VerifyFalse, model, verify));
        }
    }

    Ok(diagnostics)
}
