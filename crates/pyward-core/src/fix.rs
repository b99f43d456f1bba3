use std::ops::Range;

use crate::check::run_checks;
use crate::diagnostic::{Diagnostic, Fix};
use crate::error::Error;
use crate::options::AnalysisOptions;
use crate::registry::Check;
use crate::source::SourceModel;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a [`fix`] call.
pub struct FixResult {
    /// Whether at least one edit was applied.
    pub changed: bool,
    /// The edited source. When `changed` is false this is the original
    /// source, verbatim, and callers have no reason to write it back.
    pub new_source: String,
    /// One line per applied fix, in application order.
    pub fix_log: Vec<String>,
}

impl FixResult {
    fn unchanged(source: &str) -> Self {
        Self { changed: false, new_source: source.to_string(), fix_log: Vec::new() }
    }
}

#[derive(Debug)]
// An edit waiting to be applied. Diagnostics of the same check that propose
// the very same edit share one pending edit, and each of them contributes a
// line to the fix log.
struct PendingEdit {
    check: Check,
    fix: Fix,
    descriptions: Vec<String>,
}

/// Apply every available fix of the active, fixable checks to `source`.
///
/// A single pass is made: findings revealed by the edits are left for the
/// next call. An edit that would leave the source unparsable is dropped.
pub fn fix(source: &str, options: &AnalysisOptions) -> Result<FixResult, Error> {
    let model = SourceModel::parse(source)?;
    let checks: Vec<Check> = options
        .active_checks()?
        .into_iter()
        .filter(|check| check.is_fixable())
        .collect();

    tracing::debug!("Running {} fixable check(s)", checks.len());

    let diagnostics = run_checks(&model, &checks)?;
    let edits = pending_edits(diagnostics);
    if edits.is_empty() {
        return Ok(FixResult::unchanged(source));
    }

    let (new_source, fix_log) = apply_fixes(source, edits)?;

    tracing::debug!("Applied {} fix(es)", fix_log.len());

    if fix_log.is_empty() {
        return Ok(FixResult::unchanged(source));
    }

    Ok(FixResult { changed: true, new_source, fix_log })
}

// Diagnostics arrive sorted by line then registration order, which is also
// the order in which the edits are applied.
fn pending_edits(diagnostics: Vec<Diagnostic>) -> Vec<PendingEdit> {
    let mut edits: Vec<PendingEdit> = Vec::new();

    for diagnostic in diagnostics {
        let check = diagnostic.check();
        let Some(fix) = diagnostic.fix else {
            continue;
        };

        match edits
            .iter_mut()
            .find(|edit| edit.check == check && edit.fix.same_edit(&fix))
        {
            Some(edit) => edit.descriptions.push(fix.description),
            None => edits.push(PendingEdit {
                check,
                descriptions: vec![fix.description.clone()],
                fix,
            }),
        }
    }

    edits
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

// Apply the edits one by one. Offsets are relative to the original source,
// so each edit is shifted by the size changes of the edits applied before it
// in the text. Edits that overlap an applied one, or that break the syntax,
// are skipped.
fn apply_fixes(source: &str, edits: Vec<PendingEdit>) -> Result<(String, Vec<String>), Error> {
    let mut content = source.to_string();
    // Original range and length delta of every applied edit.
    let mut applied: Vec<(Range<usize>, isize)> = Vec::new();
    let mut fix_log = Vec::new();

    for edit in edits {
        let range = edit.fix.range();

        if range.end > source.len() || range.start > range.end {
            return Err(Error::CheckInternal {
                check: edit.check.id(),
                message: format!("proposed an edit outside of the source ({range:?})"),
            });
        }

        if applied.iter().any(|(done, _)| overlaps(done, &range)) {
            tracing::trace!("Skipping overlapping fix of {} at {range:?}", edit.check);
            continue;
        }

        let shift: isize = applied
            .iter()
            .filter(|(done, _)| done.end <= range.start)
            .map(|(_, delta)| *delta)
            .sum();
        let start = range.start.checked_add_signed(shift);
        let end = range.end.checked_add_signed(shift);
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };

        let mut candidate = content.clone();
        if candidate.get(start..end).is_none() {
            continue;
        }
        candidate.replace_range(start..end, &edit.fix.content);

        match SourceModel::parse(&candidate) {
            Ok(_) => {}
            Err(Error::Syntax { line, column, .. }) => {
                tracing::debug!(
                    "Rejecting fix of {} at {range:?}: result does not parse (line {line}, column {column})",
                    edit.check
                );
                continue;
            }
            Err(err) => return Err(err),
        }

        let delta = edit.fix.content.len() as isize - range.len() as isize;
        tracing::trace!("Applied fix of {} at {range:?}", edit.check);

        content = candidate;
        applied.push((range, delta));
        fix_log.extend(edit.descriptions);
    }

    Ok((content, fix_log))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::analyze;
    use crate::registry::ALL_CHECKS;

    fn only(checks: &[Check]) -> AnalysisOptions {
        AnalysisOptions::new(
            true,
            true,
            ALL_CHECKS.iter().filter(|c| !checks.contains(c)).map(|c| c.id()),
        )
    }

    fn pending(check: Check, start: usize, end: usize, content: &str, log: &str) -> PendingEdit {
        PendingEdit {
            check,
            fix: Fix {
                content: content.to_string(),
                start,
                end,
                description: log.to_string(),
            },
            descriptions: vec![log.to_string()],
        }
    }

    #[test]
    fn no_fixes_returns_source_verbatim() {
        let source = "import sys\n\nprint(sys.version)\n";
        let result = fix(source, &AnalysisOptions::default()).unwrap();
        assert!(!result.changed);
        assert_eq!(result.new_source, source);
        assert!(result.fix_log.is_empty());
    }

    #[test]
    fn fix_propagates_syntax_errors() {
        let err = fix("import os\ndef f(:\n", &AnalysisOptions::default()).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn fixes_unused_import() {
        let result = fix("import os\nimport sys\n\nprint(sys.version)\n", &AnalysisOptions::default())
            .unwrap();
        assert!(result.changed);
        assert_eq!(result.new_source, "import sys\n\nprint(sys.version)\n");
        assert_eq!(result.fix_log, vec!["import os deleted".to_string()]);
    }

    #[test]
    fn skipped_checks_do_not_fix() {
        let options = AnalysisOptions::new(true, true, ["check_unused_import"]);
        let result = fix("import os\n", &options).unwrap();
        assert!(!result.changed);
    }

    #[test]
    fn category_flags_apply_to_fixes() {
        let source = "import os\nimport yaml\n\nyaml.load(data)\n";
        let result = fix(source, &AnalysisOptions::new(false, true, Vec::<String>::new())).unwrap();
        assert!(result.changed);
        assert_eq!(result.new_source, "import os\nimport yaml\n\nyaml.safe_load(data)\n");
    }

    #[test]
    fn fix_log_follows_line_order() {
        let source = "\
import yaml
import os

def f(data):
    return yaml.load(data)
    print(data)
";
        let result = fix(source, &AnalysisOptions::default()).unwrap();
        assert_eq!(
            result.fix_log,
            vec![
                "import os deleted".to_string(),
                "yaml.load() replaced with yaml.safe_load() at line 5".to_string(),
                "Removed unreachable code at line 6".to_string(),
            ]
        );
        assert_eq!(
            result.new_source,
            "import yaml\n\ndef f(data):\n    return yaml.safe_load(data)\n"
        );
    }

    #[test]
    fn identical_edits_are_applied_once() {
        let source = "import os, sys\n";
        let result = fix(source, &only(&[Check::UnusedImport])).unwrap();
        assert!(result.changed);
        assert_eq!(result.new_source, "");
        assert_eq!(
            result.fix_log,
            vec!["import os deleted".to_string(), "import sys deleted".to_string()]
        );
    }

    #[test]
    fn overlapping_edits_are_skipped() {
        let source = "abcdef = 1\n";
        let edits = vec![
            pending(Check::UnusedImport, 0, 3, "xyz", "first"),
            pending(Check::YamlLoad, 2, 5, "q", "second"),
            pending(Check::YamlLoad, 6, 6, "", "third"),
        ];
        let (content, log) = apply_fixes(source, edits).unwrap();
        assert_eq!(content, "xyzdef = 1\n");
        assert_eq!(log, vec!["first".to_string(), "third".to_string()]);
    }

    #[test]
    fn later_edits_are_shifted() {
        let source = "a = 1\nb = 2\n";
        let edits = vec![
            pending(Check::UnusedImport, 0, 1, "alpha", "first"),
            pending(Check::YamlLoad, 6, 7, "beta", "second"),
        ];
        let (content, log) = apply_fixes(source, edits).unwrap();
        assert_eq!(content, "alpha = 1\nbeta = 2\n");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn unparsable_edits_are_rejected() {
        let source = "a = 1\nb = 2\n";
        let edits = vec![
            pending(Check::UnusedImport, 0, 5, "a = (", "breaks"),
            pending(Check::YamlLoad, 6, 7, "c", "fine"),
        ];
        let (content, log) = apply_fixes(source, edits).unwrap();
        assert_eq!(content, "a = 1\nc = 2\n");
        assert_eq!(log, vec!["fine".to_string()]);
    }

    #[test]
    fn edits_emptying_a_block_are_rejected() {
        let source = "def f():\n    import os\n";
        let edits = vec![pending(Check::UnusedImport, 9, 23, "", "import os deleted")];
        let (content, log) = apply_fixes(source, edits).unwrap();
        assert_eq!(content, source);
        assert!(log.is_empty());
    }

    #[test]
    fn out_of_bounds_edit_is_a_check_bug() {
        let edits = vec![pending(Check::YamlLoad, 3, 99, "", "bad")];
        let err = apply_fixes("x = 1\n", edits).unwrap_err();
        assert!(matches!(err, Error::CheckInternal { check: "check_yaml_load", .. }));
    }

    #[test]
    fn fixed_output_always_parses() {
        let sources = [
            "import os\n",
            "def f():\n    import os\n",
            "import os; x = 1\n",
            "x = 1; import os\n",
            "if True:\n    import os  # note\n",
            "def f():\n    return 1\n    x = 2\n    y = 3\n",
            "while True:\n    break\n    print(1)\n",
            "import yaml\ncfg = yaml.load(open('f'))\n",
            "def f():\n    import os\n    import sys\n",
            "if x:\n    import os\n    import sys\nprint(1)\n",
            "if x: import os; import sys\n",
            "class A:\n    import os\n    # gone\n    from typing import List\n",
        ];
        for source in sources {
            let result = fix(source, &AnalysisOptions::default()).unwrap();
            assert!(
                SourceModel::parse(&result.new_source).is_ok(),
                "fix broke {source:?} into {:?}",
                result.new_source
            );
        }
    }

    #[test]
    fn repeated_fixing_reaches_a_fixed_point() {
        let sources = [
            "import os, sys, json\nfrom typing import List, Dict\n\nx: List[int] = []\n",
            "import yaml\n\ndef f(d):\n    return yaml.load(d)\n    import os\n    print(d)\n",
            "def f():\n    import os\n",
            "def f():\n    import os\n    import sys\n",
        ];
        for source in sources {
            let mut current = source.to_string();
            let mut converged = false;
            for _ in 0..4 {
                let result = fix(&current, &AnalysisOptions::default()).unwrap();
                if !result.changed {
                    converged = true;
                    break;
                }
                current = result.new_source;
            }
            assert!(converged, "no fixed point for {source:?}");
        }
    }

    #[test]
    fn commented_imports_are_reported_but_not_fixed() {
        let source = "import os\nfrom typing import (\n    List,  # keep\n    Dict,\n)\nx: List[int] = []\n";
        let result = fix(source, &only(&[Check::UnusedImport])).unwrap();
        assert!(result.changed);
        assert_eq!(result.fix_log, vec!["import os deleted".to_string()]);
        assert!(result.new_source.starts_with("from typing import (\n    List,  # keep\n    Dict,\n)"));

        let findings = analyze(&result.new_source, &only(&[Check::UnusedImport])).unwrap();
        assert_eq!(findings, vec!["Line 1: Imported name 'Dict' is never used.".to_string()]);
    }
}
