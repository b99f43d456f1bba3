use crate::diagnostic::Diagnostic;
use crate::error::Error;
use crate::options::AnalysisOptions;
use crate::registry::Check;
use crate::source::SourceModel;

#[derive(Debug)]
// The object that collects diagnostics in `run_checks()`. One per analysed
// source.
pub(crate) struct Checker {
    // Findings of each check, kept apart and in registration order so that
    // no check observes another one's output and the final order does not
    // depend on how the checks were scheduled.
    buckets: Vec<(Check, Vec<Diagnostic>)>,
    // Number of lines in the analysed source.
    line_count: usize,
}

impl Checker {
    fn new(line_count: usize, capacity: usize) -> Self {
        Self { buckets: Vec::with_capacity(capacity), line_count }
    }

    // Every finding must belong to the check that reported it and point
    // inside the source. Anything else is a bug in the check.
    fn report_diagnostics(&mut self, check: Check, diagnostics: Vec<Diagnostic>) -> Result<(), Error> {
        for diagnostic in &diagnostics {
            if diagnostic.check() != check {
                return Err(Error::CheckInternal {
                    check: check.id(),
                    message: format!("reported a finding for `{}`", diagnostic.check().id()),
                });
            }
            if diagnostic.line == 0 || diagnostic.line > self.line_count {
                return Err(Error::CheckInternal {
                    check: check.id(),
                    message: format!(
                        "reported line {} outside of the source (1-{})",
                        diagnostic.line, self.line_count
                    ),
                });
            }
        }

        self.buckets.push((check, diagnostics));
        Ok(())
    }

    // Merge all buckets, then sort by line. The sort is stable so ties keep
    // registration order, then emission order within a check.
    fn into_sorted(mut self) -> Vec<Diagnostic> {
        self.buckets.sort_by_key(|(check, _)| check.index());

        let mut diagnostics: Vec<Diagnostic> = self
            .buckets
            .into_iter()
            .flat_map(|(_, diagnostics)| diagnostics)
            .collect();
        diagnostics.sort_by_key(|d| d.line);
        diagnostics
    }
}

/// Analyse `source` and return the formatted findings, `"Line {line}: {message}"`,
/// sorted by line.
///
/// An empty result means no issues were found. A source that does not parse
/// is an error, not an empty result.
pub fn analyze(source: &str, options: &AnalysisOptions) -> Result<Vec<String>, Error> {
    let diagnostics = analyze_diagnostics(source, options)?;
    Ok(diagnostics.iter().map(ToString::to_string).collect())
}

/// Same as [`analyze`] but keeps the structured diagnostics.
pub fn analyze_diagnostics(source: &str, options: &AnalysisOptions) -> Result<Vec<Diagnostic>, Error> {
    let model = SourceModel::parse(source)?;
    let checks = options.active_checks()?;

    tracing::debug!(
        "Running {} check(s) on {} line(s)",
        checks.len(),
        model.line_count()
    );

    run_checks(&model, &checks)
}

// Run every check independently against the same model and return the merged,
// sorted findings.
pub(crate) fn run_checks(model: &SourceModel, checks: &[Check]) -> Result<Vec<Diagnostic>, Error> {
    let mut checker = Checker::new(model.line_count(), checks.len());

    for &check in checks {
        let diagnostics = check
            .run(model)
            .map_err(|err| Error::check_internal(check.id(), &err))?;

        tracing::trace!("{check} reported {} finding(s)", diagnostics.len());
        checker.report_diagnostics(check, diagnostics)?;
    }

    Ok(checker.into_sorted())
}
