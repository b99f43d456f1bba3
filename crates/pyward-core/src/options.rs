use rustc_hash::FxHashSet;

use crate::error::Error;
use crate::registry::{ALL_CHECKS, Category, Check, ensure_registry};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Which checks a single `analyze`/`fix` call runs.
pub struct AnalysisOptions {
    /// Run checks of the optimization category?
    pub run_optimization: bool,
    /// Run checks of the security category?
    pub run_security: bool,
    /// Canonical identifiers (e.g. `check_unused_import`) of checks to skip,
    /// whatever their category.
    pub skip_list: FxHashSet<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { run_optimization: true, run_security: true, skip_list: FxHashSet::default() }
    }
}

impl AnalysisOptions {
    pub fn new<I, S>(run_optimization: bool, run_security: bool, skip_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            run_optimization,
            run_security,
            skip_list: skip_list.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether checks of `category` are requested at all.
    pub fn runs_category(&self, category: Category) -> bool {
        match category {
            Category::Optimization => self.run_optimization,
            Category::Security => self.run_security,
        }
    }

    /// The checks to run, in registration order.
    ///
    /// Fails if the skip list names a check that is not registered.
    pub fn active_checks(&self) -> Result<Vec<Check>, Error> {
        ensure_registry();

        let mut unknown: Vec<&String> = self
            .skip_list
            .iter()
            .filter(|id| Check::from_id(id).is_none())
            .collect();
        unknown.sort();
        if let Some(name) = unknown.first() {
            return Err(Error::unknown_check(name.as_str()));
        }

        Ok(ALL_CHECKS
            .iter()
            .copied()
            .filter(|check| self.runs_category(check.category()))
            .filter(|check| !self.skip_list.contains(check.id()))
            .collect())
    }
}
