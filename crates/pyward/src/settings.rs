//! `pyward.toml` discovery and merging with the command-line options.

use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pyward_core::{AnalysisOptions, resolve_alias, resolve_aliases};

use crate::args::CheckCommand;

pub const CONFIG_FILE_NAME: &str = "pyward.toml";

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    pub lint: Option<LintTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LintTomlOptions {
    /// # Run optimization checks
    ///
    /// Defaults to `true`. Ignored when `--optimize` or `--security` is passed.
    pub optimization: Option<bool>,

    /// # Run security checks
    ///
    /// Defaults to `true`. Ignored when `--optimize` or `--security` is passed.
    pub security: Option<bool>,

    /// # Checks to skip
    ///
    /// Aliases of the checks to skip, e.g. `["unused_import"]`. These are
    /// added to the ones passed with `--skip-checks`.
    pub skip_checks: Option<Vec<String>>,
}

/// A parsed configuration file.
#[derive(Clone, Debug)]
pub struct DiscoveredSettings {
    pub config_path: PathBuf,
    pub options: TomlOptions,
}

/// The closest `pyward.toml` in `start` or one of its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn parse_pyward_toml(path: &Path) -> Result<TomlOptions, ParseTomlError> {
    let toml = fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

/// Look for a configuration file from `start` upwards and parse it.
pub fn discover_settings(start: &Path) -> Result<Option<DiscoveredSettings>, ParseTomlError> {
    let Some(config_path) = find_config(start) else {
        return Ok(None);
    };
    let options = parse_pyward_toml(&config_path)?;
    Ok(Some(DiscoveredSettings { config_path, options }))
}

/// Build the analysis options. Category flags on the command line take
/// precedence over the file; skip lists are merged.
pub fn resolve_options(
    args: &CheckCommand,
    settings: Option<&DiscoveredSettings>,
) -> anyhow::Result<AnalysisOptions> {
    let lint = settings
        .and_then(|s| s.options.lint.clone())
        .unwrap_or_default();

    let (run_optimization, run_security) = match (args.optimize, args.security) {
        (true, _) => (true, false),
        (_, true) => (false, true),
        _ => (
            lint.optimization.unwrap_or(true),
            lint.security.unwrap_or(true),
        ),
    };

    let mut skip_list: Vec<&'static str> = resolve_aliases(&args.skip_checks)
        .context("Invalid value passed to `--skip-checks`")?;

    if let (Some(aliases), Some(settings)) = (&lint.skip_checks, settings) {
        for alias in aliases {
            let id = resolve_alias(alias).with_context(|| {
                format!("Invalid `skip-checks` in {}", settings.config_path.display())
            })?;
            skip_list.push(id);
        }
    }

    Ok(AnalysisOptions::new(run_optimization, run_security, skip_list))
}
