use anyhow::{Context, Result};
use colored::Colorize;
use pyward_core::AnalysisOptions;
use rayon::prelude::*;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::args::CheckCommand;
use crate::discovery::{InputFile, discover_python_files};
use crate::output_format::{Emitter, FileOutcome, FileReport, TextEmitter};
use crate::settings::{discover_settings, resolve_options};
use crate::status::ExitStatus;

pub fn check(args: CheckCommand) -> Result<ExitStatus> {
    let start = Instant::now();

    let cwd = env::current_dir().context("Failed to get the current directory")?;
    let settings = discover_settings(&cwd)?;
    if let Some(settings) = &settings {
        tracing::info!("Using configuration from {}", settings.config_path.display());
    }

    let options = resolve_options(&args, settings.as_ref())?;
    // Surface configuration problems once rather than once per file.
    let checks = options.active_checks()?;
    tracing::debug!("{} check(s) enabled", checks.len());

    let files = discover_python_files(&args.paths);

    if files.is_empty() {
        println!(
            "{}: {}",
            "Warning".yellow().bold(),
            "No Python files found under the given path(s).".white().bold()
        );
        return Ok(ExitStatus::Success);
    }

    // `collect` on an indexed parallel iterator keeps the input order.
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|file| check_file(file, &options, args.fix))
        .collect();

    TextEmitter { verbose: args.verbose }.emit(
        &mut std::io::stdout(),
        &mut std::io::stderr(),
        &reports,
    )?;

    tracing::info!("Checked {} file(s) in {:?}", reports.len(), start.elapsed());

    if reports.iter().any(FileReport::is_failure) {
        return Ok(ExitStatus::Failure);
    }

    Ok(ExitStatus::Success)
}

fn check_file(file: &InputFile, options: &AnalysisOptions, fix: bool) -> FileReport {
    let outcome = match file {
        InputFile::Missing(_) => FileOutcome::Missing,
        InputFile::Python(path) => match check_path(path, options, fix) {
            Ok(outcome) => outcome,
            Err(err) => FileOutcome::Failed(err),
        },
    };

    FileReport { path: file.path().to_path_buf(), outcome }
}

fn check_path(path: &Path, options: &AnalysisOptions, fix: bool) -> Result<FileOutcome> {
    tracing::trace!("Checking {}", path.display());

    let mut source =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let mut applied = Vec::new();
    if fix {
        let result = pyward_core::fix(&source, options)?;
        if result.changed {
            fs::write(path, &result.new_source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            applied = result.fix_log;
            source = result.new_source;
        }
    }

    let issues = pyward_core::analyze(&source, options)?;

    Ok(FileOutcome::Checked { applied, issues })
}
