use colored::Colorize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// What happened to a single input file.
#[derive(Debug)]
pub enum FileOutcome {
    Checked {
        /// Fix-log entries of the fixes written back to the file.
        applied: Vec<String>,
        /// Remaining issues, formatted as `Line L: message`.
        issues: Vec<String>,
    },
    Missing,
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    /// Whether this file makes the run fail.
    pub fn is_failure(&self) -> bool {
        match &self.outcome {
            FileOutcome::Checked { issues, .. } => !issues.is_empty(),
            FileOutcome::Missing | FileOutcome::Failed(_) => true,
        }
    }
}

/// Displays the per-file reports. Findings go to `writer`, files that could
/// not be checked go to `errors`.
pub trait Emitter {
    fn emit<W: Write, E: Write>(
        &self,
        writer: &mut W,
        errors: &mut E,
        reports: &[FileReport],
    ) -> anyhow::Result<()>;
}

pub struct TextEmitter {
    pub verbose: bool,
}

impl Emitter for TextEmitter {
    fn emit<W: Write, E: Write>(
        &self,
        writer: &mut W,
        errors: &mut E,
        reports: &[FileReport],
    ) -> anyhow::Result<()> {
        let mut writer = BufWriter::new(writer);

        for report in reports {
            let path = report.path.display();

            match &report.outcome {
                FileOutcome::Missing => {
                    writer.flush()?; // Keep stdout and stderr in input order
                    writeln!(errors, "{}: File '{path}' not found", "Error".red().bold())?;
                }
                FileOutcome::Failed(err) => {
                    writer.flush()?;
                    writeln!(errors, "{} analyzing {path}: {err:#}", "Error".red().bold())?;
                }
                FileOutcome::Checked { applied, issues } => {
                    if !applied.is_empty() {
                        writeln!(writer, "🔧 Applied {} fix(es) to {path}", applied.len())?;
                        for entry in applied {
                            writeln!(writer, "  - {entry}")?;
                        }
                    }

                    if issues.is_empty() {
                        let verbose = if self.verbose { " (verbose)" } else { "" };
                        writeln!(
                            writer,
                            "{}",
                            format!("✅ No issues found in {path}{verbose}").green()
                        )?;
                        continue;
                    }

                    writeln!(
                        writer,
                        "{}",
                        format!("❌ Found {} issue(s) in {path}", issues.len())
                            .red()
                            .bold()
                    )?;
                    for (i, issue) in issues.iter().enumerate() {
                        writeln!(writer, "  {}. {issue}", i + 1)?;
                    }
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}
