use crate::logging::LogLevel;
use clap::Parser;

#[derive(Parser)]
#[command(
    author,
    name = "pyward",
    about = "PyWard: CLI linter for Python (optimization + security checks)",
    after_help = "Checks are referred to by their alias, e.g. `unused_import` or `no_exec`."
)]
#[command(version)]
pub struct Args {
    #[clap(flatten)]
    pub check: CheckCommand,
    #[clap(flatten)]
    pub(crate) global_options: GlobalOptions,
}

#[derive(Clone, Debug, clap::Args)]
pub struct CheckCommand {
    #[arg(
        required = true,
        help = "Python files or directories to analyse, for example `pyward src/`."
    )]
    pub paths: Vec<String>,
    #[arg(
        short,
        long,
        default_value = "false",
        conflicts_with = "security",
        help = "Run only optimization checks."
    )]
    pub optimize: bool,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Run only security checks."
    )]
    pub security: bool,
    #[arg(
        short = 'k',
        long,
        default_value = "",
        help = "Aliases of checks to skip, separated by a comma, e.g. `unused_import,no_exec`."
    )]
    pub skip_checks: String,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Automatically fix the issues that have a safe fix, then report what is left."
    )]
    pub fix: bool,
    #[arg(
        short,
        long,
        default_value = "false",
        help = "Report clean files explicitly."
    )]
    pub verbose: bool,
}

/// All configuration options that can be passed "globally"
#[derive(Debug, Default, clap::Args)]
#[command(next_help_heading = "Global options")]
pub(crate) struct GlobalOptions {
    /// The log level. One of: `error`, `warn`, `info`, `debug`, or `trace`. Defaults
    /// to `warn`, or to the filter set in the `PYWARD_LOG` environment variable.
    #[arg(long)]
    pub(crate) log_level: Option<LogLevel>,

    /// Disable colored output. To turn colored output off, either set this option or set
    /// the environment variable `NO_COLOR` to any non-zero value.
    #[arg(long)]
    pub(crate) no_color: bool,
}
