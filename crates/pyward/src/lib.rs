use crate::args::Args;
use crate::status::ExitStatus;

pub mod args;
pub mod commands;
pub mod discovery;
pub mod logging;
pub mod output_format;
pub mod settings;
pub mod status;

pub use args::CheckCommand;

pub fn run(args: Args) -> anyhow::Result<ExitStatus> {
    logging::init_logging(args.global_options.log_level);

    if args.global_options.no_color {
        colored::control::set_override(false);
    }

    commands::check::check(args.check)
}
