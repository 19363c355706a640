// vidpress-cli/src/main.rs
//
// Entry point for the vidpress CLI. Parses arguments, initializes logging,
// dispatches to the subcommand, and maps the outcome onto the process exit
// code: 0 only when every resolved input converted successfully.

use clap::Parser;
use console::style;
use std::process;

use vidpress_cli::cli::{Cli, Commands};
use vidpress_cli::commands::convert::run_convert;
use vidpress_cli::logging;

fn main() {
    logging::init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Convert(args) => match run_convert(args) {
            Ok(report) if report.all_succeeded() => 0,
            Ok(report) => {
                log::error!(
                    "{} of {} file(s) failed to convert",
                    report.total_files - report.successful_conversions,
                    report.total_files
                );
                1
            }
            Err(e) => {
                eprintln!("{} {e}", style("Error:").red().bold());
                1
            }
        },
    };

    process::exit(exit_code);
}
