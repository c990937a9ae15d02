mod cli;
mod logging;

use std::process::ExitCode;
use colored::Colorize;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = logging::init(command_line_interface.verbose()) {
        eprintln!("{} {error:#}", "warning:".yellow().bold());
    }
    match command_line_interface.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
