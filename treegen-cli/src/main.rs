//! Command-line entry point for tree generation.
//!
//! This binary installs the logger, then delegates argument parsing and
//! generation to the `app` module and prints the result to stdout.

mod app;

use std::process::ExitCode;

/// Parses arguments, generates one tree and prints it.
///
/// ### Returns
/// - `ExitCode::SUCCESS` once the output has been printed.
/// - `ExitCode::FAILURE` on bad arguments or a failed generation.
fn main() -> ExitCode {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match app::parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{}", app::HELP);
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{}", app::HELP);
        return ExitCode::SUCCESS;
    }

    match app::run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("generation failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
