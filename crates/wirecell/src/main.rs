mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use wirecell_core::kernel::constants::{APP_NAME, APP_VERSION};

use crate::cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = logging::init(args.log_json) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    log::info!("{} v{}", APP_NAME, APP_VERSION);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", APP_NAME, e);
            ExitCode::from(e.exit_code())
        }
    }
}
