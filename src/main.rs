use std::process::ExitCode;

use clap::Parser;
use dlgsheet::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    env_logger::init();
    let args = Arguments::parse();

    match dlgsheet::cli::run_cli(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
