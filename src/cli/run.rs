use std::path::Path;

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{check::check, export::export, init::init},
    exit_status::ExitStatus,
    report,
};

/// Dispatch to the command handler and print its result.
pub fn run(Arguments { command }: Arguments, verbose: bool) -> Result<ExitStatus> {
    let result = match command {
        Some(Command::Export(cmd)) => export(cmd)?,
        Some(Command::Check(cmd)) => check(cmd)?,
        Some(Command::Init) => return init(Path::new(".")),
        None => bail!("No command provided. Use --help to see available commands."),
    };

    report::print(&result, verbose);
    Ok(result.exit_status())
}
