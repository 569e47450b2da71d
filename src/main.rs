use std::{io, process::ExitCode};

use flexi_logger::{Logger, LoggerHandle};
use log::debug;

use wallpaper::{cli, config::Config, desktop, Result};

fn setup() -> color_eyre::Result<LoggerHandle> {
    color_eyre::install()?;
    Ok(Logger::try_with_env_or_str("warn")?.start()?)
}

fn run() -> Result<()> {
    let command = cli::parse(std::env::args_os())?;
    let config = if command.uses_desktop() {
        Config::load()?
    } else {
        Config::default()
    };

    cli::run(command, &config, desktop::connect, &mut io::stdout().lock())
}

fn main() -> ExitCode {
    let _logger = match setup() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("{err:?}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(details) = err.details() {
                debug!("{details}");
            }
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
