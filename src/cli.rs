use std::{ffi::OsString, io::Write, path::PathBuf};

use clap::Parser;
use color_eyre::Result as EyreResult;
use log::debug;

use crate::{
    config::Config,
    desktop::WallpaperService,
    error::{Error, Result},
    opts::Opts,
    path,
    scale::ScaleStyle,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP: &str = "
  Manage the desktop wallpaper

  Usage: wallpaper [file]
  Usage (scale): wallpaper [file] --scale [center | stretch | tile | span | max | crop-to-fit | keep-aspect-ratio]

  Created by Sindre Sorhus";

/// What a single invocation does.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Version,
    Help,
    Get,
    Set {
        /// Already resolved to an absolute path.
        path: PathBuf,
        /// Raw `--scale` token, resolved against the configured default.
        scale: Option<String>,
    },
}

impl Command {
    /// Whether running this command talks to the desktop.
    pub fn uses_desktop(&self) -> bool {
        matches!(self, Command::Get | Command::Set { .. })
    }
}

/// Parse the full argument list, program name included.
///
/// The grammar is positional: `[--version | --help | <path> [--scale <style>]]`.
/// The path is resolved before anything after it is looked at.
pub fn parse<I, T>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let Some(first) = args.get(1) else {
        return Ok(Command::Get);
    };
    // A leading --version/--help wins over whatever follows it
    match first.to_str() {
        Some("--version") => return Ok(Command::Version),
        Some("--help") => return Ok(Command::Help),
        _ => {}
    }

    let path = path::resolve(first)?;

    if let Some(second) = args.get(2).filter(|arg| arg.as_os_str() != "--scale") {
        return Err(Error::InvalidArguments(format!(
            "unexpected argument '{}' found",
            second.to_string_lossy()
        )));
    }

    let opts = Opts::try_parse_from(&args).map_err(invalid_arguments)?;
    if opts.help || opts.version {
        return Err(Error::InvalidArguments(
            "--help and --version are only accepted as the first argument".to_string(),
        ));
    }
    if opts.file.as_ref() != Some(first) {
        return Err(Error::InvalidArguments(
            "the file must come before --scale".to_string(),
        ));
    }

    Ok(Command::Set {
        path,
        scale: opts.scale,
    })
}

fn invalid_arguments(err: clap::Error) -> Error {
    let message = err.to_string();
    let first_line = message.lines().next().unwrap_or_default();
    Error::InvalidArguments(
        first_line
            .strip_prefix("error: ")
            .unwrap_or(first_line)
            .to_string(),
    )
}

/// Execute `command`, connecting to the desktop only when it is needed.
pub fn run<F, W>(command: Command, config: &Config, connect: F, out: &mut W) -> Result<()>
where
    F: FnOnce(&Config) -> EyreResult<Box<dyn WallpaperService>>,
    W: Write,
{
    match command {
        Command::Version => writeln!(out, "{VERSION}")?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Get => {
            let wallpaper = connect(config)
                .and_then(|desktop| desktop.get())
                .map_err(Error::Get)?;
            writeln!(out, "{}", wallpaper.display())?;
        }
        Command::Set { path, scale } => {
            let style = scale.map_or(config.scale, |token| {
                ScaleStyle::from_token_or(&token, config.scale)
            });
            debug!("setting wallpaper {path:?} with style {style}");
            connect(config)
                .and_then(|desktop| desktop.set(&path, style))
                .map_err(Error::Set)?;
        }
    }

    Ok(())
}
