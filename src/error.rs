use std::{fmt, io};

use color_eyre::Report;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// The path given on the command line could not be made absolute.
    InvalidPath(&'static str),
    InvalidArguments(String),
    Get(Report),
    Set(Report),
    Config(Box<figment::Error>),
    Output(io::Error),
}

impl Error {
    /// The underlying failure, if the user-facing line hides one.
    pub fn details(&self) -> Option<String> {
        match self {
            Error::InvalidPath(reason) => Some(reason.to_string()),
            Error::Get(report) | Error::Set(report) => Some(format!("{report:?}")),
            Error::InvalidArguments(_) | Error::Config(_) | Error::Output(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPath(_) => f.write_str("Invalid path"),
            Error::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            Error::Get(_) => f.write_str("Failed to get the desktop wallpaper"),
            Error::Set(_) => f.write_str("Failed to set the desktop wallpaper"),
            Error::Config(err) => write!(f, "Failed to read the configuration: {err}"),
            Error::Output(err) => write!(f, "Failed to write the output: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Output(err)
    }
}
