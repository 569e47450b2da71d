pub mod cli;
pub mod config;
pub mod desktop;
pub mod error;
mod opts;
pub mod path;
pub mod scale;

pub use error::{Error, Result};
