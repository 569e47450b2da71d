use std::{
    path::{Path, PathBuf},
    process::Command,
};

use color_eyre::{
    eyre::{ensure, ContextCompat, WrapErr},
    Result,
};
use log::info;

use super::{capture, WallpaperService};
use crate::scale::ScaleStyle;

/// The desktops of every display, driven through System Events.
#[derive(Debug)]
pub struct SystemEvents;

fn osascript(script: &str) -> Result<String> {
    capture(Command::new("osascript").args(["-e", script]))
}

/// Quote `value` as an AppleScript string literal.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

impl WallpaperService for SystemEvents {
    fn get(&self) -> Result<PathBuf> {
        let picture =
            osascript(r#"tell application "System Events" to get picture of current desktop"#)
                .wrap_err("reading the desktop picture")?;
        ensure!(!picture.is_empty(), "the desktop has no picture");
        Ok(PathBuf::from(picture))
    }

    fn set(&self, path: &Path, style: ScaleStyle) -> Result<()> {
        if style != ScaleStyle::default() {
            info!("System Events cannot change how the picture is scaled, ignoring {style}");
        }
        let path = path
            .to_str()
            .with_context(|| format!("{path:?} is not valid UTF-8"))?;
        osascript(&format!(
            r#"tell application "System Events" to tell every desktop to set picture to {}"#,
            quote(path)
        ))
        .wrap_err("setting the desktop picture")?;
        Ok(())
    }
}
