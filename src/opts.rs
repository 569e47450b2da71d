use std::ffi::OsString;

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[clap(
    name = "wallpaper",
    author = "Sindre Sorhus",
    version,
    about = "Manage the desktop wallpaper",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Opts {
    #[clap(long, action = ArgAction::SetTrue, help = "Print the usage and exit")]
    pub help: bool,
    #[clap(long, action = ArgAction::SetTrue, help = "Print the version and exit")]
    pub version: bool,
    #[clap(
        value_name = "FILE",
        allow_hyphen_values = true,
        value_hint = clap::ValueHint::FilePath,
        help = "Image to use as wallpaper. Prints the current wallpaper when omitted"
    )]
    pub file: Option<OsString>,
    #[clap(
        long,
        value_name = "STYLE",
        allow_hyphen_values = true,
        requires = "file",
        help = "How the image fits the screen: center, tile, stretch, span, max, crop-to-fit or keep-aspect-ratio"
    )]
    pub scale: Option<String>,
}
