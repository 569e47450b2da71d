use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use xdg::BaseDirectories;

use super::{capture, uri, WallpaperService};
use crate::scale::ScaleStyle;

const APPLETSRC: &str = "plasma-org.kde.plasma.desktop-appletsrc";
const IMAGE_GROUP: &str = "[Wallpaper][org.kde.image][General]";

/// KDE Plasma, scripted through the plasmashell D-Bus interface.
#[derive(Debug)]
pub struct Plasma {
    qdbus: &'static str,
    appletsrc: PathBuf,
}

impl Plasma {
    pub fn new() -> Result<Self> {
        // Plasma 6 ships qdbus6, Plasma 5 qdbus
        let qdbus = ["qdbus6", "qdbus"]
            .into_iter()
            .find(|exe| Command::new(exe).arg("--version").output().is_ok())
            .ok_or_else(|| eyre!("neither qdbus6 nor qdbus could be found"))?;
        let appletsrc = BaseDirectories::new()?.get_config_home().join(APPLETSRC);

        Ok(Self { qdbus, appletsrc })
    }
}

impl WallpaperService for Plasma {
    fn get(&self) -> Result<PathBuf> {
        let config = fs::read_to_string(&self.appletsrc)
            .wrap_err_with(|| format!("reading {:?}", self.appletsrc))?;
        current_image(&config).ok_or_else(|| eyre!("no wallpaper image in {:?}", self.appletsrc))
    }

    fn set(&self, path: &Path, style: ScaleStyle) -> Result<()> {
        capture(Command::new(self.qdbus).args([
            "org.kde.plasmashell",
            "/PlasmaShell",
            "org.kde.PlasmaShell.evaluateScript",
            &script(path, style),
        ]))
        .wrap_err("running the plasmashell wallpaper script")?;
        Ok(())
    }
}

/// Plasma `FillMode`, the Qt `Image.fillMode` values.
fn fill_mode(style: ScaleStyle) -> u8 {
    match style {
        ScaleStyle::Stretch => 0,
        ScaleStyle::KeepAspectRatio => 1,
        ScaleStyle::Span | ScaleStyle::Max | ScaleStyle::CropToFit => 2,
        ScaleStyle::Tile => 3,
        ScaleStyle::Center => 6,
    }
}

// The URI is percent encoded, so it cannot break out of the string literal
fn script(path: &Path, style: ScaleStyle) -> String {
    format!(
        "var allDesktops = desktops();\n\
         for (var i = 0; i < allDesktops.length; i++) {{\n\
           var d = allDesktops[i];\n\
           d.wallpaperPlugin = 'org.kde.image';\n\
           d.currentConfigGroup = ['Wallpaper', 'org.kde.image', 'General'];\n\
           d.writeConfig('Image', '{}');\n\
           d.writeConfig('FillMode', {});\n\
         }}\n",
        uri::from_path(path),
        fill_mode(style)
    )
}

/// First `Image=` entry of an image wallpaper group in the applets config.
fn current_image(config: &str) -> Option<PathBuf> {
    let mut in_image_group = false;
    for line in config.lines().map(str::trim) {
        if line.starts_with('[') {
            in_image_group = line.ends_with(IMAGE_GROUP);
        } else if in_image_group {
            if let Some(value) = line.strip_prefix("Image=") {
                if let Some(path) = uri::to_path(value.trim()) {
                    return Some(path);
                }
            }
        }
    }
    None
}
