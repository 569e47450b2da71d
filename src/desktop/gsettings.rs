use std::{
    path::{Path, PathBuf},
    process::Command,
};

use color_eyre::{
    eyre::{eyre, ContextCompat, WrapErr},
    Result,
};
use log::debug;

use super::{capture, uri, WallpaperService};
use crate::scale::ScaleStyle;

/// How the desktop stores the picture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Picture {
    Uri,
    Filename,
}

/// Desktops whose background lives in a dconf schema, edited through the
/// `gsettings` tool.
#[derive(Debug)]
pub struct GSettings {
    schema: &'static str,
    picture: Picture,
    /// GNOME 42+ keeps a second picture for the dark style.
    dark_variant: bool,
}

impl GSettings {
    pub const GNOME: GSettings = GSettings {
        schema: "org.gnome.desktop.background",
        picture: Picture::Uri,
        dark_variant: true,
    };
    pub const CINNAMON: GSettings = GSettings {
        schema: "org.cinnamon.desktop.background",
        picture: Picture::Uri,
        dark_variant: false,
    };
    pub const MATE: GSettings = GSettings {
        schema: "org.mate.background",
        picture: Picture::Filename,
        dark_variant: false,
    };

    fn picture_key(&self) -> &'static str {
        match self.picture {
            Picture::Uri => "picture-uri",
            Picture::Filename => "picture-filename",
        }
    }

    fn read(&self, key: &str) -> Result<String> {
        let raw = capture(Command::new("gsettings").args(["get", self.schema, key]))?;
        unquote(&raw).with_context(|| format!("unexpected value {raw:?} for {}.{key}", self.schema))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        capture(Command::new("gsettings").args(["set", self.schema, key, &quote(value)]))
            .wrap_err_with(|| format!("setting {}.{key}", self.schema))?;
        Ok(())
    }
}

impl WallpaperService for GSettings {
    fn get(&self) -> Result<PathBuf> {
        let value = self.read(self.picture_key())?;
        let path = match self.picture {
            Picture::Uri => uri::to_path(&value),
            Picture::Filename => (!value.is_empty()).then(|| PathBuf::from(&value)),
        };
        path.ok_or_else(|| eyre!("no wallpaper is set in {}", self.schema))
    }

    fn set(&self, path: &Path, style: ScaleStyle) -> Result<()> {
        let value = match self.picture {
            Picture::Uri => uri::from_path(path),
            Picture::Filename => path
                .to_str()
                .with_context(|| format!("{path:?} is not valid UTF-8"))?
                .to_string(),
        };

        self.write(self.picture_key(), &value)?;
        if self.dark_variant {
            if let Err(err) = self.write("picture-uri-dark", &value) {
                debug!("the dark wallpaper was left untouched: {err:?}");
            }
        }
        self.write("picture-options", picture_options(style))
    }
}

fn picture_options(style: ScaleStyle) -> &'static str {
    match style {
        ScaleStyle::Center => "centered",
        ScaleStyle::Tile => "wallpaper",
        ScaleStyle::Stretch => "stretched",
        ScaleStyle::Span => "spanned",
        ScaleStyle::Max | ScaleStyle::CropToFit => "zoom",
        ScaleStyle::KeepAspectRatio => "scaled",
    }
}

/// Serialize `value` as a GVariant string.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if matches!(c, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

/// Parse the GVariant string printed by `gsettings get`.
fn unquote(raw: &str) -> Option<String> {
    let quote = raw.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    let inner = raw[1..].strip_suffix(quote)?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.push(chars.next()?);
        } else {
            value.push(c);
        }
    }
    Some(value)
}
