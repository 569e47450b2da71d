use std::{fmt, str::FromStr};

use log::info;
use serde::Deserialize;

/// How the desktop should fit the wallpaper image on screen.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleStyle {
    Center,
    Tile,
    Stretch,
    #[default]
    Span,
    Max,
    CropToFit,
    KeepAspectRatio,
}

impl ScaleStyle {
    pub const ALL: [ScaleStyle; 7] = [
        ScaleStyle::Center,
        ScaleStyle::Tile,
        ScaleStyle::Stretch,
        ScaleStyle::Span,
        ScaleStyle::Max,
        ScaleStyle::CropToFit,
        ScaleStyle::KeepAspectRatio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScaleStyle::Center => "center",
            ScaleStyle::Tile => "tile",
            ScaleStyle::Stretch => "stretch",
            ScaleStyle::Span => "span",
            ScaleStyle::Max => "max",
            ScaleStyle::CropToFit => "crop-to-fit",
            ScaleStyle::KeepAspectRatio => "keep-aspect-ratio",
        }
    }

    /// Parse a `--scale` token, falling back to `default` when the token
    /// is not a known style.
    pub fn from_token_or(token: &str, default: ScaleStyle) -> ScaleStyle {
        token.parse().unwrap_or_else(|_| {
            info!("unknown scale {token:?}, using {default}");
            default
        })
    }
}

impl fmt::Display for ScaleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownScaleStyle(pub String);

impl fmt::Display for UnknownScaleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scale style {:?}", self.0)
    }
}

impl std::error::Error for UnknownScaleStyle {}

impl FromStr for ScaleStyle {
    type Err = UnknownScaleStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScaleStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownScaleStyle(s.to_string()))
    }
}
