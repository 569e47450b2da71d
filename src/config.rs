use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::{desktop::Backend, error::Result, scale::ScaleStyle};

/// Optional user preferences, read from `config.toml` and `WALLPAPER_*`.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Style used when `--scale` is missing or not a known style.
    pub scale: ScaleStyle,
    /// Skip desktop detection and always use this backend.
    pub backend: Option<Backend>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::figment(config_file()).extract()?)
    }

    fn figment(file: Option<PathBuf>) -> Figment {
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed("WALLPAPER_"))
    }
}

#[cfg(unix)]
fn config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("wallpaper")
        .ok()?
        .find_config_file("config.toml")
}

#[cfg(not(unix))]
fn config_file() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(|dir| PathBuf::from(dir).join("wallpaper").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment(None).extract()?;
            assert_eq!(Config::default(), config);
            assert_eq!(ScaleStyle::Span, config.scale);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        Jail::expect_with(|_jail| {
            let config: Config = Config::figment(Some("absent.toml".into())).extract()?;
            assert_eq!(Config::default(), config);
            Ok(())
        });
    }

    #[test]
    fn test_read_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                scale = "crop-to-fit"
                backend = "kde"
                "#,
            )?;
            let config: Config = Config::figment(Some("config.toml".into())).extract()?;
            assert_eq!(ScaleStyle::CropToFit, config.scale);
            assert_eq!(Some(Backend::Kde), config.backend);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"scale = "tile""#)?;
            jail.set_env("WALLPAPER_SCALE", "center");
            jail.set_env("WALLPAPER_BACKEND", "gnome");
            let config: Config = Config::figment(Some("config.toml".into())).extract()?;
            assert_eq!(ScaleStyle::Center, config.scale);
            assert_eq!(Some(Backend::Gnome), config.backend);
            Ok(())
        });
    }

    #[test]
    fn test_unknown_scale_in_file_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", r#"scale = "sideways""#)?;
            assert!(Config::figment(Some("config.toml".into()))
                .extract::<Config>()
                .is_err());
            Ok(())
        });
    }
}
