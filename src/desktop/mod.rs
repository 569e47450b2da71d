//! Desktop wallpaper backends.
//!
//! Every backend reads and writes the wallpaper through the interface the
//! desktop itself exposes: COM on Windows, System Events on macOS and the
//! settings daemons of the Linux desktops.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result, Section,
};
use log::debug;
use serde::Deserialize;

use crate::{config::Config, scale::ScaleStyle};

#[cfg(all(unix, not(target_os = "macos")))]
mod gsettings;
#[cfg(all(unix, not(target_os = "macos")))]
mod kde;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(all(unix, not(target_os = "macos")))]
mod uri;
#[cfg(windows)]
mod win32;

/// Access to the desktop background configuration.
pub trait WallpaperService {
    /// Path of the image currently used as wallpaper.
    fn get(&self) -> Result<PathBuf>;
    /// Show `path` as wallpaper using `style`, refreshing the desktop.
    fn set(&self, path: &Path, style: ScaleStyle) -> Result<()>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Windows,
    Macos,
    Gnome,
    Cinnamon,
    Mate,
    Kde,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Windows => "windows",
            Backend::Macos => "macos",
            Backend::Gnome => "gnome",
            Backend::Cinnamon => "cinnamon",
            Backend::Mate => "mate",
            Backend::Kde => "kde",
        };
        f.write_str(name)
    }
}

impl Backend {
    /// The backend for the running desktop, if there is one.
    pub fn detect() -> Option<Backend> {
        if cfg!(windows) {
            Some(Backend::Windows)
        } else if cfg!(target_os = "macos") {
            Some(Backend::Macos)
        } else {
            let current = std::env::var("XDG_CURRENT_DESKTOP").ok();
            let session = std::env::var("DESKTOP_SESSION").ok();
            Self::from_desktop_names(current.as_deref(), session.as_deref())
        }
    }

    /// Match `XDG_CURRENT_DESKTOP` (a colon separated list) and then
    /// `DESKTOP_SESSION` against the desktops we know.
    fn from_desktop_names(current: Option<&str>, session: Option<&str>) -> Option<Backend> {
        current
            .into_iter()
            .flat_map(|names| names.split(':'))
            .chain(session)
            .find_map(|name| match name.trim().to_ascii_lowercase().as_str() {
                "gnome" | "gnome-classic" | "gnome-flashback" | "ubuntu" | "unity" | "budgie"
                | "budgie-desktop" | "pantheon" => Some(Backend::Gnome),
                "x-cinnamon" | "cinnamon" => Some(Backend::Cinnamon),
                "mate" => Some(Backend::Mate),
                "kde" | "plasma" | "plasmawayland" | "plasmax11" => Some(Backend::Kde),
                _ => None,
            })
    }

    fn connect(self) -> Result<Box<dyn WallpaperService>> {
        match self {
            #[cfg(windows)]
            Backend::Windows => Ok(Box::new(win32::DesktopWallpaper::new()?)),
            #[cfg(target_os = "macos")]
            Backend::Macos => Ok(Box::new(macos::SystemEvents)),
            #[cfg(all(unix, not(target_os = "macos")))]
            Backend::Gnome => Ok(Box::new(gsettings::GSettings::GNOME)),
            #[cfg(all(unix, not(target_os = "macos")))]
            Backend::Cinnamon => Ok(Box::new(gsettings::GSettings::CINNAMON)),
            #[cfg(all(unix, not(target_os = "macos")))]
            Backend::Mate => Ok(Box::new(gsettings::GSettings::MATE)),
            #[cfg(all(unix, not(target_os = "macos")))]
            Backend::Kde => Ok(Box::new(kde::Plasma::new()?)),
            #[allow(unreachable_patterns)]
            other => Err(eyre!("the {other} backend is not available on this platform")),
        }
    }
}

/// Open the backend picked in `config`, or the one for the running desktop.
pub fn connect(config: &Config) -> Result<Box<dyn WallpaperService>> {
    let backend = match config.backend {
        Some(backend) => backend,
        None => Backend::detect()
            .ok_or_else(|| eyre!("unsupported desktop environment"))
            .with_suggestion(|| {
                "set WALLPAPER_BACKEND to one of gnome, cinnamon, mate or kde"
            })?,
    };
    debug!("using the {backend} backend");
    backend
        .connect()
        .wrap_err_with(|| format!("connecting to the {backend} backend"))
}

/// Run a helper program and return its trimmed standard output.
#[cfg(unix)]
fn capture(command: &mut std::process::Command) -> Result<String> {
    let program = command.get_program().to_string_lossy().into_owned();
    debug!("running {command:?}");

    let output = command
        .output()
        .wrap_err_with(|| format!("running {program}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(eyre!(stderr)).wrap_err(format!("{program} exited with {}", output.status));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    #[cfg(unix)]
    use std::process::Command;

    use super::*;

    #[test]
    fn test_detect_from_current_desktop() {
        assert_eq!(
            Some(Backend::Gnome),
            Backend::from_desktop_names(Some("ubuntu:GNOME"), None)
        );
        assert_eq!(
            Some(Backend::Kde),
            Backend::from_desktop_names(Some("KDE"), Some("plasma"))
        );
        assert_eq!(
            Some(Backend::Cinnamon),
            Backend::from_desktop_names(Some("X-Cinnamon"), None)
        );
        assert_eq!(
            Some(Backend::Mate),
            Backend::from_desktop_names(Some("MATE"), None)
        );
    }

    #[test]
    fn test_detect_falls_back_to_session() {
        assert_eq!(
            Some(Backend::Kde),
            Backend::from_desktop_names(Some("sway"), Some("plasmawayland"))
        );
        assert_eq!(
            Some(Backend::Gnome),
            Backend::from_desktop_names(None, Some("gnome"))
        );
    }

    #[test]
    fn test_detect_unknown_desktop() {
        assert_eq!(None, Backend::from_desktop_names(Some("Hyprland"), Some("hyprland")));
        assert_eq!(None, Backend::from_desktop_names(None, None));
    }

    #[test]
    fn test_configured_backend_is_used() {
        // The backend that can never be built here proves detection was skipped
        let foreign = if cfg!(windows) {
            Backend::Kde
        } else {
            Backend::Windows
        };
        let config = Config {
            backend: Some(foreign),
            ..Default::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(format!("{err:?}").contains("not available on this platform"));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_output() {
        let out = capture(Command::new("sh").args(["-c", "echo '  hello  '"])).unwrap();
        assert_eq!("hello", out);
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_failure_carries_stderr() {
        let err = capture(Command::new("sh").args(["-c", "echo broken >&2; exit 3"])).unwrap_err();
        let report = format!("{err:?}");
        assert!(report.contains("sh exited with"));
        assert!(report.contains("broken"));
    }
}
