use std::{
    ffi::c_void,
    path::{Path, PathBuf},
};

use ::windows::{
    core::{HSTRING, PCWSTR},
    Win32::{
        System::Com::{
            CoCreateInstance, CoFreeUnusedLibraries, CoInitializeEx, CoTaskMemFree,
            CoUninitialize, CLSCTX_LOCAL_SERVER, COINIT_APARTMENTTHREADED,
        },
        UI::Shell::{
            DesktopWallpaper as DesktopWallpaperClass, IDesktopWallpaper,
            DESKTOP_WALLPAPER_POSITION, DWPOS_CENTER, DWPOS_FILL, DWPOS_FIT, DWPOS_SPAN,
            DWPOS_STRETCH, DWPOS_TILE,
        },
    },
};
use color_eyre::{
    eyre::{ensure, WrapErr},
    Result,
};

use super::WallpaperService;
use crate::scale::ScaleStyle;

/// COM initialised on this thread until dropped.
struct Apartment;

impl Apartment {
    fn enter() -> Result<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .wrap_err("initializing COM")?;
        Ok(Self)
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        unsafe {
            CoFreeUnusedLibraries();
            CoUninitialize();
        }
    }
}

/// The shell `IDesktopWallpaper` object, applied to every monitor.
pub struct DesktopWallpaper {
    // Fields drop in order: the interface is released before COM goes away
    interface: IDesktopWallpaper,
    _apartment: Apartment,
}

impl DesktopWallpaper {
    pub fn new() -> Result<Self> {
        let apartment = Apartment::enter()?;
        let interface: IDesktopWallpaper =
            unsafe { CoCreateInstance(&DesktopWallpaperClass, None, CLSCTX_LOCAL_SERVER) }
                .wrap_err("creating the DesktopWallpaper object")?;

        Ok(Self {
            interface,
            _apartment: apartment,
        })
    }
}

impl WallpaperService for DesktopWallpaper {
    fn get(&self) -> Result<PathBuf> {
        // A null monitor id asks for the wallpaper shared by all monitors
        let wallpaper = unsafe { self.interface.GetWallpaper(PCWSTR::null()) }
            .wrap_err("IDesktopWallpaper::GetWallpaper")?;
        let path = unsafe { wallpaper.to_string() };
        unsafe { CoTaskMemFree(Some(wallpaper.0 as *const c_void)) };

        let path = path.wrap_err("decoding the wallpaper path")?;
        ensure!(!path.is_empty(), "monitors do not share the same wallpaper");
        Ok(PathBuf::from(path))
    }

    fn set(&self, path: &Path, style: ScaleStyle) -> Result<()> {
        unsafe {
            self.interface
                .SetWallpaper(PCWSTR::null(), &HSTRING::from(path.as_os_str()))
                .wrap_err("IDesktopWallpaper::SetWallpaper")?;
            self.interface
                .SetPosition(position(style))
                .wrap_err("IDesktopWallpaper::SetPosition")?;
        }
        Ok(())
    }
}

fn position(style: ScaleStyle) -> DESKTOP_WALLPAPER_POSITION {
    match style {
        ScaleStyle::Center => DWPOS_CENTER,
        ScaleStyle::Tile => DWPOS_TILE,
        ScaleStyle::Stretch => DWPOS_STRETCH,
        ScaleStyle::Span => DWPOS_SPAN,
        ScaleStyle::Max | ScaleStyle::CropToFit => DWPOS_FILL,
        ScaleStyle::KeepAspectRatio => DWPOS_FIT,
    }
}
