use std::{
    ffi::OsStr,
    path::{Component, Path, PathBuf},
};

use crate::error::{Error, Result};

/// Longest path the desktop API accepts, terminator included.
#[cfg(windows)]
pub const MAX_PATH: usize = 260;
#[cfg(not(windows))]
pub const MAX_PATH: usize = 4096;

/// Turn a user supplied path into the absolute path handed to the desktop.
///
/// Relative paths are joined to the current directory and `.`/`..` are
/// folded lexically; the file itself does not have to exist.
pub fn resolve(path: &OsStr) -> Result<PathBuf> {
    if path.is_empty() {
        return Err(Error::InvalidPath("empty path"));
    }
    if path.as_encoded_bytes().contains(&0) {
        return Err(Error::InvalidPath("path contains a NUL character"));
    }

    let absolute = std::path::absolute(path)
        .map_err(|_| Error::InvalidPath("path could not be made absolute"))?;
    let resolved = normalize(&absolute);

    if resolved.as_os_str().len() >= MAX_PATH {
        return Err(Error::InvalidPath("path is too long"));
    }

    Ok(resolved)
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping the root is a no-op, matching `/..` == `/`
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
