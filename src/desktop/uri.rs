//! `file://` URIs as stored by GNOME and Plasma.

use std::{
    ffi::OsString,
    os::unix::ffi::{OsStrExt, OsStringExt},
    path::{Path, PathBuf},
};

const SCHEME: &str = "file://";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~' | b'/')
}

pub fn from_path(path: &Path) -> String {
    let mut uri = String::from(SCHEME);
    for &byte in path.as_os_str().as_bytes() {
        if is_unreserved(byte) {
            uri.push(byte as char);
        } else {
            uri.push_str(&format!("%{byte:02X}"));
        }
    }
    uri
}

/// Path behind a `file://` URI. Values without the scheme are taken as
/// plain paths, which older desktop versions store.
pub fn to_path(value: &str) -> Option<PathBuf> {
    let Some(encoded) = value.strip_prefix(SCHEME) else {
        return (!value.is_empty()).then(|| PathBuf::from(value));
    };
    // Only local files, `file://host/...` is not something we can show
    if !encoded.starts_with('/') {
        return None;
    }

    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let byte = bytes
                .get(i + 1..i + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())?;
            decoded.push(byte);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    Some(PathBuf::from(OsString::from_vec(decoded)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(
            "file:///home/me/Pictures/My%20Wallpaper%27s.jpg",
            from_path(Path::new("/home/me/Pictures/My Wallpaper's.jpg"))
        );
        assert_eq!(
            "file:///tmp/%C3%A9t%C3%A9.png",
            from_path(Path::new("/tmp/été.png"))
        );
    }

    #[test]
    fn test_to_path() {
        assert_eq!(
            Some(PathBuf::from("/home/me/Pictures/My Wallpaper's.jpg")),
            to_path("file:///home/me/Pictures/My%20Wallpaper%27s.jpg")
        );
        assert_eq!(
            Some(PathBuf::from("/tmp/été.png")),
            to_path("file:///tmp/%C3%A9t%C3%A9.png")
        );
    }

    #[test]
    fn test_plain_path_is_accepted() {
        assert_eq!(
            Some(PathBuf::from("/usr/share/backgrounds/default.png")),
            to_path("/usr/share/backgrounds/default.png")
        );
        assert_eq!(None, to_path(""));
    }

    #[test]
    fn test_malformed_uri() {
        assert_eq!(None, to_path("file:///tmp/100%"));
        assert_eq!(None, to_path("file:///tmp/%zz.png"));
        assert_eq!(None, to_path("file://server/share/a.png"));
    }
}
