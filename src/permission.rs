use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionState {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// Storage-write permission for the photo library
pub trait PermissionGate {
    fn state(&self) -> PermissionState;

    /// Asks for permission, returning the resulting state
    fn request(&mut self) -> PermissionState;
}

/// Desktop permission derived from the library directory.
///
/// A missing directory is undetermined until requested, requesting creates it.
/// An existing read-only directory is denied.
#[derive(Debug, Clone)]
pub struct LibraryPermission {
    dir: PathBuf,
}

impl LibraryPermission {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PermissionGate for LibraryPermission {
    fn state(&self) -> PermissionState {
        match std::fs::metadata(&self.dir) {
            Ok(meta) if !meta.is_dir() => PermissionState::Denied,
            Ok(meta) if meta.permissions().readonly() => PermissionState::Denied,
            Ok(_) => PermissionState::Granted,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => PermissionState::Undetermined,
            Err(err) => {
                log::warn!("Cannot inspect library directory {}: {}", self.dir.display(), err);
                PermissionState::Denied
            }
        }
    }

    fn request(&mut self) -> PermissionState {
        if let Err(err) = std::fs::create_dir_all(&self.dir) {
            log::warn!("Cannot create library directory {}: {}", self.dir.display(), err);
            return PermissionState::Denied;
        }
        log::info!("Library directory ready: {}", self.dir.display());
        self.state()
    }
}

/// Downloads need no permission
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPermission;

impl PermissionGate for BrowserPermission {
    fn state(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request(&mut self) -> PermissionState {
        PermissionState::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_is_undetermined_until_requested() {
        let tmp = tempfile::tempdir().unwrap();
        let mut permission = LibraryPermission::new(tmp.path().join("StickerSmash"));
        assert_eq!(permission.state(), PermissionState::Undetermined);
        assert_eq!(permission.request(), PermissionState::Granted);
        assert!(permission.dir().is_dir());
    }

    #[test]
    fn test_file_in_place_of_dir_is_denied() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("not-a-dir");
        std::fs::write(&path, b"x").unwrap();
        let mut permission = LibraryPermission::new(&path);
        assert_eq!(permission.state(), PermissionState::Denied);
        assert_eq!(permission.request(), PermissionState::Denied);
    }
}
