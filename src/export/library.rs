use std::path::{Path, PathBuf};

use super::capture::{capture_region, CaptureOptions, Composite};
use super::{ExportReceipt, ExportSink};
use crate::error::ExportError;

/// The device photo library
pub trait MediaLibrary: Send + Sync {
    /// Copies `file` into the library and returns where it ended up
    fn persist(&self, file: &Path) -> Result<PathBuf, ExportError>;
}

/// A directory of pictures, `<Pictures>/StickerSmash` by default
#[derive(Debug, Clone)]
pub struct PicturesLibrary {
    dir: PathBuf,
}

impl PicturesLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MediaLibrary for PicturesLibrary {
    fn persist(&self, file: &Path) -> Result<PathBuf, ExportError> {
        if !self.dir.is_dir() {
            return Err(ExportError::Persist(format!(
                "library directory {} does not exist",
                self.dir.display()
            )));
        }
        let file_name = file
            .file_name()
            .ok_or_else(|| ExportError::Persist(format!("{} has no file name", file.display())))?;
        let target = self.dir.join(file_name);
        std::fs::copy(file, &target)
            .map_err(|err| ExportError::Persist(format!("copy to {}: {}", target.display(), err)))?;
        Ok(target)
    }
}

/// Native export: capture into a temporary file, then persist it into the library
pub struct LibrarySink<L> {
    library: L,
    options: CaptureOptions,
    scratch_dir: PathBuf,
}

impl<L: MediaLibrary> LibrarySink<L> {
    pub fn new(library: L, options: CaptureOptions, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            library,
            options,
            scratch_dir: scratch_dir.into(),
        }
    }
}

impl<L: MediaLibrary> ExportSink for LibrarySink<L> {
    fn name(&self) -> &'static str {
        "library"
    }

    fn requires_permission(&self) -> bool {
        true
    }

    fn export(&self, composite: &Composite) -> Result<ExportReceipt, ExportError> {
        let local = capture_region(composite, self.options, &self.scratch_dir)?;
        let persisted = self.library.persist(&local);

        if let Err(err) = std::fs::remove_file(&local) {
            log::warn!("Could not remove temporary capture {}: {}", local.display(), err);
        }

        let path = persisted?;
        log::info!("Saved composite to {}", path.display());
        Ok(ExportReceipt::SavedToLibrary { path })
    }
}
