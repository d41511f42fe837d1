use crate::license_audit::domain::SearchBoundary;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One license file found for a package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseArtifact {
    path: PathBuf,
    contents: Arc<[u8]>,
}

impl LicenseArtifact {
    pub fn new(path: PathBuf, contents: impl Into<Arc<[u8]>>) -> Self {
        Self {
            path,
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }
}

/// Outcome of a license search for one directory
///
/// An empty artifact list means no license governs the directory. Problems met
/// on the way (unreadable directory, oversized file) are kept as warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseLookup {
    pub artifacts: Vec<LicenseArtifact>,
    pub warnings: Vec<String>,
}

impl LicenseLookup {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// LicenseLocator port for finding the license text governing a directory
///
/// The search starts in `dir` and climbs one ancestor at a time. It never
/// leaves `boundary` and stops at the filesystem root. Lookups may run from
/// several blocking tasks at once.
pub trait LicenseLocator: Send + Sync {
    /// Returns the license files of the nearest directory that has any,
    /// sorted by file name. Never fails; I/O problems become warnings.
    fn locate(&self, dir: &Path, boundary: &SearchBoundary) -> LicenseLookup;
}
