use license_bom::ports::outbound::{LicenseArtifact, LicenseLookup};
use license_bom::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock LicenseLocator returning license texts registered per package
#[derive(Default)]
pub struct MockLicenseLocator {
    pub licenses: HashMap<PathBuf, Vec<(PathBuf, String)>>,
    pub lookups: AtomicUsize,
}

impl MockLicenseLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, package: &str, text: &str) -> Self {
        let dir = PathBuf::from("/src").join(package);
        self.licenses
            .entry(dir.clone())
            .or_default()
            .push((dir.join("LICENSE"), text.to_string()));
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl LicenseLocator for MockLicenseLocator {
    fn locate(&self, dir: &Path, _boundary: &SearchBoundary) -> LicenseLookup {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let artifacts = self
            .licenses
            .get(dir)
            .into_iter()
            .flatten()
            .map(|(path, text)| LicenseArtifact::new(path.clone(), text.as_bytes()))
            .collect();
        LicenseLookup {
            artifacts,
            warnings: Vec::new(),
        }
    }
}
