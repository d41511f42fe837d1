use crate::license_audit::domain::SearchBoundary;
use crate::ports::outbound::{LicenseArtifact, LicenseLocator, LicenseLookup};
use crate::shared::security::read_license_bytes;
use dashmap::DashMap;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `LICENSE`, `LICENCE`, `UNLICENSE` or `COPYING`, optionally tagged
/// (`LICENSE-MIT`, `license_apache`) and with a text extension.
static LICENSE_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:un)?licen[cs]e|copying)(?:[-_][a-z0-9]+)*(?:\.(?:md|txt|rst))?$")
        .expect("license file pattern is valid")
});

/// Cache key for one directory searched under one boundary
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    boundary: PathBuf,
    dir: PathBuf,
}

/// FileSystemLicenseLocator adapter searching license files on disk
///
/// Every directory visited is cached together with the boundary it was
/// searched under, so packages sharing an ancestor walk it once. The cache is
/// a `DashMap` because lookups run from parallel blocking tasks.
pub struct FileSystemLicenseLocator {
    cache: DashMap<CacheKey, LicenseLookup>,
}

impl FileSystemLicenseLocator {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    pub fn is_license_file_name(name: &str) -> bool {
        LICENSE_FILE_NAME.is_match(name)
    }

    /// Number of cached directories (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// License files directly inside `dir`, sorted by name
    fn scan_dir(dir: &Path) -> LicenseLookup {
        let mut lookup = LicenseLookup::default();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                lookup
                    .warnings
                    .push(format!("Cannot list {}: {}", dir.display(), e));
                return lookup;
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| Self::is_license_file_name(name))
            .collect();
        names.sort();

        for name in names {
            let path = dir.join(&name);
            if !path.is_file() {
                continue;
            }
            match read_license_bytes(&path) {
                Ok(contents) => lookup.artifacts.push(LicenseArtifact::new(path, contents)),
                Err(e) => lookup
                    .warnings
                    .push(format!("Skipping license file: {:#}", e)),
            }
        }

        lookup
    }
}

impl Default for FileSystemLicenseLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseLocator for FileSystemLicenseLocator {
    fn locate(&self, dir: &Path, boundary: &SearchBoundary) -> LicenseLookup {
        let key = CacheKey {
            boundary: boundary.path().to_path_buf(),
            dir: dir.to_path_buf(),
        };

        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let mut lookup = Self::scan_dir(dir);

        let may_climb = lookup.is_empty() && dir != boundary.path() && boundary.contains(dir);
        if may_climb {
            if let Some(parent) = dir.parent() {
                let inherited = self.locate(parent, boundary);
                lookup.artifacts = inherited.artifacts;
                lookup.warnings.extend(inherited.warnings);
            }
        }

        self.cache.entry(key).or_insert(lookup).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_names(lookup: &LicenseLookup) -> Vec<String> {
        lookup
            .artifacts
            .iter()
            .map(|a| a.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_license_file_names() {
        for name in [
            "LICENSE",
            "license",
            "LICENSE.md",
            "License.txt",
            "LICENCE",
            "LICENSE-MIT",
            "LICENSE_APACHE.txt",
            "UNLICENSE",
            "COPYING",
            "copying.txt",
        ] {
            assert!(FileSystemLicenseLocator::is_license_file_name(name), "{}", name);
        }
        for name in ["license.go", "LICENSES", "README.md", "MIT-LICENSE", "license.md.bak"] {
            assert!(!FileSystemLicenseLocator::is_license_file_name(name), "{}", name);
        }
    }

    #[test]
    fn test_license_in_package_directory() {
        let root = TempDir::new().unwrap();
        let pkg = root.path().join("colors/blue");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("LICENSE-MIT"), "mit").unwrap();
        fs::write(pkg.join("LICENSE-APACHE"), "apache").unwrap();
        fs::write(pkg.join("license.go"), "package blue").unwrap();

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&pkg, &SearchBoundary::new(root.path()));
        assert_eq!(file_names(&lookup), vec!["LICENSE-APACHE", "LICENSE-MIT"]);
        assert_eq!(lookup.artifacts[1].contents(), b"mit");
    }

    #[test]
    fn test_license_inherited_from_ancestor() {
        let root = TempDir::new().unwrap();
        let colors = root.path().join("colors");
        let paint = colors.join("cmd/paint");
        fs::create_dir_all(&paint).unwrap();
        fs::write(colors.join("LICENSE"), "afl").unwrap();

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&paint, &SearchBoundary::new(colors.clone()));
        assert_eq!(lookup.artifacts.len(), 1);
        assert_eq!(lookup.artifacts[0].path(), colors.join("LICENSE"));
        // paint, cmd and colors are cached
        assert_eq!(locator.cache_size(), 3);
    }

    #[test]
    fn test_walk_stops_at_boundary() {
        let root = TempDir::new().unwrap();
        let green = root.path().join("colors/green");
        fs::create_dir_all(&green).unwrap();
        fs::write(root.path().join("LICENSE"), "outside").unwrap();

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&green, &SearchBoundary::new(root.path().join("colors")));
        assert!(lookup.is_empty());
        assert!(lookup.warnings.is_empty());
    }

    #[test]
    fn test_directory_outside_boundary_is_searched_alone() {
        let root = TempDir::new().unwrap();
        let pkg = root.path().join("other/pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(root.path().join("other/LICENSE"), "parent").unwrap();

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&pkg, &SearchBoundary::new(root.path().join("colors")));
        assert!(lookup.is_empty());
    }

    #[test]
    fn test_oversized_file_is_skipped_with_warning() {
        let root = TempDir::new().unwrap();
        let pkg = root.path().join("big");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("LICENSE"), vec![b'a'; 1024 * 1024 + 1]).unwrap();

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&pkg, &SearchBoundary::new(pkg.clone()));
        assert!(lookup.is_empty());
        assert_eq!(lookup.warnings.len(), 1);
    }

    #[test]
    fn test_unreadable_directory_degrades_to_no_license() {
        let root = TempDir::new().unwrap();
        let absent = root.path().join("absent");

        let locator = FileSystemLicenseLocator::new();
        let lookup = locator.locate(&absent, &SearchBoundary::new(absent.clone()));
        assert!(lookup.is_empty());
        assert!(lookup.warnings[0].contains("Cannot list"));
    }

    #[test]
    fn test_cache_is_keyed_by_boundary() {
        let root = TempDir::new().unwrap();
        let pkg = root.path().join("a/b");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(root.path().join("LICENSE"), "top").unwrap();

        let locator = FileSystemLicenseLocator::new();
        let narrow = locator.locate(&pkg, &SearchBoundary::new(root.path().join("a")));
        let wide = locator.locate(&pkg, &SearchBoundary::new(root.path()));
        assert!(narrow.is_empty());
        assert_eq!(wide.artifacts.len(), 1);
    }
}
