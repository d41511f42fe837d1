use crate::license_audit::domain::PackageId;
use crate::ports::outbound::{PackageResolver, ResolvedPackageInfo};
use crate::shared::error::LicenseBomError;
use crate::shared::security::read_config_document;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File marking a directory as a buildable package
pub const MANIFEST_FILE: &str = "package.toml";

#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    imports: Vec<String>,
}

/// SourceTreeResolver adapter resolving packages laid out on disk
///
/// Package `a/b` lives in `<root>/a/b` and is buildable when that directory
/// holds a `package.toml` manifest listing its imports. The standard root, when
/// set, is searched first; packages found there are reported as standard.
pub struct SourceTreeResolver {
    root: PathBuf,
    std_root: Option<PathBuf>,
}

impl SourceTreeResolver {
    /// Both roots are canonicalized so that package directories are absolute.
    ///
    /// # Errors
    /// Returns `LicenseBomError::InvalidSourceRoot` if a root is not an
    /// existing directory.
    pub fn new(root: &Path, std_root: Option<&Path>) -> Result<Self> {
        Ok(Self {
            root: Self::canonical_root(root)?,
            std_root: std_root.map(Self::canonical_root).transpose()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn canonical_root(path: &Path) -> Result<PathBuf> {
        let canonical = path.canonicalize().map_err(|e| LicenseBomError::InvalidSourceRoot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !canonical.is_dir() {
            return Err(LicenseBomError::InvalidSourceRoot {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            }
            .into());
        }
        Ok(canonical)
    }

    fn read_manifest(dir: &Path) -> Result<PackageManifest> {
        let path = dir.join(MANIFEST_FILE);
        let content = read_config_document(&path, "package manifest")?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid manifest {}: {}", path.display(), e))
    }

    fn is_package_dir(dir: &Path) -> bool {
        dir.join(MANIFEST_FILE).is_file()
    }

    /// Hidden, underscore-prefixed and `testdata` directories hold no packages
    fn is_ignored_dir(name: &str) -> bool {
        name.starts_with('.') || name.starts_with('_') || name == "testdata"
    }

    /// Identifier of `dir` relative to the source root
    fn id_for(&self, dir: &Path) -> Option<PackageId> {
        let relative = dir.strip_prefix(&self.root).ok()?;
        let segments: Vec<&str> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        PackageId::new(segments.join("/")).ok()
    }
}

impl PackageResolver for SourceTreeResolver {
    fn resolve(&self, id: &PackageId) -> Result<ResolvedPackageInfo> {
        if let Some(std_root) = &self.std_root {
            let dir = id.dir_under(std_root);
            if Self::is_package_dir(&dir) {
                let manifest = Self::read_manifest(&dir)?;
                return Ok(ResolvedPackageInfo {
                    dir,
                    imports: manifest.imports,
                    standard: true,
                });
            }
        }

        let dir = id.dir_under(&self.root);
        if !dir.is_dir() {
            anyhow::bail!(
                "cannot find package \"{}\" in {}",
                id,
                self.root.display()
            );
        }
        if !Self::is_package_dir(&dir) {
            anyhow::bail!(
                "no buildable source in {} (missing {})",
                dir.display(),
                MANIFEST_FILE
            );
        }

        let manifest = Self::read_manifest(&dir)?;
        Ok(ResolvedPackageInfo {
            dir,
            imports: manifest.imports,
            standard: false,
        })
    }

    fn expand_pattern(&self, prefix: Option<&PackageId>) -> Result<Vec<PackageId>> {
        let base = match prefix {
            Some(prefix) => prefix.dir_under(&self.root),
            None => self.root.clone(),
        };
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        let mut pending = vec![base];

        while let Some(dir) = pending.pop() {
            if Self::is_package_dir(&dir) {
                if let Some(id) = self.id_for(&dir) {
                    found.push(id);
                }
            }

            let entries = fs::read_dir(&dir)
                .map_err(|e| anyhow::anyhow!("cannot list {}: {}", dir.display(), e))?;
            for entry in entries {
                let entry = entry?;
                // Symlinked directories are not followed.
                if !entry.file_type()?.is_dir() {
                    continue;
                }
                let name = entry.file_name();
                if name.to_str().is_some_and(|n| !Self::is_ignored_dir(n)) {
                    pending.push(entry.path());
                }
            }
        }

        found.sort();
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn package(root: &Path, id: &str, imports: &[&str]) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        let list: Vec<String> = imports.iter().map(|i| format!("\"{}\"", i)).collect();
        fs::write(
            dir.join(MANIFEST_FILE),
            format!("imports = [{}]\n", list.join(", ")),
        )
        .unwrap();
    }

    fn id(raw: &str) -> PackageId {
        PackageId::new(raw).unwrap()
    }

    fn fixture() -> (TempDir, TempDir) {
        let src = TempDir::new().unwrap();
        package(src.path(), "colors/red", &["fmt"]);
        package(src.path(), "colors/cmd/paint", &["colors/red"]);
        package(src.path(), "colors/cmd/mix", &["colors/red", "couleurs/red"]);
        package(src.path(), "colors/.hidden/pkg", &[]);
        fs::create_dir_all(src.path().join("colors/empty")).unwrap();

        let std = TempDir::new().unwrap();
        package(std.path(), "fmt", &["io"]);
        (src, std)
    }

    #[test]
    fn test_resolve_package() {
        let (src, std) = fixture();
        let resolver = SourceTreeResolver::new(src.path(), Some(std.path())).unwrap();
        let info = resolver.resolve(&id("colors/cmd/mix")).unwrap();

        assert!(!info.standard);
        assert_eq!(info.imports, vec!["colors/red", "couleurs/red"]);
        assert_eq!(info.dir, resolver.root().join("colors/cmd/mix"));
        assert!(info.dir.is_absolute());
    }

    #[test]
    fn test_standard_package() {
        let (src, std) = fixture();
        let resolver = SourceTreeResolver::new(src.path(), Some(std.path())).unwrap();
        let info = resolver.resolve(&id("fmt")).unwrap();
        assert!(info.standard);
        assert_eq!(info.imports, vec!["io"]);
    }

    #[test]
    fn test_missing_and_unbuildable_packages() {
        let (src, _std) = fixture();
        let resolver = SourceTreeResolver::new(src.path(), None).unwrap();

        let err = resolver.resolve(&id("colors/missing")).unwrap_err();
        assert!(err.to_string().contains("cannot find package"));

        let err = resolver.resolve(&id("colors/empty")).unwrap_err();
        assert!(err.to_string().contains("no buildable source"));
    }

    #[test]
    fn test_manifest_without_imports() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("solo")).unwrap();
        fs::write(src.path().join("solo").join(MANIFEST_FILE), "").unwrap();
        let resolver = SourceTreeResolver::new(src.path(), None).unwrap();
        assert!(resolver.resolve(&id("solo")).unwrap().imports.is_empty());
    }

    #[test]
    fn test_invalid_manifest() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("bad")).unwrap();
        fs::write(src.path().join("bad").join(MANIFEST_FILE), "imports = 3").unwrap();
        let resolver = SourceTreeResolver::new(src.path(), None).unwrap();
        let err = resolver.resolve(&id("bad")).unwrap_err();
        assert!(err.to_string().contains("invalid manifest"));
    }

    #[test]
    fn test_expand_pattern() {
        let (src, _std) = fixture();
        let resolver = SourceTreeResolver::new(src.path(), None).unwrap();

        let cmd = resolver.expand_pattern(Some(&id("colors/cmd"))).unwrap();
        assert_eq!(cmd, vec![id("colors/cmd/mix"), id("colors/cmd/paint")]);

        let all = resolver.expand_pattern(None).unwrap();
        assert_eq!(
            all,
            vec![id("colors/cmd/mix"), id("colors/cmd/paint"), id("colors/red")]
        );

        assert!(resolver
            .expand_pattern(Some(&id("nothing/here")))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_root() {
        let src = TempDir::new().unwrap();
        let err = SourceTreeResolver::new(&src.path().join("absent"), None)
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<LicenseBomError>(),
            Some(LicenseBomError::InvalidSourceRoot { .. })
        ));
    }
}
