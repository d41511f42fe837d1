use crate::license_audit::domain::PackageId;
use crate::shared::Result;
use std::path::PathBuf;

/// What the package resolver knows about one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackageInfo {
    /// Directory holding the package sources
    pub dir: PathBuf,
    /// Direct imports, exactly as declared by the package
    pub imports: Vec<String>,
    /// Whether the package ships with the platform's standard distribution
    pub standard: bool,
}

/// PackageResolver port for locating packages and their direct imports
///
/// This port abstracts the build system that knows where a package's
/// sources live. Implementations must be `Send + Sync` so that one resolver
/// can serve a whole scan.
pub trait PackageResolver: Send + Sync {
    /// Resolves a single package identifier
    ///
    /// # Errors
    /// Returns an error if:
    /// - No directory exists for the identifier
    /// - The directory exists but holds no buildable source
    /// - The package manifest cannot be parsed
    fn resolve(&self, id: &PackageId) -> Result<ResolvedPackageInfo>;

    /// Lists every buildable package at or below `prefix`, sorted
    ///
    /// `None` means the whole source root. An empty list is not an error.
    ///
    /// # Errors
    /// Returns an error if the prefix directory cannot be listed
    fn expand_pattern(&self, prefix: Option<&PackageId>) -> Result<Vec<PackageId>>;
}
