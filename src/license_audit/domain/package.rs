use crate::shared::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Maximum length for package identifiers (security limit)
const MAX_PACKAGE_ID_LENGTH: usize = 255;

/// Suffix marking a wildcard specifier (`colors/cmd/...`)
pub const WILDCARD_SUFFIX: &str = "...";

/// NewType wrapper for a hierarchical package identifier (`a/b/c`) with validation
///
/// Identifiers are compared and ordered by their string form, which is the
/// order used for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            anyhow::bail!("Package identifier cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if id.len() > MAX_PACKAGE_ID_LENGTH {
            anyhow::bail!(
                "Package identifier is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_PACKAGE_ID_LENGTH
            );
        }

        if !id.chars().all(is_valid_id_char) {
            anyhow::bail!(
                "Package identifier '{}' contains invalid characters. Only alphanumeric, '-', '_', '.', '+', '~' and '/' are allowed.",
                id
            );
        }

        // Security: identifiers are joined onto the source root, so reject
        // anything that could escape it
        if id
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            anyhow::bail!(
                "Package identifier '{}' must be made of non-empty path segments without '.' or '..'",
                id
            );
        }

        Ok(Self(id))
    }

    /// Keeps an identifier exactly as written, without validation, so that an
    /// unusable import can still be reported. Never joined onto a path.
    pub(crate) fn verbatim(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the identifier
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Directory of this package below `root`
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |dir, s| dir.join(s))
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '~' | '/')
}

/// A root specifier as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSpecifier {
    /// A single package
    Exact(PackageId),
    /// Every package at or below `prefix`; `None` means the whole source root
    Pattern { prefix: Option<PackageId> },
}

impl PackageSpecifier {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();

        if raw == WILDCARD_SUFFIX {
            return Ok(PackageSpecifier::Pattern { prefix: None });
        }

        match raw.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => {
                let prefix = prefix.strip_suffix('/').ok_or_else(|| {
                    anyhow::anyhow!(
                        "Wildcard specifier '{}' must end with '/{}'",
                        raw,
                        WILDCARD_SUFFIX
                    )
                })?;
                Ok(PackageSpecifier::Pattern {
                    prefix: Some(PackageId::new(prefix)?),
                })
            }
            None => Ok(PackageSpecifier::Exact(PackageId::new(raw)?)),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, PackageSpecifier::Pattern { .. })
    }
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSpecifier::Exact(id) => write!(f, "{}", id),
            PackageSpecifier::Pattern { prefix: None } => write!(f, "{}", WILDCARD_SUFFIX),
            PackageSpecifier::Pattern { prefix: Some(p) } => {
                write!(f, "{}/{}", p, WILDCARD_SUFFIX)
            }
        }
    }
}

/// A package located by the resolver. Immutable once resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    id: PackageId,
    dir: PathBuf,
    imports: Vec<String>,
}

impl Package {
    pub fn new(id: PackageId, dir: PathBuf, imports: Vec<String>) -> Self {
        Self { id, dir, imports }
    }

    pub fn id(&self) -> &PackageId {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}
