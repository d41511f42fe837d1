use crate::license_audit::domain::PackageSpecifier;
use crate::shared::error::LicenseBomError;
use crate::shared::Result;
use std::path::PathBuf;

/// Default number of packages whose license detection runs concurrently
pub const DEFAULT_JOBS: usize = 8;

/// Upper bound for `jobs`, far above any useful level of disk parallelism
pub const MAX_JOBS: usize = 256;

/// ScanRequest - Internal request DTO for the license audit use case
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Root specifiers, exact identifiers or `<prefix>/...` patterns
    pub specifiers: Vec<PackageSpecifier>,
    /// Optional JSON override document
    pub overrides_path: Option<PathBuf>,
    /// Patterns for excluding packages from the report
    pub exclude_patterns: Vec<String>,
    /// Maximum number of packages processed concurrently
    pub jobs: usize,
}

impl ScanRequest {
    pub fn new(specifiers: Vec<PackageSpecifier>) -> Self {
        Self {
            specifiers,
            overrides_path: None,
            exclude_patterns: Vec::new(),
            jobs: DEFAULT_JOBS,
        }
    }

    /// Parses raw command-line specifiers
    pub fn parse(raw_specifiers: &[String]) -> Result<Self> {
        let specifiers = raw_specifiers
            .iter()
            .map(|raw| {
                PackageSpecifier::parse(raw).map_err(|e| {
                    anyhow::Error::from(LicenseBomError::Validation {
                        message: format!("invalid package specifier '{}': {}", raw, e),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(specifiers))
    }

    pub fn with_overrides(mut self, path: Option<PathBuf>) -> Self {
        self.overrides_path = path;
        self
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// # Errors
    /// Returns `LicenseBomError::Validation` for an empty specifier list or a
    /// job count outside 1..=MAX_JOBS
    pub fn validate(&self) -> Result<()> {
        if self.specifiers.is_empty() {
            return Err(LicenseBomError::Validation {
                message: "at least one package specifier is required".to_string(),
            }
            .into());
        }
        if self.jobs == 0 || self.jobs > MAX_JOBS {
            return Err(LicenseBomError::Validation {
                message: format!("jobs must be between 1 and {}, got {}", MAX_JOBS, self.jobs),
            }
            .into());
        }
        Ok(())
    }
}
