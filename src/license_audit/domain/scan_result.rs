use super::{LicenseMatch, PackageId};
use crate::shared::Result;

/// A license forced by the user through an override entry
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredLicense {
    license_type: String,
    confidence: f64,
}

impl DeclaredLicense {
    pub const DEFAULT_CONFIDENCE: f64 = 1.0;

    pub fn new(license_type: impl Into<String>, confidence: f64) -> Result<Self> {
        let license_type = license_type.into();
        if license_type.trim().is_empty() {
            anyhow::bail!("License type must not be empty");
        }
        if !(0.0..=1.0).contains(&confidence) {
            anyhow::bail!(
                "Confidence for '{}' must be between 0 and 1, got {}",
                license_type,
                confidence
            );
        }
        Ok(Self {
            license_type,
            confidence,
        })
    }

    pub fn license_type(&self) -> &str {
        &self.license_type
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// One license reported for a package, with its provenance
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseFinding {
    Detected(LicenseMatch),
    Declared(DeclaredLicense),
}

impl LicenseFinding {
    /// Display name of the license, `None` when no license artifact was found
    pub fn name(&self) -> Option<&str> {
        match self {
            LicenseFinding::Detected(m) => m.title(),
            LicenseFinding::Declared(d) => Some(d.license_type()),
        }
    }

    /// Confidence as a ratio in [0, 1]
    pub fn confidence(&self) -> f64 {
        match self {
            LicenseFinding::Detected(m) => m.confidence(),
            LicenseFinding::Declared(d) => d.confidence(),
        }
    }

    pub fn as_detected(&self) -> Option<&LicenseMatch> {
        match self {
            LicenseFinding::Detected(m) => Some(m),
            LicenseFinding::Declared(_) => None,
        }
    }

    pub fn is_declared(&self) -> bool {
        matches!(self, LicenseFinding::Declared(_))
    }
}

/// Per-package outcome of a scan, the unit returned to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    package: PackageId,
    findings: Vec<LicenseFinding>,
    error: Option<String>,
}

impl ScanResult {
    pub fn detected(package: PackageId, matches: Vec<LicenseMatch>) -> Self {
        Self {
            package,
            findings: matches.into_iter().map(LicenseFinding::Detected).collect(),
            error: None,
        }
    }

    /// Result for a transitive import that could not be resolved
    pub fn missing(package: PackageId, error: impl Into<String>) -> Self {
        Self {
            package,
            findings: vec![LicenseFinding::Detected(LicenseMatch::not_found())],
            error: Some(error.into()),
        }
    }

    pub fn package(&self) -> &PackageId {
        &self.package
    }

    pub fn findings(&self) -> &[LicenseFinding] {
        &self.findings
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Detected matches, skipping declared licenses
    pub fn matches(&self) -> impl Iterator<Item = &LicenseMatch> {
        self.findings.iter().filter_map(LicenseFinding::as_detected)
    }

    /// True when at least one finding names a license
    pub fn has_license(&self) -> bool {
        self.findings.iter().any(|f| f.name().is_some())
    }

    /// Replaces every finding with the declared licenses and clears the error
    pub fn overridden(self, declared: &[DeclaredLicense]) -> Self {
        Self {
            package: self.package,
            findings: declared
                .iter()
                .cloned()
                .map(LicenseFinding::Declared)
                .collect(),
            error: None,
        }
    }
}
