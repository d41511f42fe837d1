use crate::license_audit::domain::{ReportMetadata, ScanResult};

/// ScanResponse - Internal response DTO from the license audit use case
#[derive(Debug, Clone)]
pub struct ScanResponse {
    /// Per-package results, sorted by package identifier
    pub results: Vec<ScanResult>,
    /// Report metadata (timestamp, tool info)
    pub metadata: ReportMetadata,
    /// Non-fatal problems met during the scan, already reported to the user
    pub warnings: Vec<String>,
}

impl ScanResponse {
    pub fn new(results: Vec<ScanResult>, metadata: ReportMetadata, warnings: Vec<String>) -> Self {
        Self {
            results,
            metadata,
            warnings,
        }
    }

    /// Packages carrying an error marker
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error().is_some()).count()
    }

    /// Packages without any license name
    pub fn unknown_count(&self) -> usize {
        self.results.iter().filter(|r| !r.has_license()).count()
    }
}
