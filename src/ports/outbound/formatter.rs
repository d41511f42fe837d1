use crate::license_audit::domain::{ReportMetadata, ScanResult};
use crate::shared::Result;

/// ReportFormatter port for rendering scan results
///
/// Implementations receive results already sorted by package identifier.
pub trait ReportFormatter {
    /// Renders the results of one scan
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, results: &[ScanResult], metadata: &ReportMetadata) -> Result<String>;
}
