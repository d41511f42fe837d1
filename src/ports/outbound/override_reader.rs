use crate::license_audit::domain::OverrideTable;
use crate::shared::Result;
use std::path::Path;

/// OverrideReader port for loading user license declarations
///
/// The document is a list of `{project, licenses: [{type, confidence?}]}`
/// objects.
pub trait OverrideReader {
    /// Reads and validates an override document
    ///
    /// # Errors
    /// Returns `LicenseBomError::ConfigError` if:
    /// - The file cannot be read or is a symlink
    /// - The document is not valid JSON of the expected shape
    /// - An entry names an invalid package, an empty license type, or a
    ///   confidence outside [0, 1]
    /// - A package is listed more than once
    fn read_overrides(&self, path: &Path) -> Result<OverrideTable>;
}
