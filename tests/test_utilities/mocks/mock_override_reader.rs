use license_bom::license_audit::domain::{DeclaredLicense, OverrideEntry, OverrideTable};
use license_bom::prelude::*;
use std::path::Path;

/// Mock OverrideReader holding a prepared table
pub struct MockOverrideReader {
    pub entries: Vec<(String, Vec<String>)>,
    pub should_fail: bool,
}

impl MockOverrideReader {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            should_fail: false,
        }
    }

    pub fn with_override(mut self, package: &str, licenses: &[&str]) -> Self {
        self.entries.push((
            package.to_string(),
            licenses.iter().map(|l| l.to_string()).collect(),
        ));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            entries: Vec::new(),
            should_fail: true,
        }
    }
}

impl OverrideReader for MockOverrideReader {
    fn read_overrides(&self, path: &Path) -> Result<OverrideTable> {
        if self.should_fail {
            return Err(license_bom::shared::error::LicenseBomError::ConfigError {
                path: path.to_path_buf(),
                details: "Mock override read failure".to_string(),
            }
            .into());
        }
        let entries = self
            .entries
            .iter()
            .map(|(package, licenses)| {
                let declared = licenses
                    .iter()
                    .map(|l| DeclaredLicense::new(l.as_str(), DeclaredLicense::DEFAULT_CONFIDENCE))
                    .collect::<Result<Vec<_>>>()?;
                Ok(OverrideEntry::new(PackageId::new(package.as_str())?, declared))
            })
            .collect::<Result<Vec<_>>>()?;
        OverrideTable::new(entries)
    }
}
