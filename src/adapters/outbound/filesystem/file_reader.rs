use crate::license_audit::domain::{DeclaredLicense, OverrideEntry, OverrideTable, PackageId};
use crate::ports::outbound::OverrideReader;
use crate::shared::error::LicenseBomError;
use crate::shared::security::read_config_document;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

/// On-disk shape of one override entry
#[derive(Debug, Deserialize)]
struct OverrideDocumentEntry {
    project: String,
    licenses: Vec<OverrideDocumentLicense>,
}

#[derive(Debug, Deserialize)]
struct OverrideDocumentLicense {
    #[serde(rename = "type")]
    license_type: String,
    confidence: Option<f64>,
}

/// FileSystemReader adapter loading JSON override documents
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(content: &str) -> Result<OverrideTable> {
        let document: Vec<OverrideDocumentEntry> = serde_json::from_str(content)?;

        let entries = document
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let package = PackageId::new(entry.project.as_str())
                    .map_err(|e| anyhow::anyhow!("entry {}: {}", index, e))?;
                let licenses = entry
                    .licenses
                    .into_iter()
                    .map(|license| {
                        DeclaredLicense::new(
                            license.license_type,
                            license
                                .confidence
                                .unwrap_or(DeclaredLicense::DEFAULT_CONFIDENCE),
                        )
                    })
                    .collect::<Result<Vec<_>>>()
                    .map_err(|e| anyhow::anyhow!("entry {} ({}): {}", index, package, e))?;
                Ok(OverrideEntry::new(package, licenses))
            })
            .collect::<Result<Vec<_>>>()?;

        OverrideTable::new(entries)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl OverrideReader for FileSystemReader {
    fn read_overrides(&self, path: &Path) -> Result<OverrideTable> {
        read_config_document(path, "override file")
            .and_then(|content| Self::parse(&content))
            .map_err(|e| {
                LicenseBomError::ConfigError {
                    path: path.to_path_buf(),
                    details: format!("{:#}", e),
                }
                .into()
            })
    }
}
