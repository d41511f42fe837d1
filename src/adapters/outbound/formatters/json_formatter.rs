use crate::license_audit::domain::{LicenseFinding, ReportMetadata, ScanResult};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ProjectEntry<'a> {
    project: &'a str,
    licenses: Vec<LicenseEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct LicenseEntry<'a> {
    #[serde(rename = "type")]
    license_type: Option<&'a str>,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra_words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_words: Option<usize>,
}

impl<'a> LicenseEntry<'a> {
    fn from_finding(finding: &'a LicenseFinding) -> Self {
        let word_counts = finding
            .as_detected()
            .filter(|m| !m.is_not_found())
            .map(|m| (m.extra_words(), m.missing_words()));

        Self {
            license_type: finding.name(),
            confidence: round_confidence(finding.confidence()),
            extra_words: word_counts.map(|(extra, _)| extra),
            missing_words: word_counts.map(|(_, missing)| missing),
        }
    }
}

/// Three decimals are enough to tell 98% from 98.4%
fn round_confidence(confidence: f64) -> f64 {
    (confidence * 1000.0).round() / 1000.0
}

/// JsonFormatter adapter rendering results as a JSON array
///
/// One object per package: `{project, licenses: [{type, confidence,
/// extra_words?, missing_words?}], error?}`. A package without license file
/// has a single license with a null type and zero confidence.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, results: &[ScanResult], _metadata: &ReportMetadata) -> Result<String> {
        let entries: Vec<ProjectEntry> = results
            .iter()
            .map(|result| ProjectEntry {
                project: result.package().as_str(),
                licenses: result
                    .findings()
                    .iter()
                    .map(LicenseEntry::from_finding)
                    .collect(),
                error: result.error(),
            })
            .collect();

        Ok(serde_json::to_string_pretty(&entries)?)
    }
}
