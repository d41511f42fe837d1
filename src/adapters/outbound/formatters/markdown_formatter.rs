use crate::license_audit::domain::{LicenseFinding, LicenseMatch, ReportMetadata, ScanResult};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// Markdown table header for license findings
const TABLE_HEADER: &str = "| Package | License | Confidence | Extra | Missing | Error |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|---------|------------|-------|---------|-------|\n";

/// MarkdownFormatter adapter rendering results as a Markdown document
///
/// One table row per license finding, so a package with two detected
/// licenses spans two rows.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_header(output: &mut String, metadata: &ReportMetadata) {
        output.push_str("# License Bill of Materials\n\n");
        output.push_str(&format!("- Generated: {}\n", metadata.timestamp()));
        output.push_str(&format!(
            "- Tool: {} {}\n\n",
            metadata.tool_name(),
            metadata.tool_version()
        ));
    }

    fn render_table(output: &mut String, results: &[ScanResult]) {
        output.push_str("## Packages\n\n");

        if results.is_empty() {
            output.push_str("*No packages*\n\n");
            return;
        }

        output.push_str(TABLE_HEADER);
        output.push_str(TABLE_SEPARATOR);

        for result in results {
            let package = Self::escape_markdown_table_cell(result.package().as_str());
            let error = result
                .error()
                .map(Self::escape_markdown_table_cell)
                .unwrap_or_default();

            for finding in result.findings() {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} |\n",
                    package,
                    finding
                        .name()
                        .map(Self::escape_markdown_table_cell)
                        .unwrap_or_else(|| "*none*".to_string()),
                    Self::confidence_cell(finding),
                    Self::word_count_cell(finding, |m| m.extra_words()),
                    Self::word_count_cell(finding, |m| m.missing_words()),
                    error
                ));
            }
        }
        output.push('\n');
    }

    fn confidence_cell(finding: &LicenseFinding) -> String {
        match finding {
            LicenseFinding::Detected(m) => format!("{}%", m.score_percent()),
            LicenseFinding::Declared(d) => format!("{}% (declared)", (d.confidence() * 100.0).round()),
        }
    }

    fn word_count_cell(
        finding: &LicenseFinding,
        count: impl Fn(&LicenseMatch) -> usize,
    ) -> String {
        finding
            .as_detected()
            .filter(|m| !m.is_not_found())
            .map(|m| count(m).to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    fn render_summary(output: &mut String, results: &[ScanResult]) {
        let with_license = results.iter().filter(|r| r.has_license()).count();
        let errors = results.iter().filter(|r| r.error().is_some()).count();

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- Packages: {}\n", results.len()));
        output.push_str(&format!("- With license: {}\n", with_license));
        output.push_str(&format!("- Unknown license: {}\n", results.len() - with_license));
        output.push_str(&format!("- Errors: {}\n", errors));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, results: &[ScanResult], metadata: &ReportMetadata) -> Result<String> {
        let mut output = String::new();
        Self::render_header(&mut output, metadata);
        Self::render_table(&mut output, results);
        Self::render_summary(&mut output, results);
        Ok(output)
    }
}
