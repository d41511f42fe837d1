use chrono::Utc;

/// Tool and timestamp information attached to a report
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
}

impl ReportMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
        }
    }

    /// Metadata for this build of the tool, stamped with the current UTC time
    pub fn current() -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}
