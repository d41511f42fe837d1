//! license-bom - License bill of materials for package graphs
//!
//! This library resolves a set of packages and everything they import, locates
//! the license files bundled with each package (walking up to the deepest
//! directory shared by all packages) and identifies them against a corpus of
//! known license texts. It follows a hexagonal architecture.
//!
//! # Architecture
//!
//! - **Domain Layer** (`license_audit`): Domain models, the license corpus and pure services
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use license_bom::prelude::*;
//! use std::path::Path;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let package_resolver = SourceTreeResolver::new(Path::new("."), None)?;
//! let license_locator = FileSystemLicenseLocator::new();
//! let override_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AuditLicensesUseCase::new(
//!     package_resolver,
//!     license_locator,
//!     override_reader,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = ScanRequest::parse(&["colors/...".to_string()])?;
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let formatter = JsonFormatter::new();
//! let output = formatter.format(&response.results, &response.metadata)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod license_audit;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemLicenseLocator, FileSystemReader, FileSystemWriter, SourceTreeResolver,
        StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{OutputFormat, ScanRequest, ScanResponse};
    pub use crate::application::use_cases::AuditLicensesUseCase;
    pub use crate::license_audit::corpus::LicenseCorpus;
    pub use crate::license_audit::domain::{
        LicenseFinding, LicenseMatch, PackageId, PackageSpecifier, ScanResult, SearchBoundary,
    };
    pub use crate::license_audit::services::{LicenseMatcher, TextNormalizer};
    pub use crate::ports::outbound::{
        LicenseLocator, OutputPresenter, OverrideReader, PackageResolver, ProgressReporter,
        ReportFormatter,
    };
    pub use crate::shared::Result;
}
