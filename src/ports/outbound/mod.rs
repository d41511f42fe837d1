/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to reach the build system, the filesystem and the console.
pub mod formatter;
pub mod license_locator;
pub mod output_presenter;
pub mod override_reader;
pub mod package_resolver;
pub mod progress_reporter;

pub use formatter::ReportFormatter;
pub use license_locator::{LicenseArtifact, LicenseLocator, LicenseLookup};
pub use output_presenter::OutputPresenter;
pub use override_reader::OverrideReader;
pub use package_resolver::{PackageResolver, ResolvedPackageInfo};
pub use progress_reporter::ProgressReporter;
