/// Mock implementations for testing
mod mock_license_locator;
mod mock_override_reader;
mod mock_package_resolver;
mod mock_progress_reporter;

pub use mock_license_locator::MockLicenseLocator;
pub use mock_override_reader::MockOverrideReader;
pub use mock_package_resolver::MockPackageResolver;
pub use mock_progress_reporter::MockProgressReporter;
