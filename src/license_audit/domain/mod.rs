pub mod license_match;
pub mod license_template;
pub mod override_entry;
pub mod package;
pub mod report_metadata;
pub mod resolution;
pub mod scan_result;
pub mod search_boundary;
pub mod token_bag;

pub use license_match::LicenseMatch;
pub use license_template::LicenseTemplate;
pub use override_entry::{OverrideEntry, OverrideTable};
pub use package::{Package, PackageId, PackageSpecifier};
pub use report_metadata::ReportMetadata;
pub use resolution::{PackageResolution, ResolvedGraph};
pub use scan_result::{DeclaredLicense, LicenseFinding, ScanResult};
pub use search_boundary::SearchBoundary;
pub use token_bag::TokenBag;
