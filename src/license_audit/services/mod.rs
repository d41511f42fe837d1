mod graph_resolver;
mod license_matcher;
mod override_resolver;
mod package_filter;
mod text_normalizer;

pub use graph_resolver::PackageGraphResolver;
pub use license_matcher::LicenseMatcher;
pub use override_resolver::{OverrideOutcome, OverrideResolver};
pub use package_filter::PackageFilter;
pub use text_normalizer::TextNormalizer;
