use crate::license_audit::domain::{OverrideTable, ScanResult};
use std::collections::HashSet;

/// Results after overrides were applied
#[derive(Debug)]
pub struct OverrideOutcome {
    pub results: Vec<ScanResult>,
    pub applied: usize,
    /// One message per override naming a package absent from the results
    pub warnings: Vec<String>,
}

/// OverrideResolver service substituting user declarations for detected licenses
///
/// An override replaces every finding of its package and clears the error
/// marker. Packages without an entry pass through untouched.
pub struct OverrideResolver;

impl OverrideResolver {
    pub fn apply(results: Vec<ScanResult>, overrides: &OverrideTable) -> OverrideOutcome {
        if overrides.is_empty() {
            return OverrideOutcome {
                results,
                applied: 0,
                warnings: Vec::new(),
            };
        }

        let mut used = HashSet::new();
        let results: Vec<ScanResult> = results
            .into_iter()
            .map(|result| match overrides.get(result.package()) {
                Some(declared) => {
                    used.insert(result.package().clone());
                    result.overridden(declared)
                }
                None => result,
            })
            .collect();

        let mut unused: Vec<_> = overrides
            .packages()
            .filter(|package| !used.contains(*package))
            .collect();
        unused.sort();

        let warnings = unused
            .into_iter()
            .map(|package| {
                format!(
                    "Override for '{}' was not used: the package is not part of the scan",
                    package
                )
            })
            .collect();

        OverrideOutcome {
            results,
            applied: used.len(),
            warnings,
        }
    }
}
