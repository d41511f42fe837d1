use super::{DeclaredLicense, PackageId};
use crate::shared::Result;
use std::collections::HashMap;

/// User-supplied license declaration for one package
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideEntry {
    package: PackageId,
    licenses: Vec<DeclaredLicense>,
}

impl OverrideEntry {
    pub fn new(package: PackageId, licenses: Vec<DeclaredLicense>) -> Self {
        Self { package, licenses }
    }

    pub fn package(&self) -> &PackageId {
        &self.package
    }

    pub fn licenses(&self) -> &[DeclaredLicense] {
        &self.licenses
    }
}

/// Override entries keyed by package identifier
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<PackageId, Vec<DeclaredLicense>>,
}

impl OverrideTable {
    /// Fails if the same package is listed twice
    pub fn new(entries: Vec<OverrideEntry>) -> Result<Self> {
        let mut table = HashMap::with_capacity(entries.len());
        for entry in entries {
            let OverrideEntry { package, licenses } = entry;
            if table.contains_key(&package) {
                anyhow::bail!("Package '{}' is listed more than once", package);
            }
            table.insert(package, licenses);
        }
        Ok(Self { entries: table })
    }

    pub fn get(&self, package: &PackageId) -> Option<&[DeclaredLicense]> {
        self.entries.get(package).map(Vec::as_slice)
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageId> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
