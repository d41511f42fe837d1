use license_bom::ports::outbound::ResolvedPackageInfo;
use license_bom::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mock PackageResolver serving an in-memory package table
///
/// Packages live under `/src`, standard packages under `/std`.
#[derive(Default)]
pub struct MockPackageResolver {
    pub packages: BTreeMap<String, ResolvedPackageInfo>,
}

impl MockPackageResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, id: &str, imports: &[&str]) -> Self {
        self.packages.insert(
            id.to_string(),
            ResolvedPackageInfo {
                dir: PathBuf::from("/src").join(id),
                imports: imports.iter().map(|i| i.to_string()).collect(),
                standard: false,
            },
        );
        self
    }

    pub fn with_standard_package(mut self, id: &str) -> Self {
        self.packages.insert(
            id.to_string(),
            ResolvedPackageInfo {
                dir: PathBuf::from("/std").join(id),
                imports: Vec::new(),
                standard: true,
            },
        );
        self
    }
}

impl PackageResolver for MockPackageResolver {
    fn resolve(&self, id: &PackageId) -> Result<ResolvedPackageInfo> {
        match self.packages.get(id.as_str()) {
            Some(info) => Ok(info.clone()),
            None => anyhow::bail!("cannot find package \"{}\"", id),
        }
    }

    fn expand_pattern(&self, prefix: Option<&PackageId>) -> Result<Vec<PackageId>> {
        let below = |id: &str| match prefix {
            Some(p) => id == p.as_str() || id.starts_with(&format!("{}/", p)),
            None => true,
        };
        self.packages
            .iter()
            .filter(|(id, info)| !info.standard && below(id))
            .map(|(id, _)| PackageId::new(id.as_str()))
            .collect()
    }
}
