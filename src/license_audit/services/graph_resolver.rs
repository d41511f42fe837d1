use crate::license_audit::domain::{
    Package, PackageId, PackageResolution, PackageSpecifier, ResolvedGraph,
};
use crate::ports::outbound::{PackageResolver, ResolvedPackageInfo};
use crate::shared::error::LicenseBomError;
use crate::shared::Result;
use std::collections::{HashMap, HashSet, VecDeque};

/// What became of one identifier during traversal
enum Visit {
    Found(ResolvedPackageInfo),
    Standard,
    Missing(String),
}

/// PackageGraphResolver service expanding root specifiers into the full
/// transitive package set
///
/// Failure handling is asymmetric: a root that cannot be resolved aborts the
/// whole operation with `LicenseBomError::MissingPackage`, while an import
/// that cannot be resolved is recorded as `PackageResolution::Missing` and
/// traversal goes on. An import that is not even a valid identifier is
/// recorded the same way, under its raw text. Standard packages are dropped
/// and not traversed.
pub struct PackageGraphResolver<'a, R: PackageResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: PackageResolver + ?Sized> PackageGraphResolver<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    pub fn resolve(&self, specifiers: &[PackageSpecifier]) -> Result<ResolvedGraph> {
        let mut warnings = Vec::new();
        let roots = self.expand_roots(specifiers, &mut warnings)?;

        let mut visits: HashMap<PackageId, Visit> = HashMap::new();
        let mut queue: VecDeque<PackageId> = VecDeque::new();

        // Every root is resolved before any import so that a missing root
        // fails the scan without partial work.
        for id in roots {
            if visits.contains_key(&id) {
                continue;
            }
            let info = self.resolver.resolve(&id).map_err(|e| {
                LicenseBomError::MissingPackage {
                    specifier: id.to_string(),
                    reason: format!("{:#}", e),
                }
            })?;
            let visit = Self::enqueue_imports(info, &mut queue, &mut visits);
            visits.insert(id, visit);
        }

        while let Some(id) = queue.pop_front() {
            if visits.contains_key(&id) {
                continue;
            }
            let visit = match self.resolver.resolve(&id) {
                Ok(info) => Self::enqueue_imports(info, &mut queue, &mut visits),
                Err(e) => Visit::Missing(format!("{:#}", e)),
            };
            visits.insert(id, visit);
        }

        let missing: HashSet<&PackageId> = visits
            .iter()
            .filter(|(_, visit)| matches!(visit, Visit::Missing(_)))
            .map(|(id, _)| id)
            .collect();

        let entries = visits
            .iter()
            .filter_map(|(id, visit)| match visit {
                Visit::Standard => None,
                Visit::Missing(reason) => Some(PackageResolution::Missing {
                    id: id.clone(),
                    reason: reason.clone(),
                }),
                Visit::Found(info) => {
                    let missing_imports: Vec<PackageId> = Self::import_ids(&info.imports)
                        .filter(|import| missing.contains(import))
                        .collect();
                    let package = Package::new(id.clone(), info.dir.clone(), info.imports.clone());
                    Some(if missing_imports.is_empty() {
                        PackageResolution::Resolved(package)
                    } else {
                        PackageResolution::Degraded {
                            package,
                            missing_imports,
                        }
                    })
                }
            })
            .collect();

        Ok(ResolvedGraph::new(entries, warnings))
    }

    /// Turns specifiers into concrete root identifiers, in order, duplicates kept
    fn expand_roots(
        &self,
        specifiers: &[PackageSpecifier],
        warnings: &mut Vec<String>,
    ) -> Result<Vec<PackageId>> {
        let mut roots = Vec::new();

        for specifier in specifiers {
            match specifier {
                PackageSpecifier::Exact(id) => roots.push(id.clone()),
                PackageSpecifier::Pattern { prefix } => {
                    let expanded = self.resolver.expand_pattern(prefix.as_ref()).map_err(|e| {
                        LicenseBomError::MissingPackage {
                            specifier: specifier.to_string(),
                            reason: format!("{:#}", e),
                        }
                    })?;
                    if expanded.is_empty() {
                        warnings.push(format!("Pattern '{}' matched no packages", specifier));
                    }
                    roots.extend(expanded);
                }
            }
        }

        Ok(roots)
    }

    /// Queues the valid imports of a resolved package and records the
    /// invalid ones as missing right away
    fn enqueue_imports(
        info: ResolvedPackageInfo,
        queue: &mut VecDeque<PackageId>,
        visits: &mut HashMap<PackageId, Visit>,
    ) -> Visit {
        if info.standard {
            return Visit::Standard;
        }

        for import in &info.imports {
            match PackageId::new(import.as_str()) {
                Ok(import_id) => queue.push_back(import_id),
                Err(e) => {
                    visits
                        .entry(PackageId::verbatim(import))
                        .or_insert_with(|| Visit::Missing(format!("unusable import: {:#}", e)));
                }
            }
        }

        Visit::Found(info)
    }

    fn import_ids(imports: &[String]) -> impl Iterator<Item = PackageId> + '_ {
        imports
            .iter()
            .map(|i| PackageId::new(i.as_str()).unwrap_or_else(|_| PackageId::verbatim(i)))
    }
}
