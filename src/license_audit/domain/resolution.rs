use super::{Package, PackageId};

/// Outcome of resolving one package of the graph.
///
/// Only transitive imports can end up `Missing`: an explicitly requested
/// package that fails to resolve aborts the whole scan instead.
#[derive(Debug, Clone, PartialEq)]
pub enum PackageResolution {
    Resolved(Package),
    /// Resolved, but at least one direct import could not be resolved
    Degraded {
        package: Package,
        missing_imports: Vec<PackageId>,
    },
    Missing {
        id: PackageId,
        reason: String,
    },
}

impl PackageResolution {
    pub fn id(&self) -> &PackageId {
        match self {
            PackageResolution::Resolved(package) => package.id(),
            PackageResolution::Degraded { package, .. } => package.id(),
            PackageResolution::Missing { id, .. } => id,
        }
    }

    /// The resolved package, if any
    pub fn package(&self) -> Option<&Package> {
        match self {
            PackageResolution::Resolved(package) => Some(package),
            PackageResolution::Degraded { package, .. } => Some(package),
            PackageResolution::Missing { .. } => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PackageResolution::Missing { .. })
    }
}

/// The deduplicated, id-sorted set of packages reachable from the requested
/// specifiers. Standard packages are never part of it.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGraph {
    entries: Vec<PackageResolution>,
    warnings: Vec<String>,
}

impl ResolvedGraph {
    pub fn new(mut entries: Vec<PackageResolution>, warnings: Vec<String>) -> Self {
        entries.sort_by(|a, b| a.id().cmp(b.id()));
        entries.dedup_by(|a, b| a.id() == b.id());
        Self { entries, warnings }
    }

    pub fn entries(&self) -> &[PackageResolution] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<PackageResolution> {
        self.entries
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Iterates over every package that has a source directory
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.entries.iter().filter_map(PackageResolution::package)
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn missing_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_missing()).count()
    }
}
