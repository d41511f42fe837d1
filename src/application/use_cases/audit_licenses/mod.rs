use crate::application::dto::{ScanRequest, ScanResponse};
use crate::license_audit::corpus::LicenseCorpus;
use crate::license_audit::domain::{
    LicenseMatch, OverrideTable, PackageId, PackageResolution, ReportMetadata, ResolvedGraph,
    ScanResult, SearchBoundary,
};
use crate::license_audit::services::{
    LicenseMatcher, OverrideResolver, PackageFilter, PackageGraphResolver, TextNormalizer,
};
use crate::ports::outbound::{LicenseLocator, OverrideReader, PackageResolver, ProgressReporter};
use crate::shared::error::LicenseBomError;
use crate::shared::Result;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Matches memoized per license file, shared by every detection task
type MatchCache = DashMap<PathBuf, Arc<Vec<LicenseMatch>>>;

/// Everything one detection task needs, cloned out of the use case
struct DetectionContext<L> {
    locator: Arc<L>,
    matcher: Arc<LicenseMatcher>,
    cache: Arc<MatchCache>,
    boundary: Arc<SearchBoundary>,
}

// Not derived: the derive would require `L: Clone`.
impl<L> Clone for DetectionContext<L> {
    fn clone(&self) -> Self {
        Self {
            locator: Arc::clone(&self.locator),
            matcher: Arc::clone(&self.matcher),
            cache: Arc::clone(&self.cache),
            boundary: Arc::clone(&self.boundary),
        }
    }
}

/// Outcome of one package's detection task
struct Detection {
    result: ScanResult,
    warnings: Vec<String>,
}

/// AuditLicensesUseCase - Core use case for the license bill of materials
///
/// Resolves the package graph, locates license files for every package,
/// matches them against the license corpus and applies user overrides.
///
/// # Type Parameters
/// * `R` - PackageResolver implementation
/// * `L` - LicenseLocator implementation, shared with blocking tasks
/// * `O` - OverrideReader implementation
/// * `P` - ProgressReporter implementation
pub struct AuditLicensesUseCase<R, L, O, P> {
    package_resolver: R,
    license_locator: Arc<L>,
    override_reader: O,
    progress_reporter: P,
    matcher: Arc<LicenseMatcher>,
}

impl<R, L, O, P> AuditLicensesUseCase<R, L, O, P>
where
    R: PackageResolver,
    L: LicenseLocator + 'static,
    O: OverrideReader,
    P: ProgressReporter,
{
    /// Creates a use case matching against the built-in corpus
    pub fn new(package_resolver: R, license_locator: L, override_reader: O, progress_reporter: P) -> Self {
        Self {
            package_resolver,
            license_locator: Arc::new(license_locator),
            override_reader,
            progress_reporter,
            matcher: Arc::new(LicenseMatcher::new(LicenseCorpus::builtin())),
        }
    }

    /// Replaces the corpus licenses are matched against
    pub fn with_corpus(mut self, corpus: Arc<LicenseCorpus>) -> Self {
        self.matcher = Arc::new(LicenseMatcher::new(corpus));
        self
    }

    /// Runs a full scan
    ///
    /// # Errors
    /// * `LicenseBomError::Validation` for an invalid request or exclude pattern
    /// * `LicenseBomError::ConfigError` for an unreadable override document
    /// * `LicenseBomError::MissingPackage` when a requested package cannot be resolved
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        request.validate()?;
        let filter = PackageFilter::new(request.exclude_patterns.clone()).map_err(|e| {
            LicenseBomError::Validation {
                message: format!("{:#}", e),
            }
        })?;
        let mut warnings = Vec::new();

        // Step 1: Load overrides before any scan work
        let overrides = self.load_overrides(&request)?;

        // Step 2: Resolve the package graph
        let graph = self.resolve_graph(&request)?;
        warnings.extend(graph.warnings().iter().cloned());

        // Step 3: Detect licenses package by package
        let (results, detection_warnings) = self.detect_licenses(graph, request.jobs).await?;
        warnings.extend(detection_warnings);

        // Step 4: Apply overrides
        let outcome = OverrideResolver::apply(results, &overrides);
        if outcome.applied > 0 {
            self.progress_reporter
                .report(&format!("📝 Applied {} license override(s)", outcome.applied));
        }
        warnings.extend(outcome.warnings);

        // Step 5: Apply exclusions
        let mut results = self.apply_exclusions(&filter, outcome.results);
        for pattern in filter.unmatched_patterns() {
            warnings.push(format!(
                "Exclude pattern '{}' did not match any package",
                pattern
            ));
        }

        results.sort_by(|a, b| a.package().cmp(b.package()));

        let warnings = dedup_warnings(warnings);
        for warning in &warnings {
            self.progress_reporter.report_warning(warning);
        }

        let response = ScanResponse::new(results, ReportMetadata::current(), warnings);
        self.progress_reporter.report_completion(&format!(
            "✅ Scanned {} package(s): {} without a license, {} with errors",
            response.results.len(),
            response.unknown_count(),
            response.error_count()
        ));

        Ok(response)
    }

    fn load_overrides(&self, request: &ScanRequest) -> Result<OverrideTable> {
        match &request.overrides_path {
            Some(path) => {
                self.progress_reporter
                    .report(&format!("📖 Loading overrides from: {}", path.display()));
                let table = self.override_reader.read_overrides(path)?;
                self.progress_reporter
                    .report(&format!("✅ Loaded {} override(s)", table.len()));
                Ok(table)
            }
            None => Ok(OverrideTable::default()),
        }
    }

    fn resolve_graph(&self, request: &ScanRequest) -> Result<ResolvedGraph> {
        let specifiers: Vec<String> = request.specifiers.iter().map(|s| s.to_string()).collect();
        self.progress_reporter
            .report(&format!("🔍 Resolving packages: {}", specifiers.join(" ")));

        let graph = PackageGraphResolver::new(&self.package_resolver).resolve(&request.specifiers)?;

        self.progress_reporter.report(&format!(
            "✅ Resolved {} package(s), {} missing",
            graph.total_count(),
            graph.missing_count()
        ));
        Ok(graph)
    }

    async fn detect_licenses(
        &self,
        graph: ResolvedGraph,
        jobs: usize,
    ) -> Result<(Vec<ScanResult>, Vec<String>)> {
        let boundary = SearchBoundary::compute(graph.packages().map(|p| p.dir()));
        let total = graph.total_count();

        let context = boundary.map(|boundary| DetectionContext {
            locator: Arc::clone(&self.license_locator),
            matcher: Arc::clone(&self.matcher),
            cache: Arc::new(MatchCache::new()),
            boundary: Arc::new(boundary),
        });

        let tasks = graph.into_entries().into_iter().map(|entry| {
            let context = context.clone();
            async move {
                match (entry, context) {
                    (PackageResolution::Missing { id, reason }, _) => Ok(Detection {
                        result: ScanResult::missing(id, reason),
                        warnings: Vec::new(),
                    }),
                    (
                        PackageResolution::Resolved(package)
                        | PackageResolution::Degraded { package, .. },
                        Some(context),
                    ) => {
                        let id = package.id().clone();
                        let dir = package.dir().to_path_buf();
                        tokio::task::spawn_blocking(move || detect_package(&context, id, dir))
                            .await
                            .map_err(|e| anyhow::anyhow!("license detection task failed: {}", e))
                    }
                    // A resolved package always contributes to the boundary.
                    (resolution, None) => Ok(Detection {
                        result: ScanResult::detected(
                            resolution.id().clone(),
                            vec![LicenseMatch::not_found()],
                        ),
                        warnings: Vec::new(),
                    }),
                }
            }
        });

        let mut detections = stream::iter(tasks).buffer_unordered(jobs);
        let mut results = Vec::with_capacity(total);
        let mut warnings = Vec::new();

        while let Some(detection) = detections.next().await {
            let detection = detection?;
            self.progress_reporter.report_progress(
                results.len() + 1,
                total,
                Some(detection.result.package().as_str()),
            );
            results.push(detection.result);
            warnings.extend(detection.warnings);
        }

        Ok((results, warnings))
    }

    fn apply_exclusions(&self, filter: &PackageFilter, results: Vec<ScanResult>) -> Vec<ScanResult> {
        if filter.is_empty() {
            return results;
        }

        let before = results.len();
        let results = filter.filter_results(results);
        let excluded = before - results.len();
        if excluded > 0 {
            self.progress_reporter
                .report(&format!("🚫 Excluded {} package(s)", excluded));
        }
        results
    }
}

/// Locates and matches the license files of one package. Runs on a blocking
/// thread since it reads files and tokenizes their contents.
fn detect_package<L: LicenseLocator>(
    context: &DetectionContext<L>,
    id: PackageId,
    dir: PathBuf,
) -> Detection {
    let lookup = context.locator.locate(&dir, &context.boundary);
    let mut warnings = lookup.warnings;

    if lookup.artifacts.is_empty() {
        return Detection {
            result: ScanResult::detected(id, vec![LicenseMatch::not_found()]),
            warnings,
        };
    }

    let mut matches = Vec::new();
    for artifact in &lookup.artifacts {
        let found = context
            .cache
            .entry(artifact.path().to_path_buf())
            .or_insert_with(|| {
                let text = TextNormalizer::normalize_bytes(artifact.contents());
                Arc::new(context.matcher.match_text(&text))
            })
            .clone();
        matches.extend(found.iter().cloned());
    }
    // Several files of one package often carry the same license.
    let mut matches = LicenseMatch::dedup_by_template(matches);

    if matches.is_empty() {
        warnings.push(format!(
            "License file for '{}' does not match any known license: {}",
            id,
            lookup
                .artifacts
                .iter()
                .map(|a| a.path().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        matches.push(LicenseMatch::not_found());
    }

    Detection {
        result: ScanResult::detected(id, matches),
        warnings,
    }
}

/// Drops repeated warnings, keeping first-seen order
fn dedup_warnings(warnings: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    warnings
        .into_iter()
        .filter(|warning| seen.insert(warning.clone()))
        .collect()
}
