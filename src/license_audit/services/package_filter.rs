use crate::license_audit::domain::ScanResult;
use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - Drops scan results whose package matches an exclude pattern
///
/// Patterns are matched against the whole package identifier; `*` stands for
/// zero or more characters, `/` included, so `colors/*` excludes every package
/// below `colors`. Matching is case-sensitive.
#[derive(Debug)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern (empty, too long, bad characters, only wildcards)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Keeps the results whose package matches no pattern, order preserved
    pub fn filter_results(&self, results: Vec<ScanResult>) -> Vec<ScanResult> {
        results
            .into_iter()
            .filter(|result| !self.matches(result.package().as_str()))
            .collect()
    }

    fn matches(&self, package: &str) -> bool {
        // Evaluate every pattern so that each one records whether it was used.
        self.patterns
            .iter()
            .fold(false, |hit, pattern| pattern.matches(package) || hit)
    }

    /// Patterns that have not matched any package so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    glob: Glob,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;
        let glob = Glob::compile(&pattern);

        Ok(Self {
            original: pattern,
            glob,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, package: &str) -> bool {
        let is_match = self.glob.matches(package);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

/// `*` glob split at its wildcards
///
/// `head` must start the identifier, `tail` must end it and `middle` parts
/// must appear in order in between.
#[derive(Debug)]
struct Glob {
    head: String,
    middle: Vec<String>,
    tail: Option<String>,
}

impl Glob {
    fn compile(pattern: &str) -> Self {
        let mut parts: Vec<&str> = pattern.split('*').collect();
        let head = parts.remove(0).to_string();
        // Without any '*' the pattern is a literal and `head` is all of it.
        let tail = parts.pop().map(str::to_string);
        let middle = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Self { head, middle, tail }
    }

    fn matches(&self, candidate: &str) -> bool {
        let Some(tail) = &self.tail else {
            return candidate == self.head;
        };

        if candidate.len() < self.head.len() + tail.len()
            || !candidate.starts_with(&self.head)
            || !candidate.ends_with(tail.as_str())
        {
            return false;
        }

        let mut rest = &candidate[self.head.len()..candidate.len() - tail.len()];
        for part in &self.middle {
            match rest.find(part.as_str()) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }
        true
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only package identifier characters and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '+' | '~' | '*')
}
