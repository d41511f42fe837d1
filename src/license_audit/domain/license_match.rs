use super::LicenseTemplate;
use std::sync::Arc;

/// Result of scoring one segment of a package's license text against one template
///
/// A match without template means no license artifact was found at all; it
/// always carries a zero score and zero extra/missing counts.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseMatch {
    template: Option<Arc<LicenseTemplate>>,
    score: f64,
    extra_words: usize,
    missing_words: usize,
}

impl LicenseMatch {
    /// `score` is a percentage and is clamped to [0, 100]
    pub fn new(
        template: Arc<LicenseTemplate>,
        score: f64,
        extra_words: usize,
        missing_words: usize,
    ) -> Self {
        Self {
            template: Some(template),
            score: score.clamp(0.0, 100.0),
            extra_words,
            missing_words,
        }
    }

    /// The "no license artifact found" marker
    pub fn not_found() -> Self {
        Self {
            template: None,
            score: 0.0,
            extra_words: 0,
            missing_words: 0,
        }
    }

    pub fn template(&self) -> Option<&LicenseTemplate> {
        self.template.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.template().map(LicenseTemplate::title)
    }

    /// Similarity in percent, [0, 100]
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whole percentage points, truncated
    pub fn score_percent(&self) -> u32 {
        self.score.floor() as u32
    }

    /// Similarity as a ratio in [0, 1]
    pub fn confidence(&self) -> f64 {
        self.score / 100.0
    }

    /// Words present in the candidate but absent from the template
    pub fn extra_words(&self) -> usize {
        self.extra_words
    }

    /// Words present in the template but absent from the candidate
    pub fn missing_words(&self) -> usize {
        self.missing_words
    }

    pub fn is_not_found(&self) -> bool {
        self.template.is_none()
    }

    /// Keeps one match per template, the best scored one, at the position of
    /// the template's first occurrence
    pub fn dedup_by_template(matches: Vec<LicenseMatch>) -> Vec<LicenseMatch> {
        let mut kept: Vec<LicenseMatch> = Vec::with_capacity(matches.len());
        for candidate in matches {
            let key = candidate.template().map(LicenseTemplate::id);
            match kept
                .iter_mut()
                .find(|m| m.template().map(LicenseTemplate::id) == key)
            {
                Some(existing) if candidate.score > existing.score => *existing = candidate,
                Some(_) => {}
                None => kept.push(candidate),
            }
        }
        kept
    }
}
