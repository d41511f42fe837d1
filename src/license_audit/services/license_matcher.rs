use crate::license_audit::corpus::LicenseCorpus;
use crate::license_audit::domain::{LicenseMatch, LicenseTemplate, TokenBag};
use std::collections::HashMap;
use std::sync::Arc;

/// Share of its own words a template must find in the remaining text to be
/// extracted as an additional license after the first one.
const MIN_FOLLOW_UP_COVERAGE: f64 = 0.75;

/// Rounds of alternating start/end refinement before the exhaustive search
const MAX_REFINEMENTS: usize = 8;

/// LicenseMatcher service scoring normalized text against a license corpus
///
/// Extraction is iterative. Each round looks, for every template, for the run
/// of consecutive lines whose words have the highest Dice coefficient with the
/// template, keeps the best template, and removes those lines before the next
/// round. A file concatenating several licenses thereby reports each of them
/// scored against its own text, and a template that contains another one
/// (BSD-3-Clause and BSD-2-Clause) cannot claim the smaller license's lines.
pub struct LicenseMatcher {
    corpus: Arc<LicenseCorpus>,
}

struct Extraction {
    template: Arc<LicenseTemplate>,
    intersection: usize,
    words: usize,
}

impl LicenseMatcher {
    pub fn new(corpus: Arc<LicenseCorpus>) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &LicenseCorpus {
        &self.corpus
    }

    /// Matches already normalized text, best match first.
    ///
    /// Blank text, or text sharing no word with any template, yields no match.
    /// Words left outside every extracted run count as extra words of each
    /// match, so a single match is scored against the whole text.
    pub fn match_text(&self, normalized: &str) -> Vec<LicenseMatch> {
        let candidate = Candidate::new(normalized);
        let profiles: Vec<Profile> = self
            .corpus
            .templates()
            .iter()
            .filter(|template| !template.tokens().is_empty())
            .enumerate()
            .map(|(rank, template)| Profile::new(rank, template, &candidate.vocabulary))
            .collect();

        let mut remaining: Vec<&[usize]> = candidate.lines.iter().map(Vec::as_slice).collect();
        let mut extractions: Vec<Extraction> = Vec::new();

        while !remaining.is_empty() {
            let Some((profile, fit)) = best_fit(&profiles, &remaining) else {
                break;
            };
            if !extractions.is_empty() && fit.coverage(profile) < MIN_FOLLOW_UP_COVERAGE {
                break;
            }

            remaining.drain(fit.start..fit.end);
            extractions.push(Extraction {
                template: Arc::clone(&profile.template),
                intersection: fit.intersection,
                words: fit.words,
            });
        }

        let unexplained: usize = remaining.iter().map(|line| line.len()).sum();
        let matches = extractions
            .into_iter()
            .map(|e| {
                let template_len = e.template.tokens().len();
                let words = e.words + unexplained;
                let score = 200.0 * e.intersection as f64 / (words + template_len) as f64;
                LicenseMatch::new(
                    e.template,
                    score,
                    words - e.intersection,
                    template_len - e.intersection,
                )
            })
            .collect();

        LicenseMatch::dedup_by_template(matches)
    }
}

/// Candidate text as lines of interned word ids; blank lines are dropped
struct Candidate {
    vocabulary: HashMap<String, usize>,
    lines: Vec<Vec<usize>>,
}

impl Candidate {
    fn new(text: &str) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let lines = text
            .lines()
            .map(|line| {
                TokenBag::words(line)
                    .map(|word| {
                        let next = vocabulary.len();
                        *vocabulary.entry(word).or_insert(next)
                    })
                    .collect::<Vec<usize>>()
            })
            .filter(|line| !line.is_empty())
            .collect();
        Self { vocabulary, lines }
    }
}

/// Word counts of one template over the candidate's vocabulary
struct Profile {
    /// Position in the corpus; the lower rank wins ties
    rank: usize,
    template: Arc<LicenseTemplate>,
    counts: Vec<usize>,
    len: usize,
}

impl Profile {
    fn new(
        rank: usize,
        template: &Arc<LicenseTemplate>,
        vocabulary: &HashMap<String, usize>,
    ) -> Self {
        let mut counts = vec![0; vocabulary.len()];
        for (word, n) in template.tokens().iter() {
            if let Some(&id) = vocabulary.get(word) {
                counts[id] = n;
            }
        }
        Self {
            rank,
            template: Arc::clone(template),
            counts,
            len: template.tokens().len(),
        }
    }

    fn knows_any(&self, line: &[usize]) -> bool {
        line.iter().any(|&word| self.counts[word] > 0)
    }

    /// Upper bound of the Dice coefficient of any window whose intersection
    /// with the template is at most `intersection`
    fn bound(&self, intersection: usize) -> f64 {
        2.0 * intersection as f64 / (intersection + self.len) as f64
    }

    fn window<'a>(&'a self, lines: &[&[usize]]) -> Window<'a> {
        let mut window = Window::new(self);
        for line in lines {
            window.add(line);
        }
        window
    }

    /// Coordinate ascent over the window bounds, starting from all of `lines`
    fn refine(&self, lines: &[&[usize]]) -> Fit {
        let mut fit = self.window(lines).fit(0, lines.len());
        for _ in 0..MAX_REFINEMENTS {
            let start = self.best_start(lines, fit.end);
            let refined = self.best_end(lines, start.start);
            let converged = (refined.start, refined.end) == (fit.start, fit.end);
            fit = refined;
            if converged {
                break;
            }
        }
        fit
    }

    fn best_start(&self, lines: &[&[usize]], end: usize) -> Fit {
        let mut window = self.window(&lines[..end]);
        let mut best = window.fit(0, end);
        for start in 1..end {
            window.remove(lines[start - 1]);
            let fit = window.fit(start, end);
            if fit.dice > best.dice {
                best = fit;
            }
        }
        best
    }

    fn best_end(&self, lines: &[&[usize]], start: usize) -> Fit {
        let mut window = self.window(&lines[start..]);
        let mut best = window.fit(start, lines.len());
        for end in (start + 1..lines.len()).rev() {
            window.remove(lines[end]);
            let fit = window.fit(start, end);
            if fit.dice > best.dice {
                best = fit;
            }
        }
        best
    }

    /// Exhaustive search over the windows that could still beat `best`
    fn search<'a>(&'a self, lines: &[&[usize]], mut best: Candidacy<'a>) -> Candidacy<'a> {
        let mut suffix = self.window(lines);
        for start in 0..lines.len() {
            if start > 0 {
                suffix.remove(lines[start - 1]);
            }
            if !improves(&best, self, self.bound(suffix.intersection)) {
                break;
            }
            if !self.knows_any(lines[start]) {
                continue;
            }

            let mut window = Window::new(self);
            for end in start + 1..=lines.len() {
                window.add(lines[end - 1]);
                let fit = window.fit(start, end);
                if improves(&best, self, fit.dice) {
                    best = Some((self, fit));
                }
                // Longer windows only lower the best reachable coefficient.
                let reachable = 2.0 * self.len as f64 / (window.words + self.len) as f64;
                if !improves(&best, self, reachable) {
                    break;
                }
            }
        }
        best
    }
}

/// Best template so far and its window
type Candidacy<'a> = Option<(&'a Profile, Fit)>;

/// Whether `profile` scoring `dice` would replace `best`
fn improves(best: &Candidacy<'_>, profile: &Profile, dice: f64) -> bool {
    match best {
        None => true,
        Some((leader, fit)) => dice > fit.dice || (dice == fit.dice && profile.rank < leader.rank),
    }
}

/// Best template and window over `lines`
///
/// Cheap refinements run first for every template so that the exhaustive
/// search starts from a high bar and can skip most templates and windows.
fn best_fit<'a>(profiles: &'a [Profile], lines: &[&[usize]]) -> Candidacy<'a> {
    let mut best: Candidacy<'a> = None;
    let mut contenders: Vec<(&Profile, f64)> = Vec::new();

    for profile in profiles {
        let whole = profile.window(lines);
        if whole.intersection == 0 {
            continue;
        }
        let bound = profile.bound(whole.intersection);
        if !improves(&best, profile, bound) {
            continue;
        }
        let fit = profile.refine(lines);
        if improves(&best, profile, fit.dice) {
            best = Some((profile, fit));
        }
        contenders.push((profile, bound));
    }

    for (profile, bound) in contenders {
        if improves(&best, profile, bound) {
            best = profile.search(lines, best);
        }
    }

    best
}

/// Running word tallies of a window of lines against one template
struct Window<'a> {
    profile: &'a Profile,
    counts: Vec<usize>,
    intersection: usize,
    words: usize,
}

impl<'a> Window<'a> {
    fn new(profile: &'a Profile) -> Self {
        Self {
            profile,
            counts: vec![0; profile.counts.len()],
            intersection: 0,
            words: 0,
        }
    }

    fn add(&mut self, line: &[usize]) {
        for &word in line {
            if self.counts[word] < self.profile.counts[word] {
                self.intersection += 1;
            }
            self.counts[word] += 1;
            self.words += 1;
        }
    }

    fn remove(&mut self, line: &[usize]) {
        for &word in line {
            self.counts[word] -= 1;
            self.words -= 1;
            if self.counts[word] < self.profile.counts[word] {
                self.intersection -= 1;
            }
        }
    }

    fn fit(&self, start: usize, end: usize) -> Fit {
        Fit {
            start,
            end,
            intersection: self.intersection,
            words: self.words,
            dice: 2.0 * self.intersection as f64 / (self.words + self.profile.len) as f64,
        }
    }
}

/// Window `start..end` over the remaining lines and its score
#[derive(Debug, Clone, Copy)]
struct Fit {
    start: usize,
    end: usize,
    intersection: usize,
    words: usize,
    dice: f64,
}

impl Fit {
    fn coverage(&self, profile: &Profile) -> f64 {
        self.intersection as f64 / profile.len as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::license_audit::corpus::BUILTIN_TEMPLATES;
    use crate::license_audit::services::TextNormalizer;

    const MIT_TEXT: &str = include_str!("../templates/mit.txt");
    const APACHE_TEXT: &str = include_str!("../templates/apache-2.0.txt");
    const ISC_TEXT: &str = include_str!("../templates/isc.txt");
    const BSD_2_TEXT: &str = include_str!("../templates/bsd-2-clause.txt");

    fn matcher() -> LicenseMatcher {
        LicenseMatcher::new(LicenseCorpus::builtin())
    }

    fn titles(matches: &[LicenseMatch]) -> Vec<&str> {
        matches.iter().filter_map(LicenseMatch::title).collect()
    }

    fn ids(matches: &[LicenseMatch]) -> Vec<&str> {
        let mut ids: Vec<&str> = matches
            .iter()
            .filter_map(|m| m.template().map(LicenseTemplate::id))
            .collect();
        ids.sort();
        ids
    }

    fn match_raw(raw: &str) -> Vec<LicenseMatch> {
        matcher().match_text(&TextNormalizer::normalize(raw))
    }

    #[test]
    fn test_exact_template_scores_full() {
        let matches = matcher().match_text(&TextNormalizer::normalize(MIT_TEXT));
        assert_eq!(titles(&matches), vec!["MIT License"]);
        assert_eq!(matches[0].score_percent(), 100);
        assert_eq!(matches[0].extra_words(), 0);
        assert_eq!(matches[0].missing_words(), 0);
    }

    #[test]
    fn test_real_world_mit_with_holder() {
        let body = MIT_TEXT.split_once("Permission").unwrap().1;
        let text = format!(
            "The MIT License (MIT)\n\nCopyright (c) 2015 Jane Doe\n\nPermission{}",
            body
        );
        let matches = matcher().match_text(&TextNormalizer::normalize(&text));
        assert_eq!(titles(&matches), vec!["MIT License"]);
        assert!(matches[0].score() >= 95.0);
        // "the" and the second "mit" of the heading
        assert_eq!(matches[0].extra_words(), 2);
        assert_eq!(matches[0].missing_words(), 0);
    }

    #[test]
    fn test_concatenated_licenses_yield_two_matches() {
        let text = format!("{}\n\n{}", MIT_TEXT, APACHE_TEXT);
        let matches = matcher().match_text(&TextNormalizer::normalize(&text));

        assert_eq!(matches.len(), 2);
        let found = titles(&matches);
        assert!(found.contains(&"MIT License"));
        assert!(found.contains(&"Apache License 2.0"));
        for m in &matches {
            assert!(m.score() >= 95.0, "{:?} scored {}", m.title(), m.score());
        }
    }

    #[test]
    fn test_every_builtin_template_matches_itself() {
        for (id, _, raw) in BUILTIN_TEMPLATES {
            let matches = match_raw(raw);
            assert_eq!(ids(&matches), vec![*id]);
            assert_eq!(matches[0].score(), 100.0, "{}", id);
        }
    }

    #[test]
    fn test_every_pair_of_builtin_templates_is_separated() {
        let mut failures = Vec::new();
        for (first, _, first_raw) in BUILTIN_TEMPLATES {
            for (second, _, second_raw) in BUILTIN_TEMPLATES {
                if first == second {
                    continue;
                }
                let matches = match_raw(&format!("{}\n\n{}", first_raw, second_raw));
                let mut expected = vec![*first, *second];
                expected.sort();
                if ids(&matches) != expected || matches.iter().any(|m| m.score() < 95.0) {
                    let found: Vec<String> = matches
                        .iter()
                        .map(|m| format!("{:?}:{:.1}", m.title(), m.score()))
                        .collect();
                    failures.push(format!("{}+{} -> {:?}", first, second, found));
                }
            }
        }
        assert!(failures.is_empty(), "{:#?}", failures);
    }

    #[test]
    fn test_contained_template_does_not_claim_smaller_license() {
        // BSD-3-Clause is BSD-2-Clause plus one clause
        let matches = match_raw(&format!("{}\n\n{}", MIT_TEXT, BSD_2_TEXT));
        assert_eq!(ids(&matches), vec!["BSD-2-Clause", "MIT"]);

        let matches = match_raw(&format!("{}\n{}", ISC_TEXT, BSD_2_TEXT));
        assert_eq!(ids(&matches), vec!["BSD-2-Clause", "ISC"]);
        assert!(matches.iter().all(|m| m.score_percent() == 100));
    }

    #[test]
    fn test_incomplete_license_keeps_its_words_to_itself() {
        let (apache_terms, _) = APACHE_TEXT.split_once("APPENDIX").unwrap();
        let matches = match_raw(&format!("{}\n{}", apache_terms, MIT_TEXT));

        assert_eq!(ids(&matches), vec!["Apache-2.0", "MIT"]);
        let mit = matches.iter().find(|m| m.title() == Some("MIT License")).unwrap();
        assert_eq!(mit.score(), 100.0);
        let apache = matches.iter().find(|m| m.title() == Some("Apache License 2.0")).unwrap();
        assert!(apache.score() > 90.0);
        assert_eq!(apache.extra_words(), 0);
        assert!(apache.missing_words() > 0);
    }

    #[test]
    fn test_three_licenses_in_one_file() {
        let text = format!(
            "{}\n\n{}\n\n{}",
            MIT_TEXT,
            APACHE_TEXT,
            include_str!("../templates/bsd-3-clause.txt")
        );
        let matches = match_raw(&text);
        assert_eq!(ids(&matches), vec!["Apache-2.0", "BSD-3-Clause", "MIT"]);
        assert!(matches.iter().all(|m| m.score() == 100.0));
    }

    #[test]
    fn test_words_between_licenses_count_as_extra() {
        let text = format!(
            "This project is dual licensed under the terms below.\n\n{}\n-----\n{}",
            MIT_TEXT, APACHE_TEXT
        );
        let matches = match_raw(&text);
        assert_eq!(ids(&matches), vec!["Apache-2.0", "MIT"]);
        for m in &matches {
            assert_eq!(m.extra_words(), 9);
            assert_eq!(m.missing_words(), 0);
            assert!(m.score() >= 95.0);
        }
    }

    #[test]
    fn test_reflowed_paragraphs_still_separate() {
        let reflow = |text: &str| {
            text.split("\n\n")
                .map(|paragraph| paragraph.replace('\n', " "))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let text = format!("{}\n{}", reflow(MIT_TEXT), reflow(APACHE_TEXT));
        let matches = match_raw(&text);
        assert_eq!(ids(&matches), vec!["Apache-2.0", "MIT"]);
        assert!(matches.iter().all(|m| m.score() == 100.0));
    }

    #[test]
    fn test_repeated_license_is_reported_once() {
        let matches = match_raw(&format!("{}\n{}", MIT_TEXT, MIT_TEXT));
        assert_eq!(titles(&matches), vec!["MIT License"]);
        assert_eq!(matches[0].score(), 100.0);
    }

    #[test]
    fn test_similar_permissive_licenses_are_distinguished() {
        let matches = matcher().match_text(&TextNormalizer::normalize(ISC_TEXT));
        assert_eq!(titles(&matches)[0], "ISC License");
        assert_eq!(matches[0].score_percent(), 100);
    }

    #[test]
    fn test_blank_text_yields_no_match() {
        assert!(matcher().match_text("").is_empty());
        assert!(matcher().match_text("  \n\t\n").is_empty());
    }

    #[test]
    fn test_unrelated_words_yield_no_match() {
        let corpus = Arc::new(LicenseCorpus::from_templates(vec![
            LicenseCorpus::load_template("A", "Alpha", "alpha beta gamma"),
        ]));
        let matches = LicenseMatcher::new(corpus).match_text("delta epsilon");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_partial_text_reports_extra_and_missing() {
        let corpus = Arc::new(LicenseCorpus::from_templates(vec![
            LicenseCorpus::load_template("A", "Alpha", "one two three four"),
        ]));
        let matches = LicenseMatcher::new(corpus).match_text("one two five");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].extra_words(), 1);
        assert_eq!(matches[0].missing_words(), 2);
        // Dice: 2 * 2 / (3 + 4)
        assert!((matches[0].score() - 400.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_resolve_to_earliest_template() {
        let corpus = Arc::new(LicenseCorpus::from_templates(vec![
            LicenseCorpus::load_template("A", "First", "same words here"),
            LicenseCorpus::load_template("B", "Second", "same words here"),
        ]));
        let matches = LicenseMatcher::new(corpus).match_text("same words here");
        assert_eq!(titles(&matches), vec!["First"]);
    }

    #[test]
    fn test_low_coverage_leftover_is_not_extracted() {
        let corpus = Arc::new(LicenseCorpus::from_templates(vec![
            LicenseCorpus::load_template("A", "Alpha", "alpha beta gamma delta"),
            LicenseCorpus::load_template("B", "Beta", "zeta eta theta iota kappa"),
        ]));
        let matches = LicenseMatcher::new(corpus).match_text("alpha beta gamma delta\nzeta");
        assert_eq!(titles(&matches), vec!["Alpha"]);
        assert_eq!(matches[0].extra_words(), 1);
    }
}
