use std::collections::HashMap;

/// Multiset of words, the unit of comparison between license texts.
///
/// Words are maximal runs of alphanumeric characters; apostrophes are
/// removed from inside words so that "licensor's" and "licensors" agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBag {
    counts: HashMap<String, usize>,
    total: usize,
}

impl TokenBag {
    pub fn from_text(text: &str) -> Self {
        let mut bag = Self::default();
        for word in Self::words(text) {
            *bag.counts.entry(word).or_insert(0) += 1;
            bag.total += 1;
        }
        bag
    }

    /// Words of `text` in reading order
    pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !(c.is_alphanumeric() || is_apostrophe(c)))
            .map(|raw| raw.chars().filter(|c| !is_apostrophe(*c)).collect::<String>())
            .filter(|word| !word.is_empty())
    }

    /// Total number of words, duplicates included
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Distinct words with their number of occurrences
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, n)| (word.as_str(), *n))
    }
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}
