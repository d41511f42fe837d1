use regex::Regex;
use std::sync::LazyLock;

/// Copyright notice lines, matched against already lower-cased text.
///
/// Either a marker followed by a year (`copyright 2013 ...`, `(c) 2001-2004 ...`,
/// `© 2020 ...`) or the explicit `copyright (c)` / `copyright ©` form with any holder.
static COPYRIGHT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:(?:copyright\b|\(c\)|©)(?:\s*(?:copyright\b|\(c\)|©))*[\s,:]*\d{4}|copyright\s*(?:\(c\)|©))",
    )
    .expect("copyright pattern is valid")
});

/// TextNormalizer service canonicalizing license artifacts before comparison
///
/// Lower-cases the text and deletes copyright notice lines together with a
/// single blank line following each of them. Every other byte is preserved.
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn normalize_bytes(data: &[u8]) -> String {
        Self::normalize(&String::from_utf8_lossy(data))
    }

    pub fn normalize(text: &str) -> String {
        let lowered = text.to_lowercase();
        let mut output = String::with_capacity(lowered.len());
        let mut after_copyright = false;

        for line in lowered.split_inclusive('\n') {
            let content = line.trim_end_matches(['\n', '\r']);

            if COPYRIGHT_LINE.is_match(content) {
                after_copyright = true;
                continue;
            }
            if after_copyright && content.trim().is_empty() {
                after_copyright = false;
                continue;
            }

            after_copyright = false;
            output.push_str(line);
        }

        output
    }

    pub fn is_copyright_line(line: &str) -> bool {
        COPYRIGHT_LINE.is_match(&line.to_lowercase())
    }
}
