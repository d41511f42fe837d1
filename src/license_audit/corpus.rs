use super::domain::LicenseTemplate;
use super::services::TextNormalizer;
use std::sync::{Arc, LazyLock};

/// (id, title, raw text) of every built-in template, in tie-break order
pub(crate) const BUILTIN_TEMPLATES: &[(&str, &str, &str)] = &[
    ("MIT", "MIT License", include_str!("templates/mit.txt")),
    ("ISC", "ISC License", include_str!("templates/isc.txt")),
    ("0BSD", "BSD Zero Clause License", include_str!("templates/0bsd.txt")),
    (
        "BSD-2-Clause",
        "BSD 2-Clause \"Simplified\" License",
        include_str!("templates/bsd-2-clause.txt"),
    ),
    (
        "BSD-3-Clause",
        "BSD 3-Clause \"New\" or \"Revised\" License",
        include_str!("templates/bsd-3-clause.txt"),
    ),
    (
        "Apache-2.0",
        "Apache License 2.0",
        include_str!("templates/apache-2.0.txt"),
    ),
    ("Unlicense", "The Unlicense", include_str!("templates/unlicense.txt")),
    ("Zlib", "zlib License", include_str!("templates/zlib.txt")),
    (
        "BSL-1.0",
        "Boost Software License 1.0",
        include_str!("templates/bsl-1.0.txt"),
    ),
    (
        "WTFPL",
        "Do What The F*ck You Want To Public License",
        include_str!("templates/wtfpl.txt"),
    ),
    ("MS-PL", "Microsoft Public License", include_str!("templates/ms-pl.txt")),
    (
        "MS-RL",
        "Microsoft Reciprocal License",
        include_str!("templates/ms-rl.txt"),
    ),
    (
        "MPL-2.0",
        "Mozilla Public License 2.0",
        include_str!("templates/mpl-2.0.txt"),
    ),
    (
        "GPL-2.0",
        "GNU General Public License v2.0",
        include_str!("templates/gpl-2.0.txt"),
    ),
    (
        "GPL-3.0",
        "GNU General Public License v3.0",
        include_str!("templates/gpl-3.0.txt"),
    ),
    (
        "LGPL-2.1",
        "GNU Lesser General Public License v2.1",
        include_str!("templates/lgpl-2.1.txt"),
    ),
    (
        "LGPL-3.0",
        "GNU Lesser General Public License v3.0",
        include_str!("templates/lgpl-3.0.txt"),
    ),
    (
        "AGPL-3.0",
        "GNU Affero General Public License v3.0",
        include_str!("templates/agpl-3.0.txt"),
    ),
    (
        "AFL-3.0",
        "Academic Free License v3.0",
        include_str!("templates/afl-3.0.txt"),
    ),
];

static BUILTIN: LazyLock<Arc<LicenseCorpus>> = LazyLock::new(|| {
    Arc::new(LicenseCorpus::from_templates(
        BUILTIN_TEMPLATES
            .iter()
            .map(|(id, title, raw)| LicenseCorpus::load_template(*id, *title, raw))
            .collect(),
    ))
});

/// Fixed, ordered set of reference license templates
///
/// Built once and shared read-only between detection tasks. Corpus order is
/// significant: on equal scores the earlier template wins.
#[derive(Debug)]
pub struct LicenseCorpus {
    templates: Vec<Arc<LicenseTemplate>>,
}

impl LicenseCorpus {
    /// The corpus shipped with the tool, normalized on first use
    pub fn builtin() -> Arc<LicenseCorpus> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_templates(templates: Vec<LicenseTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        }
    }

    /// Normalizes `raw_text` and builds a template from it
    pub fn load_template(id: &str, title: &str, raw_text: &str) -> LicenseTemplate {
        LicenseTemplate::new(id, title, TextNormalizer::normalize(raw_text))
    }

    pub fn templates(&self) -> &[Arc<LicenseTemplate>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Arc<LicenseTemplate>> {
        self.templates.iter().find(|t| t.title() == title)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Arc<LicenseTemplate>> {
        self.templates
            .iter()
            .find(|t| t.id().eq_ignore_ascii_case(id))
    }
}
