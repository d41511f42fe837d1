use super::TokenBag;

/// A reference license text, normalized and tokenized once at load time
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseTemplate {
    id: String,
    title: String,
    text: String,
    tokens: TokenBag,
}

impl LicenseTemplate {
    /// `normalized_text` must already have gone through the text normalizer
    pub fn new(id: impl Into<String>, title: impl Into<String>, normalized_text: String) -> Self {
        let tokens = TokenBag::from_text(&normalized_text);
        Self {
            id: id.into(),
            title: title.into(),
            text: normalized_text,
            tokens,
        }
    }

    /// Short SPDX-style identifier (`MIT`, `Apache-2.0`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human readable name (`MIT License`)
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &TokenBag {
        &self.tokens
    }
}
