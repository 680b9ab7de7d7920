//! Output records produced by the citation parser.

use serde::Serialize;

/// Citation link extracted from generated text.
///
/// `url` and `label` are either both present or both absent; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    url: Option<String>,
    label: Option<String>,
}

impl SourceLink {
    /// No URL-bearing citation.
    pub fn none() -> Self {
        Self::default()
    }

    /// Link with an explicit label. A blank label falls back to the URL.
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        let url = url.into();
        let label = label.into();
        let label = if label.trim().is_empty() {
            url.clone()
        } else {
            label
        };
        Self {
            url: Some(url),
            label: Some(label),
        }
    }

    /// Link labelled by its own URL.
    pub fn bare(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            label: Some(url.clone()),
            url: Some(url),
        }
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none()
    }
}

/// Display content separated from its citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSource {
    pub content: String,
    pub source: SourceLink,
}

impl ParsedSource {
    pub fn new(content: impl Into<String>, source: SourceLink) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }

    /// Text that carried no usable citation.
    pub fn plain(content: impl Into<String>) -> Self {
        Self::new(content, SourceLink::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_label_falls_back_to_url() {
        let link = SourceLink::new("https://example.com/a", "  ");
        assert_eq!(link.url(), Some("https://example.com/a"));
        assert_eq!(link.label(), Some("https://example.com/a"));
    }

    #[test]
    fn none_has_neither_field() {
        let link = SourceLink::none();
        assert!(link.is_empty());
        assert!(link.label().is_none());
    }

    #[test]
    fn serializes_with_nulls() {
        let parsed = ParsedSource::plain("本文");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "content": "本文", "source": { "url": null, "label": null } })
        );
    }
}
