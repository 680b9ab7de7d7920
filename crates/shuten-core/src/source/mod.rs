//! Citation annotation extraction.
//!
//! Generated guide text may end with a citation in one of several notations:
//!
//! 1. `[出典: body]` / `[参照: body]`
//! 2. `（出典: body）` / `(参照: body)` (either parenthesis width)
//! 3. a bare `[label](https://url)`
//!
//! Notations matching the end of the text are removed from the content one
//! after another, so stacked citations all go; the outermost one carrying a
//! URL becomes the [`SourceLink`]. When none matches and
//! the text carries no keyword citation at all, the first embedded Markdown
//! link is taken as an implicit citation; whether it stays in the content is
//! decided by [`EmbeddedLinkPolicy`].

mod body;
mod error;
mod model;
mod patterns;
mod sanitize;

pub use body::{body_has_url, parse_body};
pub use error::ParserError;
pub use model::{ParsedSource, SourceLink};
pub use sanitize::clean_content;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use patterns::{KeywordPatterns, MARKDOWN_LINK};

/// Keywords introducing an explicit citation.
pub const DEFAULT_KEYWORDS: [&str; 2] = ["出典", "参照"];

/// What to do with an embedded Markdown link picked up as an implicit citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddedLinkPolicy {
    /// Report the link as the source and leave the content untouched.
    #[default]
    ExtractOnly,
    /// Report the link as the source and remove it from the content.
    Strip,
}

/// Options a [`SourceParser`] is compiled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    pub keywords: Vec<String>,
    pub embedded_link: EmbeddedLinkPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            embedded_link: EmbeddedLinkPolicy::default(),
        }
    }
}

/// Which notation a trailing citation was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationForm {
    Bracket,
    Paren,
    MarkdownLink,
}

/// A citation matched at the end of a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingCitation {
    /// Byte offset where the citation markup begins.
    pub start: usize,
    pub form: CitationForm,
    pub link: SourceLink,
}

/// Compiled citation parser. Immutable once built; share it freely.
#[derive(Debug, Clone)]
pub struct SourceParser {
    patterns: KeywordPatterns,
    embedded_link: EmbeddedLinkPolicy,
}

static DEFAULT_PARSER: Lazy<SourceParser> = Lazy::new(|| {
    SourceParser::new(&ParserOptions::default()).expect("default citation keywords should compile")
});

impl SourceParser {
    pub fn new(options: &ParserOptions) -> Result<Self, ParserError> {
        Ok(Self {
            patterns: KeywordPatterns::compile(&options.keywords)?,
            embedded_link: options.embedded_link,
        })
    }

    /// Process-wide parser built from [`ParserOptions::default`].
    pub fn shared() -> &'static SourceParser {
        &DEFAULT_PARSER
    }

    /// Matches the trailing citation notations, in precedence order.
    pub fn match_trailing(&self, text: &str) -> Option<TrailingCitation> {
        self.match_trailing_keyword(text).or_else(|| {
            let caps = self.patterns.trailing_markdown.captures(text)?;
            let url = &caps[2];
            let label = self.patterns.label_prefix.replace(&caps[1], "");
            let link = if body::is_absolute_http_url(url) {
                SourceLink::new(url, label.trim())
            } else {
                SourceLink::none()
            };
            Some(TrailingCitation {
                start: caps.get(0)?.start(),
                form: CitationForm::MarkdownLink,
                link,
            })
        })
    }

    /// Matches only the keyword notations (`[出典: ...]`, `（参照: ...）`).
    pub fn match_trailing_keyword(&self, text: &str) -> Option<TrailingCitation> {
        let (caps, form) = if let Some(caps) = self.patterns.trailing_bracket.captures(text) {
            (caps, CitationForm::Bracket)
        } else {
            (
                self.patterns.trailing_paren.captures(text)?,
                CitationForm::Paren,
            )
        };
        Some(TrailingCitation {
            start: caps.get(0)?.start(),
            form,
            link: parse_body(caps.get(1).map_or("", |m| m.as_str())),
        })
    }

    /// Peels every stacked trailing citation off `text`.
    ///
    /// Returns the remaining prefix and the link of the outermost citation
    /// that carries a URL, or `None` when nothing trails the text.
    pub fn strip_trailing<'t>(&self, text: &'t str) -> Option<(&'t str, SourceLink)> {
        let mut rest = text;
        let mut link = SourceLink::none();
        let mut matched = false;
        while let Some(citation) = self.match_trailing(rest) {
            tracing::debug!(form = ?citation.form, url = ?citation.link.url(), "trailing citation");
            matched = true;
            rest = rest[..citation.start].trim_end();
            if link.is_empty() {
                link = citation.link;
            }
        }
        matched.then_some((rest, link))
    }

    /// Separates content from its citation in a single block of text.
    pub fn parse(&self, text: &str) -> ParsedSource {
        if let Some((rest, link)) = self.strip_trailing(text) {
            return ParsedSource::new(rest.trim(), link);
        }

        let trimmed = text.trim();
        match self.embedded_link(trimmed) {
            Some((start, end, link)) => {
                tracing::debug!(url = ?link.url(), policy = ?self.embedded_link, "embedded link citation");
                let content = match self.embedded_link {
                    EmbeddedLinkPolicy::ExtractOnly => trimmed.to_string(),
                    EmbeddedLinkPolicy::Strip => splice_out(trimmed, start, end),
                };
                ParsedSource::new(content, link)
            }
            None => ParsedSource::plain(trimmed),
        }
    }

    /// Like [`Self::parse`], but expects the citation on the last line only
    /// and cleans orphaned link lines from the reassembled content.
    ///
    /// Embedded Markdown links are always removed here, whatever the policy.
    pub fn parse_multiline(&self, text: &str) -> ParsedSource {
        let lines: Vec<&str> = text.lines().collect();
        let last_idx = match lines.iter().rposition(|l| !l.trim().is_empty()) {
            Some(idx) => idx,
            None => return ParsedSource::plain(""),
        };

        let last = lines[last_idx];
        let (cleaned_last, link) = match self.strip_trailing(last) {
            Some(stripped) => stripped,
            None => (
                last,
                self.embedded_link(text)
                    .map(|(_, _, link)| link)
                    .unwrap_or_default(),
            ),
        };

        let mut kept: Vec<&str> = lines[..last_idx].to_vec();
        kept.push(cleaned_last);
        ParsedSource::new(clean_content(&kept.join("\n")), link)
    }

    /// Removes a trailing keyword citation whose body carries no URL.
    ///
    /// Citations that resolve to a URL are kept verbatim, as is text without
    /// a trailing keyword citation.
    pub fn strip_if_not_url(&self, text: &str) -> String {
        match self.match_trailing_keyword(text) {
            Some(citation) if citation.link.is_empty() => {
                tracing::debug!("stripping descriptive citation");
                text[..citation.start].trim_end().to_string()
            }
            _ => text.to_string(),
        }
    }

    /// First embedded Markdown link, unless an explicit keyword citation exists.
    fn embedded_link(&self, text: &str) -> Option<(usize, usize, SourceLink)> {
        if self.patterns.keyword_anywhere.is_match(text) {
            return None;
        }
        MARKDOWN_LINK.captures_iter(text).find_map(|caps| {
            let url = &caps[2];
            if !body::is_absolute_http_url(url) {
                return None;
            }
            let whole = caps.get(0)?;
            Some((whole.start(), whole.end(), SourceLink::new(url, caps[1].trim())))
        })
    }
}

/// Removes `text[start..end]`, keeping one space at the seam when the link
/// was set off by whitespace.
fn splice_out(text: &str, start: usize, end: usize) -> String {
    let before = &text[..start];
    let after = &text[end..];
    let spaced = before.ends_with(char::is_whitespace) || after.starts_with(char::is_whitespace);
    let (before, after) = (before.trim_end(), after.trim_start());
    if spaced && !before.is_empty() && !after.is_empty() {
        format!("{before} {after}")
    } else {
        format!("{before}{after}")
    }
}

/// [`SourceParser::parse`] with the default keywords.
pub fn parse_source(text: &str) -> ParsedSource {
    SourceParser::shared().parse(text)
}

/// [`SourceParser::parse_multiline`] with the default keywords.
pub fn parse_multiline_source(text: &str) -> ParsedSource {
    SourceParser::shared().parse_multiline(text)
}

/// [`SourceParser::strip_if_not_url`] with the default keywords.
pub fn strip_source_if_not_url(text: &str) -> String {
    SourceParser::shared().strip_if_not_url(text)
}
