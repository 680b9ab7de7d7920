//! Compiled citation patterns.
//!
//! Keyword-dependent patterns are built per parser; the rest are shared.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ParserError;

/// `[label](https://url)` anywhere in a string.
pub(crate) static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]\n]*)\]\((https?://(?:[^\s()]|\([^\s()]*\))+)\)")
        .expect("markdown link regex should be valid")
});

/// A string that is nothing but a Markdown link.
pub(crate) static WHOLE_MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([^\[\]]*)\]\((https?://(?:[^\s()]|\([^\s()]*\))+)\)$")
        .expect("whole markdown link regex should be valid")
});

/// URL run inside a citation body; trailing punctuation is trimmed afterwards.
pub(crate) static URL_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s)\]}>。、，：；！？）】＞「」"]+"#).expect("url candidate regex should be valid")
});

/// Line holding only a URL, bare or in one parenthesis pair.
pub(crate) static ORPHAN_URL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://\S+|[（(]\s*https?://[^\s()（）]+\s*[）)])$")
        .expect("orphan url line regex should be valid")
});

/// Line holding only a bracketed label.
pub(crate) static ORPHAN_LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\[[^\[\]]+\]|【[^【】]+】)$").expect("orphan label line regex should be valid")
});

/// Patterns that depend on the configured citation keywords.
#[derive(Debug, Clone)]
pub(crate) struct KeywordPatterns {
    /// `[出典: body]` at the end of the text.
    pub trailing_bracket: Regex,
    /// `（出典: body）` or `(参照: body)` at the end of the text.
    pub trailing_paren: Regex,
    /// `[label](https://url)` at the end of the text.
    pub trailing_markdown: Regex,
    /// Opening of a keyword citation anywhere.
    pub keyword_anywhere: Regex,
    /// `出典:` at the start of a Markdown link label.
    pub label_prefix: Regex,
}

impl KeywordPatterns {
    pub fn compile(keywords: &[String]) -> Result<Self, ParserError> {
        if keywords.is_empty() {
            return Err(ParserError::NoKeywords);
        }
        let mut escaped = Vec::with_capacity(keywords.len());
        for (idx, kw) in keywords.iter().enumerate() {
            let kw = kw.trim();
            if kw.is_empty() {
                return Err(ParserError::BlankKeyword(idx));
            }
            escaped.push(regex::escape(kw));
        }
        let kw = escaped.join("|");

        Ok(Self {
            trailing_bracket: Regex::new(&format!(
                r"\[\s*(?:{kw})\s*[:：]\s*((?:[^\[\]]|\[[^\[\]]*\])*?)\s*\]\s*$"
            ))?,
            trailing_paren: Regex::new(&format!(
                r"[（(]\s*(?:{kw})\s*[:：]\s*((?:[^()（）]|\([^()（）]*\)|（[^()（）]*）)*?)\s*[）)]\s*$"
            ))?,
            trailing_markdown: Regex::new(
                r"\[([^\[\]\n]+)\]\((https?://(?:[^\s()]|\([^\s()]*\))+)\)\s*$",
            )?,
            keyword_anywhere: Regex::new(&format!(r"[\[（(]\s*(?:{kw})\s*[:：]"))?,
            label_prefix: Regex::new(&format!(r"^\s*(?:{kw})\s*[:：]\s*"))?,
        })
    }
}
