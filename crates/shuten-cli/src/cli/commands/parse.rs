//! `shuten parse [path]` – split content and citation.

use anyhow::Result;
use shuten_core::config::ShutenConfig;
use shuten_core::source::{EmbeddedLinkPolicy, ParsedSource};
use std::path::PathBuf;

use super::input::read_input;

#[derive(Debug, Clone)]
pub struct ParseArgs {
    pub path: Option<PathBuf>,
    pub multiline: bool,
    pub strip_embedded: bool,
    pub json: bool,
}

pub fn run_parse(cfg: &ShutenConfig, args: &ParseArgs) -> Result<()> {
    let mut options = cfg.parser_options();
    if args.strip_embedded {
        options.embedded_link = EmbeddedLinkPolicy::Strip;
    }
    let parser = shuten_core::SourceParser::new(&options)?;

    let text = read_input(args.path.as_deref())?;
    let parsed = if args.multiline {
        parser.parse_multiline(&text)
    } else {
        parser.parse(&text)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print!("{}", render_text(&parsed));
    }
    Ok(())
}

/// Content, then a `source:` line when a link was found.
pub(crate) fn render_text(parsed: &ParsedSource) -> String {
    let mut out = format!("{}\n", parsed.content);
    if let (Some(url), Some(label)) = (parsed.source.url(), parsed.source.label()) {
        if label == url {
            out.push_str(&format!("source: {url}\n"));
        } else {
            out.push_str(&format!("source: {label} <{url}>\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shuten_core::SourceLink;

    #[test]
    fn render_with_label() {
        let parsed = ParsedSource::new(
            "本文",
            SourceLink::new("https://example.com/k", "京都市観光協会"),
        );
        assert_eq!(
            render_text(&parsed),
            "本文\nsource: 京都市観光協会 <https://example.com/k>\n"
        );
    }

    #[test]
    fn render_bare_url_and_plain() {
        let parsed = ParsedSource::new("本文", SourceLink::bare("https://example.com/x"));
        assert_eq!(render_text(&parsed), "本文\nsource: https://example.com/x\n");
        assert_eq!(render_text(&ParsedSource::plain("本文")), "本文\n");
    }
}
