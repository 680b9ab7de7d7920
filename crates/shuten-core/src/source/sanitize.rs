//! Cleanup of citation remnants left in multi-line generated text.

use super::patterns::{MARKDOWN_LINK, ORPHAN_LABEL_LINE, ORPHAN_URL_LINE, WHOLE_MARKDOWN_LINK};

/// Removes embedded Markdown links and orphaned trailing link lines.
///
/// - Every `[label](https://url)` is removed from every line. A line left
///   empty by that removal stays as a blank line, folded into any blank
///   line next to it so paragraph breaks don't double up.
/// - Trailing lines that are blank, a lone Markdown link, a lone URL
///   (optionally parenthesized) or a lone `[label]` are popped until the last
///   line is ordinary text. A `[label]` line followed by a URL line goes as a
///   pair through the same loop.
pub fn clean_content(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut last_blank_from_strip = false;
    for line in text.lines() {
        let (line, from_strip) = if MARKDOWN_LINK.is_match(line) {
            (MARKDOWN_LINK.replace_all(line, "").trim().to_string(), true)
        } else {
            (line.trim_end().to_string(), false)
        };

        if line.is_empty() {
            let prev_blank = lines.last().map_or(false, |l| l.is_empty());
            if prev_blank && (from_strip || last_blank_from_strip) {
                continue;
            }
            last_blank_from_strip = from_strip;
        } else {
            last_blank_from_strip = false;
        }
        lines.push(line);
    }

    while let Some(last) = lines.last() {
        if !is_orphan_line(last) {
            break;
        }
        tracing::trace!(line = %last, "dropping orphaned citation line");
        lines.pop();
    }

    lines.join("\n").trim().to_string()
}

fn is_orphan_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty()
        || WHOLE_MARKDOWN_LINK.is_match(line)
        || ORPHAN_URL_LINE.is_match(line)
        || ORPHAN_LABEL_LINE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_links() {
        assert_eq!(
            clean_content("詳しくは[公式](https://example.com/o)へ\n二行目"),
            "詳しくはへ\n二行目"
        );
    }

    #[test]
    fn link_only_line_becomes_blank() {
        assert_eq!(
            clean_content("一行目\n[公式](https://example.com/o)\n三行目"),
            "一行目\n\n三行目"
        );
    }

    #[test]
    fn emptied_line_folds_into_paragraph_break() {
        assert_eq!(
            clean_content("段落一\n\n[公式](https://example.com/o)\n段落二"),
            "段落一\n\n段落二"
        );
        assert_eq!(
            clean_content("段落一\n[公式](https://example.com/o)\n\n段落二"),
            "段落一\n\n段落二"
        );
        assert_eq!(
            clean_content("[公式](https://example.com/o)\n本文"),
            "本文"
        );
    }

    #[test]
    fn original_double_blank_lines_are_kept() {
        assert_eq!(clean_content("段落一\n\n\n段落二"), "段落一\n\n\n段落二");
    }

    #[test]
    fn keeps_paragraph_breaks() {
        assert_eq!(clean_content("段落一\n\n段落二"), "段落一\n\n段落二");
    }

    #[test]
    fn pops_trailing_orphans_repeatedly() {
        let text = "本文です。\n[京都市観光協会]\nhttps://example.com/k\n（https://example.com/k2）\n";
        assert_eq!(clean_content(text), "本文です。");
    }

    #[test]
    fn split_label_and_url_pair_is_removed() {
        assert_eq!(
            clean_content("本文\n[公式サイト]\nhttps://example.com/s"),
            "本文"
        );
    }

    #[test]
    fn mid_text_url_line_is_kept() {
        assert_eq!(
            clean_content("https://example.com/a\n本文"),
            "https://example.com/a\n本文"
        );
    }
}
