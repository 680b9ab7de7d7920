//! Citation body parsing: the text captured inside `[出典: ...]`.

use url::Url;

use super::model::SourceLink;
use super::patterns::{MARKDOWN_LINK, URL_CANDIDATE};

/// Punctuation trimmed off the end of a URL candidate.
const URL_TRAILING_PUNCT: &[char] = &['.', ',', ';', ':', '!', '?', '！', '？'];

/// Characters stripped from both ends of a label once the URL is removed.
const LABEL_SEPARATORS: &[char] = &[
    ':', '：', '(', ')', '（', '）', '[', ']', '【', '】', '「', '」', '『', '』', '"', '\'', '“',
    '”', '‘', '’', '-', '‐', '–', '—', '―', ',', '、', '。',
];

/// Resolves a citation body into a link.
///
/// A Markdown link in the body supplies the URL, and its inner label wins
/// over the surrounding text. Otherwise the first valid HTTP(S) URL in the
/// body is used and the leftover text becomes the label. Bodies without a
/// URL (book references and the like) yield [`SourceLink::none`].
pub fn parse_body(body: &str) -> SourceLink {
    let body = body.trim();

    let markdown = MARKDOWN_LINK.captures_iter(body).find_map(|caps| {
        let whole = caps.get(0)?;
        is_absolute_http_url(&caps[2]).then(|| {
            (
                whole.start(),
                whole.end(),
                caps[2].to_string(),
                clean_label(&caps[1]),
            )
        })
    });
    if let Some((start, end, url, inner)) = markdown {
        let label = if inner.is_empty() {
            clean_label(&format!("{} {}", &body[..start], &body[end..]))
        } else {
            inner
        };
        return SourceLink::new(url, label);
    }

    match find_url(body) {
        Some((start, end)) => {
            let url = &body[start..end];
            let rest = format!("{} {}", &body[..start], &body[end..]);
            let label = clean_label(&rest);
            if label.is_empty() {
                SourceLink::bare(url)
            } else {
                SourceLink::new(url, label)
            }
        }
        None => SourceLink::none(),
    }
}

/// True when the body would resolve to a URL-bearing link.
pub fn body_has_url(body: &str) -> bool {
    !parse_body(body).is_empty()
}

/// Byte range of the first valid URL in `text`, trailing punctuation excluded.
pub(crate) fn find_url(text: &str) -> Option<(usize, usize)> {
    URL_CANDIDATE.find_iter(text).find_map(|m| {
        let candidate = m.as_str().trim_end_matches(URL_TRAILING_PUNCT);
        if is_absolute_http_url(candidate) {
            Some((m.start(), m.start() + candidate.len()))
        } else {
            None
        }
    })
}

pub(crate) fn is_absolute_http_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || LABEL_SEPARATORS.contains(&c)
}

fn opener_for(closer: char) -> Option<char> {
    match closer {
        ')' => Some('('),
        '）' => Some('（'),
        ']' => Some('['),
        '】' => Some('【'),
        '」' => Some('「'),
        '』' => Some('『'),
        _ => None,
    }
}

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '（' => Some('）'),
        '[' => Some(']'),
        '【' => Some('】'),
        '「' => Some('」'),
        '『' => Some('』'),
        _ => None,
    }
}

/// Collapses whitespace and trims separators, but keeps a bracket at either
/// edge when it closes a pair opened inside the label.
fn clean_label(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed_start = collapsed.trim_start_matches(is_separator);
    let mut start = collapsed.len() - trimmed_start.len();
    let mut end = start + trimmed_start.trim_end_matches(is_separator).len();
    if start == end {
        return String::new();
    }

    for c in collapsed[..start].chars().rev() {
        let inner = &collapsed[start..end];
        match closer_for(c) {
            Some(closer) if inner.matches(closer).count() > inner.matches(c).count() => {
                start -= c.len_utf8();
            }
            _ => break,
        }
    }
    for c in collapsed[end..].chars() {
        let inner = &collapsed[start..end];
        match opener_for(c) {
            Some(opener) if inner.matches(opener).count() > inner.matches(c).count() => {
                end += c.len_utf8();
            }
            _ => break,
        }
    }

    collapsed[start..end].to_string()
}
