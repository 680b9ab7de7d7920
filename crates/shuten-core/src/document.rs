//! Applies the citation parser to string fields of backend JSON documents.
//!
//! Travel plans, guide spots and reflections arrive as JSON with generated
//! text in fields such as `description` or `comment`. Each listed field is
//! replaced in place by its parsed `{content, source}` object.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::source::SourceParser;

/// How each selected field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMode {
    #[default]
    SingleBlock,
    Multiline,
}

/// Rewrites every string under a key in `fields`, at any depth.
/// Returns the number of fields rewritten; non-string values are left alone.
pub fn annotate_fields(
    value: &mut Value,
    fields: &[String],
    parser: &SourceParser,
    mode: FieldMode,
) -> Result<usize> {
    let mut rewritten = 0usize;
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                let parsed = match child {
                    Value::String(text) if fields.iter().any(|f| f == key) => Some(match mode {
                        FieldMode::SingleBlock => parser.parse(text),
                        FieldMode::Multiline => parser.parse_multiline(text),
                    }),
                    Value::String(_) => None,
                    _ => {
                        rewritten += annotate_fields(child, fields, parser, mode)?;
                        None
                    }
                };
                if let Some(parsed) = parsed {
                    *child = serde_json::to_value(&parsed)
                        .with_context(|| format!("serialize parsed field {key}"))?;
                    rewritten += 1;
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                rewritten += annotate_fields(item, fields, parser, mode)?;
            }
        }
        _ => {}
    }
    Ok(rewritten)
}

/// Reads a JSON document from disk and annotates it.
pub fn annotate_file(
    path: &Path,
    fields: &[String],
    parser: &SourceParser,
    mode: FieldMode,
) -> Result<(Value, usize)> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut value: Value =
        serde_json::from_str(&data).with_context(|| format!("parse JSON {}", path.display()))?;
    let count = annotate_fields(&mut value, fields, parser, mode)?;
    tracing::info!("annotated {} field(s) in {}", count, path.display());
    Ok((value, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rewrites_nested_fields_only() {
        let mut doc = json!({
            "title": "京都一泊二日 [出典: https://example.com/t]",
            "spots": [
                { "name": "清水寺", "description": "本堂は国宝です。 [出典: 清水寺公式 https://example.com/k]" },
                { "name": "祇園", "description": 42 }
            ]
        });
        let n = annotate_fields(
            &mut doc,
            &fields(&["description"]),
            SourceParser::shared(),
            FieldMode::SingleBlock,
        )
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(doc["title"], "京都一泊二日 [出典: https://example.com/t]");
        assert_eq!(doc["spots"][0]["description"]["content"], "本堂は国宝です。");
        assert_eq!(
            doc["spots"][0]["description"]["source"]["label"],
            "清水寺公式"
        );
        assert_eq!(doc["spots"][1]["description"], 42);
    }

    #[test]
    fn multiline_mode_cleans_orphans() {
        let mut doc = json!({ "guide": "一日目\n[公式](https://example.com/o)\n[出典: 公式 https://example.com/o]" });
        annotate_fields(
            &mut doc,
            &fields(&["guide"]),
            SourceParser::shared(),
            FieldMode::Multiline,
        )
        .unwrap();
        assert_eq!(doc["guide"]["content"], "一日目");
        assert_eq!(doc["guide"]["source"]["url"], "https://example.com/o");
    }

    #[test]
    fn annotate_file_reads_document() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(r#"{"comment": "楽しかった [参照: 旅行記]"}"#.as_bytes())
            .unwrap();
        f.flush().unwrap();
        let (value, n) = annotate_file(
            f.path(),
            &fields(&["comment"]),
            SourceParser::shared(),
            FieldMode::SingleBlock,
        )
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(value["comment"]["content"], "楽しかった");
        assert!(value["comment"]["source"]["url"].is_null());
    }

    #[test]
    fn annotate_file_rejects_invalid_json() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{not json").unwrap();
        f.flush().unwrap();
        let err = annotate_file(
            f.path(),
            &fields(&["comment"]),
            SourceParser::shared(),
            FieldMode::SingleBlock,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("parse JSON"));
    }
}
