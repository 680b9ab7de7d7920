//! `shuten annotate <path> --field <name>...` – parse fields of a JSON document.

use anyhow::Result;
use shuten_core::config::ShutenConfig;
use shuten_core::document::{self, FieldMode};
use std::path::Path;

pub fn run_annotate(
    cfg: &ShutenConfig,
    path: &Path,
    fields: &[String],
    multiline: bool,
) -> Result<()> {
    let parser = cfg.build_parser()?;
    let mode = if multiline {
        FieldMode::Multiline
    } else {
        FieldMode::SingleBlock
    };
    let (value, count) = document::annotate_file(path, fields, &parser, mode)?;
    if count == 0 {
        eprintln!("No matching string fields in {}.", path.display());
    }
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
