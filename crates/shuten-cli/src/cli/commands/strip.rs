//! `shuten strip [path]` – drop a trailing citation that has no URL.

use anyhow::Result;
use shuten_core::config::ShutenConfig;
use std::path::Path;

use super::input::read_input;

pub fn run_strip(cfg: &ShutenConfig, path: Option<&Path>) -> Result<()> {
    let parser = cfg.build_parser()?;
    let text = read_input(path)?;
    println!("{}", parser.strip_if_not_url(&text).trim_end());
    Ok(())
}
