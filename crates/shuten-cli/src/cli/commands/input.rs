//! Reading command input from a file or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read the whole input; `None` or `-` means stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read stdin")?;
            Ok(buf)
        }
    }
}
