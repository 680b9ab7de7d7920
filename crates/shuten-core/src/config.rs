use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::{EmbeddedLinkPolicy, ParserOptions, SourceParser, DEFAULT_KEYWORDS};

/// Global configuration loaded from `~/.config/shuten/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShutenConfig {
    /// Keywords that introduce an explicit citation (`[出典: ...]`).
    pub keywords: Vec<String>,
    /// Whether an embedded Markdown link used as implicit citation is also
    /// removed from the content: "extract_only" (default) or "strip".
    #[serde(default)]
    pub embedded_link: EmbeddedLinkPolicy,
    /// Parse input as multi-line text unless the command line says otherwise.
    #[serde(default)]
    pub multiline: bool,
}

impl Default for ShutenConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            embedded_link: EmbeddedLinkPolicy::default(),
            multiline: false,
        }
    }
}

impl ShutenConfig {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            keywords: self.keywords.clone(),
            embedded_link: self.embedded_link,
        }
    }

    /// Compile a parser from this configuration.
    pub fn build_parser(&self) -> Result<SourceParser> {
        SourceParser::new(&self.parser_options()).context("invalid citation keywords in config")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("shuten")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ShutenConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ShutenConfig> {
    if !path.exists() {
        let default_cfg = ShutenConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ShutenConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
