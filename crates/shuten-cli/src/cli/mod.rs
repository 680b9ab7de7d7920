//! CLI for the shuten citation extractor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use shuten_core::config;
use std::path::PathBuf;

use commands::{run_annotate, run_completions, run_man, run_parse, run_strip, ParseArgs};

/// Top-level CLI for shuten.
#[derive(Debug, Parser)]
#[command(name = "shuten")]
#[command(about = "shuten: extract citation annotations from AI-generated travel text", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Separate display content from its citation.
    Parse {
        /// Input file; reads stdin when omitted or "-".
        path: Option<PathBuf>,
        /// Expect the citation on the last line and clean orphaned link lines.
        #[arg(long)]
        multiline: bool,
        /// Remove an embedded Markdown link used as the citation from the content.
        #[arg(long)]
        strip_embedded: bool,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Remove a trailing keyword citation unless it carries a URL.
    Strip {
        /// Input file; reads stdin when omitted or "-".
        path: Option<PathBuf>,
    },

    /// Parse selected string fields of a JSON document in place.
    Annotate {
        /// Path to the JSON document.
        path: PathBuf,
        /// Field name to parse (repeatable).
        #[arg(long = "field", value_name = "NAME", required = true)]
        fields: Vec<String>,
        /// Parse fields as multi-line text.
        #[arg(long)]
        multiline: bool,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the roff man page.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Parse {
                path,
                multiline,
                strip_embedded,
                json,
            } => run_parse(
                &cfg,
                &ParseArgs {
                    path,
                    multiline: multiline || cfg.multiline,
                    strip_embedded,
                    json,
                },
            )?,
            CliCommand::Strip { path } => run_strip(&cfg, path.as_deref())?,
            CliCommand::Annotate {
                path,
                fields,
                multiline,
            } => run_annotate(&cfg, &path, &fields, multiline || cfg.multiline)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
