//! CLI command handlers, one file per command.

mod annotate;
mod completions;
mod input;
mod man;
mod parse;
mod strip;

pub use annotate::run_annotate;
pub use completions::run_completions;
pub use man::run_man;
pub use parse::{run_parse, ParseArgs};
pub use strip::run_strip;
