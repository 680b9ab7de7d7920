pub mod config;
pub mod document;
pub mod logging;
pub mod source;

pub use source::{
    parse_multiline_source, parse_source, strip_source_if_not_url, ParsedSource, SourceLink,
    SourceParser,
};
