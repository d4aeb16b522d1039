pub mod cli;
pub mod error;
pub mod report;

pub use error::CliError;
pub use report::{ParseOutcome, parse_all, render_json, render_text};
pub use xpath_parser_syntax::*;
