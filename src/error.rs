// src/error.rs
use thiserror::Error;
use xpath_parser_syntax::XPathError;

/// Errors raised by the command line harness.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parsing failed: {0}")]
    Parse(#[from] XPathError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No expressions given; pass a file or at least one --expr")]
    NoInput,
}
