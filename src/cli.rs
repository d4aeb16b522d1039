//! Command line arguments and expression loading.

use crate::error::CliError;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use xpath_parser_syntax::ParserConfig;
use xpath_parser_syntax::config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parses XPath location paths and prints their step structure.
#[derive(Debug, Parser)]
#[command(name = "xpath-parser", version, about)]
pub struct Cli {
    /// File with one expression per line. Blank lines and lines starting
    /// with `#` are skipped.
    pub file: Option<PathBuf>,

    /// An expression to parse; may be repeated.
    #[arg(short, long = "expr", value_name = "XPATH")]
    pub exprs: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum expression length in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Log parser decisions at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_max_depth(self.max_depth)
            .with_max_length(self.max_length)
    }

    /// Collects the `--expr` values followed by the lines of `file`.
    pub fn expressions(&self) -> Result<Vec<String>, CliError> {
        let mut expressions = self.exprs.clone();
        if let Some(path) = &self.file {
            expressions.extend(read_expression_file(path)?);
        }
        if expressions.is_empty() {
            return Err(CliError::NoInput);
        }
        Ok(expressions)
    }
}

pub fn read_expression_file(path: &Path) -> Result<Vec<String>, CliError> {
    let content = fs::read_to_string(path)?;
    let expressions: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    log::debug!(
        "Loaded {} expressions from {}",
        expressions.len(),
        path.display()
    );
    Ok(expressions)
}
