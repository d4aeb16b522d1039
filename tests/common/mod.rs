#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use xpath_parser::{Expression, Step};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes `lines` to a temporary expression list, one per line.
pub fn expression_file(lines: &[&str]) -> Result<NamedTempFile, std::io::Error> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{}", line)?;
    }
    file.flush()?;
    Ok(file)
}

/// Collects the classified steps of `expr`, descending into nested groups.
pub fn flatten_steps(expr: &Expression) -> Vec<&Step> {
    let mut steps = Vec::new();
    for alternative in expr.alternatives() {
        steps.extend(flatten_steps(alternative));
    }
    for node in expr.steps() {
        match node {
            xpath_parser::PathNode::Step(step) => steps.push(step),
            xpath_parser::PathNode::Expression(group) => steps.extend(flatten_steps(group)),
        }
    }
    steps
}
