//! Parses batches of expressions and renders the results.

use crate::error::CliError;
use serde_json::{Value, json};
use std::fmt::Write;
use xpath_parser_syntax::{Expression, PathNode, Step, XPathError, XPathParser};

/// The result of parsing one input line.
#[derive(Debug)]
pub struct ParseOutcome {
    pub source: String,
    pub result: Result<Expression, XPathError>,
}

impl ParseOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Parses every expression; failures are kept per line and never stop the batch.
pub fn parse_all(parser: &XPathParser, expressions: &[String]) -> Vec<ParseOutcome> {
    expressions
        .iter()
        .map(|source| {
            let result = parser.parse(source);
            if let Err(e) = &result {
                log::warn!("{}", e);
            }
            ParseOutcome {
                source: source.clone(),
                result,
            }
        })
        .collect()
}

pub fn render_text(outcomes: &[ParseOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        let _ = writeln!(out, "{}", outcome.source);
        match &outcome.result {
            Ok(expr) => write_expression(&mut out, expr, 1),
            Err(e) => {
                let _ = writeln!(out, "  error: {}", e.reason());
            }
        }
    }
    out
}

fn write_step(out: &mut String, step: &Step, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{}{:<9} {}", indent, step.kind, step.name);
    for predicate in &step.predicates {
        let _ = write!(out, " [{}]", predicate);
    }
    if step.position_independent {
        out.push_str(" //");
    }
    out.push('\n');
}

fn write_expression(out: &mut String, expr: &Expression, depth: usize) {
    let indent = "  ".repeat(depth);
    if expr.is_union() {
        for alternative in expr.alternatives() {
            let _ = writeln!(out, "{}| {}", indent, alternative);
            write_expression(out, alternative, depth + 1);
        }
        return;
    }
    for node in expr.steps() {
        match node {
            PathNode::Step(step) => write_step(out, step, depth),
            PathNode::Expression(group) => {
                let _ = write!(out, "{}group ({})", indent, group);
                if group.positional_index > 0 {
                    let _ = write!(out, "[{}]", group.positional_index);
                }
                out.push('\n');
                write_expression(out, group, depth + 1);
            }
        }
    }
}

pub fn to_json(outcomes: &[ParseOutcome]) -> Result<Value, CliError> {
    let entries = outcomes
        .iter()
        .map(|outcome| {
            let entry = match &outcome.result {
                Ok(expr) => {
                    let expression = serde_json::to_value(expr)?;
                    json!({ "source": outcome.source, "expression": expression })
                }
                Err(e) => json!({ "source": outcome.source, "error": e.to_string() }),
            };
            Ok(entry)
        })
        .collect::<Result<Vec<_>, serde_json::Error>>()?;
    Ok(Value::Array(entries))
}

pub fn render_json(outcomes: &[ParseOutcome]) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&to_json(outcomes)?)?)
}
