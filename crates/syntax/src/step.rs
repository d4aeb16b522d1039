//! Classification of isolated location steps.

use crate::ast::{Step, StepKind};
use crate::error::XPathError;
use crate::scan::split_predicates;
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{all_consuming, rest},
    sequence::{preceded, terminated},
};

// --- Name Patterns (tried in priority order) ---

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic() || c == '-').parse(input)
}

fn function_name(input: &str) -> IResult<&str, &str> {
    terminated(identifier, char('(')).parse(input)
}

fn axis_name(input: &str) -> IResult<&str, &str> {
    terminated(identifier, tag("::")).parse(input)
}

fn attribute_name(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), rest).parse(input)
}

fn parent_reference(input: &str) -> IResult<&str, &str> {
    all_consuming(tag("..")).parse(input)
}

/// Classifies one step such as `/text()`, `//div[@id='x']` or `/..`.
///
/// A leading `.` and trailing `/` are stripped first; what remains must start
/// with `/`.
pub fn classify_step(text: &str) -> Result<Step, XPathError> {
    let trimmed = text.trim().trim_start_matches('.').trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(XPathError::invalid(text, "step must start with '/'"));
    }
    let position_independent = trimmed.starts_with("//");
    let body = trimmed.trim_start_matches('/');

    let (kind, name, predicates) = if let Ok((_, name)) = function_name(body) {
        (StepKind::Function, name, Vec::new())
    } else if let Ok((_, name)) = axis_name(body) {
        (StepKind::Axis, name, Vec::new())
    } else if let Ok((_, name)) = attribute_name(body) {
        (StepKind::Attribute, name, Vec::new())
    } else if parent_reference(body).is_ok() {
        (StepKind::Parent, "", Vec::new())
    } else {
        let (name, predicates) = split_predicates(body)
            .ok_or_else(|| XPathError::invalid(text, "unterminated predicate"))?;
        (StepKind::Element, name, predicates)
    };

    Ok(Step {
        raw_text: text.to_string(),
        kind,
        name: name.to_string(),
        predicates: predicates.into_iter().map(str::to_string).collect(),
        position_independent,
    })
}
