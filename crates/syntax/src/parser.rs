//! Builds [`Expression`] trees from XPath text.
//!
//! The input is normalized, split on a top-level `|` into alternatives, a
//! leading parenthesized group is extracted as a nested expression, and the
//! rest is split into classified steps.

use crate::ast::{Expression, ExpressionBody, PathNode};
use crate::config::ParserConfig;
use crate::error::XPathError;
use crate::groups::{Delimiters, parse_groups_outside};
use crate::normalize::normalize;
use crate::scan::{self, literal_spans};
use crate::step::classify_step;
use log::debug;

// --- Main Public Parser ---

pub fn parse_expression(text: &str) -> Result<Expression, XPathError> {
    XPathParser::default().parse(text)
}

/// Parses `text` and attaches `positional_index` to the resulting expression.
pub fn parse_expression_with_index(
    text: &str,
    positional_index: usize,
) -> Result<Expression, XPathError> {
    XPathParser::default().parse_with_index(text, positional_index)
}

/// A parser bound to a set of input limits.
#[derive(Debug, Clone, Default)]
pub struct XPathParser {
    config: ParserConfig,
}

impl XPathParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, text: &str) -> Result<Expression, XPathError> {
        self.parse_with_index(text, 0)
    }

    pub fn parse_with_index(
        &self,
        text: &str,
        positional_index: usize,
    ) -> Result<Expression, XPathError> {
        if text.len() > self.config.max_length {
            return Err(XPathError::invalid(
                text,
                format!(
                    "input is {} bytes, limit is {}",
                    text.len(),
                    self.config.max_length
                ),
            ));
        }
        self.build(text, positional_index, 0)
    }

    fn build(
        &self,
        text: &str,
        positional_index: usize,
        depth: usize,
    ) -> Result<Expression, XPathError> {
        if depth > self.config.max_depth {
            return Err(XPathError::invalid(
                text,
                format!("nesting exceeds {} levels", self.config.max_depth),
            ));
        }

        let normalized = normalize(text)?;
        let path = normalized.trim_start_matches('.').trim_end_matches('/');
        if !path.starts_with(['/', '(']) {
            return Err(XPathError::invalid(
                text,
                "expression must start with '/' or '('",
            ));
        }

        if scan::contains_top_level(path, '|') {
            let segments = scan::split_top_level(path, '|');
            debug!("'{}' is a union of {} alternatives", path, segments.len());
            let alternatives = segments
                .into_iter()
                .map(|segment| self.build(segment, 0, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Expression {
                source_text: text.to_string(),
                positional_index,
                body: ExpressionBody::Union(alternatives),
            });
        }

        let mut nodes = Vec::new();
        let remainder = match self.leading_group(path, depth)? {
            Some((group, remainder)) => {
                nodes.push(PathNode::Expression(group));
                remainder
            }
            None => path,
        };
        for step in scan::split_steps(remainder) {
            nodes.push(PathNode::Step(classify_step(step)?));
        }

        Ok(Expression {
            source_text: text.to_string(),
            positional_index,
            body: ExpressionBody::Steps(nodes),
        })
    }

    /// Extracts a non-empty parenthesized group starting at offset 0, along
    /// with an optional `[N]` index right after it. Returns the nested
    /// expression and the text following the consumed group.
    fn leading_group<'a>(
        &self,
        path: &'a str,
        depth: usize,
    ) -> Result<Option<(Expression, &'a str)>, XPathError> {
        let literals = literal_spans(path);
        let groups = parse_groups_outside(path, Delimiters::PARENS, &literals)?;
        let Some(&(start, end)) = groups.first() else {
            return Ok(None);
        };
        if start != 0 || start + 1 == end {
            return Ok(None);
        }

        let interior = &path[start + 1..end];
        let after = &path[end + 1..];
        let (positional_index, remainder) = match after.strip_prefix('[') {
            Some(tail) => {
                let close = tail
                    .find(']')
                    .ok_or_else(|| XPathError::invalid(path, "unterminated group index"))?;
                let digits = &tail[..close];
                let not_a_position = || {
                    XPathError::invalid(path, format!("group index '{}' is not a position", digits))
                };
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(not_a_position());
                }
                let index = digits.parse::<usize>().map_err(|_| not_a_position())?;
                (index, &tail[close + 1..])
            }
            None => (0, after),
        };

        debug!(
            "extracted group '{}' with index {} from '{}'",
            interior, positional_index, path
        );
        let group = self.build(interior, positional_index, depth + 1)?;
        Ok(Some((group, remainder)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Step, StepKind};

    fn step_at(expr: &Expression, idx: usize) -> &Step {
        expr.steps()[idx]
            .as_step()
            .unwrap_or_else(|| panic!("expected a step at {} in {}", idx, expr))
    }

    #[test]
    fn test_parse_simple_path() {
        let expr = parse_expression("//div[@class='content']/p").unwrap();
        assert_eq!(expr.steps().len(), 2);
        assert_eq!(expr.positional_index, 0);

        let div = step_at(&expr, 0);
        assert_eq!(div.kind, StepKind::Element);
        assert_eq!(div.name, "div");
        assert_eq!(div.predicates, vec!["@class='content'"]);
        assert!(div.position_independent);
        assert_eq!(div.raw_text, "//div[@class='content']");

        let p = step_at(&expr, 1);
        assert_eq!(p.name, "p");
        assert!(!p.position_independent);
        assert_eq!(p.raw_text, "/p");
    }

    #[test]
    fn test_parse_relative_path() {
        let expr = parse_expression("./a/@href").unwrap();
        assert_eq!(expr.steps().len(), 2);
        assert_eq!(step_at(&expr, 0).name, "a");
        assert_eq!(step_at(&expr, 1).kind, StepKind::Attribute);
        assert_eq!(expr.last_step().map(|s| s.name.as_str()), Some("href"));
    }

    #[test]
    fn test_parse_leading_group_with_index() {
        let expr = parse_expression("((//svg)[2]//text)/text()").unwrap();
        assert_eq!(expr.steps().len(), 3);

        let group = expr.steps()[0].as_expression().unwrap();
        assert_eq!(group.positional_index, 2);
        assert_eq!(group.source_text, "//svg");
        assert_eq!(step_at(group, 0).name, "svg");

        assert_eq!(step_at(&expr, 1).name, "text");
        assert!(step_at(&expr, 1).position_independent);
        assert_eq!(step_at(&expr, 2).kind, StepKind::Function);
    }

    #[test]
    fn test_group_without_trailing_steps() {
        let expr = parse_expression("(//li)[3]").unwrap();
        assert_eq!(expr.steps().len(), 1);
        let group = expr.steps()[0].as_expression().unwrap();
        assert_eq!(group.positional_index, 3);
        assert_eq!(expr.last_step().map(|s| s.name.as_str()), Some("li"));
    }

    #[test]
    fn test_union_alternatives_match_independent_parses() {
        let expr = parse_expression("//a/@href | //link/@href").unwrap();
        assert!(expr.is_union());
        assert!(expr.steps().is_empty());
        assert_eq!(expr.alternatives().len(), 2);

        let left = parse_expression("//a/@href").unwrap();
        let right = parse_expression("//link/@href").unwrap();
        assert_eq!(expr.alternatives()[0].body, left.body);
        assert_eq!(expr.alternatives()[1].body, right.body);
        assert!(expr.last_step().is_none());
    }

    #[test]
    fn test_union_inside_group() {
        let expr = parse_expression("(//a | //b)[1]/c").unwrap();
        let group = expr.steps()[0].as_expression().unwrap();
        assert!(group.is_union());
        assert_eq!(group.positional_index, 1);
        assert_eq!(step_at(&expr, 1).name, "c");
    }

    #[test]
    fn test_pipe_inside_literal_is_not_a_union() {
        let expr = parse_expression("//a[@title='x|y']").unwrap();
        assert!(!expr.is_union());
        assert_eq!(step_at(&expr, 0).predicates, vec!["@title='x|y'"]);
    }

    #[test]
    fn test_mixed_quote_literals_are_preserved() {
        let expr = parse_expression("//a[@x=\")\" and @y='z']").unwrap();
        assert_eq!(step_at(&expr, 0).predicates, vec!["@x=\")\"and@y='z'"]);

        let expr = parse_expression("//a[@title=\"it's here\"]/b").unwrap();
        assert_eq!(step_at(&expr, 0).predicates, vec!["@title=\"it's here\""]);
        assert_eq!(step_at(&expr, 1).name, "b");
    }

    #[test]
    fn test_group_index_must_be_plain_digits() {
        for text in ["(//a)[+2]", "(//a)[]", "(//a)[-1]", "(//a)[1.5]"] {
            let err = parse_expression(text).unwrap_err();
            assert!(err.reason().contains("not a position"), "{}: {}", text, err);
        }
        assert_eq!(
            parse_expression("(//a)[12]").unwrap().steps()[0]
                .as_expression()
                .map(|group| group.positional_index),
            Some(12)
        );
    }

    #[test]
    fn test_external_positional_index() {
        let expr = parse_expression_with_index("//td", 4).unwrap();
        assert_eq!(expr.positional_index(), 4);
    }

    #[test]
    fn test_invalid_expressions() {
        let err = parse_expression("div[@id='abc'").unwrap_err();
        assert_eq!(err.expression(), "div[@id='abc'");

        assert!(parse_expression("").is_err());
        assert!(parse_expression("/").is_err());
        assert!(parse_expression("//a)").is_err());
        assert!(parse_expression("//a|").is_err());
        assert!(parse_expression("(//a)[last()]").is_err());
        assert!(parse_expression("//div[@id='abc'").is_err());
    }

    #[test]
    fn test_length_limit() {
        let parser = XPathParser::new(ParserConfig::default().with_max_length(8));
        assert!(parser.parse("//a/b").is_ok());
        let err = parser.parse("//div/span/a").unwrap_err();
        assert!(err.reason().contains("limit"));
    }

    #[test]
    fn test_depth_limit() {
        let parser = XPathParser::new(ParserConfig::default().with_max_depth(1));
        assert!(parser.parse("(//a)[1]/b").is_ok());
        assert!(parser.parse("((//a)[1]/b)[2]/c").is_err());
    }
}
