//! Parser for a restricted subset of XPath location paths.
//!
//! Expressions are turned into an ordered list of classified steps
//! (function, axis, attribute, parent or element) with their predicates,
//! nested groups with positional indices, and `|` unions. There is no
//! evaluation; the output is meant for tools that inspect or rewrite paths.
//!
//! ```
//! use xpath_parser_syntax::{StepKind, parse_expression};
//!
//! let expr = parse_expression("//div[@class='content']/p").unwrap();
//! let div = expr.steps()[0].as_step().unwrap();
//! assert_eq!(div.kind, StepKind::Element);
//! assert_eq!(div.predicates, vec!["@class='content'"]);
//! assert!(div.position_independent);
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod groups;
pub mod normalize;
pub mod parser;
mod scan;
pub mod step;

pub use ast::{Expression, ExpressionBody, PathNode, Step, StepKind};
pub use config::ParserConfig;
pub use error::XPathError;
pub use groups::{Delimiters, Span, parse_groups};
pub use normalize::normalize;
pub use parser::{XPathParser, parse_expression, parse_expression_with_index};
pub use step::classify_step;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_steps_of_related_paths_agree() {
        let _ = env_logger::builder().is_test(true).try_init();
        let list = parse_expression("//div[@id='list']/a").unwrap();
        let link = parse_expression("./a/@href").unwrap();
        let a = list.last_step().unwrap();
        let first = link.steps()[0].as_step().unwrap();
        assert_eq!(a.name, first.name);
    }

    #[test]
    fn test_serializes_to_tagged_json() {
        let expr = parse_expression("(//li)[2]/text()").unwrap();
        let value = serde_json::to_value(&expr).unwrap();
        assert_eq!(value["body"]["steps"][0]["type"], "expression");
        assert_eq!(value["body"]["steps"][0]["positional_index"], 2);
        assert_eq!(value["body"]["steps"][1]["type"], "step");
        assert_eq!(value["body"]["steps"][1]["kind"], "function");
    }

    #[test]
    fn test_display_uses_source_text() {
        let expr = parse_expression("//a | //b").unwrap();
        assert_eq!(expr.to_string(), "//a | //b");
        assert_eq!(expr.alternatives()[1].to_string(), "//b");
        let step = classify_step("//p[1]").unwrap();
        assert_eq!(format!("{} ({})", step, step.kind), "//p[1] (element)");
    }
}
