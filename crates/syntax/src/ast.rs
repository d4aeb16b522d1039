//! Defines the parsed representation of XPath location paths.

use serde::Serialize;
use std::fmt;

/// How a single location step was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// A function call such as `text()`.
    Function,
    /// An axis specifier such as `child::*`.
    Axis,
    /// An attribute reference such as `@href`.
    Attribute,
    /// The parent reference `..`.
    Parent,
    /// A plain element step, possibly with predicates.
    Element,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Function => "function",
            StepKind::Axis => "axis",
            StepKind::Attribute => "attribute",
            StepKind::Parent => "parent",
            StepKind::Element => "element",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One location step, like `//div[@id='x']`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// The step text as it was isolated, including its leading slash(es).
    pub raw_text: String,
    pub kind: StepKind,
    /// Function, axis, attribute or element name. Empty for `..`.
    pub name: String,
    /// Contents of each `[...]` on an element step, brackets stripped.
    pub predicates: Vec<String>,
    /// True when the step was reached through `//`.
    pub position_independent: bool,
}

impl Step {
    /// Renders the step from its parsed fields alone. Classifying the result
    /// again yields the same kind, name, predicates and position flag.
    pub fn canonical(&self) -> String {
        let marker = if self.position_independent { "//" } else { "/" };
        match self.kind {
            StepKind::Function => format!("{}{}()", marker, self.name),
            StepKind::Axis => format!("{}{}::*", marker, self.name),
            StepKind::Attribute => format!("{}@{}", marker, self.name),
            StepKind::Parent => format!("{}..", marker),
            StepKind::Element => {
                let mut out = format!("{}{}", marker, self.name);
                for predicate in &self.predicates {
                    out.push('[');
                    out.push_str(predicate);
                    out.push(']');
                }
                out
            }
        }
    }

    /// Compares the normalized raw text of two steps, so that
    /// `/div[position() > 1]` and `/div[position()>1]` are equivalent.
    pub fn equivalent(&self, other: &Step) -> bool {
        matches!(
            (
                crate::normalize::normalize(&self.raw_text),
                crate::normalize::normalize(&other.raw_text),
            ),
            (Ok(a), Ok(b)) if a == b
        )
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

/// An entry in a step sequence: either a classified step or a nested
/// expression extracted from a leading parenthesized group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PathNode {
    Step(Step),
    Expression(Expression),
}

impl PathNode {
    pub fn as_step(&self) -> Option<&Step> {
        match self {
            PathNode::Step(step) => Some(step),
            PathNode::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            PathNode::Expression(expr) => Some(expr),
            PathNode::Step(_) => None,
        }
    }
}

/// The two mutually exclusive shapes an expression can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionBody {
    /// An ordered sequence of steps and nested groups.
    Steps(Vec<PathNode>),
    /// Alternatives joined by a top-level `|`, left to right.
    Union(Vec<Expression>),
}

/// A parsed XPath expression or sub-expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expression {
    /// The text this expression was built from, before normalization.
    pub source_text: String,
    /// The `[N]` attached after a parenthesized group, or 0.
    pub positional_index: usize,
    pub body: ExpressionBody,
}

impl Expression {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn positional_index(&self) -> usize {
        self.positional_index
    }

    pub fn is_union(&self) -> bool {
        matches!(self.body, ExpressionBody::Union(_))
    }

    /// The step sequence; empty for a union.
    pub fn steps(&self) -> &[PathNode] {
        match &self.body {
            ExpressionBody::Steps(nodes) => nodes,
            ExpressionBody::Union(_) => &[],
        }
    }

    /// The union alternatives; empty for a step sequence.
    pub fn alternatives(&self) -> &[Expression] {
        match &self.body {
            ExpressionBody::Union(alternatives) => alternatives,
            ExpressionBody::Steps(_) => &[],
        }
    }

    /// The final classified step, descending into a trailing nested group.
    /// `None` for a union or an empty sequence.
    pub fn last_step(&self) -> Option<&Step> {
        match self.steps().last()? {
            PathNode::Step(step) => Some(step),
            PathNode::Expression(inner) => inner.last_step(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_text)
    }
}
