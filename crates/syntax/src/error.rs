use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XPathError {
    #[error("Invalid XPath expression '{0}': {1}")]
    InvalidExpression(String, String),
}

impl XPathError {
    pub(crate) fn invalid(expression: &str, reason: impl Into<String>) -> Self {
        XPathError::InvalidExpression(expression.to_string(), reason.into())
    }

    /// The input text that was rejected.
    pub fn expression(&self) -> &str {
        match self {
            XPathError::InvalidExpression(expression, _) => expression,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            XPathError::InvalidExpression(_, reason) => reason,
        }
    }
}
