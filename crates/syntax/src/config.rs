//! Limits applied while building an [`Expression`](crate::Expression).

pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_MAX_LENGTH: usize = 8192;

/// Bounds on the input a parser accepts.
///
/// `max_depth` counts nested expression levels: every union alternative and
/// every extracted parenthesized group is one level below its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    pub max_depth: usize,
    /// Maximum input length in bytes.
    pub max_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}
