//! Balanced delimiter matching.
//!
//! Spans are reported as `(start, end)` byte offsets of the opening and
//! closing delimiter, sorted by `start`.

use crate::error::XPathError;

pub type Span = (usize, usize);

/// An open/close delimiter pair. When both characters are equal the
/// character toggles between opening and closing a span (quotes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Delimiters {
    pub const PARENS: Delimiters = Delimiters::new('(', ')');
    pub const BRACKETS: Delimiters = Delimiters::new('[', ']');
    pub const SINGLE_QUOTE: Delimiters = Delimiters::toggle('\'');
    pub const DOUBLE_QUOTE: Delimiters = Delimiters::toggle('"');

    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    pub const fn toggle(delimiter: char) -> Self {
        Self::new(delimiter, delimiter)
    }

    pub fn is_toggle(&self) -> bool {
        self.open == self.close
    }
}

impl TryFrom<&str> for Delimiters {
    type Error = XPathError;

    /// Accepts a two character spec such as `"()"` or `"''"`.
    fn try_from(spec: &str) -> Result<Self, Self::Error> {
        let mut chars = spec.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(open), Some(close), None) => Ok(Delimiters::new(open, close)),
            _ => Err(XPathError::invalid(
                spec,
                "delimiter spec must be exactly two characters",
            )),
        }
    }
}

/// Finds every balanced region of `text` delimited by `delimiters`.
///
/// In distinct-delimiter mode a close with no pending open is an error, while
/// an open that is never closed is ignored. In toggle mode the occurrences
/// pair up left to right and an unpaired trailing occurrence is ignored.
pub fn parse_groups(text: &str, delimiters: Delimiters) -> Result<Vec<Span>, XPathError> {
    parse_groups_outside(text, delimiters, &[])
}

/// Like [`parse_groups`], but delimiters whose offset falls strictly inside one
/// of the `excluded` spans are not considered.
pub(crate) fn parse_groups_outside(
    text: &str,
    delimiters: Delimiters,
    excluded: &[Span],
) -> Result<Vec<Span>, XPathError> {
    let is_excluded = |idx: usize| excluded.iter().any(|&(start, end)| start < idx && idx < end);

    let mut spans = Vec::new();
    let mut pending = Vec::new();

    for (idx, c) in text.char_indices() {
        if is_excluded(idx) {
            continue;
        }
        if delimiters.is_toggle() {
            if c != delimiters.open {
                continue;
            }
            match pending.pop() {
                Some(start) => spans.push((start, idx)),
                None => pending.push(idx),
            }
        } else if c == delimiters.open {
            pending.push(idx);
        } else if c == delimiters.close {
            let start = pending.pop().ok_or_else(|| {
                XPathError::invalid(
                    text,
                    format!("unmatched '{}' at offset {}", delimiters.close, idx),
                )
            })?;
            spans.push((start, idx));
        }
    }

    spans.sort_by_key(|&(start, _)| start);
    Ok(spans)
}
