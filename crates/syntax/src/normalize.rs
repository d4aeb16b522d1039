//! Canonicalization of raw expression text.

use crate::error::XPathError;
use crate::groups::{Delimiters, Span, parse_groups_outside};
use crate::scan::literal_spans;
use std::collections::BTreeSet;

fn inside(spans: &[Span], idx: usize) -> bool {
    spans.iter().any(|&(start, end)| start <= idx && idx < end)
}

/// Returns the canonical form of `text`: whitespace outside quoted literals
/// is dropped, then redundant parenthesis groups are removed.
///
/// A parenthesis pair is kept when it is an empty call pair like `text()`,
/// when its content does not start with `/` or `(`, or when it is directly
/// followed by a `[` index predicate. Every other pair is removed.
pub fn normalize(text: &str) -> Result<String, XPathError> {
    let literals = literal_spans(text);
    // Unbalanced parens are reported against the caller's text.
    parse_groups_outside(text, Delimiters::PARENS, &literals)?;

    let compact: String = text
        .char_indices()
        .filter(|&(idx, c)| !c.is_whitespace() || inside(&literals, idx))
        .map(|(_, c)| c)
        .collect();

    let literals = literal_spans(&compact);
    let groups = parse_groups_outside(&compact, Delimiters::PARENS, &literals)
        .map_err(|e| XPathError::invalid(text, e.reason()))?;
    let bytes = compact.as_bytes();
    let last = compact.len().saturating_sub(1);
    let mut removed = BTreeSet::new();

    for (start, end) in groups {
        if start + 1 == end || !matches!(bytes[start + 1], b'/' | b'(') {
            continue;
        }
        if end == last || bytes[end + 1] != b'[' {
            removed.insert(start);
            removed.insert(end);
        }
    }

    let normalized: String = compact
        .char_indices()
        .filter(|(idx, _)| !removed.contains(idx))
        .map(|(_, c)| c)
        .collect();
    log::trace!("normalized '{}' -> '{}'", text, normalized);
    Ok(normalized)
}
