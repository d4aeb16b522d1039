//! Quote- and nesting-aware scanning over normalized expression text.

use crate::groups::Span;

/// Tracks whether the scan cursor is inside a quoted literal or a
/// `[...]`/`(...)` group. The quote character that opened a literal is the
/// only one that closes it.
#[derive(Debug, Default)]
struct ScanState {
    quote: Option<char>,
    depth: usize,
}

impl ScanState {
    fn at_top_level(&self) -> bool {
        self.quote.is_none() && self.depth == 0
    }

    fn advance(&mut self, c: char) {
        match self.quote {
            Some(open) => {
                if c == open {
                    self.quote = None;
                }
            }
            None => match c {
                '\'' | '"' => self.quote = Some(c),
                '[' | '(' => self.depth += 1,
                ']' | ')' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            },
        }
    }
}

/// Spans of quoted literals as the offsets of their opening and closing
/// quote. Either quote style may open a literal; a literal still open at the
/// end of the text is ignored.
pub(crate) fn literal_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut state = ScanState::default();
    let mut open = None;

    for (idx, c) in text.char_indices() {
        let was_quoted = state.quote.is_some();
        state.advance(c);
        match (was_quoted, state.quote.is_some()) {
            (false, true) => open = Some(idx),
            (true, false) => {
                if let Some(start) = open.take() {
                    spans.push((start, idx));
                }
            }
            _ => {}
        }
    }
    spans
}

/// Splits `text` into location steps. Each step begins at a `/` that is not
/// the second half of a `//` marker and that sits outside any literal or
/// group. Empty fragments are dropped.
pub(crate) fn split_steps(text: &str) -> Vec<&str> {
    let mut steps = Vec::new();
    let mut state = ScanState::default();
    let mut start = 0;
    let mut prev = None;

    for (idx, c) in text.char_indices() {
        if c == '/' && prev != Some('/') && state.at_top_level() {
            log::trace!("step boundary at offset {} in '{}'", idx, text);
            steps.push(&text[start..idx]);
            start = idx;
        }
        state.advance(c);
        prev = Some(c);
    }
    steps.push(&text[start..]);

    steps.retain(|step| !step.is_empty());
    steps
}

pub(crate) fn contains_top_level(text: &str, separator: char) -> bool {
    let mut state = ScanState::default();
    text.chars().any(|c| {
        let hit = c == separator && state.at_top_level();
        state.advance(c);
        hit
    })
}

/// Splits on every top-level `separator`, keeping empty segments.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut state = ScanState::default();
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if c == separator && state.at_top_level() {
            segments.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
        state.advance(c);
    }
    segments.push(&text[start..]);
    segments
}

/// Splits an element step body such as `div[@id='a'][2]` into its name and
/// the contents of each top-level `[...]` predicate.
///
/// Returns `None` when a predicate is never closed.
pub(crate) fn split_predicates(body: &str) -> Option<(&str, Vec<&str>)> {
    let mut state = ScanState::default();
    let mut name_end = None;
    let mut open = None;
    let mut predicates = Vec::new();

    for (idx, c) in body.char_indices() {
        if c == '[' && state.at_top_level() {
            name_end.get_or_insert(idx);
            open = Some(idx + 1);
        }
        state.advance(c);
        if c == ']' && state.at_top_level() {
            if let Some(start) = open.take() {
                predicates.push(&body[start..idx]);
            }
        }
    }

    if open.is_some() {
        return None;
    }
    let name = &body[..name_end.unwrap_or(body.len())];
    Some((name, predicates))
}
