//! Pattern matching primitives for transmission-path text
//!
//! Each function here is one capability of the chain parser:
//! newline normalization, parenthetical extraction and arrow splitting.
//! Offsets are byte offsets into the source string.

use std::borrow::Cow;

/// Two-character escape (`\` followed by `n`) that stands in for a newline.
pub const ESCAPED_NEWLINE: &str = "\\n";

/// Unicode arrow separator
pub const ARROW: char = '→';

/// ASCII digraph arrow separator
pub const ASCII_ARROW: &str = "->";

fn is_opener(c: char) -> bool {
    matches!(c, '(' | '（')
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | '）')
}

/// A parenthetical group located in a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parenthetical<'a> {
    /// Byte offset of the opening delimiter
    pub start: usize,
    /// Byte offset just past the closing delimiter
    pub end: usize,
    /// Text between the delimiters
    pub inner: &'a str,
}

/// Replace every escaped newline marker with a real newline.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains(ESCAPED_NEWLINE) {
        Cow::Owned(text.replace(ESCAPED_NEWLINE, "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Find the first parenthetical group starting at or after `from`.
///
/// A group is an opener (`(` or `（`), at least one character that is not a
/// closer, and the first closer (`)` or `）`) after it. Delimiter styles may
/// be mixed. Nested openers are ordinary characters, so `(b (c) d)` matches
/// `(b (c)`.
///
/// Returns `None` when `from` is out of range or not on a char boundary.
pub fn find_parenthetical(text: &str, from: usize) -> Option<Parenthetical<'_>> {
    let tail = text.get(from..)?;

    for (offset, c) in tail.char_indices() {
        if !is_opener(c) {
            continue;
        }
        let start = from + offset;
        let inner_start = start + c.len_utf8();

        // Without any closer ahead no later opener can match either
        let (close_offset, closer) = text[inner_start..]
            .char_indices()
            .find(|&(_, ch)| is_closer(ch))?;

        if close_offset == 0 {
            continue;
        }

        let inner_end = inner_start + close_offset;
        return Some(Parenthetical {
            start,
            end: inner_end + closer.len_utf8(),
            inner: &text[inner_start..inner_end],
        });
    }

    None
}

/// Inner text of the first parenthetical group, if any.
pub fn first_parenthetical(text: &str) -> Option<&str> {
    find_parenthetical(text, 0).map(|p| p.inner)
}

/// Remove every parenthetical group, scanning left to right.
pub fn strip_parentheticals(text: &str) -> Cow<'_, str> {
    let mut found = find_parenthetical(text, 0);
    if found.is_none() {
        return Cow::Borrowed(text);
    }

    let mut stripped = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(group) = found {
        stripped.push_str(&text[cursor..group.start]);
        cursor = group.end;
        found = find_parenthetical(text, cursor);
    }
    stripped.push_str(&text[cursor..]);

    Cow::Owned(stripped)
}

/// Split on arrow tokens (`→` or `->`).
///
/// Whitespace around an arrow belongs to the separator, so every returned
/// segment is trimmed. Empty segments are kept; filtering is up to the
/// caller.
pub fn split_arrows(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut segment_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let arrow_len = match c {
            ARROW => ARROW.len_utf8(),
            '-' if matches!(chars.peek(), Some(&(_, '>'))) => {
                chars.next();
                ASCII_ARROW.len()
            }
            _ => continue,
        };
        segments.push(text[segment_start..idx].trim());
        segment_start = idx + arrow_len;
    }
    segments.push(text[segment_start..].trim());

    segments
}
