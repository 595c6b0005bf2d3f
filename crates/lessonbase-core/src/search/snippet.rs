//! Context windows around a search match
//!
//! Positions are counted in `char`s so that slicing never splits a
//! multi-byte character. Case folding is done per character, which keeps
//! the folded text aligned with the original one.

use crate::fold_char as fold;

/// Characters of context kept on each side of the match.
pub const DEFAULT_SNIPPET_MARGIN: usize = 40;

const ELLIPSIS: &str = "...";

/// [`extract_snippet`] with the default margin.
pub fn snippet(term: Option<&str>, text: Option<&str>) -> String {
    extract_snippet(term, text, DEFAULT_SNIPPET_MARGIN)
}

/// Cut a window of `margin` characters around the first case-insensitive
/// occurrence of `term` in `text`, marking truncated ends with `...`.
///
/// When the term does not occur the match position is taken as `-1`, so the
/// window degenerates to the leading `term.len() - 1 + margin` characters.
pub fn extract_snippet(term: Option<&str>, text: Option<&str>, margin: usize) -> String {
    let (Some(term), Some(text)) = (term, text) else {
        return String::new();
    };

    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = term.chars().map(fold).collect();

    let len = chars.len() as isize;
    let margin = margin as isize;
    let pos = find_folded(&chars, &needle).map_or(-1, |p| p as isize);

    let start = (pos - margin).max(0);
    let end = (pos + needle.len() as isize + margin).min(len).max(start);

    let mut out = String::with_capacity(text.len() + 2 * ELLIPSIS.len());
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(&chars[start as usize..end as usize]);
    if end < len {
        out.push_str(ELLIPSIS);
    }
    out
}

/// Case-insensitive substring test.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let chars: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().map(fold).collect();
    find_folded(&chars, &needle).is_some()
}

fn find_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&h, &n)| fold(h) == n)
    })
}
