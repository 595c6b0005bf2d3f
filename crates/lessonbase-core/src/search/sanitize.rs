//! Search term cleanup

use crate::fold_char;

/// Characters that act as wildcards in a `LIKE` pattern.
const STRIPPED: [char; 3] = ['_', '?', '%'];

/// Strip pattern metacharacters from a raw term and lower-case it with the
/// same per-character fold the matchers use.
pub fn sanitize(term: &str) -> String {
    term.chars()
        .filter(|c| !STRIPPED.contains(c))
        .map(fold_char)
        .collect()
}

/// True when a sanitized term has nothing left to search for.
pub fn is_blank(sanitized: &str) -> bool {
    sanitized.trim().is_empty()
}
