//! Shared utility helpers.

/// Case-insensitive (ASCII) substring search without allocating a lowercase copy.
///
/// Dump lines are scanned several times per run, so keyword checks go through
/// here rather than `to_lowercase().contains(..)`.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

/// Case-insensitive (ASCII) find: byte offset of the first occurrence of `needle`.
#[inline]
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    let haystack = haystack.as_bytes();
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// Case-insensitive starts_with, ignoring leading whitespace in `haystack`.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    let trimmed = haystack.trim_start();
    trimmed.len() >= needle.len()
        && trimmed.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// Byte index of the last character of `s`, if any.
#[inline]
pub fn last_char_index(s: &str) -> Option<usize> {
    s.char_indices().next_back().map(|(idx, _)| idx)
}
