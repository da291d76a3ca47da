//! Scan entry point.
//!
//! Composes the segment splitter and segment parser over the whole buffer.
//! Pure and stateless: safe to call on every keystroke, O(length of the
//! active segment), with no memoization.

use crate::{
    parse::{ParseResult, parse_segment},
    segment::split,
};

/// Scans the search-box buffer and returns the parse state of its active
/// segment.
pub fn scan_search_text(text: &str) -> ParseResult {
    let parts = split(text);
    parse_segment(parts.active, parts.is_complete)
}

/// Like [`scan_search_text`], but treats the active segment as finished
/// regardless of trailing delimiters. This is the caller's lever for
/// blur-style forced completion.
pub fn scan_search_text_forced(text: &str) -> ParseResult {
    let parts = split(text);
    parse_segment(parts.active, true)
}
