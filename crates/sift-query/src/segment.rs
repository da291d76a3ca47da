//! Segment splitting.
//!
//! Splits the full search-box buffer into whitespace-delimited segments and
//! identifies the active segment: the one the user is currently extending.
//! Earlier segments are already-committed tokens and are never re-parsed.
//!
//! Splitting is quote-aware: whitespace inside a double-quoted span does not
//! delimit, so `tag:"blue sky"` stays one segment. Completeness, however, is
//! never inferred from quote balancing; the active segment is complete only
//! when unquoted whitespace follows it, or when the caller forces completion
//! (e.g. on blur).

/// The result of splitting the search-box buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitQuery<'a> {
    /// Everything before the active segment, trailing delimiter included.
    pub prior: &'a str,
    /// The segment currently being typed. For an empty or whitespace-only
    /// buffer this is the buffer itself.
    pub active: &'a str,
    /// True when the user has moved past the active segment, i.e. unquoted
    /// whitespace follows it in the buffer.
    pub is_complete: bool,
}

/// Splits `text` into prior text and the active segment.
pub fn split(text: &str) -> SplitQuery<'_> {
    let mut in_quote = false;
    let mut escaped = false;
    // Span of the most recent segment that was closed by whitespace.
    let mut closed: Option<(usize, usize)> = None;
    // Start of the segment currently open at the scan position.
    let mut open: Option<usize> = None;

    for (pos, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                open.get_or_insert(pos);
            }
            '"' => {
                in_quote = !in_quote;
                open.get_or_insert(pos);
            }
            ch if ch.is_whitespace() && !in_quote => {
                if let Some(start) = open.take() {
                    closed = Some((start, pos));
                }
            }
            _ => {
                open.get_or_insert(pos);
            }
        }
    }

    match (open, closed) {
        // Buffer ends mid-segment: that segment is active and still typing.
        (Some(start), _) => SplitQuery {
            prior: &text[..start],
            active: &text[start..],
            is_complete: false,
        },
        // Buffer ends in whitespace: the last closed segment is active and done.
        (None, Some((start, end))) => SplitQuery {
            prior: &text[..start],
            active: &text[start..end],
            is_complete: true,
        },
        // Empty or whitespace-only buffer.
        (None, None) => SplitQuery {
            prior: "",
            active: text,
            is_complete: false,
        },
    }
}
