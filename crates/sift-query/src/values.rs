//! Value-list scanning.
//!
//! Comma-separated value lists where each value is either a bare run of
//! non-comma, non-space characters or a double-quoted string. Quotes allow
//! embedded spaces and commas; a backslash escapes the next character
//! anywhere. Malformed input (unterminated quote, dangling escape) yields
//! `None` so the parser can degrade instead of failing.

use std::mem;

/// Splits `input` at the last unescaped, unquoted comma.
///
/// Returns the already-typed values (before the comma) and the fragment
/// currently being typed (after it). With no such comma the whole input is
/// the fragment.
pub fn split_last_comma(input: &str) -> (&str, &str) {
    let mut in_quote = false;
    let mut escaped = false;
    let mut last = None;

    for (pos, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quote = !in_quote,
            ',' if !in_quote => last = Some(pos),
            _ => {}
        }
    }

    match last {
        Some(pos) => (&input[..pos], &input[pos + 1..]),
        None => ("", input),
    }
}

/// Splits a complete value list at unescaped, unquoted commas and unquotes
/// each value. Empty values (from `a,,b` or trailing commas) are dropped.
///
/// Returns `None` on an unterminated quote or dangling escape.
pub fn split_values(input: &str) -> Option<Vec<String>> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut escaped = false;

    for ch in input.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                if !current.is_empty() {
                    values.push(mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if in_quote || escaped {
        return None;
    }
    if !current.is_empty() {
        values.push(current);
    }
    Some(values)
}

/// Unquotes and unescapes a single value, treating commas as ordinary
/// characters (single-arity filters take exactly one value slot).
///
/// Returns `None` on an unterminated quote or dangling escape.
pub fn scan_value(input: &str) -> Option<String> {
    let mut value = String::new();
    let mut in_quote = false;
    let mut escaped = false;

    for ch in input.chars() {
        if escaped {
            value.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_quote = !in_quote,
            _ => value.push(ch),
        }
    }

    if in_quote || escaped {
        return None;
    }
    Some(value)
}

/// Derives the suggestion filter text from a partially typed fragment.
///
/// The fragment is what sits after the last comma while the user is still
/// typing, so it may carry an opening quote with no closing one yet. Quotes
/// are stripped and escapes resolved; a trailing lone backslash is dropped.
pub fn fragment_filter(fragment: &str) -> String {
    let mut filter = String::new();
    let mut escaped = false;

    for ch in fragment.chars() {
        if escaped {
            filter.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => {}
            _ => filter.push(ch),
        }
    }

    filter
}
