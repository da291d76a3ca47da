//! Search-box query scanning and suggestions for sift.
//!
//! This crate incrementally parses the free-form text typed into the
//! document search box into typed filter tokens and, for the segment
//! currently being typed, produces context-sensitive autocomplete
//! suggestions:
//!
//! - **Tags**: `tag:invoice,archived`, `tag:not:stale` - multi-valued
//! - **Categories**: `cat:reports` - multi-valued
//! - **Custom fields**: `cf:price:>=:100`
//! - **Dates**: `created_at:>=:2024-01-01`, `updated_at:2024-06-01`
//! - **Users**: `created_by:jdoe`, `updated_by:jdoe`, `owner:jdoe`
//! - **Titles**: `title:"quarterly report"`
//! - **Free text**: any other word
//!
//! Double quotes allow spaces and commas inside a value; a backslash
//! escapes the next character. The scanner is advisory: malformed input
//! degrades to "no token, no suggestions" rather than failing, and the
//! whole pipeline is pure and stateless between calls.
//!
//! # Example
//!
//! ```
//! use sift_query::{Suggestion, scan_search_text};
//!
//! let result = scan_search_text("annual tag:inv");
//! assert!(!result.token_is_complete);
//! assert!(matches!(&result.suggestions[1], Suggestion::Value { filter, .. } if filter == "inv"));
//! ```

#![warn(missing_docs)]

mod keyword;
mod parse;
mod scan;
mod segment;
mod suggest;
mod token;
mod values;

pub use keyword::{FilterKeyword, Operator, ValueArity};
pub use parse::{ParseResult, parse_segment};
pub use scan::{scan_search_text, scan_search_text_forced};
pub use segment::{SplitQuery, split};
pub use suggest::{InMemoryNames, NameSource, Suggestion, ValueKind};
pub use token::{DateField, Token, UserField};
