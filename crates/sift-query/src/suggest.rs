//! Suggestions and the name-source boundary.
//!
//! Every keyword's sub-grammar reduces to the same three suggestion shapes:
//! filter keywords, operators, and values. Value suggestions never resolve
//! candidate names themselves; they hand a `{filter, exclude}` pair to an
//! external [`NameSource`], which is free to be asynchronous and is
//! responsible for ranking its matches.

use serde::{Deserialize, Serialize};

use crate::keyword::{FilterKeyword, Operator};

/// Which external name list serves a value suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Tag names.
    Tag,
    /// Category names.
    Category,
    /// User identifiers.
    User,
    /// Custom-field names (the `price` in `cf:price:...`).
    CustomFieldName,
}

/// One candidate list offered for the active segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    /// Filter keywords matching the typed prefix.
    Filter {
        /// Matching keywords, in lexicographic order.
        items: Vec<FilterKeyword>,
    },

    /// Operators available at the current position. The list is empty once
    /// any value text exists: the operator selection window has closed, but
    /// the group is still emitted so the dropdown can collapse it.
    Operator {
        /// Available operators.
        items: Vec<Operator>,
    },

    /// A request for value candidates from the external name source.
    Value {
        /// Which name list to consult.
        kind: ValueKind,
        /// The partial value text typed so far; the source prefix-matches
        /// candidates against it.
        filter: String,
        /// Values already committed in the same multi-valued token, so the
        /// dropdown never re-offers a value the user already picked. Always
        /// empty for single-valued kinds.
        exclude: Vec<String>,
    },
}

/// Resolves value suggestions into candidate names.
///
/// Implementations may be backed by a network call; the core only requires
/// that a lookup be idempotent and safe to issue once per parse result, and
/// that stale in-flight lookups be discardable by the caller.
pub trait NameSource {
    /// Returns candidate names for `kind` matching `filter`, with the
    /// already-picked `exclude` values removed. Ranking is up to the source.
    fn resolve(&self, kind: ValueKind, filter: &str, exclude: &[String]) -> Vec<String>;
}

/// A name source over in-memory lists, prefix-matching case-insensitively.
///
/// Used by tests and the CLI; a real deployment substitutes a REST-backed
/// implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryNames {
    /// Known tag names.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Known category names.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Known user identifiers.
    #[serde(default)]
    pub users: Vec<String>,
    /// Known custom-field names.
    #[serde(default)]
    pub field_names: Vec<String>,
}

impl InMemoryNames {
    /// Returns the list backing the given kind.
    fn list(&self, kind: ValueKind) -> &[String] {
        match kind {
            ValueKind::Tag => &self.tags,
            ValueKind::Category => &self.categories,
            ValueKind::User => &self.users,
            ValueKind::CustomFieldName => &self.field_names,
        }
    }
}

impl NameSource for InMemoryNames {
    fn resolve(&self, kind: ValueKind, filter: &str, exclude: &[String]) -> Vec<String> {
        let mut matches: Vec<String> = self
            .list(kind)
            .iter()
            .filter(|name| {
                name.get(..filter.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(filter))
            })
            .filter(|name| !exclude.contains(name))
            .cloned()
            .collect();
        matches.sort_unstable();
        matches
    }
}
