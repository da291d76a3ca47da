//! Filter keyword registry.
//!
//! The closed catalog of recognized filter keywords, plus the per-keyword
//! tables that drive the segment parser: operator set, implicit default
//! operator, value arity, field-name slot, and value-suggestion source.
//! Adding a filter kind is a data change in this module, not a new code path.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::suggest::ValueKind;

/// A recognized filter keyword (the text before the first `:` of a segment).
///
/// The set is closed and ordered lexicographically by keyword text. Each
/// keyword's canonical display form ends in `:` (e.g. `"tag:"`), which is
/// also the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKeyword {
    /// `cat:` - category filter (multi-valued).
    #[serde(rename = "cat:")]
    Category,

    /// `cf:` - custom field filter (`cf:<field>:<op?>:<value>`).
    #[serde(rename = "cf:")]
    CustomField,

    /// `created_at:` - creation date filter.
    #[serde(rename = "created_at:")]
    CreatedAt,

    /// `created_by:` - creating user filter.
    #[serde(rename = "created_by:")]
    CreatedBy,

    /// `owner:` - owning user filter.
    #[serde(rename = "owner:")]
    Owner,

    /// `tag:` - tag filter (multi-valued).
    #[serde(rename = "tag:")]
    Tag,

    /// `title:` - title text filter.
    #[serde(rename = "title:")]
    Title,

    /// `updated_at:` - last-update date filter.
    #[serde(rename = "updated_at:")]
    UpdatedAt,

    /// `updated_by:` - last-updating user filter.
    #[serde(rename = "updated_by:")]
    UpdatedBy,
}

/// How many values a filter kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueArity {
    /// A comma-separated list of values.
    Multi,
    /// Exactly one value.
    Single,
}

/// Operators for tag filters.
const TAG_OPERATORS: &[Operator] = &[Operator::All, Operator::Any, Operator::Not];

/// Operators for category filters.
const CATEGORY_OPERATORS: &[Operator] = &[Operator::Any, Operator::Not];

/// Comparison operators for custom-field and date filters.
const COMPARISON_OPERATORS: &[Operator] = &[
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Ge,
    Operator::Lt,
    Operator::Le,
];

impl FilterKeyword {
    /// All keywords, in lexicographic keyword order.
    pub const ALL: [Self; 9] = [
        Self::Category,
        Self::CustomField,
        Self::CreatedAt,
        Self::CreatedBy,
        Self::Owner,
        Self::Tag,
        Self::Title,
        Self::UpdatedAt,
        Self::UpdatedBy,
    ];

    /// Returns the keyword text without the trailing colon.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "cat",
            Self::CustomField => "cf",
            Self::CreatedAt => "created_at",
            Self::CreatedBy => "created_by",
            Self::Owner => "owner",
            Self::Tag => "tag",
            Self::Title => "title",
            Self::UpdatedAt => "updated_at",
            Self::UpdatedBy => "updated_by",
        }
    }

    /// Looks up a keyword by its text form (without colon), case-insensitively.
    pub fn lookup(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(text))
    }

    /// Returns all keywords whose text starts with `prefix`, case-insensitively.
    ///
    /// An empty prefix matches every keyword. The result preserves the
    /// lexicographic order of [`Self::ALL`].
    pub fn matching(prefix: &str) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|kw| {
                kw.as_str().len() >= prefix.len()
                    && kw.as_str()[..prefix.len()].eq_ignore_ascii_case(prefix)
            })
            .collect()
    }

    /// Returns the operator set for this keyword. Empty for scalar kinds
    /// that take no operator (user filters, title).
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Self::Tag => TAG_OPERATORS,
            Self::Category => CATEGORY_OPERATORS,
            Self::CustomField | Self::CreatedAt | Self::UpdatedAt => COMPARISON_OPERATORS,
            Self::CreatedBy | Self::UpdatedBy | Self::Owner | Self::Title => &[],
        }
    }

    /// Returns the operator assumed when none is typed explicitly.
    pub fn default_operator(self) -> Option<Operator> {
        match self {
            Self::Tag => Some(Operator::All),
            Self::Category => Some(Operator::Any),
            Self::CustomField | Self::CreatedAt | Self::UpdatedAt => Some(Operator::Eq),
            Self::CreatedBy | Self::UpdatedBy | Self::Owner | Self::Title => None,
        }
    }

    /// Returns how many values this keyword accepts.
    pub fn arity(self) -> ValueArity {
        match self {
            Self::Tag | Self::Category => ValueArity::Multi,
            _ => ValueArity::Single,
        }
    }

    /// Returns true if the keyword takes a field-name slot before the
    /// operator and value (only `cf:`).
    pub fn takes_field_name(self) -> bool {
        self == Self::CustomField
    }

    /// Returns the external name source that serves value suggestions for
    /// this keyword, if any. Kinds without a source (dates, custom-field
    /// values, title) never emit value suggestions.
    pub fn value_source(self) -> Option<ValueKind> {
        match self {
            Self::Tag => Some(ValueKind::Tag),
            Self::Category => Some(ValueKind::Category),
            Self::CreatedBy | Self::UpdatedBy | Self::Owner => Some(ValueKind::User),
            Self::CustomField | Self::CreatedAt | Self::UpdatedAt | Self::Title => None,
        }
    }
}

impl fmt::Display for FilterKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.as_str())
    }
}

/// An operator inside a keyword segment (e.g. the `any` in `tag:any:a,b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Every listed value must match.
    #[serde(rename = "all")]
    All,
    /// At least one listed value must match.
    #[serde(rename = "any")]
    Any,
    /// No listed value may match.
    #[serde(rename = "not")]
    Not,
    /// Equal.
    #[serde(rename = "=")]
    Eq,
    /// Not equal.
    #[serde(rename = "!=")]
    Ne,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
}

impl Operator {
    /// Returns the operator's text form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Not => "not",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
        }
    }

    /// Returns the form shown in suggestion dropdowns (`"all:"`, `">=:"`).
    pub fn suggestion_text(self) -> String {
        format!("{}:", self.as_str())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches an explicit operator at the start of `rest`.
///
/// An operator is only recognized as its full name followed by `:`
/// (case-insensitive). Longer operators win over their prefixes, so `>=:`
/// is `Ge` rather than `Gt` followed by `=:`.
pub fn match_operator<'a>(ops: &[Operator], rest: &'a str) -> Option<(Operator, &'a str)> {
    let mut found: Option<(Operator, usize)> = None;

    for &op in ops {
        let name = op.as_str();
        let Some(head) = rest.get(..name.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(name) || !rest[name.len()..].starts_with(':') {
            continue;
        }
        if found.is_none_or(|(_, len)| name.len() > len) {
            found = Some((op, name.len()));
        }
    }

    found.map(|(op, len)| (op, &rest[len + 1..]))
}
