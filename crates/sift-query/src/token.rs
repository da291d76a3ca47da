//! Filter tokens.
//!
//! The structured representation of one fully- or partially-parsed filter.
//! A token is complete only when the segment splitter has closed its segment
//! (or the caller forced completion); an incomplete token never carries
//! resolved operator/value fields - those are populated together at the
//! moment of completion, so a completed token always round-trips into a
//! backend query parameter.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keyword::{FilterKeyword, Operator, ValueArity};

/// Which date keyword a [`Token::Date`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    /// `created_at:`
    CreatedAt,
    /// `updated_at:`
    UpdatedAt,
}

/// Which user keyword a [`Token::User`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    /// `created_by:`
    CreatedBy,
    /// `updated_by:`
    UpdatedBy,
    /// `owner:`
    Owner,
}

/// One parsed filter token, discriminated by filter kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// A pure-whitespace segment. Terminal and always complete.
    Space {
        /// Number of whitespace characters.
        count: usize,
        /// The raw whitespace text.
        raw: String,
    },

    /// A tag filter (`tag:any:a,b`).
    Tag {
        /// Resolved operator; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        operator: Option<Operator>,
        /// Resolved tag names; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
    },

    /// A category filter (`cat:not:drafts`).
    Category {
        /// Resolved operator; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        operator: Option<Operator>,
        /// Resolved category names; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        values: Option<Vec<String>>,
    },

    /// A custom-field filter (`cf:price:>=:100`).
    CustomField {
        /// The custom field's name; absent while it is still being typed.
        #[serde(skip_serializing_if = "Option::is_none")]
        field_name: Option<String>,
        /// Resolved operator; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        operator: Option<Operator>,
        /// Resolved value; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },

    /// A date filter (`created_at:>=:2024-01-01`).
    Date {
        /// Which date keyword produced the token.
        field: DateField,
        /// Resolved operator; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        operator: Option<Operator>,
        /// Resolved instant; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<DateTime<Utc>>,
    },

    /// A user filter (`owner:jdoe`).
    User {
        /// Which user keyword produced the token.
        field: UserField,
        /// Resolved user identifier; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },

    /// A title filter (`title:"quarterly report"`).
    Title {
        /// Resolved title text; absent while the token is partial.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },

    /// Free text with no keyword.
    Text {
        /// The text itself.
        value: String,
    },
}

impl Token {
    /// Builds the partial token emitted while a keyword segment is still
    /// being typed: the filter kind (and, once locked, the custom-field
    /// name), with operator and values withheld.
    pub fn partial(keyword: FilterKeyword, field_name: Option<String>) -> Self {
        match keyword {
            FilterKeyword::Tag => Self::Tag {
                operator: None,
                values: None,
            },
            FilterKeyword::Category => Self::Category {
                operator: None,
                values: None,
            },
            FilterKeyword::CustomField => Self::CustomField {
                field_name,
                operator: None,
                value: None,
            },
            FilterKeyword::CreatedAt => Self::Date {
                field: DateField::CreatedAt,
                operator: None,
                value: None,
            },
            FilterKeyword::UpdatedAt => Self::Date {
                field: DateField::UpdatedAt,
                operator: None,
                value: None,
            },
            FilterKeyword::CreatedBy => Self::User {
                field: UserField::CreatedBy,
                value: None,
            },
            FilterKeyword::UpdatedBy => Self::User {
                field: UserField::UpdatedBy,
                value: None,
            },
            FilterKeyword::Owner => Self::User {
                field: UserField::Owner,
                value: None,
            },
            FilterKeyword::Title => Self::Title { value: None },
        }
    }

    /// Builds the completed token for a keyword segment, resolving the
    /// operator to the explicit one or the kind's implicit default.
    ///
    /// Returns `None` when the segment is malformed for its kind: missing
    /// custom-field name, wrong value count for a single-valued kind, or an
    /// unparsable date.
    pub fn complete(
        keyword: FilterKeyword,
        field_name: Option<String>,
        operator: Option<Operator>,
        mut values: Vec<String>,
    ) -> Option<Self> {
        let operator = operator.or_else(|| keyword.default_operator());

        if keyword.arity() == ValueArity::Single && values.len() != 1 {
            return None;
        }

        match keyword {
            FilterKeyword::Tag => Some(Self::Tag {
                operator,
                values: Some(values),
            }),
            FilterKeyword::Category => Some(Self::Category {
                operator,
                values: Some(values),
            }),
            FilterKeyword::CustomField => Some(Self::CustomField {
                field_name: Some(field_name.filter(|name| !name.is_empty())?),
                operator,
                value: Some(values.pop()?),
            }),
            FilterKeyword::CreatedAt | FilterKeyword::UpdatedAt => {
                let field = if keyword == FilterKeyword::CreatedAt {
                    DateField::CreatedAt
                } else {
                    DateField::UpdatedAt
                };
                Some(Self::Date {
                    field,
                    operator,
                    value: Some(parse_instant(&values.pop()?)?),
                })
            }
            FilterKeyword::CreatedBy | FilterKeyword::UpdatedBy | FilterKeyword::Owner => {
                let field = match keyword {
                    FilterKeyword::CreatedBy => UserField::CreatedBy,
                    FilterKeyword::UpdatedBy => UserField::UpdatedBy,
                    _ => UserField::Owner,
                };
                Some(Self::User {
                    field,
                    value: Some(values.pop()?),
                })
            }
            FilterKeyword::Title => Some(Self::Title {
                value: Some(values.pop()?),
            }),
        }
    }
}

/// Parses a typed date value into a UTC instant.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight UTC.
fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc())
}
