//! Segment parsing and suggestion dispatch.
//!
//! Recognizes which grammar applies to the active segment (bare prefix vs.
//! `keyword:...`) and produces a partial or complete token plus the
//! suggestion groups for the current position. Every keyword sub-grammar is
//! the same three-phase shape - awaiting operator, typing a value, complete -
//! driven by the registry tables in [`crate::keyword`], so the parser has no
//! per-keyword code path.
//!
//! The parser is advisory, not a validating compiler: malformed input
//! (unterminated quotes, unknown keywords, empty value lists at completion)
//! degrades to "no token, no suggestions" and never fails.

use serde::{Deserialize, Serialize};

use crate::{
    keyword::{FilterKeyword, Operator, ValueArity, match_operator},
    suggest::{Suggestion, ValueKind},
    token::Token,
    values,
};

/// The result of scanning the active segment.
///
/// Created fresh on every keystroke; no parser state survives between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// The parsed token, if the segment reached a recognizable state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Token>,
    /// True when the token's segment is closed and its fields are resolved.
    pub token_is_complete: bool,
    /// True when at least one suggestion group is present.
    pub has_suggestions: bool,
    /// Suggestion groups for the dropdown, in display order.
    pub suggestions: Vec<Suggestion>,
}

impl ParseResult {
    /// Builds a result, deriving `has_suggestions` from the group list.
    fn with(token: Option<Token>, token_is_complete: bool, suggestions: Vec<Suggestion>) -> Self {
        Self {
            token,
            token_is_complete,
            has_suggestions: !suggestions.is_empty(),
            suggestions,
        }
    }

    /// The degraded result for malformed input: no token, no suggestions.
    fn empty() -> Self {
        Self::with(None, false, Vec::new())
    }
}

/// The suggestion list shown when no segment is being typed: every keyword.
fn keyword_list() -> Vec<Suggestion> {
    vec![Suggestion::Filter {
        items: FilterKeyword::ALL.to_vec(),
    }]
}

/// Parses one active segment.
///
/// `is_complete` is supplied by the caller rather than re-derived from the
/// text: the same literal segment can be "still being typed" or "finished"
/// depending on context the text alone cannot carry (trailing delimiter,
/// blur, forced completion).
pub fn parse_segment(segment: &str, is_complete: bool) -> ParseResult {
    // Whitespace-only segments are terminal and always complete.
    if segment.chars().all(char::is_whitespace) {
        let token = Token::Space {
            count: segment.chars().count(),
            raw: segment.to_string(),
        };
        return ParseResult::with(Some(token), true, keyword_list());
    }

    let Some(colon) = segment.find(':') else {
        return parse_bare(segment, is_complete);
    };

    let Some(keyword) = FilterKeyword::lookup(&segment[..colon]) else {
        // Unrecognized keyword: surfaced by the absence of suggestions.
        return ParseResult::empty();
    };

    parse_keyword_segment(keyword, &segment[colon + 1..], is_complete)
}

/// Parses a segment with no `:` yet: a keyword prefix being typed, or free
/// text once the segment closes.
fn parse_bare(segment: &str, is_complete: bool) -> ParseResult {
    if is_complete {
        let Some(value) = values::scan_value(segment) else {
            return ParseResult::empty();
        };
        return ParseResult::with(Some(Token::Text { value }), true, keyword_list());
    }

    let items = FilterKeyword::matching(segment);
    ParseResult::with(None, false, vec![Suggestion::Filter { items }])
}

/// Parses the text after a recognized `keyword:`.
fn parse_keyword_segment(keyword: FilterKeyword, rest: &str, is_complete: bool) -> ParseResult {
    let mut rest = rest;

    // Field-name slot (`cf:price:...`): locked by its trailing colon.
    let mut field_name = None;
    if keyword.takes_field_name() {
        match rest.find(':') {
            Some(0) => return ParseResult::empty(),
            Some(colon) => {
                field_name = Some(rest[..colon].to_string());
                rest = &rest[colon + 1..];
            }
            None => return typing_field_name(keyword, rest, is_complete),
        }
    }

    let mut operator = None;
    if let Some((op, tail)) = match_operator(keyword.operators(), rest) {
        operator = Some(op);
        rest = tail;
    }

    if is_complete {
        finalize(keyword, field_name, operator, rest)
    } else {
        in_progress(keyword, field_name, operator.is_some(), rest)
    }
}

/// The field-name slot is still being typed (no colon after it yet).
fn typing_field_name(keyword: FilterKeyword, rest: &str, is_complete: bool) -> ParseResult {
    if is_complete {
        // A custom-field segment with no value is malformed.
        return ParseResult::empty();
    }

    let suggestions = vec![Suggestion::Value {
        kind: ValueKind::CustomFieldName,
        filter: rest.to_string(),
        exclude: Vec::new(),
    }];
    ParseResult::with(Some(Token::partial(keyword, None)), false, suggestions)
}

/// Emits the partial token and suggestion groups for a segment still being
/// typed, after any field name and explicit operator have been consumed.
fn in_progress(
    keyword: FilterKeyword,
    field_name: Option<String>,
    has_operator: bool,
    rest: &str,
) -> ParseResult {
    let (typed, fragment) = match keyword.arity() {
        ValueArity::Multi => values::split_last_comma(rest),
        ValueArity::Single => ("", rest),
    };

    let mut suggestions = Vec::new();

    // The operator window is open only until any value text is typed.
    if !keyword.operators().is_empty() {
        let items = if !has_operator && rest.is_empty() {
            keyword.operators().to_vec()
        } else {
            Vec::new()
        };
        suggestions.push(Suggestion::Operator { items });
    }

    if let Some(kind) = keyword.value_source() {
        let exclude = match values::split_values(typed) {
            Some(excluded) => excluded,
            None => return ParseResult::empty(),
        };
        suggestions.push(Suggestion::Value {
            kind,
            filter: values::fragment_filter(fragment),
            exclude,
        });
    }

    let token = Token::partial(keyword, field_name);
    ParseResult::with(Some(token), false, suggestions)
}

/// Finalizes a closed keyword segment: resolves the value list and emits the
/// filled token, with suggestions collapsing back to the full keyword list.
fn finalize(
    keyword: FilterKeyword,
    field_name: Option<String>,
    operator: Option<Operator>,
    rest: &str,
) -> ParseResult {
    let values = match keyword.arity() {
        ValueArity::Multi => values::split_values(rest),
        ValueArity::Single => values::scan_value(rest).map(|value| vec![value]),
    };

    let values = match values {
        Some(values) if !values.is_empty() && values.iter().all(|value| !value.is_empty()) => {
            values
        }
        _ => return ParseResult::empty(),
    };

    match Token::complete(keyword, field_name, operator, values) {
        Some(token) => ParseResult::with(Some(token), true, keyword_list()),
        None => ParseResult::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Operator;

    /// Shorthand for the full keyword suggestion list.
    fn all_keywords() -> Suggestion {
        Suggestion::Filter {
            items: FilterKeyword::ALL.to_vec(),
        }
    }

    #[test]
    fn empty_segment_is_a_space_token() {
        let result = parse_segment("", false);
        assert_eq!(
            result.token,
            Some(Token::Space {
                count: 0,
                raw: String::new()
            })
        );
        assert!(result.token_is_complete);
        assert!(result.has_suggestions);
        assert_eq!(result.suggestions, vec![all_keywords()]);
    }

    #[test]
    fn whitespace_segment_counts_characters() {
        let result = parse_segment("   ", true);
        assert_eq!(
            result.token,
            Some(Token::Space {
                count: 3,
                raw: "   ".into()
            })
        );
        assert!(result.token_is_complete);
    }

    #[test]
    fn bare_prefix_suggests_matching_keywords() {
        let result = parse_segment("t", false);
        assert_eq!(result.token, None);
        assert!(!result.token_is_complete);
        assert_eq!(result.suggestions, vec![Suggestion::Filter {
            items: vec![FilterKeyword::Tag, FilterKeyword::Title]
        }]);
    }

    #[test]
    fn bare_prefix_matching_is_case_insensitive() {
        let result = parse_segment("T", false);
        assert_eq!(result.suggestions, vec![Suggestion::Filter {
            items: vec![FilterKeyword::Tag, FilterKeyword::Title]
        }]);
    }

    #[test]
    fn completed_bare_segment_is_free_text() {
        let result = parse_segment("hello", true);
        assert_eq!(
            result.token,
            Some(Token::Text {
                value: "hello".into()
            })
        );
        assert!(result.token_is_complete);
        assert_eq!(result.suggestions, vec![all_keywords()]);
    }

    #[test]
    fn completed_quoted_bare_segment_unquotes() {
        let result = parse_segment("\"blue sky\"", true);
        assert_eq!(
            result.token,
            Some(Token::Text {
                value: "blue sky".into()
            })
        );
    }

    #[test]
    fn bare_keyword_opens_operator_and_value_windows() {
        let result = parse_segment("tag:", false);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: None,
                values: None
            })
        );
        assert!(!result.token_is_complete);
        assert_eq!(result.suggestions, vec![
            Suggestion::Operator {
                items: vec![Operator::All, Operator::Any, Operator::Not]
            },
            Suggestion::Value {
                kind: ValueKind::Tag,
                filter: String::new(),
                exclude: Vec::new()
            },
        ]);
    }

    #[test]
    fn value_text_closes_the_operator_window() {
        let result = parse_segment("tag:inv", false);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: None,
                values: None
            })
        );
        assert_eq!(result.suggestions, vec![
            Suggestion::Operator { items: Vec::new() },
            Suggestion::Value {
                kind: ValueKind::Tag,
                filter: "inv".into(),
                exclude: Vec::new()
            },
        ]);
    }

    #[test]
    fn explicit_operator_also_closes_the_window() {
        let result = parse_segment("tag:any:", false);
        assert_eq!(result.suggestions, vec![
            Suggestion::Operator { items: Vec::new() },
            Suggestion::Value {
                kind: ValueKind::Tag,
                filter: String::new(),
                exclude: Vec::new()
            },
        ]);
    }

    #[test]
    fn trailing_comma_prompts_for_the_next_value() {
        let result = parse_segment("tag:invoice,", false);
        assert!(!result.token_is_complete);
        assert_eq!(result.suggestions, vec![
            Suggestion::Operator { items: Vec::new() },
            Suggestion::Value {
                kind: ValueKind::Tag,
                filter: String::new(),
                exclude: vec!["invoice".into()]
            },
        ]);
    }

    #[test]
    fn exclusions_never_include_the_fragment() {
        let result = parse_segment("tag:invoice,arch", false);
        assert_eq!(result.suggestions[1], Suggestion::Value {
            kind: ValueKind::Tag,
            filter: "arch".into(),
            exclude: vec!["invoice".into()]
        });
    }

    #[test]
    fn quoted_fragment_filter_drops_the_quote() {
        let result = parse_segment("tag:\"blue sk", false);
        assert_eq!(result.suggestions[1], Suggestion::Value {
            kind: ValueKind::Tag,
            filter: "blue sk".into(),
            exclude: Vec::new()
        });
    }

    #[test]
    fn completion_resolves_operator_and_values_atomically() {
        let result = parse_segment("tag:inv", true);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: Some(Operator::All),
                values: Some(vec!["inv".into()])
            })
        );
        assert!(result.token_is_complete);
        assert_eq!(result.suggestions, vec![all_keywords()]);
    }

    #[test]
    fn completion_splits_the_whole_value_list() {
        let result = parse_segment("tag:invoice,archived", true);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: Some(Operator::All),
                values: Some(vec!["invoice".into(), "archived".into()])
            })
        );
    }

    #[test]
    fn quoted_value_with_space_stays_one_value() {
        let result = parse_segment("tag:\"blue sky\"", true);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: Some(Operator::All),
                values: Some(vec!["blue sky".into()])
            })
        );
    }

    #[test]
    fn explicit_operator_survives_completion() {
        let result = parse_segment("tag:not:stale,old", true);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: Some(Operator::Not),
                values: Some(vec!["stale".into(), "old".into()])
            })
        );
    }

    #[test]
    fn category_segment_uses_its_own_operator_set() {
        let result = parse_segment("cat:", false);
        assert_eq!(result.suggestions[0], Suggestion::Operator {
            items: vec![Operator::Any, Operator::Not]
        });

        let result = parse_segment("cat:reports", true);
        assert_eq!(
            result.token,
            Some(Token::Category {
                operator: Some(Operator::Any),
                values: Some(vec!["reports".into()])
            })
        );
    }

    #[test]
    fn custom_field_name_gets_value_suggestions() {
        let result = parse_segment("cf:pri", false);
        assert_eq!(
            result.token,
            Some(Token::CustomField {
                field_name: None,
                operator: None,
                value: None
            })
        );
        assert_eq!(result.suggestions, vec![Suggestion::Value {
            kind: ValueKind::CustomFieldName,
            filter: "pri".into(),
            exclude: Vec::new()
        }]);
    }

    #[test]
    fn locked_field_name_opens_the_operator_window() {
        let result = parse_segment("cf:price:", false);
        assert_eq!(
            result.token,
            Some(Token::CustomField {
                field_name: Some("price".into()),
                operator: None,
                value: None
            })
        );
        assert_eq!(result.suggestions, vec![Suggestion::Operator {
            items: vec![
                Operator::Eq,
                Operator::Ne,
                Operator::Gt,
                Operator::Ge,
                Operator::Lt,
                Operator::Le,
            ]
        }]);
    }

    #[test]
    fn custom_field_completes_with_operator_and_value() {
        let result = parse_segment("cf:price:>=:100", true);
        assert_eq!(
            result.token,
            Some(Token::CustomField {
                field_name: Some("price".into()),
                operator: Some(Operator::Ge),
                value: Some("100".into())
            })
        );
    }

    #[test]
    fn custom_field_without_value_degrades() {
        let result = parse_segment("cf:price", true);
        assert_eq!(result, ParseResult::empty());
        let result = parse_segment("cf::", false);
        assert_eq!(result, ParseResult::empty());
    }

    #[test]
    fn date_segment_offers_comparison_operators() {
        let result = parse_segment("created_at:", false);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0], Suggestion::Operator {
            items: vec![
                Operator::Eq,
                Operator::Ne,
                Operator::Gt,
                Operator::Ge,
                Operator::Lt,
                Operator::Le,
            ]
        });
    }

    #[test]
    fn date_segment_completes_with_an_instant() {
        let result = parse_segment("created_at:>=:2024-01-01", true);
        let Some(Token::Date {
            operator, value, ..
        }) = result.token
        else {
            panic!("expected date token, got {:?}", result.token);
        };
        assert_eq!(operator, Some(Operator::Ge));
        assert_eq!(value.unwrap().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn invalid_date_degrades() {
        assert_eq!(parse_segment("created_at:soon", true), ParseResult::empty());
    }

    #[test]
    fn user_segment_has_no_operator_window() {
        let result = parse_segment("owner:", false);
        assert_eq!(result.suggestions, vec![Suggestion::Value {
            kind: ValueKind::User,
            filter: String::new(),
            exclude: Vec::new()
        }]);

        let result = parse_segment("owner:jd", false);
        assert_eq!(result.suggestions, vec![Suggestion::Value {
            kind: ValueKind::User,
            filter: "jd".into(),
            exclude: Vec::new()
        }]);
    }

    #[test]
    fn user_segment_completes_to_a_single_value() {
        let result = parse_segment("created_by:jdoe", true);
        assert_eq!(
            result.token,
            Some(Token::User {
                field: crate::token::UserField::CreatedBy,
                value: Some("jdoe".into())
            })
        );
    }

    #[test]
    fn title_segment_suggests_nothing_while_typing() {
        let result = parse_segment("title:quart", false);
        assert_eq!(result.token, Some(Token::Title { value: None }));
        assert!(!result.has_suggestions);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn title_segment_completes_with_quoted_text() {
        let result = parse_segment("title:\"quarterly report\"", true);
        assert_eq!(
            result.token,
            Some(Token::Title {
                value: Some("quarterly report".into())
            })
        );
    }

    #[test]
    fn unknown_keyword_yields_nothing() {
        let result = parse_segment("bogus:value", false);
        assert_eq!(result, ParseResult::empty());
        assert!(!result.has_suggestions);

        // Still nothing when the segment closes.
        assert_eq!(parse_segment("bogus:value", true), ParseResult::empty());
    }

    #[test]
    fn keyword_with_empty_value_list_degrades_on_completion() {
        assert_eq!(parse_segment("tag:", true), ParseResult::empty());
        assert_eq!(parse_segment("tag:any:", true), ParseResult::empty());
        assert_eq!(parse_segment("tag:,,", true), ParseResult::empty());
    }

    #[test]
    fn unterminated_quote_degrades_on_completion() {
        assert_eq!(parse_segment("tag:\"blue sk", true), ParseResult::empty());
        assert_eq!(parse_segment("\"blue sk", true), ParseResult::empty());
    }

    #[test]
    fn escaped_comma_stays_in_the_value() {
        let result = parse_segment("tag:a\\,b", true);
        assert_eq!(
            result.token,
            Some(Token::Tag {
                operator: Some(Operator::All),
                values: Some(vec!["a,b".into()])
            })
        );
    }

    #[test]
    fn parse_is_referentially_transparent() {
        for segment in ["", "t", "tag:", "tag:inv", "tag:invoice,", "cf:price:>=:1"] {
            for complete in [false, true] {
                assert_eq!(
                    parse_segment(segment, complete),
                    parse_segment(segment, complete),
                    "parse of {segment:?} (complete={complete}) is not stable"
                );
            }
        }
    }
}
