//! Rendering for scan results.

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use sift_query::{
    DateField, NameSource, Operator, ParseResult, Suggestion, Token, UserField, ValueKind,
};

/// Prints a parse result in human-readable form.
pub fn print_result(result: &ParseResult) {
    print_token(result);
    print_suggestions(&result.suggestions, None);
}

/// Prints a parse result with value suggestions resolved against `names`.
pub fn print_resolved(result: &ParseResult, names: &dyn NameSource) {
    print_token(result);
    print_suggestions(&result.suggestions, Some(names));
}

/// Prints the token line.
fn print_token(result: &ParseResult) {
    match &result.token {
        Some(token) => {
            let state = if result.token_is_complete {
                "complete"
            } else {
                "partial"
            };
            println!("token: {} ({state})", describe(token));
        }
        None => println!("token: none"),
    }
}

/// One-line description of a token.
fn describe(token: &Token) -> String {
    match token {
        Token::Space { count, .. } => format!("space ({count} chars)"),
        Token::Tag { operator, values } => describe_list("tag", operator.as_ref(), values),
        Token::Category { operator, values } => describe_list("cat", operator.as_ref(), values),
        Token::CustomField {
            field_name,
            operator,
            value,
        } => {
            let name = field_name.as_deref().unwrap_or("?");
            match (operator, value) {
                (Some(op), Some(value)) => format!("cf {name} {op} {value}"),
                _ => format!("cf {name}"),
            }
        }
        Token::Date {
            field,
            operator,
            value,
        } => {
            let name = date_field_text(*field);
            match (operator, value) {
                (Some(op), Some(value)) => format!("{name} {op} {value}"),
                _ => name.to_string(),
            }
        }
        Token::User { field, value } => {
            let name = user_field_text(*field);
            match value {
                Some(value) => format!("{name} {value}"),
                None => name.to_string(),
            }
        }
        Token::Title { value } => match value {
            Some(value) => format!("title {value:?}"),
            None => "title".to_string(),
        },
        Token::Text { value } => format!("text {value:?}"),
    }
}

/// Formats a multi-valued token description.
fn describe_list(
    kind: &str,
    operator: Option<&Operator>,
    values: &Option<Vec<String>>,
) -> String {
    match (operator, values) {
        (Some(op), Some(values)) => format!("{kind} {op} [{}]", values.join(", ")),
        _ => kind.to_string(),
    }
}

/// Prints the suggestion groups as a table.
fn print_suggestions(suggestions: &[Suggestion], names: Option<&dyn NameSource>) {
    if suggestions.is_empty() {
        println!("suggestions: none");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["group", "items"]);

    for suggestion in suggestions {
        match suggestion {
            Suggestion::Filter { items } => {
                let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
                table.add_row(vec!["filters".to_string(), joined.join(" ")]);
            }
            Suggestion::Operator { items } => {
                let joined: Vec<String> =
                    items.iter().map(|op| op.suggestion_text()).collect();
                table.add_row(vec!["operators".to_string(), joined.join(" ")]);
            }
            Suggestion::Value {
                kind,
                filter,
                exclude,
            } => match names {
                Some(names) => {
                    let candidates = names.resolve(*kind, filter, exclude);
                    table.add_row(vec![
                        format!("values ({})", kind_label(*kind)),
                        candidates.join(" "),
                    ]);
                }
                None => {
                    table.add_row(vec![
                        format!("values ({})", kind_label(*kind)),
                        format!("filter={filter:?} exclude=[{}]", exclude.join(", ")),
                    ]);
                }
            },
        }
    }

    println!("{table}");
}

/// Query-language keyword text for a date field.
fn date_field_text(field: DateField) -> &'static str {
    match field {
        DateField::CreatedAt => "created_at",
        DateField::UpdatedAt => "updated_at",
    }
}

/// Query-language keyword text for a user field.
fn user_field_text(field: UserField) -> &'static str {
    match field {
        UserField::CreatedBy => "created_by",
        UserField::UpdatedBy => "updated_by",
        UserField::Owner => "owner",
    }
}

/// Human label for a value-suggestion kind.
fn kind_label(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Tag => "tags",
        ValueKind::Category => "categories",
        ValueKind::User => "users",
        ValueKind::CustomFieldName => "field names",
    }
}
