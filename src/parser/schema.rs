//! Column shorthand parser using nom.
//!
//! # Syntax Overview
//!
//! ```text
//! email:string(100):unique:default('a@b.c'), user_id:integer:foreign
//! ──┬── ──┬─── ─┬─  ──┬─── ──────┬───────    ─────────────┬─────────
//!   │     │     │     │          │                        │
//!   │     │     │     │          └── Option with value    └── Foreign key shorthand
//!   │     │     │     └── Flag option
//!   │     │     └── Arguments
//!   │     └── Type
//!   └── Name
//! ```

use nom::{
    bytes::complete::{is_not, take_until},
    character::complete::{alpha1, char},
    combinator::rest,
    sequence::{delimited, pair, terminated},
    IResult,
};
use tracing::{debug, trace};

use crate::ast::{Column, ColumnSpec, OptionValue, Options, Schema};
use crate::inflect::pluralize;

/// Parse a comma separated column specification.
///
/// Empty input yields an empty schema. Never fails: tokens that do not fit
/// the grammar are dropped.
///
/// # Example
///
/// ```
/// use schemagen::parser::parse_schema;
///
/// let schema = parse_schema("name:string, amount:decimal(5,2)");
/// assert_eq!(schema.len(), 2);
/// ```
pub fn parse_schema(input: &str) -> Schema {
    let mut schema = Schema::new();

    for field in split_fields(input) {
        let (mut spec, timestamps) = parse_field(field);

        if timestamps {
            schema.push(Column::Timestamps);
            continue;
        }

        match spec.options.remove("foreign") {
            Some(_) => {
                let constraint = foreign_key_for(&spec.name);
                schema.push(Column::Field(spec));
                schema.push(Column::Field(constraint));
            }
            None => schema.push(Column::Field(spec)),
        }
    }

    debug!(columns = schema.len(), "parsed schema");
    schema
}

/// Split on commas that are not inside parentheses.
///
/// Fields are trimmed and blank fields are skipped.
fn split_fields(input: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                fields.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&input[start..]);

    fields
        .into_iter()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Parse `name:type[(args)][:option]*`.
///
/// The flag is set when the field is the bare `:timestamps` marker.
fn parse_field(field: &str) -> (ColumnSpec, bool) {
    let mut segments = field.split(':');
    let name = segments.next().unwrap_or_default().trim();
    let raw_type = segments.next().unwrap_or_default().trim();

    let (column_type, arguments) = match parse_call(raw_type) {
        Ok((_, (ty, args))) => (
            ty,
            args.split(',').map(|a| a.trim().to_string()).collect(),
        ),
        Err(_) => (raw_type, vec![]),
    };

    let options = parse_options(segments);
    trace!(column = name, column_type, ?arguments, "parsed field");

    let timestamps = name.is_empty() && column_type == "timestamps";
    let spec = ColumnSpec {
        name: name.to_string(),
        column_type: column_type.to_string(),
        arguments,
        options,
    };
    (spec, timestamps)
}

/// Parse the type segment `decimal(5,2)` into `("decimal", "5,2")`.
fn parse_call(input: &str) -> IResult<&str, (&str, &str)> {
    pair(
        take_until("("),
        delimited(char('('), is_not(")"), char(')')),
    )(input)
}

/// Parse an option with a value, `default(21)` into `("default", "21")`.
fn parse_valued_option(input: &str) -> IResult<&str, (&str, &str)> {
    terminated(
        pair(alpha1, delimited(char('('), is_not(")"), char(')'))),
        rest,
    )(input)
}

fn parse_options<'a>(tokens: impl Iterator<Item = &'a str>) -> Options {
    let mut options = Options::new();

    for token in tokens.map(str::trim) {
        if token.contains('(') {
            match parse_valued_option(token) {
                Ok((_, (key, value))) => options.insert(key, OptionValue::Literal(value.to_string())),
                Err(_) => trace!(token, "dropping malformed option"),
            }
        } else if !token.is_empty() {
            options.insert(token, OptionValue::Flag);
        }
    }

    options
}

/// Build the `foreign` companion for a `*_id` column.
fn foreign_key_for(column: &str) -> ColumnSpec {
    let stem = column.strip_suffix("_id").unwrap_or(column);
    let table = pluralize(stem);

    ColumnSpec::new(column, "foreign")
        .with_option("references", "'id'")
        .with_option("on", format!("'{}'", table))
}
