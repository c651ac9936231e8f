use log::{debug, trace};

use super::{ParseError, Section, body_lines, find_section, validate_name};
use crate::ast::{Field, FieldType, ForeignKey, RESERVED_FIELD_NAMES, Table};
use crate::lexer::plain_split;

const TABLE_PREFIX: &str = "table:";
const FIELDS_MARKER: &str = "fields:";
const FOREIGN_KEYS_MARKER: &str = "foreign_keys:";

/// Parse a structure statement:
///
/// ```text
/// table: users
/// fields:
///   name string required
///   age int
/// ::
/// foreign_keys:
///   group_id groups on_delete_delete
/// ::
/// ```
pub fn parse_table_structure(stmt: &str) -> Result<Table, ParseError> {
    let stmt = stmt.trim();
    let Some(rest) = stmt.strip_prefix(TABLE_PREFIX) else {
        return Err(ParseError::MalformedStatement(TABLE_PREFIX));
    };

    let first_line = rest.lines().next().unwrap_or_default();
    let name = validate_name(first_line.trim())?.to_string();

    let fields = match find_section(stmt, FIELDS_MARKER) {
        Section::Body(body) => parse_fields(body)?,
        Section::Absent => return Err(ParseError::MissingSection(FIELDS_MARKER)),
        Section::Unterminated => {
            return Err(ParseError::UnterminatedSection(FIELDS_MARKER.into()));
        }
    };

    let foreign_keys = match find_section(stmt, FOREIGN_KEYS_MARKER) {
        Section::Body(body) => parse_foreign_keys(body)?,
        Section::Absent => Vec::new(),
        Section::Unterminated => {
            return Err(ParseError::UnterminatedSection(FOREIGN_KEYS_MARKER.into()));
        }
    };

    Ok(Table {
        name,
        fields,
        foreign_keys,
    })
}

fn parse_fields(body: &str) -> Result<Vec<Field>, ParseError> {
    body_lines(body).map(parse_field).collect()
}

fn parse_field(line: &str) -> Result<Field, ParseError> {
    trace!("field line: {:?}", line);
    let words = plain_split(line);
    if words.len() < 2 {
        return Err(ParseError::TooFewWords {
            line: line.to_string(),
            expected: 2,
        });
    }

    let name = &words[0];
    if RESERVED_FIELD_NAMES.contains(&name.as_str()) {
        return Err(ParseError::ReservedName(name.clone()));
    }
    validate_name(name)?;

    let field_type =
        FieldType::from_str(&words[1]).ok_or_else(|| ParseError::InvalidType(words[1].clone()))?;

    let mut field = Field::new(name.as_str(), field_type);
    for modifier in &words[2..] {
        match modifier.as_str() {
            "required" => field.required = true,
            "unique" => field.unique = true,
            "nindex" => field.not_indexed = true,
            // Unknown modifiers are accepted so older parsers read newer statements.
            other => debug!("ignoring unknown modifier {:?} on field {:?}", other, name),
        }
    }

    Ok(field)
}

fn parse_foreign_keys(body: &str) -> Result<Vec<ForeignKey>, ParseError> {
    body_lines(body)
        .map(|line| {
            let words = plain_split(line);
            match <[String; 3]>::try_from(words) {
                Ok([field_name, pointed_table, on_delete]) => Ok(ForeignKey {
                    field_name,
                    pointed_table,
                    on_delete,
                }),
                Err(_) => Err(ParseError::TooManyOrFewWords {
                    line: line.to_string(),
                    expected: 3,
                }),
            }
        })
        .collect()
}
