use log::{debug, trace};

use super::{
    ParseError, SECTION_END, Section, find_section, parse_where_sub_stmt, validate_name,
};
use crate::ast::{Filter, FilterGroup, Joiner, OrderDirection, SearchStatement};
use crate::lexer::plain_split;

const TABLE_DIRECTIVE: &str = "table:";
const FIELDS_DIRECTIVE: &str = "fields:";
const START_INDEX_DIRECTIVE: &str = "start_index:";
const LIMIT_DIRECTIVE: &str = "limit:";
const ORDER_BY_DIRECTIVE: &str = "order_by:";
const JOINER_DIRECTIVE: &str = "joiner:";

const WHERE_MARKER: &str = "where:";
const REQUIRED_GROUPS: [&str; 2] = ["where1:", "where2:"];
const OPTIONAL_GROUPS: [&str; 2] = ["where3:", "where4:"];

/// Parse a search statement. Directive lines may come in any order:
///
/// ```text
/// table: users expand distinct
/// fields: name age
/// start_index: 10
/// limit: 20
/// order_by: age desc
/// where:
///   age > 18
///   and name = 'john'
/// ::
/// ```
///
/// A `joiner:` directive anywhere switches to multi mode, where `where1:` to
/// `where4:` sections each hold one filter group.
pub fn parse_search_stmt(stmt: &str) -> Result<SearchStatement, ParseError> {
    let stmt = stmt.trim();

    let mut table: Option<String> = None;
    let mut fields = Vec::new();
    let mut expand = false;
    let mut distinct = false;
    let mut start_index = None;
    let mut limit = None;
    let mut order_by = None;
    let mut order_direction = None;

    for line in stmt.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix(TABLE_DIRECTIVE) {
            let words = plain_split(rest);
            let Some((name, flags)) = words.split_first() else {
                return Err(ParseError::MissingTable);
            };
            table = Some(validate_name(name)?.to_string());
            for flag in flags {
                match flag.as_str() {
                    "expand" => expand = true,
                    "distinct" => distinct = true,
                    other => debug!("ignoring unknown table option {:?}", other),
                }
            }
        } else if let Some(rest) = line.strip_prefix(FIELDS_DIRECTIVE) {
            fields = plain_split(rest);
        } else if let Some(rest) = line.strip_prefix(START_INDEX_DIRECTIVE) {
            start_index = Some(parse_number(START_INDEX_DIRECTIVE, rest)?);
        } else if let Some(rest) = line.strip_prefix(LIMIT_DIRECTIVE) {
            limit = Some(parse_number(LIMIT_DIRECTIVE, rest)?);
        } else if let Some(rest) = line.strip_prefix(ORDER_BY_DIRECTIVE) {
            let (field, direction) = parse_order_by(rest)?;
            order_by = Some(field);
            order_direction = Some(direction);
        }
    }

    let table = table.ok_or(ParseError::MissingTable)?;

    let filter = if let Some(pos) = stmt.find(JOINER_DIRECTIVE) {
        let rest = &stmt[pos + JOINER_DIRECTIVE.len()..];
        let value = rest.lines().next().unwrap_or_default().trim();
        let joiner =
            Joiner::from_str(value).ok_or_else(|| ParseError::InvalidJoiner(value.to_string()))?;
        Filter::Multi {
            joiner,
            groups: parse_groups(stmt)?,
        }
    } else if let Some(pos) = stmt.find(WHERE_MARKER) {
        let body = single_where_body(&stmt[pos + WHERE_MARKER.len()..]);
        Filter::Single {
            group: parse_where_sub_stmt(body)?,
        }
    } else {
        Filter::None
    };

    Ok(SearchStatement {
        table,
        fields,
        expand,
        distinct,
        start_index,
        limit,
        order_by,
        order_direction,
        filter,
    })
}

fn parse_number(directive: &'static str, text: &str) -> Result<i64, ParseError> {
    let text = text.trim();
    text.parse().map_err(|_| ParseError::InvalidNumber {
        directive,
        value: text.to_string(),
    })
}

fn parse_order_by(text: &str) -> Result<(String, OrderDirection), ParseError> {
    let invalid = || ParseError::InvalidOrderClause(text.trim().to_string());
    match plain_split(text).as_slice() {
        [field, direction] => {
            let direction = OrderDirection::from_str(direction).ok_or_else(invalid)?;
            Ok((field.clone(), direction))
        }
        _ => Err(invalid()),
    }
}

/// Collects `where1:` .. `where4:`. The first two are mandatory and the
/// optional ones must be contiguous.
fn parse_groups(stmt: &str) -> Result<Vec<FilterGroup>, ParseError> {
    let mut groups = Vec::with_capacity(4);

    for marker in REQUIRED_GROUPS {
        match find_section(stmt, marker) {
            Section::Body(body) => groups.push(parse_where_sub_stmt(body)?),
            Section::Absent | Section::Unterminated => {
                return Err(ParseError::MissingWhereSection(marker));
            }
        }
    }

    let mut previous_absent: Option<&'static str> = None;
    for marker in OPTIONAL_GROUPS {
        match find_section(stmt, marker) {
            Section::Body(body) => {
                if let Some(missing) = previous_absent {
                    return Err(ParseError::MissingWhereSection(missing));
                }
                groups.push(parse_where_sub_stmt(body)?);
            }
            Section::Absent => previous_absent = previous_absent.or(Some(marker)),
            Section::Unterminated => return Err(ParseError::UnterminatedSection(marker.into())),
        }
    }

    trace!("parsed {} filter groups", groups.len());
    Ok(groups)
}

/// The single-mode body runs to the end of the statement, but a `::` line
/// (or a `::` closing the last line) ends it early.
fn single_where_body(after: &str) -> &str {
    let mut end = after.len();
    let mut offset = 0;
    for line in after.split_inclusive('\n') {
        if line.trim() == SECTION_END {
            end = offset;
            break;
        }
        offset += line.len();
    }

    let body = after[..end].trim_end();
    body.strip_suffix(SECTION_END).unwrap_or(body)
}
