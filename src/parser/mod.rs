//! Parsers for structure and search statements.

mod filter;
mod search;
mod table;

pub use filter::parse_where_sub_stmt;
pub use search::parse_search_stmt;
pub use table::parse_table_structure;

use crate::lexer::LexError;

/// Closes a `fields:`, `foreign_keys:` or `whereN:` section.
pub const SECTION_END: &str = "::";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),
    #[error("Invalid name {0:?}: names must not be empty or contain space, tab, newline, '.', ':', '/' or '~'")]
    InvalidName(String),
    #[error("Bad statement: expected it to start with '{0}'")]
    MalformedStatement(&'static str),
    #[error("Bad statement: missing '{0}' section")]
    MissingSection(&'static str),
    #[error("Bad statement: '{0}' section must end with '::'")]
    UnterminatedSection(String),
    #[error("Bad statement: too few words in line {line:?}, expected at least {expected}")]
    TooFewWords { line: String, expected: usize },
    #[error("Bad statement: line {line:?} must have exactly {expected} words")]
    TooManyOrFewWords { line: String, expected: usize },
    #[error("Bad statement: field name {0:?} is created automatically and can't be declared")]
    ReservedName(String),
    #[error("Bad statement: field type {0:?} is not one of int, string, text")]
    InvalidType(String),
    #[error("Bad statement: a where section can't mix 'and' and 'or' (line {0:?})")]
    MixedJoiners(String),
    #[error("Bad statement: invalid number {value:?} for '{directive}'")]
    InvalidNumber {
        directive: &'static str,
        value: String,
    },
    #[error("Bad statement: order_by expects a field and 'asc' or 'desc', got {0:?}")]
    InvalidOrderClause(String),
    #[error("Bad statement: invalid joiner {0:?}, expected 'and' or 'or'")]
    InvalidJoiner(String),
    #[error("Bad statement: a table name is required")]
    MissingTable,
    #[error("Bad statement: missing or unterminated '{0}' section")]
    MissingWhereSection(&'static str),
}

const NAME_FORBIDDEN: [char; 7] = [' ', '\t', '\n', '.', ':', '/', '~'];

/// Checks a table or field name for characters that carry meaning in statements.
pub fn validate_name(name: &str) -> Result<&str, ParseError> {
    if name.is_empty() || name.contains(NAME_FORBIDDEN) {
        return Err(ParseError::InvalidName(name.to_string()));
    }
    Ok(name)
}

/// Where a labeled section was found in a statement.
enum Section<'a> {
    Absent,
    Unterminated,
    Body(&'a str),
}

/// Returns the text between `marker` and the next `::` after it.
fn find_section<'a>(stmt: &'a str, marker: &str) -> Section<'a> {
    let Some(begin) = stmt.find(marker) else {
        return Section::Absent;
    };
    let rest = &stmt[begin + marker.len()..];
    match rest.find(SECTION_END) {
        Some(end) => Section::Body(&rest[..end]),
        None => Section::Unterminated,
    }
}

/// Non-blank lines of a section body, trimmed.
fn body_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().map(str::trim).filter(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("users").unwrap(), "users");
        assert_eq!(validate_name("first_name").unwrap(), "first_name");
        for bad in ["a b", "a\tb", "a\nb", "a.b", "a:b", "a/b", "a~b", ""] {
            assert_eq!(
                validate_name(bad).unwrap_err(),
                ParseError::InvalidName(bad.to_string())
            );
        }
    }

    #[test]
    fn test_find_section() {
        let stmt = "fields:\n a int\n::\nrest";
        assert!(matches!(find_section(stmt, "fields:"), Section::Body("\n a int\n")));
        assert!(matches!(find_section(stmt, "where:"), Section::Absent));
        assert!(matches!(
            find_section("fields:\n a int\n", "fields:"),
            Section::Unterminated
        ));
    }

    #[test]
    fn test_body_lines_skip_blank() {
        let lines: Vec<&str> = body_lines("\n  a int \n\n\t\n b string\n").collect();
        assert_eq!(lines, vec!["a int", "b string"]);
    }
}
