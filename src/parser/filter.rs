use log::trace;

use super::{ParseError, body_lines};
use crate::ast::{FilterCondition, FilterGroup, Joiner, Operand};
use crate::lexer::special_split_line;

/// Parse the body of a `where`-style section, one condition per line:
///
/// ```text
/// name = 'john'
/// and age > 18
/// and status in active pending
/// ```
pub fn parse_where_sub_stmt(body: &str) -> Result<FilterGroup, ParseError> {
    let mut conditions: Vec<FilterCondition> = Vec::new();
    let mut group_joiner: Option<Joiner> = None;

    for line in body_lines(body) {
        trace!("condition line: {:?}", line);
        let words = special_split_line(line)?;

        let (joiner, rest) = if conditions.is_empty() {
            if words.len() < 2 {
                return Err(ParseError::TooFewWords {
                    line: line.to_string(),
                    expected: 2,
                });
            }
            (None, &words[..])
        } else {
            if words.len() < 3 {
                return Err(ParseError::TooFewWords {
                    line: line.to_string(),
                    expected: 3,
                });
            }
            let joiner = Joiner::from_str(&words[0])
                .ok_or_else(|| ParseError::InvalidJoiner(words[0].clone()))?;
            match group_joiner {
                Some(existing) if existing != joiner => {
                    return Err(ParseError::MixedJoiners(line.to_string()));
                }
                _ => group_joiner = Some(joiner),
            }
            (Some(joiner), &words[1..])
        };

        conditions.push(build_condition(joiner, rest));
    }

    Ok(FilterGroup { conditions })
}

/// `rest` holds `field relation [operand...]`, at least two words.
fn build_condition(joiner: Option<Joiner>, rest: &[String]) -> FilterCondition {
    let field_name = rest[0].clone();
    let relation = rest[1].clone();
    let operand = if relation == "in" {
        Operand::Values(rest[2..].to_vec())
    } else {
        Operand::Value(rest.get(2).cloned().unwrap_or_default())
    };

    FilterCondition {
        joiner,
        field_name,
        relation,
        operand,
    }
}
