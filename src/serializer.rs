//! Serializer for converting a parsed table back into a structure statement.

use std::fmt;

use crate::ast::{Field, ForeignKey, Table};
use crate::parser::{ParseError, parse_table_structure};

/// Format a Table as a canonical structure statement.
///
/// Two statements describe the same structure exactly when their canonical
/// forms are equal.
pub fn format_table(table: &Table) -> String {
    let mut output = String::new();

    output.push_str(&format!("table: {}\n", table.name));

    output.push_str("fields:\n");
    for field in &table.fields {
        serialize_field(&mut output, field);
    }
    output.push_str("::\n");

    if !table.foreign_keys.is_empty() {
        output.push_str("foreign_keys:\n");
        for fk in &table.foreign_keys {
            serialize_foreign_key(&mut output, fk);
        }
        output.push_str("::\n");
    }

    output
}

fn serialize_field(output: &mut String, field: &Field) {
    output.push_str(&format!("  {} {}", field.name, field.field_type.as_str()));

    // Flags always go in this order
    if field.required {
        output.push_str(" required");
    }
    if field.unique {
        output.push_str(" unique");
    }
    if field.not_indexed {
        output.push_str(" nindex");
    }

    output.push('\n');
}

fn serialize_foreign_key(output: &mut String, fk: &ForeignKey) {
    output.push_str(&format!(
        "  {} {} {}\n",
        fk.field_name, fk.pointed_table, fk.on_delete
    ));
}

/// Parse a structure statement and format it back.
pub fn canonicalize(stmt: &str) -> Result<String, ParseError> {
    parse_table_structure(stmt).map(|table| format_table(&table))
}

/// Whether `table` differs from the structure described by `stored_stmt`.
///
/// The stored statement is canonicalized first, so layout differences such as
/// indentation or modifier order don't count as changes.
pub fn structure_changed(stored_stmt: &str, table: &Table) -> Result<bool, ParseError> {
    Ok(canonicalize(stored_stmt)? != format_table(table))
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_table(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FieldType;

    fn users_table() -> Table {
        Table {
            name: "users".to_string(),
            fields: vec![
                Field {
                    name: "name".to_string(),
                    field_type: FieldType::String,
                    required: true,
                    unique: false,
                    not_indexed: false,
                },
                Field::new("age", FieldType::Int),
            ],
            foreign_keys: vec![],
        }
    }

    #[test]
    fn test_format_simple_table() {
        let result = format_table(&users_table());
        assert_eq!(
            result,
            "table: users\nfields:\n  name string required\n  age int\n::\n"
        );
    }

    #[test]
    fn test_format_flags_in_fixed_order() {
        let mut table = users_table();
        table.fields[1].not_indexed = true;
        table.fields[1].unique = true;
        table.fields[1].required = true;

        let result = format_table(&table);
        assert!(result.contains("  age int required unique nindex\n"));
    }

    #[test]
    fn test_format_with_foreign_keys() {
        let mut table = users_table();
        table.fields.push(Field::new("team", FieldType::Int));
        table.foreign_keys.push(ForeignKey {
            field_name: "team".to_string(),
            pointed_table: "teams".to_string(),
            on_delete: "on_delete_empty".to_string(),
        });

        let result = format_table(&table);
        assert!(result.ends_with("::\nforeign_keys:\n  team teams on_delete_empty\n::\n"));
    }

    #[test]
    fn test_round_trip() {
        let mut table = users_table();
        table.fields.push(Field {
            name: "bio".to_string(),
            field_type: FieldType::Text,
            required: false,
            unique: true,
            not_indexed: true,
        });
        table.fields.push(Field::new("team", FieldType::Int));
        table.foreign_keys.push(ForeignKey {
            field_name: "team".to_string(),
            pointed_table: "teams".to_string(),
            on_delete: "on_delete_delete".to_string(),
        });

        let reparsed = parse_table_structure(&format_table(&table)).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_round_trip_without_fields() {
        let table = Table {
            name: "empty".to_string(),
            fields: vec![],
            foreign_keys: vec![],
        };
        assert_eq!(parse_table_structure(&format_table(&table)).unwrap(), table);
    }

    #[test]
    fn test_display_matches_format() {
        let table = users_table();
        assert_eq!(table.to_string(), format_table(&table));
    }

    #[test]
    fn test_structure_changed() {
        let stored = "
            table: users
            fields:
                name   string   required
                age int   shiny
            ::
        ";
        assert!(!structure_changed(stored, &users_table()).unwrap());

        let mut table = users_table();
        table.fields.swap(0, 1);
        assert!(structure_changed(stored, &table).unwrap());

        let mut table = users_table();
        table.fields[1].unique = true;
        assert!(structure_changed(stored, &table).unwrap());
    }

    #[test]
    fn test_canonicalize_rejects_bad_statement() {
        assert!(canonicalize("fields:\n a int\n::").is_err());
    }
}
