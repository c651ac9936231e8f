//! Checks values against a parsed table before they are sent to the store.

use crate::ast::{Field, FieldType, RESERVED_FIELD_NAMES, Table};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Value {value:?} for int field {field:?} is not an integer")]
    NotAnInteger { field: String, value: String },
    #[error("Value for string field {0:?} contains a newline; use a text field instead")]
    NewlineInString(String),
    #[error("Table {table:?} has no field {field:?}")]
    UnknownField { table: String, field: String },
    #[error("Field {0:?} is set by the store and can't be written")]
    ReservedField(String),
    #[error("Required field {0:?} is missing")]
    MissingRequired(String),
}

pub fn validate_value(field: &Field, value: &str) -> Result<(), ValidationError> {
    match field.field_type {
        FieldType::Int => {
            if value.trim().parse::<i64>().is_err() {
                return Err(ValidationError::NotAnInteger {
                    field: field.name.clone(),
                    value: value.to_string(),
                });
            }
        }
        FieldType::String => {
            if value.contains('\n') {
                return Err(ValidationError::NewlineInString(field.name.clone()));
            }
        }
        FieldType::Text => {}
    }
    Ok(())
}

/// Validate one row of `(field name, value)` pairs against `table`.
pub fn validate_row<K, V>(table: &Table, row: &[(K, V)]) -> Result<(), ValidationError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (name, value) in row {
        let name = name.as_ref();
        if RESERVED_FIELD_NAMES.contains(&name) {
            return Err(ValidationError::ReservedField(name.to_string()));
        }
        let field = table.field(name).ok_or_else(|| ValidationError::UnknownField {
            table: table.name.clone(),
            field: name.to_string(),
        })?;
        validate_value(field, value.as_ref())?;
    }

    for field in table.fields.iter().filter(|f| f.required) {
        if !row.iter().any(|(name, _)| name.as_ref() == field.name) {
            return Err(ValidationError::MissingRequired(field.name.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table_structure;

    fn table() -> Table {
        parse_table_structure(
            "table: people\nfields:\n  name string required\n  age int\n  bio text\n::",
        )
        .unwrap()
    }

    #[test]
    fn test_int_values() {
        let t = table();
        let age = t.field("age").unwrap();
        assert!(validate_value(age, "42").is_ok());
        assert!(validate_value(age, "-7").is_ok());
        assert_eq!(
            validate_value(age, "forty"),
            Err(ValidationError::NotAnInteger {
                field: "age".into(),
                value: "forty".into()
            })
        );
    }

    #[test]
    fn test_newlines() {
        let t = table();
        assert_eq!(
            validate_value(t.field("name").unwrap(), "a\nb"),
            Err(ValidationError::NewlineInString("name".into()))
        );
        assert!(validate_value(t.field("bio").unwrap(), "line one\nline two").is_ok());
    }

    #[test]
    fn test_valid_row() {
        let row = [("name", "Ada"), ("age", "36")];
        assert!(validate_row(&table(), &row).is_ok());
    }

    #[test]
    fn test_row_errors() {
        let t = table();
        assert_eq!(
            validate_row(&t, &[("age", "3")]),
            Err(ValidationError::MissingRequired("name".into()))
        );
        assert_eq!(
            validate_row(&t, &[("name", "x"), ("email", "x@y")]),
            Err(ValidationError::UnknownField {
                table: "people".into(),
                field: "email".into()
            })
        );
        assert_eq!(
            validate_row(&t, &[("id", "1"), ("name", "x")]),
            Err(ValidationError::ReservedField("id".into()))
        );
        let owned = vec![("name".to_string(), "x".to_string()), ("age".to_string(), "x".to_string())];
        assert!(matches!(
            validate_row(&t, &owned),
            Err(ValidationError::NotAnInteger { .. })
        ));
    }
}
