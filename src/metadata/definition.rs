//! Declarative schema validation for metadata blobs.
//!
//! A [`Definition`] describes the shape one metadata type accepts. Values
//! are validated in place: an invalid optional field is removed so it reads
//! back as absent, while an invalid required field rejects the whole blob.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("expected {expected}")]
    TypeMismatch { expected: &'static str },
    #[error("number {value} outside {min:?}..={max:?}")]
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    #[error("missing required field {0}")]
    MissingField(&'static str),
}

pub enum Definition {
    Boolean,
    Number { min: Option<f64>, max: Option<f64> },
    String,
    Object(Vec<FieldDefinition>),
}

pub struct FieldDefinition {
    pub name: &'static str,
    pub definition: Definition,
    pub optional: bool,
}

impl Definition {
    pub fn number_range(min: f64, max: f64) -> Definition {
        Definition::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn field(name: &'static str, definition: Definition) -> FieldDefinition {
        FieldDefinition {
            name,
            definition,
            optional: false,
        }
    }

    pub fn optional_field(name: &'static str, definition: Definition) -> FieldDefinition {
        FieldDefinition {
            name,
            definition,
            optional: true,
        }
    }
}

/// Validate a JSON value against a definition, pruning invalid optional
/// fields.
pub fn validate(value: &mut Value, definition: &Definition) -> Result<(), ValidationError> {
    match definition {
        Definition::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(ValidationError::TypeMismatch { expected: "boolean" })
            }
        }
        Definition::Number { min, max } => {
            let Some(number) = value.as_f64() else {
                return Err(ValidationError::TypeMismatch { expected: "number" });
            };
            if min.is_some_and(|m| number < m) || max.is_some_and(|m| number > m) {
                return Err(ValidationError::OutOfRange {
                    value: number,
                    min: *min,
                    max: *max,
                });
            }
            Ok(())
        }
        Definition::String => {
            if value.is_string() {
                Ok(())
            } else {
                Err(ValidationError::TypeMismatch { expected: "string" })
            }
        }
        Definition::Object(fields) => {
            let Some(map) = value.as_object_mut() else {
                return Err(ValidationError::TypeMismatch { expected: "object" });
            };
            for field in fields {
                match map.get_mut(field.name) {
                    Some(entry) => {
                        if let Err(error) = validate(entry, &field.definition) {
                            if field.optional {
                                map.remove(field.name);
                            } else {
                                return Err(error);
                            }
                        }
                    }
                    None => {
                        if !field.optional {
                            return Err(ValidationError::MissingField(field.name));
                        }
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_range() {
        let def = Definition::number_range(1.0, 5.0);
        assert!(validate(&mut json!(3), &def).is_ok());
        assert!(validate(&mut json!(6), &def).is_err());
        assert!(validate(&mut json!("3"), &def).is_err());
    }

    #[test]
    fn test_invalid_optional_field_is_pruned() {
        let def = Definition::Object(vec![Definition::optional_field(
            "style",
            Definition::number_range(1.0, 14.0),
        )]);
        let mut value = json!({"style": 99, "other": true});
        assert!(validate(&mut value, &def).is_ok());
        assert!(value.get("style").is_none());
        // Unknown fields pass through untouched.
        assert_eq!(value.get("other"), Some(&json!(true)));
    }

    #[test]
    fn test_invalid_required_field_rejects_blob() {
        let def = Definition::Object(vec![Definition::field("flag", Definition::Boolean)]);
        assert!(validate(&mut json!({"flag": "yes"}), &def).is_err());
        assert!(validate(&mut json!({}), &def).is_err());
        assert!(validate(&mut json!({"flag": false}), &def).is_ok());
    }
}
