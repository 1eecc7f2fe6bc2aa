//! Declarative response shapes and JSON field extraction.
//!
//! A [`ResponseShape`] declares the field names and semantic types a caller
//! expects from an endpoint. The unwrapper validates a decoded body against
//! the shape and produces a value holding exactly the declared fields, or a
//! [`ShapeViolation`] naming the offending field.

use serde_json::{Map, Value};
use thiserror::Error;

/// Semantic type expected for a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// A JSON integer.
    Integer,
    /// A JSON array.
    List,
    /// A JSON object.
    Map,
}

impl FieldType {
    /// Human-readable type name for violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Map => "map",
        }
    }

    /// GitHub serves `null` for unset fields (profile name, email, ...), so
    /// type checks apply only to non-null values.
    fn matches(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::List => value.is_array(),
            Self::Map => value.is_object(),
        }
    }
}

/// One declared field: a name and its expected type.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Field name as it appears in the response body.
    pub name: &'static str,
    /// Expected semantic type.
    pub ty: FieldType,
}

impl Field {
    /// Creates a field declaration; usable in `const` tables.
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Declarative shape of a response body. Defined once per endpoint, never
/// mutated at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ResponseShape {
    /// A single JSON object with the declared fields.
    Object(&'static [Field]),
    /// A JSON array of objects, each with the declared fields.
    List(&'static [Field]),
}

/// A response body that does not satisfy its declared shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShapeViolation {
    /// The body (or a list element) is not a JSON object.
    #[error("expected a JSON object, got {found}")]
    NotAnObject {
        /// JSON type actually found.
        found: &'static str,
    },

    /// The body is not a JSON array.
    #[error("expected a JSON list, got {found}")]
    NotAList {
        /// JSON type actually found.
        found: &'static str,
    },

    /// A declared field is absent from the body.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A declared field holds a value of the wrong type.
    #[error("field `{name}` is not a {expected}")]
    WrongType {
        /// Name of the offending field.
        name: &'static str,
        /// Declared type that was not met.
        expected: &'static str,
    },
}

impl ResponseShape {
    /// Validates `body` against the shape and extracts exactly the declared
    /// fields, in declaration order. Values are returned unchanged.
    pub fn extract(&self, body: &Value) -> Result<Value, ShapeViolation> {
        match self {
            Self::Object(fields) => extract_object(fields, body),
            Self::List(fields) => {
                let items = body.as_array().ok_or(ShapeViolation::NotAList {
                    found: json_type(body),
                })?;
                let extracted = items
                    .iter()
                    .map(|item| extract_object(fields, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(extracted))
            }
        }
    }
}

fn extract_object(fields: &[Field], value: &Value) -> Result<Value, ShapeViolation> {
    let object = value.as_object().ok_or(ShapeViolation::NotAnObject {
        found: json_type(value),
    })?;

    let mut out = Map::with_capacity(fields.len());
    for field in fields {
        let value = object
            .get(field.name)
            .ok_or(ShapeViolation::MissingField(field.name))?;
        if !field.ty.matches(value) {
            return Err(ShapeViolation::WrongType {
                name: field.name,
                expected: field.ty.name(),
            });
        }
        out.insert(field.name.to_string(), value.clone());
    }
    Ok(Value::Object(out))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const PROFILE: &[Field] = &[
        Field::new("login", FieldType::String),
        Field::new("public_repos", FieldType::Integer),
    ];

    #[test]
    fn extracts_exactly_the_declared_fields() {
        let shape = ResponseShape::Object(PROFILE);
        let body = json!({
            "login": "octo",
            "public_repos": 8,
            "id": 1,
            "node_id": "MDEyOk9yZ2FuaXphdGlvbjE="
        });

        let value = shape.extract(&body).unwrap();
        assert_eq!(value, json!({"login": "octo", "public_repos": 8}));
    }

    #[test]
    fn null_satisfies_any_declared_type() {
        let shape = ResponseShape::Object(PROFILE);
        let body = json!({"login": null, "public_repos": 8});

        let value = shape.extract(&body).unwrap();
        assert_eq!(value, json!({"login": null, "public_repos": 8}));
    }

    #[test]
    fn wrong_type_names_the_field() {
        let shape = ResponseShape::Object(PROFILE);
        let body = json!({"login": "octo", "public_repos": "many"});

        let violation = shape.extract(&body).unwrap_err();
        assert_eq!(
            violation,
            ShapeViolation::WrongType {
                name: "public_repos",
                expected: "integer"
            }
        );
        assert!(violation.to_string().contains("public_repos"));
    }

    #[test]
    fn missing_field_is_a_violation() {
        let shape = ResponseShape::Object(PROFILE);
        let body = json!({"login": "octo"});

        assert_eq!(
            shape.extract(&body).unwrap_err(),
            ShapeViolation::MissingField("public_repos")
        );
    }

    #[test]
    fn list_shape_extracts_each_element() {
        let shape = ResponseShape::List(PROFILE);
        let body = json!([
            {"login": "a", "public_repos": 1, "extra": true},
            {"login": "b", "public_repos": 2}
        ]);

        let value = shape.extract(&body).unwrap();
        assert_eq!(
            value,
            json!([
                {"login": "a", "public_repos": 1},
                {"login": "b", "public_repos": 2}
            ])
        );
    }

    #[test]
    fn list_shape_rejects_non_lists() {
        let shape = ResponseShape::List(PROFILE);
        assert_eq!(
            shape.extract(&json!({"login": "a"})).unwrap_err(),
            ShapeViolation::NotAList { found: "object" }
        );
    }

    #[test]
    fn object_shape_rejects_scalars() {
        let shape = ResponseShape::Object(PROFILE);
        assert_eq!(
            shape.extract(&json!(42)).unwrap_err(),
            ShapeViolation::NotAnObject { found: "number" }
        );
    }
}
