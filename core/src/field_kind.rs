#![deny(missing_docs)]

//! # Field Kinds
//!
//! Classifies payload fields into the closed set of kinds used for example synthesis,
//! and maps each kind to its placeholder value.

use serde_json::{json, Map, Value};
use std::fmt::Display;
use utoipa::openapi::schema::{Schema, SchemaType, Type};
use utoipa::openapi::RefOr;

/// The declared kind of a payload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A string.
    Text,
    /// An integer.
    Integer,
    /// A floating point number.
    Float,
    /// A boolean.
    Boolean,
    /// A sequence of values. The element kind is not tracked.
    List,
    /// A free-form key/value mapping.
    Mapping,
    /// A nested structured type, by name.
    Nested(String),
    /// Anything not recognized, by name.
    Other(String),
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "number"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::List => write!(f, "array"),
            FieldKind::Mapping => write!(f, "object"),
            FieldKind::Nested(name) | FieldKind::Other(name) => write!(f, "{}", name),
        }
    }
}

impl FieldKind {
    /// Returns the documentation placeholder for a required field of this kind.
    ///
    /// Nested types are never constructed recursively; they get a placeholder string
    /// that will usually fail construction, which skips the example.
    pub fn placeholder(&self) -> Value {
        match self {
            FieldKind::Text => json!("example"),
            FieldKind::Integer => json!(0),
            FieldKind::Float => json!(0.0),
            FieldKind::Boolean => json!(false),
            FieldKind::List => Value::Array(Vec::new()),
            FieldKind::Mapping => Value::Object(Map::new()),
            other => Value::String(format!("example_{}", other)),
        }
    }

    /// Checks whether a JSON value is acceptable for a field of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Float => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::List => value.is_array(),
            FieldKind::Mapping | FieldKind::Nested(_) => value.is_object(),
            FieldKind::Other(_) => true,
        }
    }

    /// Classifies an OpenAPI property schema.
    ///
    /// Nullable forms (`type: [string, null]`, `oneOf: [null, X]`) resolve to the
    /// non-null member.
    pub fn from_schema(schema: &RefOr<Schema>) -> FieldKind {
        match schema {
            RefOr::Ref(r) => FieldKind::Nested(ref_name(&r.ref_location)),
            RefOr::T(Schema::Array(_)) => FieldKind::List,
            RefOr::T(Schema::Object(obj)) => {
                let declared = match &obj.schema_type {
                    SchemaType::Type(t) => Some(t.clone()),
                    SchemaType::Array(types) => types.iter().find(|t| **t != Type::Null).cloned(),
                    SchemaType::AnyValue => None,
                };
                match declared {
                    Some(Type::String) => FieldKind::Text,
                    Some(Type::Integer) => FieldKind::Integer,
                    Some(Type::Number) => FieldKind::Float,
                    Some(Type::Boolean) => FieldKind::Boolean,
                    Some(Type::Array) => FieldKind::List,
                    Some(Type::Object) => {
                        if obj.additional_properties.is_some() || obj.properties.is_empty() {
                            FieldKind::Mapping
                        } else {
                            FieldKind::Nested(
                                obj.title.clone().unwrap_or_else(|| "object".to_string()),
                            )
                        }
                    }
                    _ => FieldKind::Other("value".to_string()),
                }
            }
            RefOr::T(Schema::OneOf(one_of)) => non_null_member(&one_of.items),
            RefOr::T(Schema::AnyOf(any_of)) => non_null_member(&any_of.items),
            RefOr::T(Schema::AllOf(all_of)) if all_of.items.len() == 1 => {
                FieldKind::from_schema(&all_of.items[0])
            }
            _ => FieldKind::Other("value".to_string()),
        }
    }
}

/// Picks the kind of the single non-null alternative, or falls back to `Other`.
fn non_null_member(items: &[RefOr<Schema>]) -> FieldKind {
    let mut candidates = items.iter().filter(|item| !is_null_schema(item));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => FieldKind::from_schema(only),
        _ => FieldKind::Other("value".to_string()),
    }
}

fn is_null_schema(schema: &RefOr<Schema>) -> bool {
    matches!(
        schema,
        RefOr::T(Schema::Object(obj)) if obj.schema_type == SchemaType::Type(Type::Null)
    )
}

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
pub(crate) fn ref_name(ref_loc: &str) -> String {
    ref_loc
        .split('/')
        .next_back()
        .unwrap_or("Unknown")
        .to_string()
}
