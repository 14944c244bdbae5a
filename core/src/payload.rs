#![deny(missing_docs)]

//! # Payload Types
//!
//! Read-only descriptions of the structured types an SSE stream emits.
//!
//! A `PayloadType` exposes exactly what documentation needs:
//! - its canonical name,
//! - its ordered field metadata (name, kind, requiredness),
//! - a constructor taking named field values,
//! - JSON serialization of the constructed instance (through `EventData`).

use crate::error::{AppError, AppResult};
use crate::field_kind::FieldKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use utoipa::openapi::schema::Schema;
use utoipa::openapi::RefOr;

/// An instance that can be rendered as the `data:` of an event.
pub trait EventData: Send + Sync {
    /// Serializes the instance to single-line JSON text.
    fn to_json(&self) -> AppResult<String>;
}

impl<T: Serialize + Send + Sync> EventData for T {
    fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Metadata for a single declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The serialized field name.
    pub name: String,
    /// The declared kind.
    pub kind: FieldKind,
    /// Whether construction fails without this field.
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a required field.
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    /// Creates an optional field.
    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

type Constructor = dyn Fn(Map<String, Value>) -> AppResult<Box<dyn EventData>> + Send + Sync;

/// Description of a payload type plus the ability to build instances of it.
#[derive(Clone)]
pub struct PayloadType {
    name: String,
    fields: Vec<FieldDescriptor>,
    constructor: Arc<Constructor>,
}

impl fmt::Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadType")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builds a field-less `T` (a unit struct) from `null`.
///
/// A unit serializes to `null`; it is emitted as an empty object instead.
fn construct_unit<T>() -> Option<Box<dyn EventData>>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    let instance: T = serde_json::from_value(Value::Null).ok()?;
    match serde_json::to_value(&instance).ok()? {
        Value::Null => Some(Box::new(Value::Object(Map::new()))),
        _ => Some(Box::new(instance)),
    }
}

impl PayloadType {
    /// Describes a Rust type through its `utoipa` schema.
    ///
    /// Construction deserializes the field map into `T`, so construction without
    /// arguments succeeds exactly when every field is optional or has a serde default.
    /// Unit structs construct from an empty map and render as `{}`.
    pub fn of<T>() -> Self
    where
        T: utoipa::ToSchema + Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let fields = match <T as utoipa::PartialSchema>::schema() {
            RefOr::T(schema) => fields_from_schema(&schema),
            RefOr::Ref(_) => Vec::new(),
        };
        Self {
            name: T::name().into_owned(),
            fields,
            constructor: Arc::new(|values: Map<String, Value>| {
                let empty = values.is_empty();
                match serde_json::from_value::<T>(Value::Object(values)) {
                    Ok(instance) => Ok(Box::new(instance) as Box<dyn EventData>),
                    Err(e) if empty => {
                        construct_unit::<T>().ok_or_else(|| AppError::Construction(e.to_string()))
                    }
                    Err(e) => Err(AppError::Construction(e.to_string())),
                }
            }),
        }
    }

    /// Describes a schema-only type from an OpenAPI component.
    ///
    /// Instances are JSON objects validated against the extracted fields.
    pub fn from_schema(name: impl Into<String>, schema: &Schema) -> Self {
        Self::new(name, fields_from_schema(schema))
    }

    /// Describes a schema-only type from an explicit field list.
    ///
    /// The constructor rejects unknown fields, missing required fields and values
    /// whose JSON type does not match the declared kind.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let name = name.into();
        let declared = fields.clone();
        let type_name = name.clone();
        Self {
            name,
            fields,
            constructor: Arc::new(move |values: Map<String, Value>| {
                let object = validate_fields(&type_name, &declared, values)?;
                Ok(Box::new(Value::Object(object)) as Box<dyn EventData>)
            }),
        }
    }

    /// Describes a type with a custom constructor.
    pub fn with_constructor<F>(
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        constructor: F,
    ) -> Self
    where
        F: Fn(Map<String, Value>) -> AppResult<Box<dyn EventData>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields,
            constructor: Arc::new(constructor),
        }
    }

    /// The canonical type name, also used as the schema component name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields, in order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Iterates over required fields only.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    /// The `$ref` pointer to this type's schema component.
    pub fn schema_ref(&self) -> String {
        format!("#/components/schemas/{}", self.name)
    }

    /// Constructs an instance from named field values.
    pub fn construct(&self, values: Map<String, Value>) -> AppResult<Box<dyn EventData>> {
        (self.constructor)(values)
    }
}

/// Extracts ordered field metadata from an object schema.
///
/// `allOf` compositions are flattened in order, later properties overriding earlier ones.
pub(crate) fn fields_from_schema(schema: &Schema) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    collect_fields(schema, &mut fields);
    fields
}

fn collect_fields(schema: &Schema, fields: &mut Vec<FieldDescriptor>) {
    match schema {
        Schema::Object(obj) => {
            for (field_name, field_schema) in &obj.properties {
                let field = FieldDescriptor {
                    name: field_name.clone(),
                    kind: FieldKind::from_schema(field_schema),
                    required: obj.required.contains(field_name),
                };

                // Upsert to handle allOf overrides
                if let Some(idx) = fields.iter().position(|f| f.name == *field_name) {
                    fields[idx] = field;
                } else {
                    fields.push(field);
                }
            }
        }
        Schema::AllOf(all_of) => {
            for item in &all_of.items {
                if let RefOr::T(s) = item {
                    collect_fields(s, fields);
                }
            }
        }
        _ => {}
    }
}

fn validate_fields(
    type_name: &str,
    declared: &[FieldDescriptor],
    mut values: Map<String, Value>,
) -> AppResult<Map<String, Value>> {
    if let Some(unknown) = values
        .keys()
        .find(|key| !declared.iter().any(|f| &f.name == *key))
    {
        return Err(AppError::Construction(format!(
            "{}: unknown field `{}`",
            type_name, unknown
        )));
    }

    let mut object = Map::new();
    for field in declared {
        match values.remove(&field.name) {
            Some(value) => {
                if !field.kind.accepts(&value) {
                    return Err(AppError::Construction(format!(
                        "{}: field `{}` expects {}, got {}",
                        type_name, field.name, field.kind, value
                    )));
                }
                object.insert(field.name.clone(), value);
            }
            None if field.required => {
                return Err(AppError::Construction(format!(
                    "{}: missing field `{}`",
                    type_name, field.name
                )));
            }
            None => {}
        }
    }
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use utoipa::openapi::schema::{ObjectBuilder, Type};

    fn typed(t: Type) -> RefOr<Schema> {
        RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(t).build()))
    }

    fn status_type() -> PayloadType {
        PayloadType::new(
            "Status",
            vec![
                FieldDescriptor::required("message", FieldKind::Text),
                FieldDescriptor::required("count", FieldKind::Integer),
                FieldDescriptor::optional("done", FieldKind::Boolean),
            ],
        )
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_construct_orders_fields_by_declaration() {
        let ty = status_type();
        let instance = ty
            .construct(object(json!({"count": 2, "message": "hi"})))
            .unwrap();
        assert_eq!(instance.to_json().unwrap(), r#"{"message":"hi","count":2}"#);
    }

    #[test]
    fn test_construct_rejects_missing_required() {
        let err = status_type().construct(Map::new()).err().unwrap();
        assert!(matches!(err, AppError::Construction(_)));
        assert!(err.to_string().contains("missing field `message`"));
    }

    #[test]
    fn test_construct_rejects_unknown_and_mistyped() {
        let ty = status_type();
        let unknown = ty.construct(object(json!({"message": "a", "count": 1, "extra": 1})));
        assert!(unknown.err().unwrap().to_string().contains("unknown field `extra`"));

        let mistyped = ty.construct(object(json!({"message": 5, "count": 1})));
        assert!(mistyped
            .err()
            .unwrap()
            .to_string()
            .contains("field `message` expects string"));
    }

    #[test]
    fn test_schema_ref() {
        assert_eq!(status_type().schema_ref(), "#/components/schemas/Status");
    }

    #[test]
    fn test_from_schema_reads_required() {
        let schema = ObjectBuilder::new()
            .schema_type(Type::Object)
            .property("id", typed(Type::Integer))
            .property("label", typed(Type::String))
            .required("id")
            .build();

        let ty = PayloadType::from_schema("Item", &Schema::Object(schema));
        assert_eq!(
            ty.fields(),
            &[
                FieldDescriptor::required("id", FieldKind::Integer),
                FieldDescriptor::optional("label", FieldKind::Text),
            ]
        );
        let required: Vec<_> = ty.required_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(required, vec!["id"]);
    }

    #[test]
    fn test_custom_constructor() {
        let ty = PayloadType::with_constructor("Fixed", Vec::new(), |_| {
            Ok(Box::new(json!({"fixed": true})) as Box<dyn EventData>)
        });
        let instance = ty.construct(Map::new()).unwrap();
        assert_eq!(instance.to_json().unwrap(), r#"{"fixed":true}"#);
    }
}
