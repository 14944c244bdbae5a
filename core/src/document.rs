#![deny(missing_docs)]

//! # OpenAPI Document Adapters
//!
//! Reads payload types out of an existing OpenAPI document and writes generated SSE
//! responses back into one.

use crate::error::{AppError, AppResult};
use crate::field_kind::ref_name;
use crate::payload::PayloadType;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use utoipa::openapi::schema::{Schema, SchemaType, Type};
use utoipa::openapi::{Components, OpenApi, RefOr};

/// Parses an OpenAPI document (YAML or JSON) and describes the named component schemas.
///
/// Types are returned in the order of `names`.
///
/// # Errors
///
/// Fails when the document cannot be parsed, has no components, or a named component
/// is missing or is not an object schema.
pub fn load_payload_types(document: &str, names: &[String]) -> AppResult<Vec<PayloadType>> {
    let openapi: OpenApi = serde_yaml::from_str(document)
        .map_err(|e| AppError::General(format!("Failed to parse OpenAPI document: {}", e)))?;

    let components = openapi
        .components
        .as_ref()
        .ok_or_else(|| AppError::General("No components found in OpenAPI document".into()))?;

    names
        .iter()
        .map(|name| {
            let schema = resolve_component(name, components).ok_or_else(|| {
                AppError::General(format!("Schema component not found: {}", name))
            })?;
            match schema {
                Schema::Object(obj)
                    if matches!(obj.schema_type, SchemaType::Type(Type::Object))
                        || obj.schema_type == SchemaType::AnyValue =>
                {
                    Ok(PayloadType::from_schema(name, schema))
                }
                Schema::AllOf(_) => Ok(PayloadType::from_schema(name, schema)),
                _ => Err(AppError::General(format!(
                    "Schema component {} is not an object schema",
                    name
                ))),
            }
        })
        .collect()
}

/// Looks up a component, following at most one local `$ref` hop.
fn resolve_component<'a>(name: &str, components: &'a Components) -> Option<&'a Schema> {
    match components.schemas.get(name)? {
        RefOr::T(s) => Some(s),
        RefOr::Ref(r) => match components.schemas.get(&ref_name(&r.ref_location))? {
            RefOr::T(s) => Some(s),
            RefOr::Ref(_) => None,
        },
    }
}

/// Merges generated responses into `paths.<path>.<method>.responses`.
///
/// Missing intermediate objects are created and existing entries with the same status
/// code are replaced. The method is stored lower-cased.
///
/// # Errors
///
/// Fails when a node on the way exists but is not an object.
pub fn insert_sse_responses(
    document: &mut Value,
    path: &str,
    method: &str,
    responses: &IndexMap<u16, Value>,
) -> AppResult<()> {
    let method = method.to_lowercase();
    let mut node = document;
    for key in ["paths", path, method.as_str(), "responses"] {
        let obj = node
            .as_object_mut()
            .ok_or_else(|| AppError::General(format!("Expected an object above `{}`", key)))?;
        node = obj
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let target = node
        .as_object_mut()
        .ok_or_else(|| AppError::General("Expected `responses` to be an object".into()))?;
    for (status, response) in responses {
        target.insert(status.to_string(), response.clone());
    }
    Ok(())
}
