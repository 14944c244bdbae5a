#![deny(missing_docs)]

//! # Stream Content Schema
//!
//! Builds the `content` fragment for a `text/event-stream` response.
//!
//! Two representations are emitted side by side:
//! - `itemSchema`: the per-item schema understood by OAS 3.2 tooling.
//! - `schema`: the legacy whole-body schema for older tooling.

use crate::payload::PayloadType;
use serde_json::{json, Map, Value};

/// Media type of an SSE stream.
pub const EVENT_STREAM_MEDIA_TYPE: &str = "text/event-stream";

/// Description attached to the legacy `schema` entry.
pub const STREAM_SCHEMA_DESCRIPTION: &str = "Server-Sent Events stream";

/// Builds `{"content": {"text/event-stream": {...}}}` declaring a `oneOf` over `types`.
///
/// Types are referenced as `#/components/schemas/<Name>` in the given order. The
/// components themselves are not checked for existence.
pub fn build_sse_content_schema(types: &[PayloadType]) -> Map<String, Value> {
    let one_of: Vec<Value> = types
        .iter()
        .map(|t| json!({ "$ref": t.schema_ref() }))
        .collect();

    let mut media = Map::new();
    media.insert("itemSchema".to_string(), json!({ "oneOf": one_of }));
    media.insert(
        "schema".to_string(),
        json!({
            "oneOf": one_of,
            "description": STREAM_SCHEMA_DESCRIPTION,
        }),
    );

    let mut content = Map::new();
    content.insert(EVENT_STREAM_MEDIA_TYPE.to_string(), Value::Object(media));

    let mut fragment = Map::new();
    fragment.insert("content".to_string(), Value::Object(content));
    fragment
}
