#![deny(missing_docs)]

//! # SSE Docs Core
//!
//! OpenAPI documentation for Server-Sent-Event endpoints:
//! - wire formatting of single events,
//! - the `text/event-stream` content schema,
//! - full response objects with descriptions and example transcripts,
//! - example synthesis for payload types.

/// Shared error types.
pub mod error;

/// SSE wire formatting.
pub mod event;

/// Field kind classification and placeholder values.
pub mod field_kind;

/// Payload type descriptions.
pub mod payload;

/// Example factories.
pub mod factory;

/// `text/event-stream` content schema.
pub mod content;

/// Response documentation assembly.
pub mod response;

/// OpenAPI `examples` objects for events.
pub mod examples;

/// Reading from and writing to OpenAPI documents.
pub mod document;

pub use content::build_sse_content_schema;
pub use document::{insert_sse_responses, load_payload_types};
pub use error::{AppError, AppResult};
pub use event::EventRecord;
pub use examples::create_sse_event_examples;
pub use factory::{make_example_factory, ExampleFactory};
pub use field_kind::FieldKind;
pub use payload::{EventData, FieldDescriptor, PayloadType};
pub use response::{resolve_label, SseResponseBuilder, StreamConfig};
