#![deny(missing_docs)]

//! # SSE Response Documentation
//!
//! Assembles the OpenAPI response object for an SSE endpoint:
//! - the `content` fragment from [`build_sse_content_schema`],
//! - a description listing every event label,
//! - a literal example transcript built from one example instance per type.
//!
//! Example instances come from an ordered list of construction strategies; a type whose
//! strategies all fail is left out of the transcript but stays in the `oneOf` list.

use crate::content::build_sse_content_schema;
use crate::error::AppResult;
use crate::event::EventRecord;
use crate::factory::ExampleFactory;
use crate::payload::{EventData, PayloadType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Default description of an SSE response.
pub const DEFAULT_DESCRIPTION: &str = "Server-Sent Events stream";

/// Stream-level options reflected in the documentation and the example transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Emit sequential `id:` lines, starting at 1.
    pub include_ids: bool,
    /// Client retry interval in milliseconds, attached to the first event only.
    pub retry_interval: Option<u64>,
    /// Leading comment, attached to the first event only.
    pub comment: Option<String>,
}

impl StreamConfig {
    /// Enables sequential ids.
    pub fn with_ids(mut self) -> Self {
        self.include_ids = true;
        self
    }

    /// Sets the retry interval.
    pub fn with_retry_interval(mut self, millis: u64) -> Self {
        self.retry_interval = Some(millis);
        self
    }

    /// Sets the leading comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builds the record for the `sequence`-th emitted event (1-based).
    pub(crate) fn record(&self, sequence: usize, label: &str, data: String) -> EventRecord {
        let first = sequence == 1;
        EventRecord {
            data,
            event: Some(label.to_string()),
            id: self.include_ids.then(|| sequence.to_string()),
            retry: self.retry_interval.filter(|_| first),
            comment: self.comment.clone().filter(|_| first),
        }
    }
}

/// Resolves the SSE `event:` label of a payload type.
///
/// An override keyed by type name wins; otherwise the type name lower-cased.
pub fn resolve_label(payload_type: &PayloadType, overrides: &HashMap<String, String>) -> String {
    overrides
        .get(payload_type.name())
        .cloned()
        .unwrap_or_else(|| payload_type.name().to_lowercase())
}

/// One way of obtaining an example instance.
#[derive(Debug, Clone, Copy)]
pub enum ExampleStrategy<'a> {
    /// Invoke a caller-registered factory.
    Factory(&'a ExampleFactory),
    /// Construct with no field values.
    Default,
    /// Construct with placeholder values for required fields.
    RequiredFields,
}

impl ExampleStrategy<'_> {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExampleStrategy::Factory(_) => "factory",
            ExampleStrategy::Default => "default",
            ExampleStrategy::RequiredFields => "required-fields",
        }
    }

    /// Tries to produce an instance of `payload_type`.
    pub fn attempt(&self, payload_type: &PayloadType) -> AppResult<Box<dyn EventData>> {
        match self {
            ExampleStrategy::Factory(factory) => factory.invoke(),
            ExampleStrategy::Default => payload_type.construct(Map::new()),
            ExampleStrategy::RequiredFields => {
                payload_type.construct(synthesize_required_fields(payload_type))
            }
        }
    }
}

/// Lists the strategies to try for a type, in order.
///
/// A registered factory is the only candidate. Without one, default construction is
/// tried first, then required-field synthesis when the type has required fields.
pub fn candidate_strategies<'a>(
    payload_type: &PayloadType,
    factory: Option<&'a ExampleFactory>,
) -> Vec<ExampleStrategy<'a>> {
    if let Some(factory) = factory {
        return vec![ExampleStrategy::Factory(factory)];
    }
    let mut strategies = vec![ExampleStrategy::Default];
    if payload_type.required_fields().next().is_some() {
        strategies.push(ExampleStrategy::RequiredFields);
    }
    strategies
}

/// Obtains an example instance, or `None` when every strategy fails.
pub fn resolve_example(
    payload_type: &PayloadType,
    factory: Option<&ExampleFactory>,
) -> Option<Box<dyn EventData>> {
    for strategy in candidate_strategies(payload_type, factory) {
        match strategy.attempt(payload_type) {
            Ok(instance) => {
                tracing::trace!(
                    payload_type = payload_type.name(),
                    strategy = strategy.name(),
                    "example constructed"
                );
                return Some(instance);
            }
            Err(e) => {
                tracing::debug!(
                    payload_type = payload_type.name(),
                    strategy = strategy.name(),
                    error = %e,
                    "example strategy failed"
                );
            }
        }
    }
    tracing::debug!(
        payload_type = payload_type.name(),
        "no example available, omitting from transcript"
    );
    None
}

/// Placeholder values for every required field of `payload_type`.
pub fn synthesize_required_fields(payload_type: &PayloadType) -> Map<String, Value> {
    payload_type
        .required_fields()
        .map(|f| (f.name.clone(), f.kind.placeholder()))
        .collect()
}

/// Builder for the documentation of an SSE response.
///
/// Factories and label overrides are keyed by type name; per-event descriptions are
/// keyed by label.
#[derive(Debug, Clone)]
pub struct SseResponseBuilder {
    types: Vec<PayloadType>,
    description: String,
    event_descriptions: HashMap<String, String>,
    example_factories: HashMap<String, ExampleFactory>,
    event_names: HashMap<String, String>,
    config: StreamConfig,
}

impl SseResponseBuilder {
    /// Creates a builder over `types`. Later duplicates of a type name are dropped.
    pub fn new(types: impl IntoIterator<Item = PayloadType>) -> Self {
        let mut seen = HashSet::new();
        let types = types
            .into_iter()
            .filter(|t| seen.insert(t.name().to_string()))
            .collect();
        Self {
            types,
            description: DEFAULT_DESCRIPTION.to_string(),
            event_descriptions: HashMap::new(),
            example_factories: HashMap::new(),
            event_names: HashMap::new(),
            config: StreamConfig::default(),
        }
    }

    /// Sets the endpoint description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the description of events carrying `label`.
    pub fn with_event_description(
        mut self,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.event_descriptions
            .insert(label.into(), description.into());
        self
    }

    /// Registers an example factory for the type named `type_name`.
    pub fn with_example_factory(
        mut self,
        type_name: impl Into<String>,
        factory: ExampleFactory,
    ) -> Self {
        self.example_factories.insert(type_name.into(), factory);
        self
    }

    /// Overrides the label of the type named `type_name`.
    pub fn with_event_name(mut self, type_name: impl Into<String>, label: impl Into<String>) -> Self {
        self.event_names.insert(type_name.into(), label.into());
        self
    }

    /// Sets the stream options.
    pub fn with_stream_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// The deduplicated types, in caller order.
    pub fn types(&self) -> &[PayloadType] {
        &self.types
    }

    /// Builds `{200: response}`.
    ///
    /// # Errors
    ///
    /// Fails when a constructed example cannot be serialized. Construction failures
    /// only omit the example.
    pub fn build(&self) -> AppResult<IndexMap<u16, Value>> {
        let labels: Vec<String> = self
            .types
            .iter()
            .map(|t| resolve_label(t, &self.event_names))
            .collect();

        let event_type_lines: Vec<String> = self
            .types
            .iter()
            .zip(&labels)
            .map(|(t, label)| {
                let desc = self
                    .event_descriptions
                    .get(label)
                    .cloned()
                    .unwrap_or_else(|| format!("{} events", t.name()));
                format!("- `{}`: {}", label, desc)
            })
            .collect();

        let transcript = self.example_transcript(&labels)?;

        let mut description = format!(
            "{}\n\nEvent Types:\n{}\n\n\
             Each event data field contains JSON matching one of the response schemas.\n\n",
            self.description,
            event_type_lines.join("\n")
        );
        if self.config.include_ids {
            description.push_str("Events include sequential IDs for client-side tracking.\n\n");
        }
        if let Some(retry) = self.config.retry_interval.filter(|r| *r != 0) {
            description.push_str(&format!("Client retry interval: {}ms\n\n", retry));
        }
        description.push_str("Example:\n\n```\n");
        description.push_str(&transcript);
        description.push_str("```");

        let mut response = Map::new();
        response.insert("description".to_string(), Value::String(description));
        response.extend(build_sse_content_schema(&self.types));

        let mut responses = IndexMap::new();
        responses.insert(200, Value::Object(response));
        Ok(responses)
    }

    /// Renders one event per type that yields an example.
    fn example_transcript(&self, labels: &[String]) -> AppResult<String> {
        let mut lines = Vec::new();
        let mut sequence = 0;

        for (payload_type, label) in self.types.iter().zip(labels) {
            let factory = self.example_factories.get(payload_type.name());
            let Some(instance) = resolve_example(payload_type, factory) else {
                continue;
            };
            sequence += 1;
            let record = self.config.record(sequence, label, instance.to_json()?);
            lines.extend(record.lines());
        }

        Ok(lines.join("\n"))
    }
}
