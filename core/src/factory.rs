#![deny(missing_docs)]

//! # Example Factories
//!
//! Zero-argument producers of example payload instances.

use crate::error::AppResult;
use crate::payload::{EventData, PayloadType};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A zero-argument function producing one example instance.
#[derive(Clone)]
pub struct ExampleFactory(Arc<dyn Fn() -> AppResult<Box<dyn EventData>> + Send + Sync>);

impl fmt::Debug for ExampleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExampleFactory(..)")
    }
}

impl ExampleFactory {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> AppResult<Box<dyn EventData>> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Returns a clone of `value` on every invocation.
    pub fn fixed<T>(value: T) -> Self
    where
        T: EventData + Clone + 'static,
    {
        Self::new(move || Ok(Box::new(value.clone()) as Box<dyn EventData>))
    }

    /// Produces one instance.
    pub fn invoke(&self) -> AppResult<Box<dyn EventData>> {
        (self.0)()
    }
}

/// Builds a factory that constructs `payload_type` from `field_values` on every call.
///
/// Construction errors are not caught here; they surface when the factory is invoked.
pub fn make_example_factory(
    payload_type: &PayloadType,
    field_values: Map<String, Value>,
) -> ExampleFactory {
    let payload_type = payload_type.clone();
    ExampleFactory::new(move || payload_type.construct(field_values.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::field_kind::FieldKind;
    use crate::payload::FieldDescriptor;
    use serde_json::json;

    fn progress_type() -> PayloadType {
        PayloadType::new(
            "ProgressUpdate",
            vec![
                FieldDescriptor::required("phrases_processed", FieldKind::Integer),
                FieldDescriptor::required("message", FieldKind::Text),
            ],
        )
    }

    #[test]
    fn test_factory_constructs_each_call() {
        let mut fields = Map::new();
        fields.insert("phrases_processed".into(), json!(100));
        fields.insert("message".into(), json!("Processing in progress..."));

        let factory = make_example_factory(&progress_type(), fields);
        let first = factory.invoke().unwrap().to_json().unwrap();
        let second = factory.invoke().unwrap().to_json().unwrap();

        assert_eq!(
            first,
            r#"{"phrases_processed":100,"message":"Processing in progress..."}"#
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_factory_error_surfaces_on_invoke() {
        let mut fields = Map::new();
        fields.insert("message".into(), json!("no count"));

        let factory = make_example_factory(&progress_type(), fields);
        let err = factory.invoke().err().unwrap();
        assert!(matches!(err, AppError::Construction(_)));
    }

    #[test]
    fn test_fixed_factory() {
        let factory = ExampleFactory::fixed(json!({"status": "ok"}));
        assert_eq!(
            factory.invoke().unwrap().to_json().unwrap(),
            r#"{"status":"ok"}"#
        );
    }
}
