#![deny(missing_docs)]

//! # Event Examples
//!
//! Builds an OpenAPI `examples` object with one SSE-formatted example per event label.

use crate::error::{AppError, AppResult};
use crate::payload::EventData;
use crate::response::StreamConfig;
use serde_json::{json, Map, Value};

/// Builds `{"<label>_event": {summary, description, value}}` for each entry.
///
/// Ids, the retry hint and the leading comment follow the iteration order of
/// `entries`: the first entry is event 1.
///
/// # Errors
///
/// Fails when an instance cannot be serialized or a label repeats.
pub fn create_sse_event_examples<'a, I, D>(
    entries: I,
    config: &StreamConfig,
) -> AppResult<Map<String, Value>>
where
    I: IntoIterator<Item = (&'a str, &'a D)>,
    D: EventData + ?Sized + 'a,
{
    let mut examples = Map::new();

    for (index, (label, instance)) in entries.into_iter().enumerate() {
        let key = format!("{}_event", label);
        if examples.contains_key(&key) {
            return Err(AppError::General(format!("duplicate event label: {}", label)));
        }
        let record = config.record(index + 1, label, instance.to_json()?);
        examples.insert(
            key,
            json!({
                "summary": format!("{} Event", title_case(label)),
                "description": format!("Server-Sent Event with {} data", label),
                "value": record.format(),
            }),
        );
    }

    Ok(examples)
}

/// Capitalizes each run of letters and lowercases the rest of it.
///
/// Separators are kept: `progress_update` becomes `Progress_Update`.
fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_word = false;
    for c in label.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_entry_round_trip() {
        let instance = json!({"n": 1});
        let examples =
            create_sse_event_examples([("foo", &instance)], &StreamConfig::default()).unwrap();

        assert_eq!(examples.len(), 1);
        let entry = &examples["foo_event"];
        assert_eq!(entry["summary"], "Foo Event");
        assert_eq!(entry["description"], "Server-Sent Event with foo data");

        let value = entry["value"].as_str().unwrap();
        let lines: Vec<&str> = value.lines().collect();
        assert_eq!(lines, vec!["event: foo", r#"data: {"n":1}"#]);
    }

    #[test]
    fn test_stream_options_follow_iteration_order() {
        let mut entries: IndexMap<&str, Value> = IndexMap::new();
        entries.insert("started", json!({}));
        entries.insert("progress_update", json!({"pct": 50}));

        let config = StreamConfig::default()
            .with_ids()
            .with_retry_interval(1000)
            .with_comment("stream open");
        let examples =
            create_sse_event_examples(entries.iter().map(|(k, v)| (*k, v)), &config).unwrap();

        let keys: Vec<&String> = examples.keys().collect();
        assert_eq!(keys, vec!["started_event", "progress_update_event"]);

        assert_eq!(
            examples["started_event"]["value"],
            ": stream open\nid: 1\nevent: started\nretry: 1000\ndata: {}\n"
        );
        assert_eq!(
            examples["progress_update_event"]["value"],
            "id: 2\nevent: progress_update\ndata: {\"pct\":50}\n"
        );
        assert_eq!(
            examples["progress_update_event"]["summary"],
            "Progress_Update Event"
        );
    }

    #[test]
    fn test_title_case() {
        let cases = [
            ("foo", "Foo"),
            ("progress_update", "Progress_Update"),
            ("jobStarted", "Jobstarted"),
            ("HTTP-error", "Http-Error"),
            ("step2done", "Step2Done"),
            ("", ""),
        ];
        for (label, expected) in cases {
            assert_eq!(title_case(label), expected, "label {:?}", label);
        }
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let first = json!({"n": 1});
        let second = json!({"n": 2});
        let config = StreamConfig::default().with_comment("open");
        let err = create_sse_event_examples([("tick", &first), ("tick", &second)], &config)
            .err()
            .unwrap();
        assert!(matches!(err, AppError::General(_)));
        assert!(err.to_string().contains("duplicate event label: tick"));
    }

    #[test]
    fn test_trait_object_entries() {
        let boxed: Box<dyn EventData> = Box::new(json!([1, 2]));
        let examples =
            create_sse_event_examples([("list", boxed.as_ref())], &StreamConfig::default())
                .unwrap();
        assert_eq!(examples["list_event"]["value"], "event: list\ndata: [1,2]\n");
    }
}
