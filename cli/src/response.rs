#![deny(missing_docs)]

//! # Response Command
//!
//! Generates the documentation of an SSE response from component schemas of an
//! OpenAPI document.
//!
//! 1. **Load**: The named component schemas become payload types.
//! 2. **Configure**: Labels, descriptions, example values and stream options are applied.
//! 3. **Emit**: The `{200: ...}` responses are printed, or injected into the document
//!    when `--path` is given.

use crate::error::{CliError, CliResult};
use crate::options::{parse_json_object, parse_key_val, OutputFormat, StreamArgs};
use serde_json::Value;
use sse_docs_core::{
    insert_sse_responses, load_payload_types, make_example_factory, SseResponseBuilder,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the response command.
#[derive(clap::Args, Debug, Clone)]
pub struct ResponseArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, default_value = "docs/openapi.yaml")]
    pub openapi_path: PathBuf,

    /// Component schema emitted by the stream. Repeat in emission order.
    #[clap(long = "event-type", required = true)]
    pub event_types: Vec<String>,

    /// Description of the endpoint.
    #[clap(long)]
    pub description: Option<String>,

    /// Label override, format: `"TypeName=label"`.
    #[clap(long = "event-name", value_parser = parse_key_val)]
    pub event_names: Vec<(String, String)>,

    /// Description of one event label, format: `"label=text"`.
    #[clap(long = "event-description", value_parser = parse_key_val)]
    pub event_descriptions: Vec<(String, String)>,

    /// Example field values for a type, format: `"TypeName={\"field\": 1}"`.
    #[clap(long = "example", value_parser = parse_key_val)]
    pub examples: Vec<(String, String)>,

    #[clap(flatten)]
    pub stream: StreamArgs,

    /// Output format when printing.
    #[clap(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Inject the response into this path of the document instead of printing it.
    #[clap(long)]
    pub path: Option<String>,

    /// HTTP method of the operation to inject into.
    #[clap(long, default_value = "get")]
    pub method: String,

    /// Where to write the updated document. Defaults to `--openapi-path`.
    #[clap(long, requires = "path")]
    pub output_path: Option<PathBuf>,
}

/// Executes the response command.
pub fn execute(args: &ResponseArgs) -> CliResult<()> {
    if !args.openapi_path.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            args.openapi_path
        )));
    }
    let document = fs::read_to_string(&args.openapi_path)?;

    let responses = configure(args, &document)?.build()?;

    match &args.path {
        Some(path) => {
            let mut tree: Value = serde_yaml::from_str(&document)?;
            insert_sse_responses(&mut tree, path, &args.method, &responses)?;

            let target = args.output_path.as_deref().unwrap_or(&args.openapi_path);
            fs::write(target, format_for_path(target).render(&tree)?)?;
            println!(
                "Injected SSE response into {} {} at {:?}",
                args.method.to_uppercase(),
                path,
                target
            );
        }
        None => print!("{}", args.format.render(&responses)?),
    }
    Ok(())
}

/// Builds the response builder from the document and the arguments.
fn configure(args: &ResponseArgs, document: &str) -> CliResult<SseResponseBuilder> {
    let types = load_payload_types(document, &args.event_types)?;
    let mut builder = SseResponseBuilder::new(types.clone())
        .with_stream_config(args.stream.resolve()?);

    if let Some(description) = &args.description {
        builder = builder.with_description(description);
    }
    for (type_name, label) in &args.event_names {
        builder = builder.with_event_name(type_name, label);
    }
    for (label, description) in &args.event_descriptions {
        builder = builder.with_event_description(label, description);
    }
    for (type_name, json) in &args.examples {
        let payload_type = types
            .iter()
            .find(|t| t.name() == type_name.as_str())
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "--example given for {}, which is not an --event-type",
                    type_name
                ))
            })?;
        let fields = parse_json_object(type_name, json)?;
        builder = builder.with_example_factory(
            type_name,
            make_example_factory(payload_type, fields),
        );
    }
    Ok(builder)
}

/// JSON for `.json` files, YAML otherwise.
fn format_for_path(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r#"
openapi: 3.1.0
info: {title: Jobs, version: 1.0}
paths:
  /jobs/events:
    get:
      operationId: jobEvents
      responses: {}
components:
  schemas:
    JobStarted:
      type: object
      properties:
        job_id: { type: integer }
      required: [job_id]
    JobDone:
      type: object
      properties:
        ok: { type: boolean }
"#;

    fn args(openapi_path: PathBuf) -> ResponseArgs {
        ResponseArgs {
            openapi_path,
            event_types: vec!["JobStarted".into(), "JobDone".into()],
            description: Some("Job events".into()),
            event_names: vec![("JobDone".into(), "done".into())],
            event_descriptions: vec![("done".into(), "Job finished".into())],
            examples: vec![("JobStarted".into(), r#"{"job_id": 7}"#.into())],
            stream: StreamArgs {
                include_ids: true,
                ..StreamArgs::default()
            },
            format: OutputFormat::Json,
            path: None,
            method: "get".into(),
            output_path: None,
        }
    }

    #[test]
    fn test_configure_applies_all_options() {
        let responses = configure(&args(PathBuf::from("unused")), DOC)
            .unwrap()
            .build()
            .unwrap();
        let description = responses[&200u16]["description"].as_str().unwrap();

        assert!(description.starts_with("Job events\n\nEvent Types:\n"));
        assert!(description.contains("- `jobstarted`: JobStarted events\n- `done`: Job finished"));
        assert!(description.contains("id: 1\nevent: jobstarted\ndata: {\"job_id\":7}\n"));
        assert!(description.contains("id: 2\nevent: done\ndata: {}\n"));
    }

    #[test]
    fn test_example_for_unknown_type_is_rejected() {
        let mut a = args(PathBuf::from("unused"));
        a.examples = vec![("Missing".into(), "{}".into())];
        let err = configure(&a, DOC).err().unwrap();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_execute_injects_into_document() {
        let dir = tempdir().unwrap();
        let openapi_path = dir.path().join("openapi.yaml");
        let output_path = dir.path().join("out.json");
        fs::write(&openapi_path, DOC).unwrap();

        let mut a = args(openapi_path.clone());
        a.path = Some("/jobs/events".into());
        a.output_path = Some(output_path.clone());
        execute(&a).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        let op = &written["paths"]["/jobs/events"]["get"];
        assert_eq!(op["operationId"], "jobEvents");
        assert!(op["responses"]["200"]["content"]["text/event-stream"]["itemSchema"]["oneOf"]
            .is_array());
        // Input document is left untouched
        assert_eq!(fs::read_to_string(&openapi_path).unwrap(), DOC);
    }

    #[test]
    fn test_execute_missing_openapi() {
        let dir = tempdir().unwrap();
        let a = args(dir.path().join("missing.yaml"));
        let result = execute(&a);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path(Path::new("a/openapi.json")), OutputFormat::Json);
        assert_eq!(format_for_path(Path::new("a/openapi.yaml")), OutputFormat::Yaml);
    }
}
