#![deny(missing_docs)]

//! # Examples Command
//!
//! Prints an OpenAPI `examples` object with one SSE-formatted example per label.

use crate::error::CliResult;
use crate::options::{parse_key_val, OutputFormat, StreamArgs};
use serde_json::{Map, Value};
use sse_docs_core::create_sse_event_examples;

/// Arguments for the examples command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExamplesArgs {
    /// Example instance, format: `"label=<json>"`. Repeat in emission order.
    #[clap(long = "instance", value_parser = parse_key_val, required = true)]
    pub instances: Vec<(String, String)>,

    #[clap(flatten)]
    pub stream: StreamArgs,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Builds the examples object.
fn build(args: &ExamplesArgs) -> CliResult<Map<String, Value>> {
    let mut instances = Vec::with_capacity(args.instances.len());
    for (label, json) in &args.instances {
        instances.push((label.as_str(), serde_json::from_str::<Value>(json)?));
    }

    let config = args.stream.resolve()?;
    Ok(create_sse_event_examples(
        instances.iter().map(|(label, value)| (*label, value)),
        &config,
    )?)
}

/// Executes the examples command.
pub fn execute(args: &ExamplesArgs) -> CliResult<()> {
    let examples = build(args)?;
    print!("{}", args.format.render(&examples)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_examples() {
        let args = ExamplesArgs {
            instances: vec![
                ("started".into(), r#"{"job": 1}"#.into()),
                ("done".into(), "true".into()),
            ],
            stream: StreamArgs {
                include_ids: true,
                ..StreamArgs::default()
            },
            format: OutputFormat::Json,
        };
        let examples = build(&args).unwrap();

        assert_eq!(
            examples["started_event"]["value"],
            "id: 1\nevent: started\ndata: {\"job\":1}\n"
        );
        assert_eq!(examples["done_event"]["value"], "id: 2\nevent: done\ndata: true\n");
        assert_eq!(examples["done_event"]["summary"], "Done Event");
    }

    #[test]
    fn test_invalid_json_instance() {
        let args = ExamplesArgs {
            instances: vec![("bad".into(), "{".into())],
            stream: StreamArgs::default(),
            format: OutputFormat::Yaml,
        };
        assert!(build(&args).is_err());
    }
}
