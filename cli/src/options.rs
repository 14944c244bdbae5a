#![deny(missing_docs)]

//! # Shared Options
//!
//! Stream configuration flags, output format selection and `key=value` parsing used by
//! several commands.

use crate::error::{CliError, CliResult};
use serde_json::{Map, Value};
use sse_docs_core::StreamConfig;
use std::fs;
use std::path::PathBuf;

/// Stream options. Flags override values read from `--config`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StreamArgs {
    /// YAML or JSON file holding `include_ids`, `retry_interval` and `comment`.
    #[clap(long, env = "SSE_DOCS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Add sequential `id:` lines to the examples.
    #[clap(long, env = "SSE_DOCS_INCLUDE_IDS")]
    pub include_ids: bool,

    /// Client retry interval in milliseconds, attached to the first event.
    #[clap(long, env = "SSE_DOCS_RETRY_INTERVAL")]
    pub retry_interval: Option<u64>,

    /// Leading comment, attached to the first event.
    #[clap(long, env = "SSE_DOCS_COMMENT")]
    pub comment: Option<String>,
}

impl StreamArgs {
    /// Resolves the effective stream configuration.
    pub fn resolve(&self) -> CliResult<StreamConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    CliError::General(format!("Failed to read config {:?}: {}", path, e))
                })?;
                // YAML is a superset of JSON, one parser covers both
                serde_yaml::from_str::<StreamConfig>(&text)?
            }
            None => StreamConfig::default(),
        };

        if self.include_ids {
            config.include_ids = true;
        }
        if let Some(retry) = self.retry_interval {
            config.retry_interval = Some(retry);
        }
        if let Some(comment) = &self.comment {
            config.comment = Some(comment.clone());
        }
        tracing::debug!(?config, "resolved stream configuration");
        Ok(config)
    }
}

/// Serialization format for printed documents.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML output.
    #[default]
    Yaml,
    /// Pretty-printed JSON output.
    Json,
}

impl OutputFormat {
    /// Renders a serializable value.
    pub fn render<T: serde::Serialize>(&self, value: &T) -> CliResult<String> {
        Ok(match self {
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
        })
    }
}

/// Helper to parse "key=value" arguments.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Parses a JSON object given on the command line.
pub fn parse_json_object(context: &str, text: &str) -> CliResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(CliError::InvalidArgument(format!(
            "{}: expected a JSON object, got {}",
            context, other
        ))),
    }
}
