#![deny(missing_docs)]

//! # Format Command
//!
//! Prints a single SSE event in wire format.

use crate::error::CliResult;
use sse_docs_core::EventRecord;

/// Arguments for the format command.
#[derive(clap::Args, Debug, Clone)]
pub struct FormatArgs {
    /// Payload text for the `data:` line, usually single-line JSON.
    #[clap(long)]
    pub data: String,

    /// Event label.
    #[clap(long)]
    pub event: Option<String>,

    /// Event id.
    #[clap(long)]
    pub id: Option<String>,

    /// Retry hint in milliseconds.
    #[clap(long)]
    pub retry: Option<u64>,

    /// Leading comment.
    #[clap(long)]
    pub comment: Option<String>,
}

impl FormatArgs {
    fn record(&self) -> EventRecord {
        EventRecord {
            data: self.data.clone(),
            event: self.event.clone(),
            id: self.id.clone(),
            retry: self.retry,
            comment: self.comment.clone(),
        }
    }
}

/// Executes the format command.
pub fn execute(args: &FormatArgs) -> CliResult<()> {
    print!("{}", args.record());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_args() {
        let args = FormatArgs {
            data: "{}".into(),
            event: Some("tick".into()),
            id: None,
            retry: Some(100),
            comment: None,
        };
        assert_eq!(args.record().format(), "event: tick\nretry: 100\ndata: {}\n");
    }
}
