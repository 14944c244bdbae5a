#![deny(missing_docs)]

//! # SSE Docs CLI
//!
//! Command Line Interface for documenting Server-Sent-Event endpoints.
//!
//! Supported Commands:
//! - `response`: OpenAPI response for an SSE endpoint, printed or injected into a document.
//! - `examples`: OpenAPI `examples` object from literal event instances.
//! - `format`: A single event in SSE wire format.

use clap::{Parser, Subcommand};
use error::CliResult;

mod error;
mod examples;
mod format;
mod options;
mod response;

#[derive(Parser, Debug)]
#[clap(author, version, about = "SSE OpenAPI documentation CLI")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the OpenAPI response of an SSE endpoint from component schemas.
    Response(response::ResponseArgs),
    /// Generate an OpenAPI examples object for SSE events.
    Examples(examples::ExamplesArgs),
    /// Print a single event in SSE wire format.
    Format(format::FormatArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Response(args) => response::execute(args)?,
        Commands::Examples(args) => examples::execute(args)?,
        Commands::Format(args) => format::execute(args)?,
    }

    Ok(())
}
