//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// JSON (de)serialization failure, e.g. an instance that cannot be serialized.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML parsing or rendering failure.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// A payload instance could not be constructed from the supplied fields.
    /// Created explicitly so `From<String>` keeps targeting `General`.
    #[from(ignore)]
    #[display("Construction Error: {_0}")]
    Construction(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
