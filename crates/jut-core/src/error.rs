//! Error types shared by the jut crates.

use thiserror::Error;

/// Result alias for jut-core operations.
pub type Result<T> = std::result::Result<T, JutError>;

/// Everything that can abort a run before rendering starts.
///
/// Unsupported output content is not represented here: it renders as a
/// placeholder block instead.
#[derive(Error, Debug)]
pub enum JutError {
    /// The input is not a well-formed notebook of the expected schema.
    #[error("{source_name} is not a proper notebook: {reason}")]
    Parsing { source_name: String, reason: String },

    /// `--start`/`--end` out of bounds or not strictly increasing.
    #[error("invalid range: start ({start}) must be >= 1 and less than end ({end})")]
    InvalidRange { start: i64, end: i64 },

    /// `--head`/`--tail` count that is zero or negative.
    #[error("invalid count for --{flag}: {value} (must be >= 1)")]
    InvalidCount { flag: &'static str, value: i64 },

    /// Selection flags or config values that cannot be resolved.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A remote document could not be downloaded.
    #[error("failed to download {url}: {reason}")]
    Retrieval { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl JutError {
    pub(crate) fn parsing(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parsing {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
