use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure modes of a single invocation. Every variant is terminal: the
/// dispatcher reports it once on stderr and exits nonzero.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config file not found at {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse config at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not determine home directory")]
    HomeDirUnavailable,

    #[error("no prompt found for name: {0}")]
    PromptNotFound(String),

    #[error("{0}")]
    Transport(String),

    #[error("chat request failed with status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("failed to parse chat response: {source}")]
    ResponseParse {
        #[source]
        source: serde_json::Error,
    },

    #[error("no response from model")]
    EmptyResponse,
}
