use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvobugError {
    #[error("Adapter error: {0}")]
    Adapter(String),

    #[error("Invalid input spec: {0}")]
    InvalidSpec(String),

    #[error("Unknown problem: {0}")]
    UnknownProblem(String),

    #[error("Mutation backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Mutation backend timed out after {0}s")]
    BackendTimeout(u64),

    #[error("Mutation backend report error: {reason}")]
    BackendReport {
        reason: String,
        stdout: String,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EvobugError>;
