use std::path::PathBuf;

use thiserror::Error;

/// Failures of the glue around the extractors: browser, generator, export.
///
/// The extractors themselves never fail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Node.js browser server failed to spawn
    #[error("Failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the browser server failed
    #[error("Browser session I/O error: {0}")]
    SessionIO(String),

    /// Browser server answered a command with an error
    #[error("Browser session command '{command}' failed: {error}")]
    SessionProtocol { command: String, error: String },

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP call to a text generator failed
    #[error("{backend} request failed: {source}")]
    GeneratorHttp {
        backend: String,
        #[source]
        source: reqwest::Error,
    },

    /// Text generator answered, but not with anything usable
    #[error("{backend} returned an unusable response: {message}")]
    GeneratorResponse { backend: String, message: String },

    #[error("Environment variable {var} is not set; it must hold the API key")]
    MissingApiKey { var: String },

    /// Generator produced no text for a pipeline stage
    #[error("Generator returned no text for {stage}")]
    EmptyGeneration { stage: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
