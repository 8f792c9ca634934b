use thiserror::Error;

/// Failure of the text generation collaborator. Always fatal for the search.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Request(String),

    #[error("completion API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("failed to decode completion response: {0}")]
    Decode(String),

    #[error("completion returned no text")]
    EmptyResponse,
}

/// Failure of a single metadata lookup. The resolver skips the title.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[cfg(feature = "tmdb")]
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status_code} - {message}")]
    Api { status_code: u16, message: String },

    #[error("failed to decode response at `{path}`: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("movie title generation failed: {0}")]
    Generation(#[from] GenerationError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
