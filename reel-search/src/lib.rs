pub mod error;
pub mod finder;
pub mod generation;
pub mod metadata;
pub mod models;
pub mod resolver;
pub mod translator;

#[cfg(feature = "gemini")]
pub mod gemini;
#[cfg(feature = "tmdb")]
pub mod tmdb;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{GenerationError, MetadataError, Result, SearchError};
pub use finder::MovieFinder;
pub use generation::{
    GenerationSettings, HarmBlockThreshold, HarmCategory, SafetySetting, TextGenerator,
};
pub use metadata::MetadataProvider;
pub use models::{MovieRecord, MovieSearchPage, MovieSearchQuery, MovieSearchResult};
pub use resolver::MetadataResolver;
pub use translator::{QueryTranslator, SYSTEM_PROMPT};

#[cfg(feature = "gemini")]
pub use gemini::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL, GeminiGenerator};
#[cfg(feature = "tmdb")]
pub use tmdb::{TMDB_BASE_URL, TmdbClient};
