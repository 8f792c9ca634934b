use anyhow::{Result, anyhow};
use reel_search::{DEFAULT_GEMINI_MODEL, TMDB_BASE_URL};

pub const DEFAULT_PORT: u16 = 3000;

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub genai_api_key: String,
    pub tmdb_api_key: String,
    pub gemini_model: String,
    pub tmdb_base_url: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Missing or blank credentials are an error; everything else has a default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} not set"))
        };

        let genai_api_key = required("GENAI_API_KEY")?;
        let tmdb_api_key = required("TMDB_API_KEY")?;

        let port = lookup("PORT")
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            genai_api_key,
            tmdb_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            tmdb_base_url: lookup("TMDB_BASE_URL").unwrap_or_else(|| TMDB_BASE_URL.to_string()),
            port,
        })
    }
}
