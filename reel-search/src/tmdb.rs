use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::MetadataError;
use crate::metadata::MetadataProvider;
use crate::models::{MovieSearchPage, MovieSearchQuery};

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API client authenticated with a v4 read access token.
pub struct TmdbClient {
    client: Client,
    token: String,
    base_url: String,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client.
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn search_params(query: &MovieSearchQuery) -> [(&'static str, String); 4] {
        [
            ("query", query.query.clone()),
            ("include_adult", query.include_adult.to_string()),
            ("language", query.language.clone()),
            ("page", query.page.to_string()),
        ]
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, MetadataError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MetadataError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        decode(&body)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, MetadataError> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| MetadataError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_movies(
        &self,
        query: &MovieSearchQuery,
    ) -> Result<MovieSearchPage, MetadataError> {
        debug!(query = %query.query, "Searching TMDB movies");

        let response = self
            .client
            .get(self.url("/search/movie"))
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.token)
            .query(&Self::search_params(query))
            .send()
            .await?;

        self.handle_response(response).await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
