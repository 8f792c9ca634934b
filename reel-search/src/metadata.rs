//! Movie metadata provider trait definition

use async_trait::async_trait;

use crate::error::MetadataError;
use crate::models::{MovieSearchPage, MovieSearchQuery, MovieSearchResult};

/// Maps a title string to structured movie metadata.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search for movies matching the query
    ///
    /// Results come back in the provider's own relevance order.
    async fn search_movies(&self, query: &MovieSearchQuery)
    -> Result<MovieSearchPage, MetadataError>;

    /// Best match for the query, i.e. the first result, or `None` when the
    /// provider found nothing.
    async fn find_first(
        &self,
        query: &MovieSearchQuery,
    ) -> Result<Option<MovieSearchResult>, MetadataError> {
        let page = self.search_movies(query).await?;
        Ok(page.results.into_iter().next())
    }

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
