use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::metadata::MetadataProvider;
use crate::models::{MovieRecord, MovieSearchQuery};

/// Resolves candidate titles to movie records, one lookup at a time.
pub struct MetadataResolver {
    provider: Arc<dyn MetadataProvider>,
}

impl MetadataResolver {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Output keeps candidate order. Titles that fail or match nothing are
    /// left out; duplicates are kept.
    pub async fn resolve(&self, titles: &[String]) -> Vec<MovieRecord> {
        let mut records = Vec::with_capacity(titles.len());

        for title in titles {
            let query = MovieSearchQuery::for_title(title.as_str());
            match self.provider.find_first(&query).await {
                Ok(Some(result)) => {
                    let record = result.into_record();
                    debug!(
                        %title,
                        id = record.id,
                        year = ?record.release_year(),
                        "Resolved candidate title"
                    );
                    records.push(record);
                }
                Ok(None) => {
                    warn!(%title, provider = self.provider.name(), "No match for candidate title");
                }
                Err(e) => {
                    warn!(
                        %title,
                        provider = self.provider.name(),
                        error = %e,
                        "Lookup failed, skipping candidate title"
                    );
                }
            }
        }

        info!(
            candidates = titles.len(),
            resolved = records.len(),
            "Metadata resolution finished"
        );
        records
    }
}
