use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::generation::{GenerationSettings, TextGenerator};
use crate::metadata::MetadataProvider;
use crate::models::MovieRecord;
use crate::resolver::MetadataResolver;
use crate::translator::QueryTranslator;

/// Free-text movie search: candidate titles from the generator, then one
/// metadata lookup per title.
pub struct MovieFinder {
    translator: QueryTranslator,
    resolver: MetadataResolver,
}

impl MovieFinder {
    pub fn new(generator: Arc<dyn TextGenerator>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self::with_settings(generator, provider, GenerationSettings::default())
    }

    pub fn with_settings(
        generator: Arc<dyn TextGenerator>,
        provider: Arc<dyn MetadataProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            translator: QueryTranslator::with_settings(generator, settings),
            resolver: MetadataResolver::new(provider),
        }
    }

    /// A blank query is a no-op: neither collaborator is called. Otherwise
    /// the query reaches the prompt exactly as given.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
        if query.trim().is_empty() {
            info!("Empty query, skipping search");
            return Ok(Vec::new());
        }

        info!(%query, "Starting movie search");
        let titles = self.translator.translate(query).await?;
        Ok(self.resolver.resolve(&titles).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, MetadataError, SearchError};
    use crate::models::{MovieSearchPage, MovieSearchQuery, MovieSearchResult};
    use async_trait::async_trait;
    use crate::translator::build_prompt;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedGenerator {
        reply: std::result::Result<String, ()>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _settings: &GenerationSettings,
        ) -> std::result::Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply
                .clone()
                .map_err(|_| GenerationError::Request("quota exceeded".to_string()))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Resolves every title except "Unknown" to a record whose id is the call index.
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataProvider for CountingProvider {
        async fn search_movies(
            &self,
            query: &MovieSearchQuery,
        ) -> std::result::Result<MovieSearchPage, MetadataError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) as i64;
            if query.query == "Unknown" {
                return Ok(MovieSearchPage::default());
            }
            Ok(MovieSearchPage {
                page: 1,
                results: vec![MovieSearchResult {
                    id: call,
                    title: query.query.clone(),
                    overview: None,
                    poster_path: None,
                    release_date: None,
                    vote_average: 0.0,
                }],
                total_pages: 1,
                total_results: 1,
            })
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_search_end_to_end() {
        let generator = ScriptedGenerator::replying("Inception\n\nUnknown\n  \nArrival\n");
        let provider = Arc::new(CountingProvider::default());
        let finder = MovieFinder::new(generator.clone(), provider.clone());

        let records = finder.search("dreams within dreams").await.unwrap();

        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Inception", "Arrival"]);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_blank_query_calls_nothing() {
        let generator = ScriptedGenerator::replying("Inception");
        let provider = Arc::new(CountingProvider::default());
        let finder = MovieFinder::new(generator.clone(), provider.clone());

        for query in ["", "   ", "\n\t"] {
            let records = finder.search(query).await.unwrap();
            assert!(records.is_empty());
        }

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_skips_metadata() {
        let generator = ScriptedGenerator::failing();
        let provider = Arc::new(CountingProvider::default());
        let finder = MovieFinder::new(generator, provider.clone());

        let err = finder.search("anything").await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Generation(GenerationError::Request(_))
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_nothing_resolved_is_not_an_error() {
        let generator = ScriptedGenerator::replying("Unknown\nUnknown\n");
        let provider = Arc::new(CountingProvider::default());
        let finder = MovieFinder::new(generator, provider);

        let records = finder.search("obscure").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_query_reaches_prompt_untrimmed() {
        let generator = ScriptedGenerator::replying("Paprika\n");
        let provider = Arc::new(CountingProvider::default());
        let finder = MovieFinder::new(generator.clone(), provider);

        let query = "  dreams leaking into reality \n";
        finder.search(query).await.unwrap();

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, build_prompt(query));
        assert!(prompt.ends_with(query));
    }
}
