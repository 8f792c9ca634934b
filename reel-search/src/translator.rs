use std::sync::Arc;

use tracing::info;

use crate::error::GenerationError;
use crate::generation::{GenerationSettings, TextGenerator};

/// Instruction placed in front of every user query.
pub const SYSTEM_PROMPT: &str = r#"You are a highly sophisticated movie recommendation system. Your task is to find exactly the movies that match the user's description.
Return ONLY the movie names, 10 of them, each on a new line. No additional text, just movie names.
Be as precise as possible in matching the user's request. Consider themes, atmosphere, plot elements, and emotional resonance.
Example output format:
The Shawshank Redemption
Inception
The Matrix
[etc...]"#;

/// Turns a free-text description into candidate movie titles.
pub struct QueryTranslator {
    generator: Arc<dyn TextGenerator>,
    settings: GenerationSettings,
}

impl QueryTranslator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_settings(generator, GenerationSettings::default())
    }

    pub fn with_settings(generator: Arc<dyn TextGenerator>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// One generation call, then line parsing. No length cap is applied even
    /// though the prompt asks for ten titles.
    pub async fn translate(&self, query: &str) -> Result<Vec<String>, GenerationError> {
        let prompt = build_prompt(query);
        let response = self.generator.generate(&prompt, &self.settings).await?;

        let titles = parse_candidate_titles(&response);
        info!(
            generator = self.generator.name(),
            candidates = titles.len(),
            "Generated candidate titles"
        );
        Ok(titles)
    }
}

pub fn build_prompt(query: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser request: {query}")
}

/// One title per line; lines are trimmed and blank ones dropped.
pub fn parse_candidate_titles(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
