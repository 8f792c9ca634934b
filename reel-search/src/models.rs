use serde::{Deserialize, Serialize};

/// Image base that poster path fragments are appended to.
pub const POSTER_BASE_URL: &str = "https://media.themoviedb.org/t/p/w300_and_h450_bestv2";

/// Base of the public movie detail pages.
pub const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";

/// A movie as returned to the caller of a search.
///
/// Built fresh for every request from the first provider match of a candidate
/// title. Absent optionals serialize as `null` so clients always see every key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub poster: Option<String>,
    pub release_date: Option<String>,
    pub rating: f64,
    pub movie_url: String,
}

impl MovieRecord {
    /// Year portion of `release_date`, if the date is present and well formed.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }
}

pub fn poster_url(poster_path: &str) -> String {
    format!("{POSTER_BASE_URL}{poster_path}")
}

pub fn movie_page_url(id: i64) -> String {
    format!("{MOVIE_PAGE_BASE_URL}/{id}")
}

/// Parameters of a single title lookup against the metadata provider.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSearchQuery {
    pub query: String,
    pub include_adult: bool,
    pub language: String,
    pub page: u32,
}

impl MovieSearchQuery {
    /// Lookup for a candidate title: adult results included, en-US, first page only.
    pub fn for_title(title: impl Into<String>) -> Self {
        Self {
            query: title.into(),
            include_adult: true,
            language: "en-US".to_string(),
            page: 1,
        }
    }
}

/// One page of movie search results, in provider relevance order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieSearchPage {
    #[serde(default)]
    pub page: i64,
    pub results: Vec<MovieSearchResult>,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub total_results: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSearchResult {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl MovieSearchResult {
    pub fn into_record(self) -> MovieRecord {
        MovieRecord {
            poster: self.poster_path.as_deref().map(poster_url),
            movie_url: movie_page_url(self.id),
            id: self.id,
            title: self.title,
            overview: self.overview,
            release_date: self.release_date,
            rating: self.vote_average,
        }
    }
}

// TMDB sends "" for unknown release dates and, occasionally, posters.
fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
