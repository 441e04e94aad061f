use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieCandidate, MovieDetails},
};

/// Shown for movies the database has no poster for.
pub const POSTER_PLACEHOLDER: &str = "https://placehold.co/500x750?text=No+Poster";

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(
        client: reqwest::Client,
        api_key: String,
        base_url: String,
        image_base_url: String,
    ) -> Self {
        Self { client, api_key, base_url, image_base_url }
    }

    /// Free text title search. No match is an empty list, not an error.
    pub async fn search(&self, title: &str) -> AppResult<Vec<MovieCandidate>> {
        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(title = %title, count = resp.results.len(), "movie search finished");
        Ok(resp.results)
    }

    pub async fn fetch_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);

        let resp: DetailsResponse = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let title = resp.title.map(|t| t.trim().to_string()).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::Upstream(format!("movie {tmdb_id} has no title")));
        }

        tracing::debug!(tmdb_id = tmdb_id, title = %title, "fetched movie details");

        Ok(MovieDetails {
            title,
            release_date: resp.release_date.unwrap_or_default(),
            overview: resp.overview.unwrap_or_default(),
            poster_path: resp.poster_path.filter(|p| !p.trim().is_empty()),
        })
    }

    pub fn poster_url(&self, poster_path: Option<&str>) -> String {
        image_url(&self.image_base_url, poster_path)
    }
}

/// Joins the image base and a poster path with a single `/`, falling back to
/// [`POSTER_PLACEHOLDER`] when there is no path.
pub fn image_url(base: &str, poster_path: Option<&str>) -> String {
    match poster_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')),
        None => POSTER_PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieCandidate>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
}
