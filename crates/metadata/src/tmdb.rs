//! TMDB (The Movie Database) movie catalog.
//!
//! Uses TMDB API v3 with a static read access token: https://developer.themoviedb.org/docs

use metasearch_core::meta::{LinkCategory, MetaDetail, MetaPreview};
use metasearch_core::types::{MediaKind, Provider};
use serde_json::Value;
use tracing::debug;

use crate::MetadataError;
use crate::fields::{numeric_id, released, runtime, text, year};
use crate::links::{genre_links, people_links};
use crate::provider::CatalogProvider;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const LANGUAGE: &str = "en-US";

pub struct TmdbClient {
    access_token: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(access_token: String, client: reqwest::Client) -> Self {
        Self {
            access_token,
            base_url: BASE_URL.to_string(),
            client,
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, MetadataError> {
        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TMDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbClient {
    fn provider(&self) -> Provider {
        Provider::Tmdb
    }

    async fn search(&self, query: &str) -> Result<Vec<MetaPreview>, MetadataError> {
        let data = self
            .get_json("/search/movie", &[("query", query), ("language", LANGUAGE)])
            .await?;

        Ok(parse_search_results(&data))
    }

    async fn detail(&self, id: u64) -> Result<Option<MetaDetail>, MetadataError> {
        let data = self
            .get_json(
                &format!("/movie/{id}"),
                &[
                    ("append_to_response", "credits,images"),
                    ("language", LANGUAGE),
                ],
            )
            .await?;

        Ok(parse_movie_detail(&data))
    }
}

fn image_url(path: &Value, size: &str) -> Option<String> {
    text(path).map(|p| format!("{IMAGE_BASE}/{size}{p}"))
}

fn parse_search_results(data: &Value) -> Vec<MetaPreview> {
    let Some(results) = data["results"].as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|r| {
            let id = numeric_id(&r["id"])?;
            let name = text(&r["title"])?;
            let mut preview = MetaPreview::new(Provider::Tmdb.meta_id(id), MediaKind::Movie, name);
            preview.poster = image_url(&r["poster_path"], "w300");
            Some(preview)
        })
        .collect()
}

fn parse_movie_detail(data: &Value) -> Option<MetaDetail> {
    let id = numeric_id(&data["id"])?;
    let name = text(&data["title"])?;

    let mut preview = MetaPreview::new(Provider::Tmdb.meta_id(id), MediaKind::Movie, name);
    preview.poster = image_url(&data["poster_path"], "w300");
    preview.background = image_url(&data["backdrop_path"], "original");
    preview.logo = image_url(&data["images"]["logos"][0]["file_path"], "w500");
    preview.description = text(&data["overview"]);

    let mut meta = MetaDetail::new(preview);
    meta.release_info = year(&data["release_date"]).map(|y| y.to_string());
    meta.released = released(&data["release_date"]);
    meta.runtime = runtime(&data["runtime"]);

    let empty = Vec::new();
    let genres = data["genres"].as_array().unwrap_or(&empty);
    let cast = data["credits"]["cast"].as_array().unwrap_or(&empty);
    let crew = data["credits"]["crew"].as_array().unwrap_or(&empty);

    meta.links = genre_links(
        MediaKind::Movie,
        genres.iter().filter_map(|g| g["name"].as_str()),
    );
    meta.links.extend(people_links(
        LinkCategory::Cast,
        cast.iter().filter_map(|c| c["name"].as_str()),
    ));
    meta.links.extend(people_links(
        LinkCategory::Directors,
        crew.iter()
            .filter(|c| c["job"].as_str() == Some("Director"))
            .filter_map(|c| c["name"].as_str()),
    ));

    Some(meta)
}
