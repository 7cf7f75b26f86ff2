//! TheTVDB series catalog.
//!
//! Uses TheTVDB API v4: https://thetvdb.github.io/v4-api/
//! Every call except login needs the bearer token kept in [`CredentialStore`].

use metasearch_core::meta::{
    LinkCategory, MetaBehaviorHints, MetaDetail, MetaPreview, MetaVideo,
};
use metasearch_core::types::{MediaKind, Provider};
use serde_json::Value;
use tracing::debug;

use crate::MetadataError;
use crate::credential::CredentialStore;
use crate::fields::{number, numeric_id, released, runtime, text, year};
use crate::links::{genre_links, people_links};
use crate::provider::{Authenticator, CatalogProvider};

const BASE_URL: &str = "https://api4.thetvdb.com/v4";
const ARTWORK_BASE: &str = "https://artworks.thetvdb.com";
const MISSING_EPISODE_IMAGE: &str = "https://www.thetvdb.com/images/missing/episode.jpg";

const STATUS_CONTINUING: u64 = 1;
const STATUS_ENDED: u64 = 2;

const ARTWORK_POSTER: u64 = 2;
const ARTWORK_BACKGROUND: u64 = 3;
const ARTWORK_LOGO: u64 = 23;

pub struct TvdbClient {
    api_key: String,
    credentials: CredentialStore,
    base_url: String,
    client: reqwest::Client,
}

impl TvdbClient {
    pub fn new(api_key: String, credentials: CredentialStore, client: reqwest::Client) -> Self {
        Self {
            api_key,
            credentials,
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
        let token = self.credentials.get();
        if token.is_empty() {
            return Err(MetadataError::MissingToken);
        }

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TVDB request");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetadataError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TVDB returned {}",
                resp.status()
            )));
        }

        resp.json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))
    }
}

#[async_trait::async_trait]
impl Authenticator for TvdbClient {
    async fn authenticate(&self) -> Result<String, MetadataError> {
        let url = format!("{}/login", self.base_url);
        debug!(url = %url, "TVDB login");

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "apikey": self.api_key }))
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MetadataError::Provider(format!(
                "TVDB login returned {}",
                resp.status()
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| MetadataError::Provider(format!("parse JSON: {e}")))?;

        text(&data["data"]["token"]).ok_or(MetadataError::MissingToken)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TvdbClient {
    fn provider(&self) -> Provider {
        Provider::Tvdb
    }

    async fn search(&self, query: &str) -> Result<Vec<MetaPreview>, MetadataError> {
        let data = self
            .get_json("/search", &[("query", query), ("type", "series")])
            .await?;

        Ok(parse_search_results(&data))
    }

    async fn detail(&self, id: u64) -> Result<Option<MetaDetail>, MetadataError> {
        let data = self
            .get_json(&format!("/series/{id}/extended"), &[("meta", "episodes")])
            .await?;

        Ok(parse_series_detail(&data["data"]))
    }
}

fn parse_search_results(data: &Value) -> Vec<MetaPreview> {
    let Some(results) = data["data"].as_array() else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|r| {
            let id = numeric_id(&r["tvdb_id"])?;
            let name = text(&r["name"])?;
            let mut preview = MetaPreview::new(Provider::Tvdb.meta_id(id), MediaKind::Series, name);
            preview.poster = text(&r["thumbnail"]);
            Some(preview)
        })
        .collect()
}

/// First artwork of the given type, read from `field`.
fn artwork(artworks: &[Value], kind: u64, field: &str) -> Option<String> {
    artworks
        .iter()
        .find(|a| a["type"].as_u64() == Some(kind))
        .and_then(|a| text(&a[field]))
}

fn release_info(data: &Value) -> Option<String> {
    let start = year(&data["firstAired"])?;
    match data["status"]["id"].as_u64() {
        Some(STATUS_CONTINUING) => Some(format!("{start}-")),
        Some(STATUS_ENDED) => {
            let end = year(&data["lastAired"]).map(|y| y.to_string()).unwrap_or_default();
            Some(format!("{start}-{end}"))
        }
        _ => None,
    }
}

fn episode_thumbnail(image: &Value) -> String {
    match text(image) {
        Some(url) if url.starts_with("http") => url,
        Some(path) => format!("{ARTWORK_BASE}{path}"),
        None => MISSING_EPISODE_IMAGE.to_string(),
    }
}

fn parse_episodes(series_id: u64, episodes: &[Value]) -> Vec<MetaVideo> {
    episodes
        .iter()
        .filter_map(|e| {
            numeric_id(&e["id"])?;
            let title = text(&e["name"])?;
            let season = number(&e["seasonNumber"]).filter(|s| *s != 0)?;
            let episode = number(&e["number"])?;

            Some(MetaVideo {
                id: format!("{}:{season}:{episode}", Provider::Tvdb.meta_id(series_id)),
                title,
                season,
                episode,
                overview: text(&e["overview"]),
                released: released(&e["aired"]).unwrap_or_default(),
                thumbnail: Some(episode_thumbnail(&e["image"])),
            })
        })
        .collect()
}

fn people<'a>(characters: &'a [Value], people_type: &'a str) -> impl Iterator<Item = &'a str> {
    characters
        .iter()
        .filter(move |c| c["peopleType"].as_str() == Some(people_type))
        .filter_map(|c| c["personName"].as_str())
}

fn parse_series_detail(data: &Value) -> Option<MetaDetail> {
    let id = numeric_id(&data["id"])?;
    let name = text(&data["name"])?;

    let empty = Vec::new();
    let artworks = data["artworks"].as_array().unwrap_or(&empty);
    let genres = data["genres"].as_array().unwrap_or(&empty);
    let characters = data["characters"].as_array().unwrap_or(&empty);
    let episodes = data["episodes"].as_array().unwrap_or(&empty);

    let mut preview = MetaPreview::new(Provider::Tvdb.meta_id(id), MediaKind::Series, name);
    preview.poster = artwork(artworks, ARTWORK_POSTER, "thumbnail");
    preview.background = artwork(artworks, ARTWORK_BACKGROUND, "image");
    preview.logo = artwork(artworks, ARTWORK_LOGO, "thumbnail");
    preview.description = text(&data["overview"]);

    let mut meta = MetaDetail::new(preview);
    meta.release_info = release_info(data);
    meta.released = released(&data["firstAired"]);
    meta.runtime = runtime(&data["averageRuntime"]);
    meta.behavior_hints = Some(MetaBehaviorHints {
        has_scheduled_videos: data["status"]["id"].as_u64() == Some(STATUS_CONTINUING),
    });

    meta.links = genre_links(
        MediaKind::Series,
        genres.iter().filter_map(|g| g["name"].as_str()),
    );
    meta.links
        .extend(people_links(LinkCategory::Cast, people(characters, "Actor")));
    meta.links.extend(people_links(
        LinkCategory::Directors,
        people(characters, "Director"),
    ));

    meta.videos = Some(parse_episodes(id, episodes));
    Some(meta)
}
