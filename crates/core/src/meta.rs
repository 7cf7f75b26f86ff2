//! Canonical, provider-agnostic entities returned to addon clients.
//!
//! Field names are part of the client contract and serialize in camelCase.
//! Optional fields are omitted when absent.

use serde::Serialize;

use crate::types::MediaKind;

/// Compact entry in a catalog (search) response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaPreview {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MetaPreview {
    pub fn new(id: String, kind: MediaKind, name: String) -> Self {
        Self {
            id,
            kind,
            name,
            poster: None,
            background: None,
            logo: None,
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaBehaviorHints {
    pub has_scheduled_videos: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkCategory {
    Genres,
    Cast,
    Directors,
}

/// Cross-reference rendered by the client as a clickable chip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaLink {
    pub name: String,
    pub category: LinkCategory,
    pub url: String,
}

/// One episode of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaVideo {
    pub id: String,
    pub title: String,
    pub season: u32,
    pub episode: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Air timestamp, or an empty string when the upstream has no air date.
    pub released: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Full record for the detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDetail {
    #[serde(flatten)]
    pub preview: MetaPreview,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<MetaBehaviorHints>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<MetaLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<MetaVideo>>,
}

impl MetaDetail {
    pub fn new(preview: MetaPreview) -> Self {
        Self {
            preview,
            release_info: None,
            released: None,
            runtime: None,
            behavior_hints: None,
            links: Vec::new(),
            videos: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaPreviewsResponse {
    pub metas: Vec<MetaPreview>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaDetailResponse {
    pub meta: Option<MetaDetail>,
}
