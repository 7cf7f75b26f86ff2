use serde::{Deserialize, Serialize};

/// Content type requested by the client, as it appears in route paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(Self::Movie),
            "series" => Some(Self::Series),
            _ => None,
        }
    }

    /// The upstream catalog that serves this kind.
    pub fn provider(self) -> Provider {
        match self {
            Self::Movie => Provider::Tmdb,
            Self::Series => Provider::Tvdb,
        }
    }

    /// Catalog id advertised in the manifest for this kind.
    pub fn catalog_id(self) -> &'static str {
        match self {
            Self::Movie => "meta_search_movie",
            Self::Series => "meta_search_series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream catalog service. Its name doubles as the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Tmdb,
    Tvdb,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tmdb => "tmdb",
            Self::Tvdb => "tvdb",
        }
    }

    /// Build a canonical `<provider>:<id>` identifier.
    pub fn meta_id(self, id: u64) -> String {
        format!("{}:{id}", self.as_str())
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
