use metasearch_core::types::MediaKind;
use serde_json::{Value, json};

/// Static addon descriptor served at `/manifest.json`.
pub fn manifest() -> Value {
    json!({
        "id": "meta.search",
        "name": "Meta Search",
        "description": "Search for movies via TMDB and series via TVDB",
        "version": "1.0.0",
        "resources": ["catalog", "meta"],
        "types": [MediaKind::Movie, MediaKind::Series],
        "idPrefixes": ["tmdb:", "tvdb:"],
        "catalogs": [catalog(MediaKind::Movie, "TMDB"), catalog(MediaKind::Series, "TVDB")],
    })
}

fn catalog(kind: MediaKind, name: &str) -> Value {
    json!({
        "type": kind,
        "id": kind.catalog_id(),
        "name": name,
        "extra": [{ "name": "search", "isRequired": true }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_match_routes() {
        let m = manifest();
        assert_eq!(m["types"], json!(["movie", "series"]));
        assert_eq!(m["catalogs"][0]["id"], "meta_search_movie");
        assert_eq!(m["catalogs"][1]["type"], "series");
        assert_eq!(m["catalogs"][1]["extra"][0]["isRequired"], true);
    }
}
