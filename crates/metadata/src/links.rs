//! Deep links attached to detail records: genre discovery and people search.

use metasearch_core::meta::{LinkCategory, MetaLink};
use metasearch_core::types::MediaKind;

const DISCOVER_BASE: &str =
    "stremio:///discover/https%3A%2F%2Fv3-cinemeta.strem.io%2Fmanifest.json";
const SEARCH_BASE: &str = "stremio:///search?search=";

/// Maximum number of links per people category.
pub const MAX_PEOPLE_LINKS: usize = 5;

static MOVIE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "History",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

static SERIES_ONLY_GENRES: &[&str] = &["Reality-TV", "Talk-Show", "Game-Show"];

static MOVIE_CORRECTIONS: &[(&str, &str)] = &[("Science Fiction", "Sci-Fi")];

static SERIES_CORRECTIONS: &[(&str, &str)] = &[
    ("Science Fiction", "Sci-Fi"),
    ("Reality", "Reality-TV"),
    ("Talk Show", "Talk-Show"),
    ("Game Show", "Game-Show"),
];

/// Label the discovery catalog uses for an upstream genre, if it has one.
///
/// Series names are corrected before the allow-list check. Movie names are
/// checked as-is and only then relabelled.
pub fn genre_label(kind: MediaKind, upstream: &str) -> Option<&str> {
    match kind {
        MediaKind::Movie => MOVIE_GENRES
            .contains(&upstream)
            .then(|| correct(MOVIE_CORRECTIONS, upstream)),
        MediaKind::Series => {
            let label = correct(SERIES_CORRECTIONS, upstream);
            (MOVIE_GENRES.contains(&label) || SERIES_ONLY_GENRES.contains(&label))
                .then_some(label)
        }
    }
}

fn correct<'a>(corrections: &[(&str, &'a str)], upstream: &'a str) -> &'a str {
    corrections
        .iter()
        .find(|(from, _)| *from == upstream)
        .map_or(upstream, |(_, to)| *to)
}

/// Genre links for the allow-listed subset of `genres`, in upstream order.
///
/// The link carries the corrected label but the URL keeps the upstream name.
pub fn genre_links<'a>(kind: MediaKind, genres: impl IntoIterator<Item = &'a str>) -> Vec<MetaLink> {
    genres
        .into_iter()
        .filter_map(|upstream| {
            genre_label(kind, upstream).map(|label| MetaLink {
                name: label.to_string(),
                category: LinkCategory::Genres,
                url: format!("{DISCOVER_BASE}/{kind}/top?genre={upstream}"),
            })
        })
        .collect()
}

/// Name-search links for the first few `names`.
pub fn people_links<'a>(
    category: LinkCategory,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<MetaLink> {
    names
        .into_iter()
        .take(MAX_PEOPLE_LINKS)
        .map(|name| MetaLink {
            name: name.to_string(),
            category,
            url: format!("{SEARCH_BASE}{}", urlencoding::encode(name)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_sizes() {
        assert_eq!(MOVIE_GENRES.len(), 19);
        assert_eq!(MOVIE_GENRES.len() + SERIES_ONLY_GENRES.len(), 22);
    }

    #[test]
    fn unknown_genres_are_dropped() {
        let links = genre_links(MediaKind::Movie, ["Drama", "TV Movie", "Music", "Crime"]);
        let names: Vec<_> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Drama", "Crime"]);
    }

    #[test]
    fn movie_genres_are_checked_before_correction() {
        assert!(genre_links(MediaKind::Movie, ["Science Fiction"]).is_empty());
        assert_eq!(genre_label(MediaKind::Movie, "Sci-Fi"), Some("Sci-Fi"));
    }

    #[test]
    fn corrected_series_genre_keeps_upstream_name_in_url() {
        let links = genre_links(MediaKind::Series, ["Science Fiction"]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Sci-Fi");
        assert_eq!(
            links[0].url,
            "stremio:///discover/https%3A%2F%2Fv3-cinemeta.strem.io%2Fmanifest.json/series/top?genre=Science Fiction"
        );
    }

    #[test]
    fn series_only_genres_need_series_kind() {
        assert_eq!(genre_label(MediaKind::Series, "Reality"), Some("Reality-TV"));
        assert_eq!(genre_label(MediaKind::Series, "Talk Show"), Some("Talk-Show"));
        assert_eq!(genre_label(MediaKind::Series, "Game-Show"), Some("Game-Show"));
        assert_eq!(genre_label(MediaKind::Movie, "Reality"), None);
        assert_eq!(genre_label(MediaKind::Movie, "Reality-TV"), None);

        let links = genre_links(MediaKind::Series, ["Game Show"]);
        assert!(links[0].url.ends_with("/series/top?genre=Game Show"));
    }

    #[test]
    fn people_links_are_capped_and_encoded() {
        let names = ["A One", "B", "C", "D", "E", "F", "G"];
        let links = people_links(LinkCategory::Cast, names);
        assert_eq!(links.len(), MAX_PEOPLE_LINKS);
        assert_eq!(links[0].url, "stremio:///search?search=A%20One");
        assert!(links.iter().all(|l| l.category == LinkCategory::Cast));
    }
}
