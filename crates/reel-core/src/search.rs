//! Catalog search
//!
//! Matching is a case-insensitive substring test. Flagged videos never show
//! up in results, and results are ordered by their formatted display string
//! so that result numbers are stable for a given catalog.

use crate::{catalog::VideoCatalog, types::Video};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which part of a video a search term is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Tag,
}

impl SearchField {
    fn matches(&self, video: &Video, needle: &str) -> bool {
        match self {
            SearchField::Title => video.title.to_lowercase().contains(needle),
            SearchField::Tag => video
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle)),
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Tag => write!(f, "tag"),
        }
    }
}

/// Search the catalog, returning unflagged matches in display order
pub fn search(catalog: &VideoCatalog, term: &str, field: SearchField) -> Vec<Video> {
    let needle = term.to_lowercase();

    let mut results: Vec<Video> = catalog
        .videos()
        .filter(|video| !video.is_flagged())
        .filter(|video| field.matches(video, &needle))
        .cloned()
        .collect();
    results.sort_by_cached_key(|video| video.to_string());

    debug!(term, field = %field, results = results.len(), "Search complete");
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VideoCatalog {
        let mut flagged = Video::new("v3", "Cat Fails", vec!["funny".into()]);
        flagged.flag = Some("too mean".into());
        VideoCatalog::from_videos([
            Video::new("v2", "Another Cat Video", vec!["funny".into()]),
            Video::new("v1", "Amazing Cat Video", vec!["animal".into()]),
            flagged,
            Video::new("v4", "Dog Show", vec!["#Animal".into(), "#dog".into()]),
        ])
        .unwrap()
    }

    fn ids(videos: &[Video]) -> Vec<&str> {
        videos.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn test_title_search_sorted_and_unflagged() {
        let results = search(&catalog(), "cat", SearchField::Title);
        assert_eq!(ids(&results), ["v1", "v2"]);
    }

    #[test]
    fn test_title_search_is_case_insensitive() {
        let results = search(&catalog(), "CAT VIDEO", SearchField::Title);
        assert_eq!(ids(&results), ["v1", "v2"]);
    }

    #[test]
    fn test_tag_search_matches_substring_of_any_tag() {
        let results = search(&catalog(), "anim", SearchField::Tag);
        assert_eq!(ids(&results), ["v1", "v4"]);

        let results = search(&catalog(), "funny", SearchField::Tag);
        assert_eq!(ids(&results), ["v2"]);
    }

    #[test]
    fn test_no_results() {
        assert!(search(&catalog(), "blah", SearchField::Title).is_empty());
        assert!(search(&catalog(), "blah", SearchField::Tag).is_empty());
    }
}
